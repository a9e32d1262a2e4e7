//! Supply Placer - Entry Point
//!
//! Loads an item catalog and a world layout, places starting supplies on every
//! main structure and prints what went where.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use supply_placer::catalog::DefinitionCatalog;
use supply_placer::core::error::Result;
use supply_placer::core::types::ContainerId;
use supply_placer::world::{LayoutLoader, World};
use supply_placer::{supply_main_structures, NetworkRole, PlacerConfig, RandSync};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Place starting supplies into the containers of a vessel layout
#[derive(Parser, Debug)]
#[command(name = "supply-placer")]
#[command(about = "Run automatic supply placement over catalog and layout fixtures")]
struct Args {
    /// Item catalog (TOML)
    #[arg(long, default_value = "data/catalog.toml")]
    catalog: PathBuf,

    /// World layout (TOML)
    #[arg(long, default_value = "data/layout.toml")]
    layout: PathBuf,

    /// Placer config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run (implies synced randomness)
    #[arg(long)]
    seed: Option<u64>,

    /// Participant role to run as
    #[arg(long, default_value = "single-player")]
    role: Role,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log a per-definition summary after each session
    #[arg(long)]
    debug_info: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Role {
    SinglePlayer,
    Server,
    Client,
}

impl From<Role> for NetworkRole {
    fn from(role: Role) -> Self {
        match role {
            Role::SinglePlayer => NetworkRole::SinglePlayer,
            Role::Server => NetworkRole::Server,
            Role::Client => NetworkRole::Client,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("supply_placer=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlacerConfig::load_file(path)?,
        None => PlacerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
        config.rand_sync = RandSync::Synced;
    }
    config.output_debug_info |= args.debug_info;
    config.validate()?;

    let mut catalog = DefinitionCatalog::new();
    catalog.load_file(&args.catalog)?;
    tracing::info!(
        "Loaded {} item definitions from {}",
        catalog.len(),
        args.catalog.display()
    );

    let mut world = LayoutLoader::new(&catalog).load_from_file(&args.layout)?;
    let items_before = world.items.len();

    let reports = supply_main_structures(args.role.into(), &catalog, &mut world, &config)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                let names: Vec<&str> = report
                    .structures
                    .iter()
                    .filter_map(|id| world.structures.get(*id))
                    .map(|s| s.name.as_str())
                    .collect();
                println!("=== {} ===", names.join(" + "));
                println!("{}", report.summary(&catalog));
                for stats in &report.passes {
                    println!(
                        "  {:?}: {}/{} definitions, {} units",
                        stats.pass, stats.succeeded, stats.attempted, stats.units
                    );
                }
                println!();
            }
            print_containers(&world, &catalog);
            println!(
                "Items: {} before, {} after",
                items_before,
                world.items.len()
            );
        }
    }

    Ok(())
}

fn print_containers(world: &World, catalog: &DefinitionCatalog) {
    let name_of = |id| {
        catalog
            .get(id)
            .map(|d| d.identifier.as_str())
            .unwrap_or("<unknown>")
    };

    println!("--- Container contents ---");
    for item in world.items.iter() {
        let Some(container) = item.container.as_ref() else {
            continue;
        };
        if container.contents().is_empty() {
            continue;
        }
        let contents: Vec<&str> = world
            .contents_of(ContainerId(item.id))
            .iter()
            .filter_map(|id| world.items.get(*id))
            .map(|i| name_of(i.definition))
            .collect();
        println!(
            "{} #{} ({}/{}): {}",
            name_of(item.definition),
            item.id.0,
            container.occupancy(),
            container.capacity,
            contents.join(", ")
        );
    }
}
