//! Game-mode state a placement run is invoked from

use serde::{Deserialize, Serialize};

/// Which participant of a round this process is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkRole {
    /// Not networked at all
    #[default]
    SinglePlayer,
    /// Authoritative host of a networked round
    Server,
    /// Non-authoritative participant
    Client,
}

impl NetworkRole {
    /// Only the authoritative participant may create items
    pub fn is_authoritative(&self) -> bool {
        matches!(self, NetworkRole::SinglePlayer | NetworkRole::Server)
    }

    pub fn is_client(&self) -> bool {
        matches!(self, NetworkRole::Client)
    }
}

/// Campaign progress relevant to supply placement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignState {
    /// Set once the starting supplies have been placed
    pub initial_supplies_spawned: bool,
}

/// The calling game mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameModeContext {
    pub role: NetworkRole,
    /// Present only in campaign modes; other modes place every round
    pub campaign: Option<CampaignState>,
}

impl GameModeContext {
    pub fn single_player() -> Self {
        Self::default()
    }

    pub fn campaign(role: NetworkRole) -> Self {
        Self {
            role,
            campaign: Some(CampaignState::default()),
        }
    }

    /// True if this context already received its starting supplies
    pub fn supplies_already_placed(&self) -> bool {
        self.campaign
            .as_ref()
            .map_or(false, |c| c.initial_supplies_spawned)
    }

    pub fn mark_supplies_placed(&mut self) {
        if let Some(campaign) = self.campaign.as_mut() {
            campaign.initial_supplies_spawned = true;
        }
    }
}
