//! Interned tags
//!
//! Item identifiers and categories ("medcabinet", "weapon", "smgammo") are
//! interned once when a catalog is built. Matching then compares `TagId`s
//! instead of strings.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::TagId;

/// String interner for tags
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    by_name: AHashMap<String, TagId>,
    names: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a tag, returning the existing id if it was seen before.
    ///
    /// Tags are case-insensitive and trimmed.
    pub fn intern(&mut self, name: &str) -> TagId {
        let key = normalize(name);
        if let Some(id) = self.by_name.get(&key) {
            return *id;
        }
        let id = TagId(self.names.len() as u32);
        self.names.push(key.clone());
        self.by_name.insert(key, id);
        id
    }

    /// Intern every name and collect them into a set
    pub fn intern_set<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> TagSet {
        names
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .map(|n| self.intern(n))
            .collect()
    }

    /// Look up a tag without interning it
    pub fn get(&self, name: &str) -> Option<TagId> {
        self.by_name.get(&normalize(name)).copied()
    }

    /// Name of an interned tag
    pub fn name(&self, id: TagId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sorted, deduplicated set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagSet(Vec<TagId>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: TagId) {
        if let Err(pos) = self.0.binary_search(&tag) {
            self.0.insert(pos, tag);
        }
    }

    pub fn contains(&self, tag: TagId) -> bool {
        self.0.binary_search(&tag).is_ok()
    }

    /// True if the two sets share at least one tag.
    ///
    /// An empty set intersects nothing.
    pub fn intersects(&self, other: &TagSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = TagId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TagId> for TagSet {
    fn from_iter<I: IntoIterator<Item = TagId>>(iter: I) -> Self {
        let mut tags: Vec<TagId> = iter.into_iter().collect();
        tags.sort_unstable();
        tags.dedup();
        Self(tags)
    }
}
