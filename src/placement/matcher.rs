//! Container preference matching

use super::services::ContainerInfo;
use crate::catalog::{PlacementRule, TagSet};

/// True if any of the container's tags is in `wanted`.
///
/// A rule with no tags configured targets no container.
pub fn matches(wanted: &TagSet, container: &ContainerInfo) -> bool {
    wanted.intersects(&container.tags)
}

/// Match against the primary or secondary tags of a rule
pub fn matches_rule(rule: &PlacementRule, use_primary: bool, container: &ContainerInfo) -> bool {
    matches(rule.tags(use_primary), container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ContainerId, ItemId, TagId};

    fn container(tags: &[u32]) -> ContainerInfo {
        ContainerInfo {
            id: ContainerId(ItemId(0)),
            tags: tags.iter().map(|t| TagId(*t)).collect(),
            auto_fill: true,
        }
    }

    fn tags(ids: &[u32]) -> TagSet {
        ids.iter().map(|t| TagId(*t)).collect()
    }

    #[test]
    fn test_any_shared_tag_matches() {
        assert!(matches(&tags(&[1, 2]), &container(&[2, 3])));
        assert!(!matches(&tags(&[1]), &container(&[2, 3])));
    }

    #[test]
    fn test_empty_tag_set_matches_nothing() {
        assert!(!matches(&TagSet::new(), &container(&[1, 2, 3])));
        assert!(!matches(&tags(&[1]), &container(&[])));
    }

    #[test]
    fn test_rule_side_selection() {
        let rule = PlacementRule::new(tags(&[1]), tags(&[5]), 1.0, 1, 1).unwrap();
        let cabinet = container(&[5]);
        assert!(!matches_rule(&rule, true, &cabinet));
        assert!(matches_rule(&rule, false, &cabinet));
    }
}
