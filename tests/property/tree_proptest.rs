//! Property-based tests for the project tree aggregator

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use proptest::prelude::*;
use proptest::sample::Index;
use vizrelay::backend::projects::TreeAggregator;
use vizrelay::shared::{Node, RelayConfig};

use super::scripted::{credential, paused_runtime, ScriptedPlatform};

/// Parent index for every node; node `i` can only hang below an earlier node
fn parents() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(any::<Option<Index>>(), 0..28).prop_map(|picks| {
        picks
            .iter()
            .enumerate()
            .map(|(i, pick)| match pick {
                Some(index) if i > 0 => Some(index.index(i)),
                _ => None,
            })
            .collect()
    })
}

/// Every resolved node either matches the scripted children exactly or is a
/// failed listing turned leaf
fn check_subtree(
    node: &Node,
    platform: &ScriptedPlatform,
    seen: &mut usize,
) -> Result<(), TestCaseError> {
    *seen += 1;
    if platform.failing_children.contains(&node.id) {
        prop_assert!(node.children.is_empty());
        return Ok(());
    }

    let expected: Vec<&str> = platform
        .children
        .get(&node.id)
        .map(|children| children.iter().map(|child| child.id.as_str()).collect())
        .unwrap_or_default();
    let actual: Vec<&str> = node.children.iter().map(|child| child.id.as_str()).collect();
    prop_assert_eq!(actual, expected);

    for child in &node.children {
        prop_assert_eq!(child.parent_id.as_deref(), Some(node.id.as_str()));
        check_subtree(child, platform, seen)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_tree_mirrors_scripted_forest(parents in parents()) {
        let platform = ScriptedPlatform::forest(&parents);
        let config = RelayConfig::builder().build().unwrap();

        let tree = paused_runtime().block_on(async {
            TreeAggregator::new(&platform, &credential(), &config)
                .build(None)
                .await
                .unwrap()
        });

        let root_ids: Vec<&str> = tree.nested_projects.iter().map(|node| node.id.as_str()).collect();
        let expected_roots: Vec<&str> = platform.roots.iter().map(|node| node.id.as_str()).collect();
        prop_assert_eq!(root_ids, expected_roots);

        let mut seen = 0;
        for root in &tree.nested_projects {
            check_subtree(root, &platform, &mut seen)?;
        }
        prop_assert_eq!(seen, parents.len());
        prop_assert_eq!(platform.node_calls.load(Ordering::SeqCst), parents.len() + 1);
    }

    #[test]
    fn test_failed_listings_only_prune_their_subtree(
        parents in parents(),
        failures in prop::collection::vec(any::<Index>(), 0..4),
    ) {
        let mut platform = ScriptedPlatform::forest(&parents);
        if !parents.is_empty() {
            platform.failing_children = failures
                .iter()
                .map(|pick| format!("p{}", pick.index(parents.len())))
                .collect::<HashSet<_>>();
        }
        let config = RelayConfig::builder().build().unwrap();

        let tree = paused_runtime().block_on(async {
            TreeAggregator::new(&platform, &credential(), &config)
                .build(None)
                .await
                .unwrap()
        });

        prop_assert_eq!(tree.nested_projects.len(), platform.roots.len());
        let mut seen = 0;
        for root in &tree.nested_projects {
            check_subtree(root, &platform, &mut seen)?;
        }
        prop_assert!(seen <= parents.len());
    }
}
