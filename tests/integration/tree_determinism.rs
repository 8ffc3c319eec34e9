use proptest::prelude::*;
use std::cmp::Ordering;
use wordtree::source::SourceEntry;
use wordtree::tree::node::sibling_order;
use wordtree::tree::{Node, TreeBuilder};

fn entry_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(
        (
            "[a-cA-Cé]{1,2}",
            prop::option::of("[a-cÉ]{1,3}"),
            "[a-zA-Z]{1,4}",
            prop::sample::select(vec!["txt", "fb2", "png", "zip"]),
        ),
        1..24,
    )
    .prop_map(|set| {
        set.into_iter()
            .map(|(dir, sub, file, ext)| match sub {
                Some(sub) => format!("root/{}/{}/{}.{}", dir, sub, file, ext),
                None => format!("root/{}/{}.{}", dir, file, ext),
            })
            .collect()
    })
}

fn build(paths: &[String]) -> Node {
    TreeBuilder::new()
        .build(
            paths
                .iter()
                .map(|p| SourceEntry::from_bytes(p, p.as_bytes().to_vec())),
        )
        .unwrap()
        .root
}

fn assert_siblings_sorted(node: &Node) {
    for pair in node.children.windows(2) {
        assert_ne!(
            sibling_order(&pair[0], &pair[1]),
            Ordering::Greater,
            "{} sorted after {}",
            pair[0].name,
            pair[1].name
        );
    }
    for child in &node.children {
        assert_siblings_sorted(child);
    }
}

proptest! {
    #[test]
    fn tree_shape_is_independent_of_input_order(
        (paths, shuffled) in entry_paths().prop_flat_map(|paths| {
            let shuffled = Just(paths.clone()).prop_shuffle();
            (Just(paths), shuffled)
        })
    ) {
        let a = serde_json::to_value(build(&paths)).unwrap();
        let b = serde_json::to_value(build(&shuffled)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_folder_lists_folders_first_then_sorted_names(paths in entry_paths()) {
        let root = build(&paths);
        assert_siblings_sorted(&root);
        prop_assert_eq!(root.file_count(), paths.len() as u64);
    }
}

#[test]
fn leaf_count_and_size_match_input() {
    let entries = vec![
        SourceEntry::from_bytes("lib/a/b/c.txt", b"12345".to_vec()),
        SourceEntry::from_bytes("lib/a/d.fb2", b"123".to_vec()),
        SourceEntry::from_bytes("lib/e.png", vec![0u8; 100]),
    ];
    let built = TreeBuilder::new().build(entries).unwrap();
    assert_eq!(built.tally.files, 3);
    assert_eq!(built.root.file_count(), 3);
    assert_eq!(built.tally.total_size_bytes, 108);
    assert_eq!(built.root.total_size(), 108);
    assert_eq!(built.tally.folders, built.root.folder_count());
    assert_eq!(built.tally.folders, 3);
}

#[test]
fn accented_and_cased_names_collate_like_a_dictionary() {
    let root = build(&[
        "r/zebra.txt".to_string(),
        "r/Éclair.txt".to_string(),
        "r/apple.txt".to_string(),
        "r/eclair.txt".to_string(),
        "r/Banana.txt".to_string(),
    ]);
    let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["apple.txt", "Banana.txt", "eclair.txt", "Éclair.txt", "zebra.txt"]
    );
}
