use proptest::prelude::*;
use wordtree::aggregate::WordCountAggregator;
use wordtree::source::SourceEntry;
use wordtree::tree::{Node, TreeBuilder};
use wordtree::types::WordCount;

fn check_folder_sums(node: &Node) {
    if node.is_file() {
        return;
    }
    let expected: u64 = node.children.iter().map(|c| c.word_count.contribution()).sum();
    assert_eq!(
        node.word_count,
        WordCount::Counted(expected),
        "folder {:?} does not equal the sum of its children",
        node.path
    );
    for child in &node.children {
        check_folder_sums(child);
    }
}

fn documents() -> impl Strategy<Value = Vec<(String, usize)>> {
    prop::collection::btree_map(
        (
            "[a-d]{1,2}",
            prop::option::of("[e-g]{1,2}"),
            "[h-m]{1,3}",
            prop::sample::select(vec!["txt", "fb2", "rtf", "png"]),
        ),
        0usize..40,
        1..20,
    )
    .prop_map(|map| {
        map.into_iter()
            .map(|((dir, sub, file, ext), words)| {
                let path = match sub {
                    Some(sub) => format!("lib/{}/{}/{}.{}", dir, sub, file, ext),
                    None => format!("lib/{}/{}.{}", dir, file, ext),
                };
                (path, words)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn folder_counts_are_sums_of_children(docs in documents(), workers in 1usize..6) {
        let expected: u64 = docs
            .iter()
            .filter(|(path, _)| !path.ends_with(".png"))
            .map(|(_, words)| *words as u64)
            .sum();
        let entries = docs.iter().map(|(path, words)| {
            SourceEntry::from_bytes(path, "word ".repeat(*words).into_bytes())
        });
        let mut root = TreeBuilder::new().build(entries).unwrap().root;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let total = runtime.block_on(WordCountAggregator::new(workers).aggregate(&mut root));

        prop_assert_eq!(total, expected);
        check_folder_sums(&root);
        for node in root.iter().filter(|n| n.is_file()) {
            if node.name.ends_with(".png") {
                prop_assert_eq!(node.word_count, WordCount::Ineligible);
            } else {
                prop_assert!(node.word_count.is_resolved());
            }
        }
    }
}

#[tokio::test]
async fn worker_limit_does_not_change_totals() {
    let entries = || {
        (0..50).map(|i| {
            SourceEntry::from_bytes(
                &format!("lib/shelf{}/book{}.txt", i % 5, i),
                "one two three".as_bytes().to_vec(),
            )
        })
    };
    let mut serial = TreeBuilder::new().build(entries()).unwrap().root;
    let mut parallel = TreeBuilder::new().build(entries()).unwrap().root;
    let a = WordCountAggregator::new(1).aggregate(&mut serial).await;
    let b = WordCountAggregator::new(16).aggregate(&mut parallel).await;
    assert_eq!(a, 150);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_value(&serial).unwrap(),
        serde_json::to_value(&parallel).unwrap()
    );
}
