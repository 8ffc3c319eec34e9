use std::sync::Arc;
use std::time::Duration;
use wordtree::error::RunError;
use wordtree::run::{RunCoordinator, RunPhase};
use wordtree::source::{ByteSource, SourceEntry};

/// Content that takes a while to read.
#[derive(Debug)]
struct SlowSource {
    bytes: Vec<u8>,
    delay: Duration,
}

impl ByteSource for SlowSource {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read(&self) -> std::io::Result<Vec<u8>> {
        std::thread::sleep(self.delay);
        Ok(self.bytes.clone())
    }
}

fn slow_entry(path: &[&str], text: &str, delay_ms: u64) -> SourceEntry {
    SourceEntry::new(
        path.iter().copied(),
        Arc::new(SlowSource {
            bytes: text.as_bytes().to_vec(),
            delay: Duration::from_millis(delay_ms),
        }),
    )
}

async fn wait_for_phase(coordinator: &RunCoordinator, phase: RunPhase) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while coordinator.phase() != phase {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn completed_run_publishes_tree_and_statistics() {
    let coordinator = RunCoordinator::default();
    assert_eq!(coordinator.phase(), RunPhase::Idle);

    let report = coordinator
        .run(vec![
            SourceEntry::from_bytes(
                "lib/novels/a.txt",
                "It was a dark and stormy night".as_bytes().to_vec(),
            ),
            SourceEntry::from_bytes(
                "lib/novels/b.fb2",
                "<p>Call me Ishmael</p>".as_bytes().to_vec(),
            ),
            SourceEntry::from_bytes("lib/cover.jpg", vec![0u8; 64]),
        ])
        .await
        .unwrap();

    assert_eq!(coordinator.phase(), RunPhase::Complete);
    let stats = coordinator.statistics().unwrap();
    assert_eq!(stats, report.stats);
    assert_eq!(stats.total_words, 10);
    assert_eq!(stats.files, 3);
    assert_eq!(stats.folders, 2);
    assert_eq!(stats.estimated_reading_time, "under 1 minute");
    assert!(report.tree.is_aggregated());
}

#[tokio::test]
async fn empty_input_ends_in_failed_state() {
    let coordinator = RunCoordinator::default();
    let err = coordinator.run(Vec::new()).await.unwrap_err();
    assert!(matches!(err, RunError::EmptyInput));
    assert_eq!(coordinator.phase(), RunPhase::Failed);
    assert!(coordinator.phase().is_terminal());
    assert!(coordinator.statistics().is_none());

    coordinator.reset();
    assert_eq!(coordinator.phase(), RunPhase::Idle);
    assert!(coordinator.failure().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reset_during_run_discards_its_results() {
    let coordinator = Arc::new(RunCoordinator::default());
    let entries = vec![slow_entry(&["lib", "slow.txt"], "never published", 400)];

    let running = Arc::clone(&coordinator);
    let handle = tokio::spawn(async move { running.run(entries).await });

    wait_for_phase(&coordinator, RunPhase::Aggregating).await;
    coordinator.reset();

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(RunError::Superseded { .. })));
    assert_eq!(coordinator.phase(), RunPhase::Idle);
    assert!(coordinator.report().is_none());
    assert!(coordinator.statistics().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn newer_run_supersedes_older_one() {
    let coordinator = Arc::new(RunCoordinator::default());
    let first = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            coordinator
                .run(vec![slow_entry(&["old", "a.txt"], "old words here", 400)])
                .await
        })
    };
    wait_for_phase(&coordinator, RunPhase::Aggregating).await;

    let second = coordinator
        .run(vec![SourceEntry::from_bytes("new/b.txt", b"fresh".to_vec())])
        .await
        .unwrap();
    assert_eq!(second.tree.name, "new");

    assert!(matches!(first.await.unwrap(), Err(RunError::Superseded { .. })));
    let published = coordinator.report().unwrap();
    assert_eq!(published.tree.name, "new");
    assert_eq!(published.stats.total_words, 1);
}
