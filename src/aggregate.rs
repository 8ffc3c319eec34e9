//! Word-Count Aggregator
//!
//! Counting runs in two phases. Every countable file is counted on the blocking
//! pool, with at most `max_workers` counts in flight, and all of them are joined
//! before anything is summed. Then a post-order pass sets each folder's count to
//! the sum of its children, treating absent counts as zero.

use crate::archive;
use crate::extract;
use crate::format::FileClass;
use crate::source::ByteSource;
use crate::tree::node::Node;
use crate::types::WordCount;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Aggregation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Concurrent file counts; `None` uses the available parallelism.
    #[serde(default)]
    pub max_workers: Option<usize>,
}

/// One file waiting to be counted.
struct CountJob {
    /// Child indices from the root down to the file.
    position: Vec<usize>,
    display_path: String,
    class: FileClass,
    source: Option<Arc<dyn ByteSource>>,
}

/// Counts files concurrently and rolls the counts up into folders.
#[derive(Debug, Clone)]
pub struct WordCountAggregator {
    max_workers: usize,
}

impl Default for WordCountAggregator {
    fn default() -> Self {
        Self::new(default_workers())
    }
}

/// Worker count matching the machine's available parallelism.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl WordCountAggregator {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    pub fn from_config(config: &AggregationConfig) -> Self {
        Self::new(config.max_workers.unwrap_or_else(default_workers))
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Count every eligible file, then sum folders bottom-up. Returns the root's total.
    pub async fn aggregate(&self, root: &mut Node) -> u64 {
        let started = Instant::now();
        let mut jobs = Vec::new();
        collect_jobs(root, &mut Vec::new(), &mut jobs);
        let job_count = jobs.len();

        let results = self.count_all(&jobs).await;
        for (job, count) in jobs.iter().zip(results) {
            node_at_mut(root, &job.position).word_count = count;
        }

        let total = roll_up(root);
        info!(
            files_counted = job_count,
            total_words = total,
            workers = self.max_workers,
            duration_ms = started.elapsed().as_millis() as u64,
            "Word count aggregation completed"
        );
        total
    }

    /// Count all jobs on a bounded pool. Results are indexed like `jobs`; a job whose
    /// worker failed resolves to [`WordCount::Unknown`].
    async fn count_all(&self, jobs: &[CountJob]) -> Vec<WordCount> {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut set = JoinSet::new();

        for (slot, job) in jobs.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let class = job.class;
            let source = job.source.clone();
            let path = job.display_path.clone();
            set.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = tokio::task::spawn_blocking(move || {
                    count_file(&path, class, source.as_deref())
                })
                .await;
                (slot, outcome)
            });
        }

        let mut results = vec![WordCount::Unknown; jobs.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((slot, Ok(count))) => results[slot] = count,
                Ok((slot, Err(e))) => {
                    error!(path = %jobs[slot].display_path, error = %e, "Word count worker failed");
                }
                Err(e) => {
                    error!(error = %e, "Word count task failed");
                }
            }
        }
        results
    }
}

fn collect_jobs(node: &Node, position: &mut Vec<usize>, jobs: &mut Vec<CountJob>) {
    for (index, child) in node.children.iter().enumerate() {
        position.push(index);
        if child.is_folder() {
            collect_jobs(child, position, jobs);
        } else if let Some(class) = child.class.filter(FileClass::is_countable) {
            jobs.push(CountJob {
                position: position.clone(),
                display_path: child.path.join("/"),
                class,
                source: child.source.clone(),
            });
        }
        position.pop();
    }
}

fn node_at_mut<'a>(root: &'a mut Node, position: &[usize]) -> &'a mut Node {
    let mut current = root;
    for &index in position {
        current = &mut current.children[index];
    }
    current
}

/// Count one file's words according to its class.
pub fn count_file(path: &str, class: FileClass, source: Option<&dyn ByteSource>) -> WordCount {
    if class == FileClass::Inert {
        return WordCount::Ineligible;
    }
    let Some(source) = source else {
        warn!(path, "No content available for file");
        return WordCount::Unknown;
    };
    match class {
        FileClass::Inert => WordCount::Ineligible,
        FileClass::Document(format) => match extract::extract_from_source(source, format) {
            Ok(words) => {
                debug!(path, words, "Counted document");
                WordCount::Counted(words)
            }
            Err(e) => {
                warn!(path, error = %e, "Failed to count document");
                WordCount::Unknown
            }
        },
        FileClass::Archive => match source.read() {
            Ok(bytes) => {
                let count = WordCount::from(archive::expand_archive(&bytes));
                debug!(path, words = ?count.value(), "Counted archive");
                count
            }
            Err(e) => {
                warn!(path, error = %e, "Failed to read archive");
                WordCount::Unknown
            }
        },
    }
}

/// Post-order folder summation. Files keep their counts; every folder gets the sum
/// of its children. Returns the node's own contribution.
pub fn roll_up(node: &mut Node) -> u64 {
    if node.is_file() {
        return node.word_count.contribution();
    }
    let total = node.children.iter_mut().map(roll_up).sum();
    node.word_count = WordCount::Counted(total);
    total
}
