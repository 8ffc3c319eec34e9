//! Run Coordinator
//!
//! One ingestion pass moves through `Idle -> Building -> Aggregating -> Complete`,
//! or `Idle -> Building -> Failed` when there is nothing to ingest. Starting a run
//! or resetting discards whatever the previous run produced.
//!
//! Every run gets a generation number. A run whose generation is no longer current
//! when it tries to publish (because of a reset or a newer run) drops its results
//! and returns [`RunError::Superseded`], so stale data is never published.

use crate::aggregate::WordCountAggregator;
use crate::error::RunError;
use crate::source::SourceEntry;
use crate::tree::{Node, TreeBuilder, TreeTally};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Reading speed used for the reading-time estimate.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 150;

/// Reading-time settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Format the time needed to read `words` at `words_per_minute`.
///
/// Under a minute prints `under 1 minute`; from 60 minutes on, hours and minutes;
/// from 24 hours on, days and hours.
pub fn format_reading_time(words: u64, words_per_minute: u32) -> String {
    let total_minutes = words / u64::from(words_per_minute.max(1));
    let total_hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if total_hours >= 24 {
        let days = total_hours / 24;
        let hours = total_hours % 24;
        if hours > 0 {
            format!("{} d {} h", days, hours)
        } else {
            format!("{} d", days)
        }
    } else if total_hours > 0 {
        format!("{} h {} min", total_hours, minutes)
    } else if minutes > 0 {
        format!("{} min", minutes)
    } else {
        "under 1 minute".to_string()
    }
}

/// Phase of the coordinator's current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Idle,
    Building,
    Aggregating,
    Complete,
    Failed,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Complete | RunPhase::Failed)
    }
}

/// Statistics of a completed run. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatistics {
    pub folders: u64,
    pub files: u64,
    pub total_size_bytes: u64,
    pub total_words: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
    pub estimated_reading_time: String,
}

/// Per-run timing and identity, created when a run starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: u64,
    pub started_at: DateTime<Utc>,
    started: Instant,
}

impl RunContext {
    pub fn start(run_id: u64) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Close the run. Folder/file/byte counts come from the build tally.
    pub fn finish(
        &self,
        tally: &TreeTally,
        total_words: u64,
        words_per_minute: u32,
    ) -> RunStatistics {
        RunStatistics {
            folders: tally.folders,
            files: tally.files,
            total_size_bytes: tally.total_size_bytes,
            total_words,
            started_at: self.started_at,
            finished_at: Utc::now(),
            elapsed_seconds: self.started.elapsed().as_secs_f64(),
            estimated_reading_time: format_reading_time(total_words, words_per_minute),
        }
    }
}

/// Finished tree and its statistics, shared read-only with consumers.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tree: Node,
    pub stats: RunStatistics,
}

#[derive(Debug)]
struct CoordinatorState {
    phase: RunPhase,
    report: Option<Arc<RunReport>>,
    failure: Option<String>,
}

impl CoordinatorState {
    fn idle() -> Self {
        Self {
            phase: RunPhase::Idle,
            report: None,
            failure: None,
        }
    }
}

/// Drives tree building and aggregation for one run at a time.
#[derive(Debug)]
pub struct RunCoordinator {
    builder: TreeBuilder,
    aggregator: WordCountAggregator,
    words_per_minute: u32,
    state: RwLock<CoordinatorState>,
    generation: AtomicU64,
}

impl Default for RunCoordinator {
    fn default() -> Self {
        Self::new(WordCountAggregator::default(), ReadingConfig::default())
    }
}

impl RunCoordinator {
    pub fn new(aggregator: WordCountAggregator, reading: ReadingConfig) -> Self {
        Self {
            builder: TreeBuilder::new(),
            aggregator,
            words_per_minute: reading.words_per_minute.max(1),
            state: RwLock::new(CoordinatorState::idle()),
            generation: AtomicU64::new(0),
        }
    }

    /// Use a differently configured tree builder.
    pub fn with_builder(mut self, builder: TreeBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.state.read().phase
    }

    /// Report of the last completed run, if it is still current.
    pub fn report(&self) -> Option<Arc<RunReport>> {
        self.state.read().report.clone()
    }

    pub fn statistics(&self) -> Option<RunStatistics> {
        self.state.read().report.as_ref().map(|r| r.stats.clone())
    }

    /// Failure message of the last run when it ended in `Failed`.
    pub fn failure(&self) -> Option<String> {
        self.state.read().failure.clone()
    }

    /// Return to `Idle`, discarding the tree, statistics and any in-flight run.
    pub fn reset(&self) {
        let mut state = self.state.write();
        let superseded = self.generation.fetch_add(1, Ordering::SeqCst);
        *state = CoordinatorState::idle();
        info!(superseded_run = superseded, "Coordinator reset");
    }

    /// Start a new generation from `Idle`; returns its id.
    fn begin(&self) -> u64 {
        let mut state = self.state.write();
        let run_id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state = CoordinatorState::idle();
        run_id
    }

    /// Apply `update` if `run_id` is still the current generation.
    fn advance<F>(&self, run_id: u64, update: F) -> Result<(), RunError>
    where
        F: FnOnce(&mut CoordinatorState),
    {
        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != run_id {
            warn!(run_id, "Discarding results of a superseded run");
            return Err(RunError::Superseded { run_id });
        }
        update(&mut state);
        Ok(())
    }

    /// Run one ingestion pass over `entries`.
    pub async fn run<I>(&self, entries: I) -> Result<Arc<RunReport>, RunError>
    where
        I: IntoIterator<Item = SourceEntry>,
    {
        let run_id = self.begin();
        let context = RunContext::start(run_id);
        self.advance(run_id, |s| s.phase = RunPhase::Building)?;
        info!(run_id, "Building tree");

        let built = match self.builder.build(entries) {
            Ok(built) => built,
            Err(e) => {
                let err = RunError::from(e);
                let message = err.to_string();
                self.advance(run_id, |s| {
                    s.phase = RunPhase::Failed;
                    s.failure = Some(message);
                })?;
                warn!(run_id, error = %err, "Run failed");
                return Err(err);
            }
        };

        self.advance(run_id, |s| s.phase = RunPhase::Aggregating)?;
        info!(
            run_id,
            folders = built.tally.folders,
            files = built.tally.files,
            "Aggregating word counts"
        );

        let mut root = built.root;
        let total_words = self.aggregator.aggregate(&mut root).await;
        let stats = context.finish(&built.tally, total_words, self.words_per_minute);
        let report = Arc::new(RunReport { tree: root, stats });

        let published = Arc::clone(&report);
        self.advance(run_id, move |s| {
            s.phase = RunPhase::Complete;
            s.report = Some(published);
        })?;
        info!(
            run_id,
            total_words = report.stats.total_words,
            elapsed_seconds = report.stats.elapsed_seconds,
            "Run complete"
        );
        Ok(report)
    }
}
