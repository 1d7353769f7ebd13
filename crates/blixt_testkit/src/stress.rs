//! Stress helpers for concurrent ingestion.
//!
//! Every generated document contains the word `common`, so after a run its
//! term's field count must equal the number of documents ingested.

use blixt_core::{Index, Indexable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// The word every stress document contains.
pub const COMMON_WORD: &str = "common";

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total documents attempted.
    pub total_ops: usize,
    /// Documents ingested.
    pub successful_ops: usize,
    /// Documents that failed.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Documents per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Prints a summary of the run.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Documents: {}", self.total_ops);
        println!("Ingested: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} docs/sec", self.ops_per_second);
    }
}

/// Configuration for stress runs.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of documents to ingest.
    pub documents: usize,
    /// Number of concurrent threads (for concurrent runs).
    pub threads: usize,
    /// Number of distinct words besides the common one.
    pub vocabulary: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            documents: 1_000,
            threads: 4,
            vocabulary: 50,
        }
    }
}

/// Builds stress document `n` for an index with `name` and `age` columns.
pub fn stress_document(n: usize, config: &StressConfig) -> Indexable {
    let vocabulary = config.vocabulary.max(1);
    let name = format!(
        "{COMMON_WORD} w{} w{}",
        n % vocabulary,
        (n * 7 + 3) % vocabulary
    );
    Indexable::new(i64::try_from(n).unwrap_or(i64::MAX))
        .field("name", name)
        .field("age", i64::try_from(n % 100).unwrap_or_default())
}

/// Ingests the documents one after another.
pub fn stress_sequential_ingest(index: &Index, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for n in 0..config.documents {
        match index.add(&stress_document(n, config)) {
            Ok(_) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Ingests the documents from several threads sharing one index.
pub fn stress_concurrent_ingest(index: &Index, config: &StressConfig) -> StressTestResult {
    let successful = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let threads = config.threads.max(1);

    let start = Instant::now();

    thread::scope(|scope| {
        for t in 0..threads {
            let successful = &successful;
            let failed = &failed;
            scope.spawn(move || {
                for n in (t..config.documents).step_by(threads) {
                    match index.add(&stress_document(n, config)) {
                        Ok(_) => successful.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed.fetch_add(1, Ordering::Relaxed),
                    };
                }
            });
        }
    });

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}
