//! Batch preprocessing across many documents.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use gatemark_core::{load_post, rewrite_gate_blocks};
use napi_derive::napi;
use rayon::prelude::*;

/// A single document to preprocess.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown/MDX source.
    pub source: String,
}

/// Options for batch processing.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the rayon global pool.
    pub max_threads: Option<u32>,
    /// Split YAML frontmatter before preprocessing. Defaults to false.
    pub frontmatter: Option<bool>,
}

/// Result for a single document in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Output document (or body, with `frontmatter`); absent on failure.
    pub content: Option<String>,
    /// Number of gates rewritten.
    pub gate_count: u32,
    /// Rejection reason or failure message.
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of documents.
    pub total: u32,
    /// Documents with at least one gate rewritten.
    pub transformed: u32,
    /// Documents returned unchanged (no gates, or gates rejected).
    pub unchanged: u32,
    /// Documents that could not be loaded at all.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// All batch results plus statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Per-document results, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

#[derive(Default)]
struct Counters {
    transformed: AtomicU32,
    unchanged: AtomicU32,
    failed: AtomicU32,
}

fn process_input(input: BatchInput, frontmatter: bool, counters: &Counters) -> BatchResult {
    let outcome = if frontmatter {
        load_post(&input.source).map(|post| (post.body, post.gate_count, None))
    } else {
        Ok(match rewrite_gate_blocks(&input.source) {
            Ok(rewrite) => (rewrite.content, rewrite.gate_count, None),
            Err(err) => (input.source.clone(), 0, Some(err.to_string())),
        })
    };

    match outcome {
        Ok((content, gate_count, rejection)) => {
            let counter = if gate_count > 0 {
                &counters.transformed
            } else {
                &counters.unchanged
            };
            counter.fetch_add(1, Ordering::Relaxed);
            BatchResult {
                id: input.id,
                content: Some(content),
                gate_count: gate_count as u32,
                error: rejection,
            }
        }
        Err(err) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            BatchResult {
                id: input.id,
                content: None,
                gate_count: 0,
                error: Some(err.to_string()),
            }
        }
    }
}

/// Preprocesses many documents in parallel.
///
/// Each document is handled independently; one rejected or failing document
/// never affects another.
#[napi(js_name = "preprocessBatch")]
pub fn preprocess_batch(
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> napi::Result<BatchProcessingResult> {
    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let frontmatter = opts.frontmatter.unwrap_or(false);

    let pool = match opts.max_threads {
        Some(max_threads) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads as usize)
                .build()
                .map_err(|e| napi::Error::from_reason(format!("Thread pool error: {e}")))?,
        ),
        None => None,
    };

    let total = inputs.len() as u32;
    let counters = Counters::default();
    let run = |inputs: Vec<BatchInput>| -> Vec<BatchResult> {
        inputs
            .into_par_iter()
            .map(|input| process_input(input, frontmatter, &counters))
            .collect()
    };

    let results = match pool {
        Some(pool) => pool.install(|| run(inputs)),
        None => run(inputs),
    };

    Ok(BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            transformed: counters.transformed.load(Ordering::Relaxed),
            unchanged: counters.unchanged.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    })
}
