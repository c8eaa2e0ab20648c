/*!
 * Batch translation processing.
 *
 * This module drives a markup translator over size-bounded batches, with
 * optional concurrency, a courtesy delay between call starts, progress
 * tracking, and fail-fast error handling. Results always come back in
 * submission order.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::errors::TranslationError;
use crate::providers::MarkupTranslator;

use super::chunking::{chunk_ranges, ChunkLimits};

/// Default pause between batch calls
pub const DEFAULT_BATCH_DELAY_MS: u64 = 50;

/// Batch translator for sending markup to a translator in chunks
pub struct BatchTranslator<'a> {
    /// The translator to use
    translator: &'a dyn MarkupTranslator,

    /// Batch size limits
    limits: ChunkLimits,

    /// Maximum number of batch calls in flight
    max_concurrent_requests: usize,

    /// Minimum spacing between the starts of two batch calls
    batch_delay_ms: u64,
}

/// Spaces call starts by a fixed delay, shared by every in-flight batch
struct CallPacer {
    delay: Duration,
    next_start: Mutex<Option<tokio::time::Instant>>,
}

impl CallPacer {
    fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            next_start: Mutex::new(None),
        }
    }

    /// Wait until this call may start. The first call never waits.
    async fn wait_turn(&self) {
        if self.delay.is_zero() {
            return;
        }

        // The lock is held while sleeping so later calls queue behind this one
        let mut next_start = self.next_start.lock().await;
        if let Some(at) = *next_start {
            tokio::time::sleep_until(at).await;
        }
        *next_start = Some(tokio::time::Instant::now() + self.delay);
    }
}

impl<'a> BatchTranslator<'a> {
    /// Create a sequential batch translator with default limits
    pub fn new(translator: &'a dyn MarkupTranslator) -> Self {
        Self {
            translator,
            limits: ChunkLimits::default(),
            max_concurrent_requests: 1,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }

    pub fn with_limits(mut self, limits: ChunkLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_concurrency(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self
    }

    pub fn with_delay(mut self, batch_delay_ms: u64) -> Self {
        self.batch_delay_ms = batch_delay_ms;
        self
    }

    /// Number of batches `texts` will be split into
    pub fn batch_count(&self, texts: &[String]) -> usize {
        chunk_ranges(texts, &self.limits).len()
    }

    /// Translate all texts, returning one result per input in input order.
    ///
    /// Consecutive call starts are at least `batch_delay_ms` apart, also when
    /// several batches are in flight at once.
    ///
    /// `progress_callback` receives `(completed_batches, total_batches)` after
    /// every successful batch. The first failing batch aborts the run.
    pub async fn translate_all<F>(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
        progress_callback: F,
    ) -> Result<Vec<String>, TranslationError>
    where
        F: Fn(usize, usize) + Sync,
    {
        let ranges = chunk_ranges(texts, &self.limits);
        let total_batches = ranges.len();
        if total_batches == 0 {
            return Ok(Vec::new());
        }

        debug!(
            "Translating {} texts in {} batches with {} ({} concurrent)",
            texts.len(),
            total_batches,
            self.translator.name(),
            self.max_concurrent_requests
        );

        let translator = self.translator;
        let pacer = CallPacer::new(self.batch_delay_ms);
        let pacer = &pacer;
        let processed_batches = AtomicUsize::new(0);
        let processed_batches = &processed_batches;
        let progress_callback = &progress_callback;

        let mut results = stream::iter(ranges.into_iter().enumerate())
            .map(|(batch_index, range)| async move {
                pacer.wait_turn().await;

                let batch = &texts[range];
                let start_time = Instant::now();
                let result = translator
                    .translate_markup(batch, source_language, target_language)
                    .await;

                match &result {
                    Ok(_) => {
                        debug!(
                            "Batch {} of {} ({} texts) completed in {:?}",
                            batch_index + 1,
                            total_batches,
                            batch.len(),
                            start_time.elapsed()
                        );
                        let current = processed_batches.fetch_add(1, Ordering::SeqCst) + 1;
                        progress_callback(current, total_batches);
                    }
                    Err(e) => error!("Batch {} of {} failed: {}", batch_index + 1, total_batches, e),
                }

                (batch_index, batch.len(), result)
            })
            .buffered(self.max_concurrent_requests);

        let mut translated = Vec::with_capacity(texts.len());

        while let Some((batch_index, expected, result)) = results.next().await {
            let batch_result = result?;
            if batch_result.len() != expected {
                error!(
                    "Batch {} returned {} texts, expected {}",
                    batch_index + 1,
                    batch_result.len(),
                    expected
                );
                return Err(TranslationError::BatchLengthMismatch {
                    batch: batch_index + 1,
                    expected,
                    actual: batch_result.len(),
                });
            }
            translated.extend(batch_result);
        }

        Ok(translated)
    }
}
