/*!
 * Mock translator implementations for testing.
 *
 * This module provides a mock translator that simulates different behaviors:
 * - `MockTranslator::identity()` - Returns every text unchanged
 * - `MockTranslator::transform(f)` - Applies a function to every text
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::drop_last()` - Returns one text too few
 * - `MockTranslator::intermittent(n)` - Fails every nth call
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::MarkupTranslator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Returns the input unchanged
    Identity,
    /// Applies a function to every text
    Transform(fn(&str) -> String),
    /// Always fails with an error
    Failing,
    /// Returns every text but the last one
    DropLast,
    /// Fails intermittently (every Nth call)
    Intermittent { fail_every: usize },
    /// Sleeps before answering like `Identity`
    Slow { delay_ms: u64 },
}

/// Mock translator for testing pipeline behavior
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Call counter, shared between clones
    call_count: Arc<AtomicUsize>,
    /// Every batch received, in call order
    batches: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn transform(transform: fn(&str) -> String) -> Self {
        Self::new(MockBehavior::Transform(transform))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn drop_last() -> Self {
        Self::new(MockBehavior::DropLast)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Copy of every batch received so far
    pub fn batches(&self) -> Vec<Vec<String>> {
        match self.batches.lock() {
            Ok(batches) => batches.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, texts: &[String]) {
        let mut batches = match self.batches.lock() {
            Ok(batches) => batches,
            Err(poisoned) => poisoned.into_inner(),
        };
        batches.push(texts.to_vec());
    }
}

#[async_trait]
impl MarkupTranslator for MockTranslator {
    async fn translate_markup(
        &self,
        texts: &[String],
        _source_language: &str,
        _target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.record(texts);

        match self.behavior {
            MockBehavior::Identity => Ok(texts.to_vec()),

            MockBehavior::Transform(transform) => {
                Ok(texts.iter().map(|text| transform(text)).collect())
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated translator failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::DropLast => {
                let mut translated = texts.to_vec();
                translated.pop();
                Ok(translated)
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (call #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(texts.to_vec())
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(texts.to_vec())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
