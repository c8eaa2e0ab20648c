/*!
 * Translation service clients.
 *
 * This module contains the translator capability the pipeline depends on and
 * its implementations:
 * - Google: Cloud Translation v3 REST API, HTML mode
 * - Mock: scripted translator for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for markup translators
///
/// Implementations receive markup strings and must return exactly one
/// translated string per input, in the same order. Markup tags should be left
/// in place where the service supports it.
#[async_trait]
pub trait MarkupTranslator: Send + Sync + Debug {
    /// Translate a list of markup strings
    ///
    /// # Arguments
    /// * `texts` - Markup strings to translate
    /// * `source_language` - Source language code as understood by the service
    /// * `target_language` - Target language code as understood by the service
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - Translations in input order, or an error
    async fn translate_markup(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Short name used in log messages
    fn name(&self) -> &str;
}

pub mod google;
pub mod mock;
