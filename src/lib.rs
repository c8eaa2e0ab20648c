/*!
 * # docxlate
 *
 * Formatting-preserving translation of word-processing documents.
 *
 * ## Features
 *
 * - Encode formatted runs as lightweight HTML markup with run markers
 * - Translate through Google Cloud Translation v3 (HTML mode)
 * - Decode translated markup leniently and map text back onto the original formats
 * - Glossary protection of fixed terms
 * - Size-bounded batching with retries and optional concurrency
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * - `document`: Document model, JSON container and item traversal
 * - `translation`: The markup round trip and the document pipeline:
 *   - `translation::markup`: Run encoding and lenient decoding
 *   - `translation::reconcile`: Span to run reconciliation
 *   - `translation::glossary`: Term protection
 *   - `translation::chunking` / `translation::batch`: Batching
 *   - `translation::pipeline`: The orchestrator
 * - `providers`: Translation service clients (`google`, `mock`)
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{Document, Paragraph, Run, RunFormat};
pub use errors::{AppError, DocumentError, GlossaryError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use providers::MarkupTranslator;
pub use translation::{translate_document, GlossaryMap, PipelineConfig, TranslationPipeline};
