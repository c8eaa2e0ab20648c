/*!
 * Document translation pipeline.
 *
 * Extraction, encoding, batching, the translation call, decoding and
 * reconciliation, run over all items of a document in traversal order.
 */

pub mod orchestrator;

pub use orchestrator::{translate_document, PipelineConfig, PipelineReport, TranslationPipeline};
