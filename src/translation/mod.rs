/*!
 * Formatting-preserving document translation.
 *
 * This module contains the round trip from formatted runs to translated
 * runs. It is split into several submodules:
 *
 * - `markup`: Run encoding and lenient markup decoding
 * - `reconcile`: Rebuilding runs and cells from decoded spans
 * - `glossary`: Term protection and glossary loading
 * - `cleanup`: Optional run text normalization
 * - `chunking`: Size-bounded batching of request texts
 * - `batch`: Driving a translator over batches
 * - `pipeline`: The document-level orchestrator
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::chunking::{chunk_texts, ChunkLimits};
pub use self::glossary::GlossaryMap;
pub use self::pipeline::{translate_document, PipelineConfig, PipelineReport, TranslationPipeline};

// Submodules
pub mod batch;
pub mod chunking;
pub mod cleanup;
pub mod glossary;
pub mod markup;
pub mod pipeline;
pub mod reconcile;
