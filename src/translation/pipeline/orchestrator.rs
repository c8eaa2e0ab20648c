/*!
 * Pipeline orchestrator for document translation.
 *
 * The orchestrator runs every stage over the document's items in traversal
 * order:
 * 1. Extraction: snapshot items, optionally clean their run text
 * 2. Encoding: runs to markup, glossary protection, empty-item filtering
 * 3. Translation: size-bounded batches sent to the translator
 * 4. Reconstruction: glossary restoration, decoding, formatting reconciliation
 *
 * Every reconstruction is computed before the document is touched, so a
 * failing run leaves the document exactly as it was.
 */

use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::document::{Cell, Document, ItemMut, ItemRef, Paragraph, Run};
use crate::errors::{DocumentError, TranslationError};
use crate::providers::MarkupTranslator;
use crate::translation::batch::{BatchTranslator, DEFAULT_BATCH_DELAY_MS};
use crate::translation::chunking::ChunkLimits;
use crate::translation::cleanup::normalize_runs;
use crate::translation::glossary::GlossaryMap;
use crate::translation::markup::{decode_markup, encode_cell, encode_paragraph};
use crate::translation::reconcile::{rebuild_cell_paragraphs, reconcile_runs};

/// Configuration for the translation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source language code passed to the translator
    pub source_language: String,

    /// Target language code passed to the translator
    pub target_language: String,

    /// Whether to normalize run text before encoding
    pub cleanup: bool,

    /// Batch size limits
    pub limits: ChunkLimits,

    /// Maximum number of batch calls in flight
    pub max_concurrent_requests: usize,

    /// Minimum spacing in milliseconds between batch call starts
    pub batch_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_language: "ru".to_string(),
            target_language: "kk".to_string(),
            cleanup: true,
            limits: ChunkLimits::default(),
            max_concurrent_requests: 1,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration.
    pub fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            ..Default::default()
        }
    }

    /// Enable or disable text cleanup.
    pub fn with_cleanup(mut self, enabled: bool) -> Self {
        self.cleanup = enabled;
        self
    }

    pub fn with_limits(mut self, limits: ChunkLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_concurrency(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests;
        self
    }

    pub fn with_delay(mut self, batch_delay_ms: u64) -> Self {
        self.batch_delay_ms = batch_delay_ms;
        self
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// Items found in the document
    pub total_items: usize,

    /// Items sent for translation and written back
    pub translated_items: usize,

    /// Items left untouched because they have no visible text
    pub skipped_items: usize,

    /// Batch calls made
    pub batches: usize,

    /// Items whose translation could not be parsed and lost formatting
    pub fallback_items: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl PipelineReport {
    /// Get a summary of the run.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("Duration: {:.2}s", self.duration.as_secs_f32()),
            format!(
                "Translated: {} of {} items in {} batches",
                self.translated_items, self.total_items, self.batches
            ),
        ];
        if self.skipped_items > 0 {
            parts.push(format!("Skipped: {} empty items", self.skipped_items));
        }
        if self.fallback_items > 0 {
            parts.push(format!("Plain-text fallback: {} items", self.fallback_items));
        }
        parts.join(" | ")
    }
}

/// Owned copy of an item taken before translation.
#[derive(Debug, Clone)]
enum Snapshot {
    Paragraph(Paragraph),
    Cell(Cell),
}

impl Snapshot {
    fn capture(item: &ItemRef<'_>, cleanup: bool) -> Self {
        match item {
            ItemRef::Paragraph(paragraph) => Snapshot::Paragraph(clean_paragraph(paragraph, cleanup)),
            ItemRef::Cell(cell) => Snapshot::Cell(Cell {
                paragraphs: cell
                    .paragraphs
                    .iter()
                    .map(|paragraph| clean_paragraph(paragraph, cleanup))
                    .collect(),
            }),
        }
    }

    fn has_visible_text(&self) -> bool {
        let text = match self {
            Snapshot::Paragraph(paragraph) => paragraph.text(),
            Snapshot::Cell(cell) => cell.text(),
        };
        !text.trim().is_empty()
    }

    fn encode(&self) -> String {
        match self {
            Snapshot::Paragraph(paragraph) => encode_paragraph(paragraph),
            Snapshot::Cell(cell) => encode_cell(cell),
        }
    }
}

fn clean_paragraph(paragraph: &Paragraph, cleanup: bool) -> Paragraph {
    if !cleanup {
        return paragraph.clone();
    }
    Paragraph {
        runs: normalize_runs(&paragraph.runs),
        properties: paragraph.properties.clone(),
    }
}

/// New content for one item.
#[derive(Debug)]
enum Reconstruction {
    Runs(Vec<Run>),
    Paragraphs(Vec<Paragraph>),
}

/// The main document translation pipeline.
pub struct TranslationPipeline {
    config: PipelineConfig,
}

impl TranslationPipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline with default configuration for the given languages.
    pub fn for_languages(source_language: &str, target_language: &str) -> Self {
        Self::new(PipelineConfig::new(source_language, target_language))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate a document in place.
    ///
    /// `progress_callback` receives `(completed_batches, total_batches)`.
    pub async fn translate<F>(
        &self,
        translator: &dyn MarkupTranslator,
        document: &mut Document,
        glossary: Option<&GlossaryMap>,
        progress_callback: F,
    ) -> Result<PipelineReport, TranslationError>
    where
        F: Fn(usize, usize) + Sync,
    {
        let start_time = Instant::now();
        let glossary = glossary.filter(|glossary| !glossary.is_empty());

        // Extraction
        let snapshots: Vec<Snapshot> = document
            .items()
            .iter()
            .map(|item| Snapshot::capture(item, self.config.cleanup))
            .collect();
        let total_items = snapshots.len();

        // Encoding
        let mut submitted = Vec::new();
        let mut markups = Vec::new();
        for (index, snapshot) in snapshots.iter().enumerate() {
            if !snapshot.has_visible_text() {
                continue;
            }
            let markup = snapshot.encode();
            let markup = match glossary {
                Some(glossary) => glossary.protect(&markup),
                None => markup,
            };
            submitted.push(index);
            markups.push(markup);
        }

        let mut report = PipelineReport {
            total_items,
            skipped_items: total_items - submitted.len(),
            ..Default::default()
        };

        if markups.is_empty() {
            info!("No translatable text in {} items, nothing to do", total_items);
            report.duration = start_time.elapsed();
            return Ok(report);
        }

        info!(
            "Translating {} of {} items ({} -> {})",
            markups.len(),
            total_items,
            self.config.source_language,
            self.config.target_language
        );

        // Translation
        let batcher = BatchTranslator::new(translator)
            .with_limits(self.config.limits)
            .with_concurrency(self.config.max_concurrent_requests)
            .with_delay(self.config.batch_delay_ms);
        report.batches = batcher.batch_count(&markups);

        let translated = batcher
            .translate_all(
                &markups,
                &self.config.source_language,
                &self.config.target_language,
                progress_callback,
            )
            .await?;

        // Reconstruction
        let mut reconstructions: Vec<Option<Reconstruction>> =
            (0..total_items).map(|_| None).collect();

        for (&index, markup) in submitted.iter().zip(translated.iter()) {
            let markup = match glossary {
                Some(glossary) => glossary.restore(markup),
                None => markup.clone(),
            };
            let decoded = decode_markup(&markup);
            if decoded.fallback {
                report.fallback_items += 1;
                warn!("Item {} came back as unparseable markup, formatting dropped", index + 1);
            }

            let reconstruction = match &snapshots[index] {
                Snapshot::Paragraph(paragraph) => {
                    Reconstruction::Runs(reconcile_runs(&paragraph.runs, &decoded.spans))
                }
                Snapshot::Cell(cell) => Reconstruction::Paragraphs(rebuild_cell_paragraphs(
                    &decoded.spans,
                    cell.paragraphs.first(),
                )),
            };
            reconstructions[index] = Some(reconstruction);
        }

        // Write-back
        let items = document.items_mut();
        if items.len() != total_items {
            return Err(TranslationError::Document(DocumentError::StructureChanged {
                extracted: total_items,
                found: items.len(),
            }));
        }

        for (item, reconstruction) in items.into_iter().zip(reconstructions) {
            match (item, reconstruction) {
                (ItemMut::Paragraph(paragraph), Some(Reconstruction::Runs(runs))) => {
                    paragraph.runs = runs;
                    report.translated_items += 1;
                }
                (ItemMut::Cell(cell), Some(Reconstruction::Paragraphs(paragraphs))) => {
                    cell.paragraphs = paragraphs;
                    report.translated_items += 1;
                }
                (_, None) => {}
                (_, Some(_)) => {
                    debug!("Item kind changed between extraction and write-back");
                    return Err(TranslationError::Document(DocumentError::StructureChanged {
                        extracted: total_items,
                        found: total_items,
                    }));
                }
            }
        }

        report.duration = start_time.elapsed();
        info!("{}", report.summary());
        Ok(report)
    }
}

/// Translate a document in place with default batching.
pub async fn translate_document(
    document: &mut Document,
    translator: &dyn MarkupTranslator,
    source_language: &str,
    target_language: &str,
    cleanup: bool,
    glossary: Option<&GlossaryMap>,
) -> Result<PipelineReport, TranslationError> {
    let pipeline = TranslationPipeline::new(
        PipelineConfig::new(source_language, target_language).with_cleanup(cleanup),
    );
    pipeline
        .translate(translator, document, glossary, |_, _| {})
        .await
}
