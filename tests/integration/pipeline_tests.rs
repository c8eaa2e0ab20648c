/*!
 * Integration tests for the document translation pipeline.
 *
 * Every test drives a whole document through the pipeline with a mock
 * translator standing in for the remote service.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use docxlate::document::{Cell, Document, Paragraph, Run, RunFormat};
use docxlate::errors::{ProviderError, TranslationError};
use docxlate::providers::mock::MockTranslator;
use docxlate::translation::chunking::ChunkLimits;
use docxlate::translation::glossary::GlossaryMap;
use docxlate::translation::{translate_document, PipelineConfig, TranslationPipeline};

use crate::common;

fn fast_pipeline(limits: ChunkLimits) -> TranslationPipeline {
    TranslationPipeline::new(PipelineConfig::new("ru", "kk").with_limits(limits).with_delay(0))
}

fn uppercase(markup: &str) -> String {
    markup.to_uppercase()
}

fn swap_world(markup: &str) -> String {
    markup.replace("world", "мир").replace("Hello", "Привет")
}

#[tokio::test]
async fn test_translate_withIdentityTranslator_shouldReproduceDocument() {
    common::init_logging();
    let original = common::sample_document();
    let mut document = original.clone();
    let translator = MockTranslator::identity();

    let report = translate_document(&mut document, &translator, "ru", "kk", true, None)
        .await
        .unwrap();

    assert_eq!(document, original);
    assert_eq!(report.total_items, 7);
    assert_eq!(report.translated_items, 7);
    assert_eq!(report.skipped_items, 0);
    assert_eq!(report.fallback_items, 0);
}

#[tokio::test]
async fn test_translate_withTransformingService_shouldKeepFormattingPerRun() {
    let mut document = Document::default();
    document.body.paragraphs.push(common::mixed_paragraph());
    let translator = MockTranslator::transform(swap_world);

    translate_document(&mut document, &translator, "en", "ru", false, None)
        .await
        .unwrap();

    assert_eq!(
        document.body.paragraphs[0].runs,
        vec![
            Run::plain("Привет "),
            Run::new("brave", RunFormat::bold()),
            Run::plain(" "),
            Run::new("new", RunFormat::italic()),
            Run::plain(" мир"),
        ]
    );
}

#[tokio::test]
async fn test_translate_withServiceChangingTagCase_shouldStillMatchRuns() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::new(vec![
        Run::new("bold", RunFormat::bold()),
        Run::plain(" plain"),
    ]));
    let translator = MockTranslator::transform(uppercase);

    let report = translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    assert_eq!(report.fallback_items, 0);
    assert_eq!(
        document.body.paragraphs[0].runs,
        vec![Run::new("BOLD", RunFormat::bold()), Run::plain(" PLAIN")]
    );
}

fn comparison(_: &str) -> String {
    r#"<span data-r="0">if x < y > z then</span>"#.to_string()
}

#[tokio::test]
async fn test_translate_withStrayAngleBracketsInResult_shouldKeepEveryCharacter() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::new(vec![Run::new("wenn", RunFormat::bold())]));
    let translator = MockTranslator::transform(comparison);

    let report = translate_document(&mut document, &translator, "de", "en", true, None)
        .await
        .unwrap();

    assert_eq!(report.fallback_items, 0);
    assert_eq!(
        document.body.paragraphs[0].runs,
        vec![Run::new("if x < y > z then", RunFormat::bold())]
    );
}

#[tokio::test]
async fn test_translate_withGlossary_shouldRestoreTargetTerm() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::plain("I love Paris"));
    let glossary: GlossaryMap = [("Paris", "Париж")].into_iter().collect();
    let translator = MockTranslator::identity();

    translate_document(&mut document, &translator, "en", "ru", true, Some(&glossary))
        .await
        .unwrap();

    let submitted = translator.batches().concat();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].contains("«Париж»"));
    assert!(!submitted[0].contains("Paris"));
    assert_eq!(document.body.paragraphs[0].text(), "I love Париж");
}

#[tokio::test]
async fn test_translate_withMultiParagraphCell_shouldRebuildPlainParagraphs() {
    let mut document = Document::default();
    document.body.tables.push(common::table(vec![Cell {
        paragraphs: vec![
            Paragraph::new(vec![Run::new("Hello", RunFormat::bold())]),
            Paragraph::new(vec![Run::new("World", RunFormat::italic())]),
        ],
    }]));
    let translator = MockTranslator::identity();

    translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    let cell = &document.body.tables[0].rows[0].cells[0];
    assert_eq!(cell.paragraphs, vec![Paragraph::plain("Hello"), Paragraph::plain("World")]);
}

#[tokio::test]
async fn test_translate_withEmptyItems_shouldLeaveThemUntouched() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::new(vec![Run::new("   ", RunFormat::bold())]));
    document.body.paragraphs.push(Paragraph::plain("Text"));
    document.body.paragraphs.push(Paragraph::new(Vec::new()));
    document.body.tables.push(common::table(vec![Cell::default()]));
    let original = document.clone();
    let translator = MockTranslator::transform(uppercase);

    let report = translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    assert_eq!(report.total_items, 4);
    assert_eq!(report.translated_items, 1);
    assert_eq!(report.skipped_items, 3);
    assert_eq!(translator.batches(), vec![vec![r#"<span data-r="0">Text</span>"#.to_string()]]);
    assert_eq!(document.body.paragraphs[0], original.body.paragraphs[0]);
    assert_eq!(document.body.paragraphs[1].text(), "TEXT");
    assert_eq!(document.body.paragraphs[2], original.body.paragraphs[2]);
    assert_eq!(document.body.tables, original.body.tables);
}

#[tokio::test]
async fn test_translate_withNothingToTranslate_shouldNotCallTranslator() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::plain(""));
    let translator = MockTranslator::failing();

    let report = translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    assert_eq!(translator.call_count(), 0);
    assert_eq!(report.batches, 0);
}

#[tokio::test]
async fn test_translate_withFailingTranslator_shouldLeaveDocumentUnchanged() {
    let original = common::sample_document();
    let mut document = original.clone();
    let translator = MockTranslator::failing();

    let result = translate_document(&mut document, &translator, "ru", "kk", true, None).await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. }))
    ));
    assert_eq!(document, original);
}

#[tokio::test]
async fn test_translate_withWrongLengthResult_shouldReportMismatch() {
    let original = common::sample_document();
    let mut document = original.clone();
    let translator = MockTranslator::drop_last();

    let result = fast_pipeline(ChunkLimits::new(10_000, 3))
        .translate(&translator, &mut document, None, |_, _| {})
        .await;

    match result {
        Err(TranslationError::BatchLengthMismatch { batch, expected, actual }) => {
            assert_eq!(batch, 1);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected BatchLengthMismatch, got {:?}", other),
    }
    assert_eq!(document, original);
}

#[tokio::test]
async fn test_translate_withSmallLimits_shouldSplitIntoOrderedBatches() {
    let mut document = common::sample_document();
    let translator = MockTranslator::identity();
    let completed = AtomicUsize::new(0);

    let report = fast_pipeline(ChunkLimits::new(10_000, 2))
        .translate(&translator, &mut document, None, |done, total| {
            assert_eq!(total, 4);
            completed.store(done, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(report.batches, 4);
    assert_eq!(completed.load(Ordering::SeqCst), 4);
    let sizes: Vec<usize> = translator.batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 2, 1]);
    assert_eq!(document, common::sample_document());
}

#[tokio::test]
async fn test_translate_withConcurrentBatches_shouldApplyResultsInDocumentOrder() {
    let original = common::sample_document();
    let mut document = original.clone();
    let translator = MockTranslator::slow(5);
    let pipeline = TranslationPipeline::new(
        PipelineConfig::new("ru", "kk")
            .with_limits(ChunkLimits::new(10_000, 1))
            .with_concurrency(4)
            .with_delay(0),
    );

    let report = pipeline
        .translate(&translator, &mut document, None, |_, _| {})
        .await
        .unwrap();

    assert_eq!(report.batches, 7);
    assert_eq!(document, original);
}

#[tokio::test]
async fn test_translate_withHeaderAndFooter_shouldTranslateSectionStories() {
    let mut document = common::sample_document();
    let translator = MockTranslator::transform(uppercase);

    translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    let section = &document.sections[0];
    let header = section.header.as_ref().unwrap();
    let footer = section.footer.as_ref().unwrap();
    assert_eq!(header.paragraphs[0].text(), "HEADER TEXT");
    assert_eq!(header.tables[0].rows[0].cells[0].text(), "HEADER CELL");
    assert_eq!(
        footer.paragraphs[0].runs,
        vec![Run::new("PAGE FOOTER", RunFormat::underline())]
    );
    assert_eq!(document.body.tables[0].rows[0].cells[0].text(), "HELLO\nWORLD");
}

#[tokio::test]
async fn test_translate_withCleanup_shouldNormalizeBeforeSubmitting() {
    let mut document = Document::default();
    document.body.paragraphs.push(Paragraph::plain("a\u{00A0}\u{00A0}b\u{200B}"));
    let translator = MockTranslator::identity();

    translate_document(&mut document, &translator, "en", "de", true, None)
        .await
        .unwrap();

    assert_eq!(translator.batches()[0][0], r#"<span data-r="0">a b</span>"#);
    assert_eq!(document.body.paragraphs[0].text(), "a b");
}
