/*!
 * Tests for the encode, decode and reconcile round trip
 */

use docxlate::document::{Cell, Paragraph, Rgb, Run, RunFormat};
use docxlate::translation::markup::{decode_spans, encode_cell, encode_runs, Span};
use docxlate::translation::reconcile::{rebuild_cell_paragraphs, reconcile_runs};

use crate::common;

fn round_trip(runs: &[Run]) -> Vec<Run> {
    reconcile_runs(runs, &decode_spans(&encode_runs(runs)))
}

#[test]
fn test_roundTrip_withNoRuns_shouldYieldNoRuns() {
    assert_eq!(encode_runs(&[]), "");
    assert!(round_trip(&[]).is_empty());
}

#[test]
fn test_roundTrip_withSingleFormattedRun_shouldKeepEveryAttribute() {
    let format = RunFormat {
        bold: true,
        underline: true,
        font_name: Some("Times New Roman".to_string()),
        font_size: Some(12.5),
        color: Some(Rgb([0x1F, 0x4E, 0x79])),
        style: Some("Strong".to_string()),
        ..Default::default()
    };
    let runs = vec![Run::new("Итого: 5 < 7 & 8 > 3", format)];

    assert_eq!(round_trip(&runs), runs);
}

#[test]
fn test_roundTrip_withMixedRuns_shouldReproduceRunForRun() {
    let runs = common::mixed_paragraph().runs;

    assert_eq!(round_trip(&runs), runs);
}

#[test]
fn test_decodeSpans_withExtraWrapping_shouldCoalesceSameRun() {
    let markup = r#"<b><span data-r="0">Bon</span></b><b><font dir="ltr"><span data-r="0">jour</span></font></b><span data-r="1"> !</span>"#;

    let spans = decode_spans(markup);

    assert_eq!(
        spans,
        vec![Span::new(Some(0), "Bonjour"), Span::new(Some(1), " !")]
    );
}

#[test]
fn test_reconcile_withTextOutsideMarkers_shouldProducePlainRuns() {
    let original = vec![Run::new("Hello", RunFormat::bold())];
    let markup = r#"Intro <span data-r="0">Hola</span> outro"#;

    let runs = reconcile_runs(&original, &decode_spans(markup));

    assert_eq!(
        runs,
        vec![
            Run::plain("Intro "),
            Run::new("Hola", RunFormat::bold()),
            Run::plain(" outro"),
        ]
    );
}

#[test]
fn test_reconcile_withUnknownRunId_shouldProducePlainRun() {
    let original = vec![Run::new("Hello", RunFormat::italic())];
    let markup = r#"<span data-r="9">Hola</span>"#;

    let runs = reconcile_runs(&original, &decode_spans(markup));

    assert_eq!(runs, vec![Run::plain("Hola")]);
}

#[test]
fn test_roundTrip_withEmptyRuns_shouldSkipThemWithoutShiftingIds() {
    let original = vec![
        Run::new("", RunFormat::bold()),
        Run::new("A", RunFormat::italic()),
        Run::plain(""),
        Run::new("B", RunFormat::underline()),
    ];

    let runs = round_trip(&original);

    assert_eq!(
        runs,
        vec![
            Run::new("A", RunFormat::italic()),
            Run::new("B", RunFormat::underline()),
        ]
    );
}

#[test]
fn test_cellRebuild_withTwoParagraphs_shouldYieldTwoPlainParagraphs() {
    let cell = Cell {
        paragraphs: vec![
            Paragraph::new(vec![Run::new("Hello", RunFormat::bold())]),
            Paragraph::plain("World"),
        ],
    };

    let markup = encode_cell(&cell);
    let paragraphs = rebuild_cell_paragraphs(&decode_spans(&markup), cell.paragraphs.first());

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text(), "Hello");
    assert_eq!(paragraphs[1].text(), "World");
    assert!(paragraphs
        .iter()
        .flat_map(|paragraph| paragraph.runs.iter())
        .all(|run| run.format.is_plain()));
}

#[test]
fn test_decodeSpans_withUnparseableMarkup_shouldKeepVisibleText() {
    let spans = decode_spans(r#"<span data-r="0">a</span> < b"#);

    let text: String = spans.iter().map(|span| span.text.as_str()).collect();
    assert_eq!(text, "a < b");
}
