/*!
 * Formatting reconciliation.
 *
 * Rebuilds paragraph and cell content from decoded spans, cloning the
 * formatting of the original run each span points back to.
 */

use log::debug;

use crate::document::{Paragraph, Run, RunFormat};
use crate::translation::markup::Span;

/// Rebuild a paragraph's run list from decoded spans.
///
/// `original` is the paragraph's run list as it was encoded; span origins
/// index into its non-empty runs. Spans without a usable origin become plain
/// runs.
pub fn reconcile_runs(original: &[Run], spans: &[Span]) -> Vec<Run> {
    let formats: Vec<&RunFormat> = original
        .iter()
        .filter(|run| !run.text.is_empty())
        .map(|run| &run.format)
        .collect();

    let mut runs = Vec::with_capacity(spans.len());
    for span in spans.iter().filter(|span| !span.text.is_empty()) {
        let format = match span.origin {
            Some(id) => match formats.get(id) {
                Some(format) => (*format).clone(),
                None => {
                    debug!("Run id {} is out of range ({} runs), using plain run", id, formats.len());
                    RunFormat::default()
                }
            },
            None => RunFormat::default(),
        };
        runs.push(Run::new(span.text.clone(), format));
    }
    runs
}

/// Rebuild a paragraph in place: properties stay, runs are replaced.
pub fn reconcile_paragraph(paragraph: &Paragraph, spans: &[Span]) -> Paragraph {
    Paragraph {
        runs: reconcile_runs(&paragraph.runs, spans),
        properties: paragraph.properties.clone(),
    }
}

/// Rebuild a cell's paragraphs from decoded spans.
///
/// Run formatting is not carried into cells: the span texts are joined, split
/// on newlines, and each line becomes one plain paragraph. The first paragraph
/// keeps the properties of `template`, normally the cell's original first
/// paragraph.
pub fn rebuild_cell_paragraphs(spans: &[Span], template: Option<&Paragraph>) -> Vec<Paragraph> {
    let text: String = spans.iter().map(|span| span.text.as_str()).collect();

    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let mut paragraph = Paragraph::plain(line);
            if index == 0 {
                if let Some(template) = template {
                    paragraph.properties = template.properties.clone();
                }
            }
            paragraph
        })
        .collect()
}
