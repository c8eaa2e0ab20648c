/*!
 * Run encoder: formatted runs to tagged markup.
 */

use crate::document::{Cell, Paragraph, Run};

use super::{escape_text, LINE_BREAK, RUN_ID_ATTRIBUTE, RUN_MARKER_TAG};

/// Encode a run sequence as markup.
///
/// Empty runs are skipped and do not consume an id; ids count non-empty runs
/// from 0 in order.
pub fn encode_runs(runs: &[Run]) -> String {
    let mut markup = String::new();

    for (run_id, run) in runs.iter().filter(|run| !run.text.is_empty()).enumerate() {
        let format = &run.format;
        let mut closing = String::new();

        if format.bold {
            markup.push_str("<b>");
            closing.insert_str(0, "</b>");
        }
        if format.italic {
            markup.push_str("<i>");
            closing.insert_str(0, "</i>");
        }
        if format.underline {
            markup.push_str("<u>");
            closing.insert_str(0, "</u>");
        }

        markup.push_str(&format!(
            "<{tag} {attr}=\"{id}\">{text}</{tag}>",
            tag = RUN_MARKER_TAG,
            attr = RUN_ID_ATTRIBUTE,
            id = run_id,
            text = escape_text(&run.text),
        ));
        markup.push_str(&closing);
    }

    markup
}

pub fn encode_paragraph(paragraph: &Paragraph) -> String {
    encode_runs(&paragraph.runs)
}

/// Encode every paragraph of a cell independently and join them with line breaks.
pub fn encode_cell(cell: &Cell) -> String {
    cell.paragraphs
        .iter()
        .map(encode_paragraph)
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}
