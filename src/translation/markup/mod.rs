/*!
 * Tagged markup transcoding for formatted runs.
 *
 * Paragraphs are sent to the translation service as a small HTML dialect:
 *
 * - every non-empty run becomes `<span data-r="N">text</span>`, where `N` is the
 *   run's index among the paragraph's non-empty runs
 * - bold, italic and underline wrap the span as `<b>`, `<i>`, `<u>` (bold outermost)
 * - paragraphs inside a table cell are joined with `<br/>`
 *
 * The service may reorder, split, merge or drop any of this, so decoding is
 * lenient and always produces spans, falling back to plain text when needed.
 */

use quick_xml::escape::partial_escape;

pub mod decoder;
pub mod encoder;
pub mod tree;

pub use decoder::{decode_markup, decode_spans, Decoded};
pub use encoder::{encode_cell, encode_paragraph, encode_runs};
pub use tree::{parse_markup, Element, Node};

/// Element name of the run marker
pub const RUN_MARKER_TAG: &str = "span";

/// Attribute carrying the run id on a run marker
pub const RUN_ID_ATTRIBUTE: &str = "data-r";

/// Line separator between paragraphs of a table cell
pub const LINE_BREAK: &str = "<br/>";

/// A decoded piece of text and the run it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Index into the paragraph's non-empty runs, `None` when unattributable
    pub origin: Option<usize>,
    pub text: String,
}

impl Span {
    pub fn new(origin: Option<usize>, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }
}

/// Escape text so it cannot be read back as markup.
///
/// Only `&`, `<` and `>` are escaped; quotes stay as they are in text content.
pub fn escape_text(text: &str) -> String {
    partial_escape(text).into_owned()
}

/// Decode character references in text returned by the service.
///
/// Handles the XML entities, decimal and hex references, and the HTML named
/// entities translation services commonly emit. Unknown references are kept
/// verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let resolved = candidate
            .find(';')
            .filter(|end| *end > 0 && *end <= 10)
            .and_then(|end| resolve_entity(&candidate[..end]).map(|ch| (ch, end)));

        match resolved {
            Some((ch, end)) => {
                decoded.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = candidate;
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn resolve_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "bdquo" => '\u{201E}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        _ => return None,
    };
    Some(ch)
}
