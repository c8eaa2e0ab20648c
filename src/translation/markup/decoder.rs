/*!
 * Markup decoder: translated markup to ordered spans.
 *
 * Text is attributed to the innermost enclosing run marker. Anything the
 * service wrapped around or inside a marker is transparent, so extra nesting
 * never splits a logical span. Line breaks become `\n` in the text stream.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tree::{parse_markup, Element, Node};
use super::{decode_entities, Span, RUN_ID_ATTRIBUTE, RUN_MARKER_TAG};

/// `<br>`, `<br/>`, `<BR />` ...
static BREAK_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());

/// Any complete tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());

/// A tag or comment cut off by the end of input; a bare `<` followed by a space is text
static UNTERMINATED_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z/!?][^>]*$").unwrap());

/// Decoder output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Coalesced spans in document order
    pub spans: Vec<Span>,
    /// True when the markup could not be parsed and was reduced to plain text
    pub fallback: bool,
}

/// Decode markup into spans, reporting whether the plain-text fallback was used.
pub fn decode_markup(markup: &str) -> Decoded {
    match parse_markup(markup) {
        Ok(nodes) => {
            let mut spans = SpanBuilder::default();
            for node in &nodes {
                walk(node, None, &mut spans);
            }
            Decoded {
                spans: spans.finish(),
                fallback: false,
            }
        }
        Err(e) => {
            debug!("Markup could not be parsed ({}), falling back to plain text", e);
            let text = strip_markup(markup);
            let spans = if text.is_empty() {
                Vec::new()
            } else {
                vec![Span::new(None, text)]
            };
            Decoded {
                spans,
                fallback: true,
            }
        }
    }
}

/// Decode markup into spans.
pub fn decode_spans(markup: &str) -> Vec<Span> {
    decode_markup(markup).spans
}

/// Visible text of markup with all tags removed.
pub fn strip_markup(markup: &str) -> String {
    let with_breaks = BREAK_TAG_REGEX.replace_all(markup, "\n");
    let without_tags = TAG_REGEX.replace_all(&with_breaks, "");
    let without_tags = UNTERMINATED_TAG_REGEX.replace(&without_tags, "");
    decode_entities(&without_tags)
}

fn walk(node: &Node, origin: Option<usize>, spans: &mut SpanBuilder) {
    match node {
        Node::Text(text) => spans.push(origin, text),
        Node::Element(element) if element.name == "br" => spans.push(origin, "\n"),
        Node::Element(element) => {
            let origin = run_id(element).or(origin);
            for child in &element.children {
                walk(child, origin, spans);
            }
        }
    }
}

/// Run id carried by a run marker; `None` for any other element.
fn run_id(element: &Element) -> Option<usize> {
    if element.name != RUN_MARKER_TAG {
        return None;
    }
    element
        .attribute(RUN_ID_ATTRIBUTE)
        .and_then(|value| value.trim().parse::<usize>().ok())
}

/// Accumulates spans, merging neighbours that share an origin.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span>,
}

impl SpanBuilder {
    fn push(&mut self, origin: Option<usize>, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.origin == origin => last.text.push_str(text),
            _ => self.spans.push(Span::new(origin, text)),
        }
    }

    fn finish(self) -> Vec<Span> {
        self.spans
    }
}
