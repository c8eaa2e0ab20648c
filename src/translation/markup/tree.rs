/*!
 * Lenient markup tree.
 *
 * Translated markup is read with quick-xml's event reader and assembled into an
 * owned tagged-variant tree. The assembly recovers from the damage translation
 * services typically do: stray or mismatched closing tags, void elements
 * written without a slash, elements left open at the end of input.
 */

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::decode_entities;

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "wbr"];

/// A node of parsed markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text with character references already decoded
    Text(String),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Lowercased tag name
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Raw value of an attribute, compared case-insensitively by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Parse markup into a list of top-level nodes.
///
/// Returns the tokenizer error when the input cannot be read as markup at all;
/// structural damage is repaired rather than reported.
pub fn parse_markup(markup: &str) -> Result<Vec<Node>, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(false);
    reader.check_end_names(false);

    // Open elements; the bottom entry is a synthetic root.
    let mut stack: Vec<Element> = vec![Element::named("#root")];

    loop {
        match reader.read_event()? {
            // `a < b > c` reads as a start tag without a valid name; keep it as text
            Event::Start(start) if !is_tag_name(start.name().as_ref()) => {
                append_text(&mut stack, literal_tag("<", &start, ">"));
            }
            Event::Empty(start) if !is_tag_name(start.name().as_ref()) => {
                append_text(&mut stack, literal_tag("<", &start, "/>"));
            }
            Event::End(end) if !is_tag_name(end.name().as_ref()) => {
                append_text(&mut stack, literal_tag("</", &end, ">"));
            }
            Event::Start(start) => {
                let element = element_from(&start);
                if element.is_void() {
                    append(&mut stack, Node::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(start) => {
                let element = element_from(&start);
                append(&mut stack, Node::Element(element));
            }
            Event::End(end) => {
                let name = lowercase_name(end.name().as_ref());
                close_element(&mut stack, &name);
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                append_text(&mut stack, decode_entities(&raw));
            }
            Event::CData(data) => {
                let raw = String::from_utf8_lossy(&data);
                append_text(&mut stack, raw.into_owned());
            }
            Event::Eof => break,
            // Comments, declarations and processing instructions carry no text.
            _ => {}
        }
    }

    while stack.len() > 1 {
        pop_into_parent(&mut stack);
    }

    Ok(stack.pop().map(|root| root.children).unwrap_or_default())
}

/// ASCII letter followed by letters, digits, `-`, `_`, `:` or `.`
fn is_tag_name(name: &[u8]) -> bool {
    match name.split_first() {
        Some((first, rest)) => {
            first.is_ascii_alphabetic()
                && rest
                    .iter()
                    .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':' | b'.'))
        }
        None => false,
    }
}

/// The source text of a tag that is not markup.
fn literal_tag(open: &str, content: &[u8], close: &str) -> String {
    let content = decode_entities(&String::from_utf8_lossy(content));
    format!("{}{}{}", open, content, close)
}

fn lowercase_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let mut element = Element::named(lowercase_name(start.name().as_ref()));
    for attribute in start.html_attributes().with_checks(false).flatten() {
        let key = lowercase_name(attribute.key.as_ref());
        let value = decode_entities(&String::from_utf8_lossy(&attribute.value));
        element.attributes.push((key, value));
    }
    element
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn append_text(stack: &mut [Element], text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        // Keep adjacent text in one node.
        if let Some(Node::Text(previous)) = parent.children.last_mut() {
            previous.push_str(&text);
        } else {
            parent.children.push(Node::Text(text));
        }
    }
}

/// Close the innermost open element with this name, along with anything opened
/// inside it. A closing tag with no matching open element is ignored.
fn close_element(stack: &mut Vec<Element>, name: &str) {
    let Some(position) = stack.iter().skip(1).rposition(|element| element.name == name) else {
        return;
    };
    // rposition over the skipped iterator counts from index 1
    let position = position + 1;
    while stack.len() > position {
        pop_into_parent(stack);
    }
}

fn pop_into_parent(stack: &mut Vec<Element>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(element) = stack.pop() {
        append(stack, Node::Element(element));
    }
}
