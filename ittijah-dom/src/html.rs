//! Lenient HTML parsing
//!
//! A forgiving, non-validating parser for real-world page fragments. It
//! never fails: malformed markup degrades to text, unknown end tags are
//! ignored, unclosed elements are closed by ancestor matching, and
//! document parses graft `html`/`head`/`body` content onto the
//! document's synthesized containers.

use crate::document::Document;
use crate::node::{ElementData, NodeData, NodeId};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tags whose contents are swallowed raw and discarded; their text is
/// code or metadata, never page prose.
const RAW_DISCARD_TAGS: &[&str] = &["script", "style", "template"];

/// Tags that close an open element of the same name, `<p>one<p>two`
/// style.
const SELF_CLOSING_SIBLINGS: &[&str] = &["p", "li", "dt", "dd", "option", "tr", "td", "th"];

/// Parse a complete document, aliasing `html`/`head`/`body` tags onto
/// the synthesized containers.
pub(crate) fn parse_document(doc: &mut Document, input: &str) {
    let body = doc.body_id();
    Parser {
        doc,
        input,
        pos: 0,
        stack: vec![StackEntry {
            id: body,
            tag: "body".to_string(),
        }],
        document_mode: true,
    }
    .run();
}

/// Parse a fragment under `parent`; returns the nodes appended directly
/// to it.
pub(crate) fn parse_fragment(doc: &mut Document, parent: NodeId, input: &str) -> Vec<NodeId> {
    let before = doc.node(parent).children.len();
    let tag = doc.node(parent).tag().unwrap_or("body").to_string();
    Parser {
        doc,
        input,
        pos: 0,
        stack: vec![StackEntry { id: parent, tag }],
        document_mode: false,
    }
    .run();
    doc.node(parent).children[before..].to_vec()
}

struct StackEntry {
    id: NodeId,
    tag: String,
}

struct Parser<'a> {
    doc: &'a mut Document,
    input: &'a str,
    pos: usize,
    stack: Vec<StackEntry>,
    document_mode: bool,
}

impl Parser<'_> {
    fn run(&mut self) {
        let input = self.input;
        let bytes = input.as_bytes();
        while self.pos < bytes.len() {
            if bytes[self.pos] != b'<' {
                let start = self.pos;
                let end = find_byte(bytes, start, b'<').unwrap_or(bytes.len());
                self.pos = end;
                self.append_text(&input[start..end]);
                continue;
            }

            if input[self.pos..].starts_with("<!--") {
                self.pos = match input[self.pos + 4..].find("-->") {
                    Some(rel) => self.pos + 4 + rel + 3,
                    None => bytes.len(),
                };
                continue;
            }

            if input[self.pos..].starts_with("<!") || input[self.pos..].starts_with("<?") {
                self.pos = find_byte(bytes, self.pos, b'>').map_or(bytes.len(), |p| p + 1);
                continue;
            }

            if input[self.pos..].starts_with("</") {
                self.handle_end_tag();
                continue;
            }

            match parse_start_tag(input, self.pos) {
                Some(tag) => {
                    self.pos = tag.end;
                    self.handle_start_tag(tag);
                }
                None => {
                    // A lone '<' that opens nothing: literal text
                    self.append_text("<");
                    self.pos += 1;
                }
            }
        }
    }

    fn insertion_point(&self) -> NodeId {
        // The base entry is never popped, so the stack is never empty;
        // falling back to the body is purely defensive.
        match self.stack.last() {
            Some(entry) => entry.id,
            None => self.doc.body_id(),
        }
    }

    fn append_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let parent = self.insertion_point();
        self.doc.alloc_in(NodeData::Text(decoded), parent);
    }

    fn handle_start_tag(&mut self, tag: ParsedTag) {
        let name = tag.name.as_str();

        if self.document_mode {
            match name {
                "html" => {
                    let root = self.doc.root_id();
                    self.merge_attrs(root, &tag.attrs);
                    return;
                }
                "head" => {
                    let head = self.doc.head_id();
                    self.merge_attrs(head, &tag.attrs);
                    self.stack.push(StackEntry {
                        id: head,
                        tag: "head".to_string(),
                    });
                    return;
                }
                "body" => {
                    let body = self.doc.body_id();
                    self.merge_attrs(body, &tag.attrs);
                    self.stack.truncate(1);
                    return;
                }
                _ => {}
            }
        } else if matches!(name, "html" | "head" | "body") {
            // Fragments have no containers to alias; the wrapper tag is
            // dropped and its content flows through.
            return;
        }

        if SELF_CLOSING_SIBLINGS.contains(&name) {
            if let Some(top) = self.stack.last() {
                if self.stack.len() > 1 && top.tag == name {
                    self.stack.pop();
                }
            }
        }

        let mut element = ElementData::new(name);
        for (attr_name, attr_value) in &tag.attrs {
            element.set_attribute(attr_name, attr_value);
        }
        let parent = self.insertion_point();
        let id = self.doc.alloc_in(NodeData::Element(element), parent);

        if tag.self_closing || VOID_TAGS.contains(&name) {
            return;
        }

        if RAW_DISCARD_TAGS.contains(&name) {
            self.swallow_raw_text(name, false, id);
            return;
        }
        if matches!(name, "title" | "textarea") {
            self.swallow_raw_text(name, true, id);
            return;
        }

        self.stack.push(StackEntry {
            id,
            tag: name.to_string(),
        });
    }

    fn handle_end_tag(&mut self) {
        let input = self.input;
        let bytes = input.as_bytes();
        let name_start = self.pos + 2;
        let mut idx = name_start;
        while idx < bytes.len() && is_tag_name_byte(bytes[idx]) {
            idx += 1;
        }
        let name = input[name_start..idx].to_ascii_lowercase();
        self.pos = find_byte(bytes, idx, b'>').map_or(bytes.len(), |p| p + 1);

        if self.document_mode && matches!(name.as_str(), "body" | "html") {
            self.stack.truncate(1);
            return;
        }

        // Close by ancestor matching; an end tag with no open ancestor
        // is ignored. The base entry is never popped.
        if let Some(depth) = self
            .stack
            .iter()
            .skip(1)
            .rposition(|entry| entry.tag == name)
        {
            self.stack.truncate(depth + 1);
        }
    }

    /// Consume everything up to the matching end tag. The contents
    /// become a single text child when `keep` is set, and are dropped
    /// otherwise.
    fn swallow_raw_text(&mut self, tag: &str, keep: bool, element: NodeId) {
        let input = self.input;
        let close = format!("</{tag}");
        let rest = &input[self.pos..];
        let (raw_len, resume) = match rest.to_ascii_lowercase().find(&close) {
            Some(rel) => {
                let end = find_byte(input.as_bytes(), self.pos + rel, b'>')
                    .map_or(input.len(), |p| p + 1);
                (rel, end)
            }
            None => (rest.len(), input.len()),
        };
        if keep && raw_len > 0 {
            let decoded = decode_entities(&rest[..raw_len]);
            self.doc.alloc_in(NodeData::Text(decoded), element);
        }
        self.pos = resume;
    }

    fn merge_attrs(&mut self, id: NodeId, attrs: &[(String, String)]) {
        for (name, value) in attrs {
            self.doc.set_element_attr(id, name, value);
        }
    }
}

struct ParsedTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
    /// Byte offset just past the closing `>`
    end: usize,
}

fn parse_start_tag(input: &str, start: usize) -> Option<ParsedTag> {
    let bytes = input.as_bytes();
    let mut idx = start + 1;
    let name_start = idx;
    while idx < bytes.len() && is_tag_name_byte(bytes[idx]) {
        idx += 1;
    }
    if idx == name_start {
        return None;
    }
    let name = input[name_start..idx].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        idx = skip_whitespace(bytes, idx);
        match bytes.get(idx) {
            None => break,
            Some(b'>') => {
                idx += 1;
                break;
            }
            Some(b'/') => {
                self_closing = true;
                idx += 1;
            }
            Some(_) => {
                let attr_start = idx;
                while idx < bytes.len() && !matches!(bytes[idx], b'=' | b'>' | b'/')
                    && !bytes[idx].is_ascii_whitespace()
                {
                    idx += 1;
                }
                if idx == attr_start {
                    idx += 1;
                    continue;
                }
                let attr_name = input[attr_start..idx].to_ascii_lowercase();
                idx = skip_whitespace(bytes, idx);
                let value = if bytes.get(idx) == Some(&b'=') {
                    idx = skip_whitespace(bytes, idx + 1);
                    match bytes.get(idx).copied() {
                        Some(quote @ (b'"' | b'\'')) => {
                            let value_start = idx + 1;
                            let value_end =
                                find_byte(bytes, value_start, quote).unwrap_or(bytes.len());
                            idx = (value_end + 1).min(bytes.len());
                            decode_entities(&input[value_start..value_end])
                        }
                        _ => {
                            let value_start = idx;
                            while idx < bytes.len()
                                && !bytes[idx].is_ascii_whitespace()
                                && !matches!(bytes[idx], b'>' | b'/')
                            {
                                idx += 1;
                            }
                            decode_entities(&input[value_start..idx])
                        }
                    }
                } else {
                    String::new()
                };
                attrs.push((attr_name, value));
            }
        }
    }

    Some(ParsedTag {
        name,
        attrs,
        self_closing,
        end: idx,
    })
}

fn is_tag_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b':'
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| b == needle)
        .map(|rel| from + rel)
}

/// Decode the common named entities and numeric references. Anything
/// unrecognized stays literal.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        // Entity names are short; a distant semicolon is unrelated text
        let semi = rest.find(';').filter(|&pos| pos <= 12);
        let Some(semi) = semi else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse::<u32>().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_and_text() {
        let doc = Document::parse("<div><p>hello <b>world</b></p></div>");
        let body = doc.body();
        let children = doc.children(body);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.tag(children[0]), Some("div"));
        let p = doc.children(children[0])[0];
        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.flattened_text(p), "hello world");
    }

    #[test]
    fn attributes_quoted_and_bare() {
        let doc = Document::parse(r#"<div id="main" class='a b' hidden data-x=5>x</div>"#);
        let div = doc.children(doc.body())[0];
        assert_eq!(doc.attribute(div, "id"), Some("main"));
        assert_eq!(doc.attribute(div, "class"), Some("a b"));
        assert_eq!(doc.attribute(div, "hidden"), Some(""));
        assert_eq!(doc.attribute(div, "data-x"), Some("5"));
    }

    #[test]
    fn void_and_self_closing_tags() {
        let doc = Document::parse("<p>a<br>b</p><img src=x>");
        let body = doc.body();
        let children = doc.children(body);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag(children[1]), Some("img"));
        // br did not swallow the rest of the paragraph
        assert_eq!(doc.flattened_text(children[0]), "ab");
    }

    #[test]
    fn script_and_style_contents_discarded() {
        let doc = Document::parse("<p>keep</p><script>var x = '<div>nope</div>';</script>");
        assert_eq!(doc.flattened_text(doc.body()), "keep");
        let children = doc.children(doc.body());
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag(children[1]), Some("script"));
    }

    #[test]
    fn containers_are_aliased() {
        let doc = Document::parse(
            "<html lang=ar><head><title>t</title></head><body class=page><p>x</p></body></html>",
        );
        assert_eq!(doc.attribute(doc.root(), "lang"), Some("ar"));
        assert_eq!(doc.attribute(doc.body(), "class"), Some("page"));
        let body_children = doc.children(doc.body());
        assert_eq!(body_children.len(), 1);
        assert_eq!(doc.tag(body_children[0]), Some("p"));
        // title text went to head, not body
        assert_eq!(doc.flattened_text(doc.body()), "x");
        assert_eq!(doc.flattened_text(doc.head()), "t");
    }

    #[test]
    fn unclosed_and_mismatched_tags() {
        let doc = Document::parse("<div><p>one<p>two</div><span>after</span>");
        let children = doc.children(doc.body());
        assert_eq!(doc.tag(children[0]), Some("div"));
        let ps = doc.children(children[0]);
        assert_eq!(ps.len(), 2);
        assert_eq!(doc.flattened_text(ps[0]), "one");
        assert_eq!(doc.flattened_text(ps[1]), "two");
        assert_eq!(doc.tag(children[1]), Some("span"));
    }

    #[test]
    fn comments_and_doctype_skipped() {
        let doc = Document::parse("<!DOCTYPE html><!-- note --><p>x</p>");
        assert_eq!(doc.flattened_text(doc.body()), "x");
    }

    #[test]
    fn entities_decoded() {
        let doc = Document::parse("<p>a &amp; b &lt;c&gt; &#x645; &#1605;</p>");
        assert_eq!(doc.flattened_text(doc.body()), "a & b <c> م م");
    }

    #[test]
    fn garbage_degrades_to_text() {
        let doc = Document::parse("1 < 2 and 3 > 2");
        assert!(doc.flattened_text(doc.body()).contains("1 < 2"));
    }

    #[test]
    fn list_sibling_auto_close() {
        let doc = Document::parse("<ul><li>م<li>b</ul>");
        let ul = doc.children(doc.body())[0];
        let items = doc.children(ul);
        assert_eq!(items.len(), 2);
        assert_eq!(doc.flattened_text(items[0]), "م");
        assert_eq!(doc.flattened_text(items[1]), "b");
    }
}
