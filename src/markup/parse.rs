//! Lenient markup fragment parser.
//!
//! Accepts the kind of markup a page author writes inside a terminal block:
//! inline elements, quoted or bare attributes, entities and comments. It never
//! fails. Unclosed elements are closed at the end of input, stray closing tags
//! are dropped and a `<` that does not start a tag is kept as text.

use std::sync::OnceLock;

use regex::Regex;

use super::{is_void, Attribute, Element, Node};

/// Whether a string contains something that looks like an element tag.
pub fn has_markup(s: &str) -> bool {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?is)</?[a-z][\s\S]*>").expect("static regex"))
        .is_match(s)
}

/// Parse a fragment into a list of top-level nodes.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    Parser::new(input).run()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Open elements, innermost last. The root collects top-level nodes.
    stack: Vec<Element>,
    root: Vec<Node>,
    text: String,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            root: Vec::new(),
            text: String::new(),
        }
    }

    fn run(mut self) -> Vec<Node> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            if rest.starts_with("<!--") {
                self.flush_text();
                self.pos += rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            } else if rest.starts_with("</") && starts_with_alpha(&rest[2..]) {
                self.closing_tag(rest);
            } else if rest.starts_with('<') && starts_with_alpha(&rest[1..]) {
                self.opening_tag(rest);
            } else {
                let first = rest.chars().next().map_or(1, char::len_utf8);
                let next = rest[first..]
                    .find('<')
                    .map(|i| i + first)
                    .unwrap_or(rest.len());
                self.text.push_str(&rest[..next]);
                self.pos += next;
            }
        }
        self.flush_text();
        while let Some(open) = self.stack.pop() {
            self.push_node(Node::Element(open));
        }
        self.root
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.text);
        let decoded = decode_entities(&raw);
        let skip_pre_newline = self
            .stack
            .last()
            .is_some_and(|e| e.tag.eq_ignore_ascii_case("pre") && e.children.is_empty());
        let decoded = if skip_pre_newline {
            decoded.strip_prefix('\n').map(str::to_string).unwrap_or(decoded)
        } else {
            decoded
        };
        if !decoded.is_empty() {
            self.push_node(Node::Text(decoded));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn closing_tag(&mut self, rest: &str) {
        let Some(end) = rest.find('>') else {
            self.text.push_str(rest);
            self.pos = self.input.len();
            return;
        };
        self.flush_text();
        let name = rest[2..end].trim();
        self.pos += end + 1;

        let Some(idx) = self
            .stack
            .iter()
            .rposition(|e| e.tag.eq_ignore_ascii_case(name))
        else {
            // Stray closing tag with nothing to close.
            return;
        };
        while self.stack.len() > idx {
            if let Some(open) = self.stack.pop() {
                self.push_node(Node::Element(open));
            }
        }
    }

    fn opening_tag(&mut self, rest: &str) {
        let Some((element, consumed, self_closing)) = parse_start_tag(rest) else {
            // No terminating '>': not a tag after all.
            self.text.push_str(rest);
            self.pos = self.input.len();
            return;
        };
        self.flush_text();
        self.pos += consumed;
        if self_closing || is_void(&element.tag) {
            self.push_node(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }
}

fn starts_with_alpha(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Parse `<tag attr=...>` at the start of `s`.
///
/// Returns the element, the number of bytes consumed and whether the tag was
/// written self-closing.
fn parse_start_tag(s: &str) -> Option<(Element, usize, bool)> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    let mut element = Element::new(&s[1..i]);

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        match bytes[i] {
            b'>' => return Some((element, i + 1, false)),
            b'/' if bytes.get(i + 1) == Some(&b'>') => return Some((element, i + 2, true)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = &s[name_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                Some(&q @ (b'"' | b'\'')) => {
                    let close = s[i + 1..].find(q as char)? + i + 1;
                    value = decode_entities(&s[i + 1..close]);
                    i = close + 1;
                }
                Some(_) => {
                    let start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    value = decode_entities(&s[start..i]);
                }
                None => return None,
            }
        }
        if !name.is_empty() && !element.has_attr(name) {
            element.attrs.push(Attribute {
                name: name.to_string(),
                value,
            });
        }
    }
}

/// Decode the character references a hand-written page commonly contains.
/// Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
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

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
