//! Parsed pages and container resolution.
//!
//! A player is attached to one container element, found either by a
//! selector string or handed over directly. Selectors cover what pages use
//! to point at a terminal: `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! compounds of those, and descendant chains separated by whitespace.

use crate::error::TermynalError;
use crate::markup::{parse_fragment, Element, Node};

/// Selector used when none is given.
pub const DEFAULT_SELECTOR: &str = "#termynal";

/// A parsed markup document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            nodes: parse_fragment(html),
        }
    }

    /// Treat a whole text file as the content of one container.
    ///
    /// The container is a `<pre id="termynal">`, so the default selector
    /// finds it. One trailing newline is dropped, it ends the file rather
    /// than adding an empty line.
    pub fn from_text(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let mut pre = Element::new("pre").with_attr("id", "termynal");
        pre.children = parse_fragment(body);
        Self {
            nodes: vec![Node::Element(pre)],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// First element in document order matching `selector`.
    pub fn select(&self, selector: &str) -> Result<Option<&Element>, TermynalError> {
        let selector = Selector::parse(selector)?;
        let mut ancestors = Vec::new();
        Ok(find_in(&self.nodes, &selector, &mut ancestors))
    }
}

fn find_in<'a>(
    nodes: &'a [Node],
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
) -> Option<&'a Element> {
    for node in nodes {
        let Node::Element(el) = node else { continue };
        if selector.matches(el, ancestors) {
            return Some(el);
        }
        ancestors.push(el);
        let found = find_in(&el.children, selector, ancestors);
        ancestors.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

/// How a caller points at the container.
#[derive(Debug, Clone, Copy)]
pub enum ContainerRef<'a> {
    Selector(&'a str),
    Element(&'a Element),
}

impl Default for ContainerRef<'_> {
    fn default() -> Self {
        ContainerRef::Selector(DEFAULT_SELECTOR)
    }
}

impl<'a> From<&'a str> for ContainerRef<'a> {
    fn from(selector: &'a str) -> Self {
        ContainerRef::Selector(selector)
    }
}

impl<'a> From<&'a Element> for ContainerRef<'a> {
    fn from(element: &'a Element) -> Self {
        ContainerRef::Element(element)
    }
}

impl<'a> ContainerRef<'a> {
    /// Find the container, failing when a selector matches nothing.
    pub fn resolve(self, document: &'a Document) -> Result<&'a Element, TermynalError> {
        match self {
            ContainerRef::Element(el) => Ok(el),
            ContainerRef::Selector(selector) => {
                document
                    .select(selector)?
                    .ok_or_else(|| TermynalError::ContainerNotFound {
                        selector: selector.to_string(),
                    })
            }
        }
    }
}

/// One compound: everything that must hold for a single element.
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&el.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        let classes: Vec<&str> = el.attr("class").unwrap_or("").split_whitespace().collect();
        if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(v) => el.attr(name) == Some(v.as_str()),
            None => el.has_attr(name),
        })
    }
}

/// A descendant chain of compounds, outermost first.
#[derive(Debug, PartialEq)]
struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    fn parse(input: &str) -> Result<Self, TermynalError> {
        let compounds = input
            .split_whitespace()
            .map(|part| parse_compound(input, part))
            .collect::<Result<Vec<_>, _>>()?;
        if compounds.is_empty() {
            return Err(TermynalError::invalid_selector(input, "empty selector"));
        }
        Ok(Self { compounds })
    }

    /// The last compound must match `el`; the rest must match ancestors in
    /// order, nearest last.
    fn matches(&self, el: &Element, ancestors: &[&Element]) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            match remaining.peek() {
                Some(c) if c.matches(ancestor) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident<'a>(selector: &str, rest: &'a str, what: &str) -> Result<(&'a str, &'a str), TermynalError> {
    let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
    if end == 0 {
        return Err(TermynalError::invalid_selector(selector, format!("empty {}", what)));
    }
    Ok((&rest[..end], &rest[end..]))
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, TermynalError> {
    let mut compound = Compound::default();
    let mut rest = part;

    if let Some(r) = rest.strip_prefix('*') {
        rest = r;
    } else if rest.starts_with(is_ident_char) {
        let (tag, r) = take_ident(selector, rest, "tag")?;
        compound.tag = Some(tag.to_string());
        rest = r;
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '#' => {
                let (id, r) = take_ident(selector, &rest[1..], "id")?;
                compound.id = Some(id.to_string());
                rest = r;
            }
            '.' => {
                let (class, r) = take_ident(selector, &rest[1..], "class")?;
                compound.classes.push(class.to_string());
                rest = r;
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| TermynalError::invalid_selector(selector, "unclosed ["))?;
                compound.attrs.push(parse_attr_test(selector, &rest[1..close])?);
                rest = &rest[close + 1..];
            }
            other => {
                return Err(TermynalError::invalid_selector(
                    selector,
                    format!("unexpected {:?}", other),
                ))
            }
        }
    }
    Ok(compound)
}

fn parse_attr_test(selector: &str, body: &str) -> Result<(String, Option<String>), TermynalError> {
    let (name, value) = match body.split_once('=') {
        Some((n, v)) => (n.trim(), Some(v.trim())),
        None => (body.trim(), None),
    };
    if name.is_empty() || !name.chars().all(|c| is_ident_char(c) || c == ':') {
        return Err(TermynalError::invalid_selector(selector, "bad attribute name"));
    }
    let value = value.map(|v| {
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_string()
    });
    Ok((name.to_string(), value))
}
