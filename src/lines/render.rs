//! Line renderer: `LineData` to a template element.
//!
//! Every field except `value` becomes an attribute on a `<span>` wrapper.
//! `type` is written as the bare prefix attribute (`data-ty="input"`), the
//! rest as `data-ty-<field>`. A value that is already an element carrying
//! prefixed attributes is hoisted as-is so authored lines keep control of
//! their own attributes and nested structure.

use tracing::warn;

use crate::markup::{has_markup, parse_fragment, Element, Node};

use super::{LineData, LineType};

pub const DEFAULT_PREFIX: &str = "ty";

/// Builds template elements from line data.
#[derive(Debug, Clone)]
pub struct LineRenderer {
    prefix: String,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl LineRenderer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full attribute name for a line field, e.g. `data-ty-delay`.
    pub fn attr_name(&self, field: &str) -> String {
        format!("data-{}-{}", self.prefix, field)
    }

    /// The bare attribute carrying the line type, e.g. `data-ty`.
    pub fn type_attr(&self) -> String {
        format!("data-{}", self.prefix)
    }

    pub fn render(&self, line: &LineData) -> Element {
        if let Some(authored) = self.authored_element(&line.value) {
            return authored;
        }

        let mut span = Element::new("span");
        if let Some(t) = line.line_type {
            span.set_attr(self.type_attr(), t.as_str());
        }
        if let Some(class) = &line.class {
            span.set_attr(self.attr_name("class"), class);
        }
        if let Some(delay) = line.delay {
            span.set_attr(self.attr_name("delay"), format_number(delay));
        }
        if let Some(prompt) = &line.prompt {
            span.set_attr(self.attr_name("prompt"), prompt);
        }
        if let Some(cr) = line.carriage_return {
            span.set_attr(self.attr_name("carriageReturn"), cr.to_string());
        }
        span.children = parse_fragment(&line.value);
        span
    }

    pub fn render_all(&self, lines: &[LineData]) -> Vec<Element> {
        lines.iter().map(|l| self.render(l)).collect()
    }

    /// The first element of `value` when it already carries attributes in
    /// this renderer's prefix family.
    fn authored_element(&self, value: &str) -> Option<Element> {
        if !has_markup(value) {
            return None;
        }
        let nodes = parse_fragment(value);
        let Some(element) = nodes.into_iter().find_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }) else {
            warn!(
                value,
                "detected incomplete markup element on its own line; keep markup blocks on the same line"
            );
            return None;
        };
        element.has_prefixed_data(&self.prefix).then_some(element)
    }

    /// Read back the line type of a rendered template.
    pub fn line_type(&self, element: &Element) -> Option<LineType> {
        element
            .attr(&self.type_attr())
            .and_then(LineType::from_attr)
    }
}

/// Format a number the way a page author writes it: no trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 {
        format!("{:e}", value).replacen('e', "e+", 1)
    } else if magnitude < 1e-6 {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
