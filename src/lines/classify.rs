//! Line classifier.
//!
//! Splits the serialized content of a terminal container on line breaks and
//! turns each line into a `LineData`. Rules, first match wins:
//!
//! 1. visible text starts with `// ` → comment
//! 2. visible text starts with the prompt literal → input
//! 3. visible text starts with the custom prompt literal → input with an
//!    inline prompt ending at the next prompt literal
//! 4. line contains `\r` → carriage-return line
//! 5. anything else → output, verbatim

use tracing::warn;

use crate::markup::{has_markup, parse_fragment, to_html, Element, Node};

use super::{LineData, LineType};

pub const DEFAULT_PROMPT_LITERAL: &str = "$ ";
pub const DEFAULT_CUSTOM_PROMPT_LITERAL: &str = "# ";
pub const COMMENT_LITERAL: &str = "// ";
pub const COMMENT_GLYPH: &str = "💬";
pub const COMMENT_CLASS: &str = "termynal-comment";

/// Turns raw container content into line data.
#[derive(Debug, Clone)]
pub struct Classifier {
    prompt_literal: String,
    custom_prompt_literal: String,
    prefix: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_LITERAL, DEFAULT_CUSTOM_PROMPT_LITERAL)
    }
}

impl Classifier {
    pub fn new(prompt_literal: impl Into<String>, custom_prompt_literal: impl Into<String>) -> Self {
        Self {
            prompt_literal: prompt_literal.into(),
            custom_prompt_literal: custom_prompt_literal.into(),
            prefix: "ty".to_string(),
        }
    }

    /// Attribute prefix written onto markup values (`data-<prefix>`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Classify every line of `content` in source order.
    pub fn classify(&self, content: &str) -> Vec<LineData> {
        content.split('\n').map(|line| self.classify_line(line)).collect()
    }

    /// Classify a single line.
    pub fn classify_line(&self, line: &str) -> LineData {
        let text = visible_text(line);

        if text.starts_with(COMMENT_LITERAL) {
            return LineData {
                value: format!(
                    "{} {}",
                    COMMENT_GLYPH,
                    line.replacen(COMMENT_LITERAL, "", 1).trim_end()
                ),
                class: Some(COMMENT_CLASS.to_string()),
                delay: Some(0.0),
                ..LineData::default()
            };
        }

        if text.starts_with(&self.prompt_literal) {
            return LineData {
                value: self.input_value(line, Some(&self.prompt_literal), None),
                line_type: Some(LineType::Input),
                ..LineData::default()
            };
        }

        if text.starts_with(&self.custom_prompt_literal) {
            return self.custom_prompt_line(line);
        }

        if line.contains('\r') {
            return LineData {
                value: line.replace('\r', ""),
                carriage_return: Some(true),
                ..LineData::default()
            };
        }

        LineData::output(line)
    }

    fn custom_prompt_line(&self, line: &str) -> LineData {
        let marker_end = line
            .find(&self.custom_prompt_literal)
            .map(|i| i + self.custom_prompt_literal.len())
            .unwrap_or(0);

        let (prompt, rest) = match line[marker_end..].find(&self.prompt_literal) {
            Some(offset) => {
                let delimiter = marker_end + offset;
                let prompt = line[..delimiter].replacen(&self.custom_prompt_literal, "", 1);
                (prompt, &line[delimiter + self.prompt_literal.len()..])
            }
            None => {
                warn!(
                    line,
                    "custom prompt found but no end delimiter {:?}", self.prompt_literal
                );
                (String::new(), &line[marker_end..])
            }
        };

        let value = self.input_value(rest, None, Some(&prompt));
        LineData {
            value,
            prompt: Some(prompt),
            line_type: Some(LineType::Input),
            ..LineData::default()
        }
    }

    /// Build the value of an input line.
    ///
    /// Plain text has `strip` removed once and trailing whitespace trimmed.
    /// Markup keeps its structure: `strip` is removed from the leading text
    /// and a single wrapping element receives the input attributes so the
    /// renderer hoists it instead of wrapping it again.
    fn input_value(&self, line: &str, strip: Option<&str>, prompt: Option<&str>) -> String {
        if !has_markup(line) {
            let text = match strip {
                Some(s) => line.replacen(s, "", 1),
                None => line.to_string(),
            };
            return text.trim_end().to_string();
        }

        let mut nodes = parse_fragment(line);
        if let Some(s) = strip {
            strip_leading_text(&mut nodes, s);
        }
        trim_trailing_text(&mut nodes);

        let significant: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !matches!(n, Node::Text(t) if t.trim().is_empty()))
            .map(|(i, _)| i)
            .collect();

        match significant.as_slice() {
            [only] => match &mut nodes[*only] {
                Node::Element(el) => {
                    self.mark_input(el, prompt);
                    el.outer_html()
                }
                Node::Text(t) => t.trim_end().to_string(),
            },
            [] => {
                warn!(line, "no element found in input line markup");
                to_html(&nodes).trim_end().to_string()
            }
            _ => to_html(&nodes).trim_end().to_string(),
        }
    }

    fn mark_input(&self, el: &mut Element, prompt: Option<&str>) {
        el.set_attr(format!("data-{}", self.prefix), LineType::Input.as_str());
        if let Some(p) = prompt.filter(|p| !p.is_empty()) {
            el.set_attr(format!("data-{}-prompt", self.prefix), p);
        }
    }
}

/// Text a reader would see: the line itself when it holds no markup,
/// otherwise the text content of its parsed nodes.
pub fn visible_text(line: &str) -> String {
    if !has_markup(line) {
        return line.to_string();
    }
    parse_fragment(line).iter().map(Node::text_content).collect()
}

/// Remove `literal` from the start of the text carried by `nodes`, walking
/// text nodes in document order. The literal may span several nodes.
fn strip_leading_text(nodes: &mut [Node], literal: &str) -> usize {
    let mut remaining = literal;
    for node in nodes.iter_mut() {
        if remaining.is_empty() {
            break;
        }
        match node {
            Node::Text(text) => {
                let common = common_prefix_len(text, remaining);
                text.replace_range(..common, "");
                remaining = &remaining[common..];
                if !text.is_empty() && !remaining.is_empty() {
                    // Text diverged from the literal; stop stripping.
                    break;
                }
            }
            Node::Element(el) => {
                let consumed = strip_leading_text(&mut el.children, remaining);
                remaining = &remaining[consumed..];
                if !remaining.is_empty() && !el.text_content().is_empty() {
                    break;
                }
            }
        }
    }
    literal.len() - remaining.len()
}

/// Trim trailing whitespace from the text carried by `nodes`, walking text
/// nodes backwards until one keeps some content. Returns whether it did.
fn trim_trailing_text(nodes: &mut [Node]) -> bool {
    for node in nodes.iter_mut().rev() {
        let done = match node {
            Node::Text(text) => {
                text.truncate(text.trim_end().len());
                !text.is_empty()
            }
            Node::Element(el) => trim_trailing_text(&mut el.children),
        };
        if done {
            return true;
        }
    }
    false
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .map(|((i, ca), _)| i + ca.len_utf8())
        .last()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(content: &str) -> Vec<LineData> {
        Classifier::default().classify(content)
    }

    #[test]
    fn input_then_output() {
        let lines = classify("$ echo woo\nwoo");
        assert_eq!(lines, vec![LineData::input("echo woo"), LineData::output("woo")]);
    }

    #[test]
    fn plain_lines_are_verbatim() {
        for line in ["woo", "  indented  ", "", "1 < 2", "$no-space", "#hashtag", "//no-space"] {
            assert_eq!(classify(line), vec![LineData::output(line)], "line {:?}", line);
        }
    }

    #[test]
    fn input_trims_trailing_whitespace() {
        assert_eq!(classify("$ ls -la   \t"), vec![LineData::input("ls -la")]);
    }

    #[test]
    fn markup_input_trims_trailing_whitespace() {
        let lines = classify("<b>$ ls   </b>");
        assert_eq!(lines.len(), 1);
        assert_eq!(visible_text(&lines[0].value), "ls");
        assert!(lines[0].value.ends_with("ls</b>"), "{}", lines[0].value);

        let nested = classify("$ <i>git</i> <b>log  </b>  ");
        assert_eq!(visible_text(&nested[0].value), "git log");
    }

    #[test]
    fn comment_line() {
        let lines = classify("// a note  ");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value, "💬 a note");
        assert!(lines[0].value.starts_with(COMMENT_GLYPH));
        assert_eq!(lines[0].class.as_deref(), Some("termynal-comment"));
        assert_eq!(lines[0].delay, Some(0.0));
        assert_eq!(lines[0].line_type, None);
    }

    #[test]
    fn comment_takes_priority_over_carriage_return() {
        let lines = classify("// note\r");
        assert_eq!(lines[0].class.as_deref(), Some(COMMENT_CLASS));
        assert_eq!(lines[0].carriage_return, None);
    }

    #[test]
    fn custom_prompt_is_extracted() {
        let lines = classify("# root@box$ whoami");
        assert_eq!(lines, vec![LineData::input("whoami").with_prompt("root@box")]);
    }

    #[test]
    fn custom_prompt_delimiter_searched_after_marker() {
        let lines = Classifier::new("> ", "# ").classify("# py> print(1)");
        assert_eq!(lines[0].prompt.as_deref(), Some("py"));
        assert_eq!(lines[0].value, "print(1)");
    }

    #[test]
    fn custom_prompt_without_delimiter_degrades() {
        let lines = classify("# no delimiter here");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_input());
        assert_eq!(lines[0].prompt.as_deref(), Some(""));
        assert_eq!(lines[0].value, "no delimiter here");
    }

    #[test]
    fn carriage_return_line() {
        let lines = classify("Downloading 50%\r\ndone");
        assert_eq!(lines[0].value, "Downloading 50%");
        assert_eq!(lines[0].carriage_return, Some(true));
        assert_eq!(lines[1], LineData::output("done"));
    }

    #[test]
    fn input_wrapped_in_markup_keeps_element() {
        let lines = classify("<span>$ echo woo</span>");
        assert!(lines[0].is_input());
        assert_eq!(lines[0].value, r#"<span data-ty="input">echo woo</span>"#);
    }

    #[test]
    fn prefix_split_across_markup() {
        let lines = classify("<span>$ </span>echo <b>hi</b>");
        assert!(lines[0].is_input());
        assert_eq!(lines[0].value, "<span></span>echo <b>hi</b>");
        assert_eq!(visible_text(&lines[0].value), "echo hi");
    }

    #[test]
    fn custom_prompt_markup_gets_prompt_attr() {
        let lines = classify("# ~/src$ <span class=\"cmd\">make</span>");
        assert_eq!(lines[0].prompt.as_deref(), Some("~/src"));
        assert_eq!(
            lines[0].value,
            r#"<span class="cmd" data-ty="input" data-ty-prompt="~/src">make</span>"#
        );
    }

    #[test]
    fn custom_attribute_prefix_is_used_for_markup() {
        let lines = Classifier::default()
            .with_prefix("term")
            .classify("<b>$ ls</b>");
        assert_eq!(lines[0].value, r#"<b data-term="input">ls</b>"#);
    }

    #[test]
    fn visible_text_ignores_markup() {
        assert_eq!(visible_text("<span>$ </span>echo"), "$ echo");
        assert_eq!(visible_text("plain"), "plain");
    }

    #[test]
    fn classification_is_idempotent() {
        let content = "// intro\n$ make\n<span data-ty=\"progress\"></span>\nbuilding\r\n# a$ b\nok";
        assert_eq!(classify(content), classify(content));
    }

    #[test]
    fn order_is_preserved() {
        let lines = classify("a\nb\nc\n$ d");
        let values: Vec<_> = lines.iter().map(|l| l.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }
}
