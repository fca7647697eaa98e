//! Display decorators applied to a cloned template right before playback.
//!
//! Input lines get a hidden copy button, a prompt and an empty typing area.
//! Other lines get a spacer and an output area holding their content.

use crate::markup::Element;

pub const DEFAULT_PROMPT: &str = "$ ";
pub const COPY_GLYPH: &str = "📋";

pub const PROMPT_ATTR: &str = "data-terminal-prompt-start";
pub const TYPING_AREA_ATTR: &str = "data-terminal-typing-area";
pub const COPY_BUTTON_ATTR: &str = "data-terminal-copy-button";
pub const LINE_SPACER_ATTR: &str = "data-terminal-line-spacer";
pub const OUTPUT_AREA_ATTR: &str = "data-terminal-line-output-area";

const HIDDEN_STYLE: &str = "visibility: hidden";

/// An input line emptied and ready to be typed into.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedInput {
    /// Characters to type, in order
    pub chars: Vec<char>,
    /// Full original text, what the copy button copies
    pub copy_text: String,
}

/// Prompt element; `None` falls back to the default `$ ` glyph.
pub fn prompt_element(text: Option<&str>) -> Element {
    Element::new("span")
        .with_attr(PROMPT_ATTR, "")
        .with_text(text.unwrap_or(DEFAULT_PROMPT))
}

/// Copy-to-clipboard button for a line, optionally starting hidden.
pub fn copy_button(visible: bool) -> Element {
    let mut button = Element::new("button")
        .with_attr(COPY_BUTTON_ATTR, "true")
        .with_text(COPY_GLYPH);
    if !visible {
        button.set_attr("style", HIDDEN_STYLE);
    }
    button
}

/// Empty `line` and rebuild it as `[copy button][prompt][typing area]`.
pub fn prepare_input_line(line: &mut Element, prompt_attr: &str) -> PreparedInput {
    let text = line.text_content();
    let prompt = line.attr(prompt_attr).map(str::to_string);

    line.children.clear();
    line.append(copy_button(false));
    line.append(prompt_element(prompt.as_deref()));
    line.append(Element::new("span").with_attr(TYPING_AREA_ATTR, ""));

    PreparedInput {
        chars: text.chars().collect(),
        copy_text: text,
    }
}

/// Append one typed character to a prepared input line.
pub fn type_char(line: &mut Element, c: char) {
    if let Some(area) = line.find_mut(&|e: &Element| e.has_attr(TYPING_AREA_ATTR)) {
        let mut buf = [0u8; 4];
        area.push_text(c.encode_utf8(&mut buf));
    }
}

/// Text typed so far into a prepared input line.
pub fn typed_text(line: &Element) -> Option<String> {
    line.find(&|e: &Element| e.has_attr(TYPING_AREA_ATTR))
        .map(Element::text_content)
}

/// Prompt text of a prepared input line.
pub fn prompt_text(line: &Element) -> Option<String> {
    line.find(&|e: &Element| e.has_attr(PROMPT_ATTR))
        .map(Element::text_content)
}

/// Move a non-input line's content into `[spacer][output area]`.
pub fn transform_line_for_display(line: &mut Element) {
    let content = std::mem::take(&mut line.children);
    let spacer = Element::new("span").with_attr(LINE_SPACER_ATTR, "");
    let mut output_area = Element::new("span").with_attr(OUTPUT_AREA_ATTR, "");
    output_area.children = content;
    line.append(spacer);
    line.append(output_area);
}

/// Whether the line's copy button is currently shown.
pub fn copy_button_visible(line: &Element) -> Option<bool> {
    line.find(&|e: &Element| e.has_attr(COPY_BUTTON_ATTR))
        .map(|b| b.attr("style") != Some(HIDDEN_STYLE))
}

/// Flip the copy button between hidden and shown; pointer enter and leave
/// each call this once.
pub fn toggle_copy_button(line: &mut Element) {
    if let Some(button) = line.find_mut(&|e: &Element| e.has_attr(COPY_BUTTON_ATTR)) {
        if button.attr("style") == Some(HIDDEN_STYLE) {
            button.remove_attr("style");
        } else {
            button.set_attr("style", HIDDEN_STYLE);
        }
    }
}

/// Text of every input template, one per line, for "copy all input".
pub fn lines_to_copy_text<'a>(
    lines: impl IntoIterator<Item = &'a Element>,
    type_attr: &str,
) -> String {
    lines
        .into_iter()
        .filter(|l| l.attr(type_attr) == Some("input"))
        .map(Element::text_content)
        .collect::<Vec<_>>()
        .join("\n")
}
