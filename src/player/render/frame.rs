//! Frame layout for the terminal surface.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Copied!                  c copy all · q quit │  top bar
//! │ 📋 $ pip install termynal▋                   │  output region
//! │    Collecting termynal                       │
//! │ Created with termynal               ◄ 1x ►  │  bottom bar
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every line starts with a three-column gutter holding the copy button of
//! input lines, so prompts and output stay aligned.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::lines::classify::COMMENT_CLASS;
use crate::lines::decorate::{copy_button_visible, prompt_text, typed_text, COPY_GLYPH};
use crate::markup::Element;
use crate::player::control::{ControlBar, ControlButton, BRANDING_TEXT};
use crate::player::view::TerminalView;

use super::theme::Theme;

/// Rows above the output region.
pub const TOP_BAR_ROWS: u16 = 1;
/// Rows taken by the top and bottom bars together.
pub const CHROME_ROWS: u16 = 2;

const GUTTER: &str = "   ";
const CONTROL_PADDING: usize = 1;
const TOP_BAR_HINT: &str = "c copy all · q quit ";

/// Rows left for the output region in a terminal of `height` rows.
pub fn body_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

/// Draw the whole view into the frame.
pub fn draw_view(frame: &mut Frame, view: &TerminalView, theme: &Theme) {
    let [top, body, bottom] = Layout::vertical([
        Constraint::Length(TOP_BAR_ROWS),
        Constraint::Min(0),
        Constraint::Length(CHROME_ROWS - TOP_BAR_ROWS),
    ])
    .areas(frame.area());

    draw_top_bar(frame, view, theme, top);

    let lines: Vec<Line> = view
        .region
        .visible_lines()
        .iter()
        .map(|l| line_spans(&l.element, view, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), body);

    draw_bottom_bar(frame, &view.control, theme, bottom);
}

fn draw_top_bar(frame: &mut Frame, view: &TerminalView, theme: &Theme, area: Rect) {
    let hint_width = TOP_BAR_HINT.width() as u16;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width)]).areas(area);

    if let Some(toast) = &view.toast {
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", toast), theme.success_style())),
            left,
        );
    }
    frame.render_widget(
        Paragraph::new(Span::styled(TOP_BAR_HINT, theme.text_secondary_style())),
        right,
    );
}

fn draw_bottom_bar(frame: &mut Frame, control: &ControlBar, theme: &Theme, area: Rect) {
    let segments = control.segments();
    let width = controls_width(&segments) as u16;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", BRANDING_TEXT), theme.text_secondary_style())),
        left,
    );

    let spans: Vec<Span> = segments
        .into_iter()
        .map(|(button, text)| match button {
            Some(_) => Span::styled(text, theme.control_style()),
            None => Span::styled(text, theme.text_style()),
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), right);
}

fn controls_width(segments: &[(Option<ControlButton>, String)]) -> usize {
    segments.iter().map(|(_, s)| s.width()).sum::<usize>() + CONTROL_PADDING
}

/// Control button under `column` of a bottom bar `width` columns wide.
pub fn control_at(control: &ControlBar, width: u16, column: u16) -> Option<ControlButton> {
    let segments = control.segments();
    let mut x = (width as usize).saturating_sub(controls_width(&segments));
    let column = column as usize;
    for (button, text) in segments {
        let w = text.width();
        if column >= x && column < x + w {
            return button;
        }
        x += w;
    }
    None
}

/// Styled spans for one mounted line.
pub fn line_spans(line: &Element, view: &TerminalView, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();

    match prompt_text(line) {
        Some(prompt) => {
            if copy_button_visible(line) == Some(true) {
                spans.push(Span::styled(format!("{} ", COPY_GLYPH), theme.control_style()));
            } else {
                spans.push(Span::raw(GUTTER));
            }
            let needs_space = !prompt.is_empty() && !prompt.ends_with(char::is_whitespace);
            spans.push(Span::styled(prompt, theme.prompt_style()));
            if needs_space {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                typed_text(line).unwrap_or_default(),
                theme.text_style(),
            ));
        }
        None => {
            let style = if view.class_of(line) == Some(COMMENT_CLASS) {
                theme.comment_style()
            } else {
                theme.text_style()
            };
            spans.push(Span::raw(GUTTER));
            spans.push(Span::styled(line.text_content(), style));
        }
    }

    if let Some(cursor) = view.cursor_of(line) {
        spans.push(Span::styled(cursor.to_string(), theme.cursor_style()));
    }
    Line::from(spans)
}
