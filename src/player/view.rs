//! View model: the output region and everything drawn around it.
//!
//! Scroll geometry is kept in abstract units, [`LINE_HEIGHT`] per line, so
//! the bottom tolerance can be finer than one line.

use crate::lines::decorate::{copy_button, toggle_copy_button};
use crate::markup::Element;

use super::control::ControlBar;

/// Height of one rendered line in scroll units.
pub const LINE_HEIGHT: usize = 20;

/// Distance from the bottom, in scroll units, still counted as "at bottom".
pub const BOTTOM_TOLERANCE: usize = 5;

pub type LineId = usize;

/// A line currently shown in the output region.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedLine {
    pub id: LineId,
    pub element: Element,
    /// Text copied by this line's copy button, input lines only
    pub copy_text: Option<String>,
}

/// The scrollable list of lines a run has appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRegion {
    lines: Vec<MountedLine>,
    next_id: LineId,
    scroll_top: usize,
    client_height: usize,
    hovered: Option<LineId>,
}

impl OutputRegion {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            client_height: viewport_rows * LINE_HEIGHT,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[MountedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line and return its id.
    pub fn mount(&mut self, element: Element, copy_text: Option<String>) -> LineId {
        let id = self.next_id;
        self.next_id += 1;
        self.lines.push(MountedLine {
            id,
            element,
            copy_text,
        });
        id
    }

    /// Remove a line, keeping the scroll position in range.
    pub fn unmount(&mut self, id: LineId) -> Option<MountedLine> {
        let idx = self.lines.iter().position(|l| l.id == id)?;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        let line = self.lines.remove(idx);
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        Some(line)
    }

    pub fn line(&self, id: LineId) -> Option<&MountedLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn line_mut(&mut self, id: LineId) -> Option<&mut Element> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .map(|l| &mut l.element)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_top = 0;
        self.hovered = None;
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.client_height = rows * LINE_HEIGHT;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn viewport_rows(&self) -> usize {
        self.client_height / LINE_HEIGHT
    }

    pub fn scroll_height(&self) -> usize {
        self.lines.len() * LINE_HEIGHT
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    fn max_scroll_top(&self) -> usize {
        self.scroll_height().saturating_sub(self.client_height)
    }

    pub fn distance_from_bottom(&self) -> usize {
        self.scroll_height()
            .saturating_sub(self.scroll_top + self.client_height)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.distance_from_bottom() <= BOTTOM_TOLERANCE
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }

    pub fn set_scroll_top(&mut self, units: usize) {
        self.scroll_top = units.min(self.max_scroll_top());
    }

    /// Scroll by whole lines, negative is up.
    pub fn scroll_by(&mut self, lines: i32) {
        let delta = lines.unsigned_abs() as usize * LINE_HEIGHT;
        let top = if lines < 0 {
            self.scroll_top.saturating_sub(delta)
        } else {
            self.scroll_top.saturating_add(delta)
        };
        self.set_scroll_top(top);
    }

    /// Index of the first line in view.
    pub fn first_visible(&self) -> usize {
        self.scroll_top / LINE_HEIGHT
    }

    /// Lines in view, top to bottom.
    pub fn visible_lines(&self) -> &[MountedLine] {
        let start = self.first_visible().min(self.lines.len());
        let end = (start + self.viewport_rows()).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Line shown at a visible row.
    pub fn line_at_row(&self, row: usize) -> Option<&MountedLine> {
        if row >= self.viewport_rows() {
            return None;
        }
        self.lines.get(self.first_visible() + row)
    }

    pub fn hovered(&self) -> Option<LineId> {
        self.hovered
    }

    /// Move the pointer to a visible row, or out of the region.
    ///
    /// Leaving a line and entering another each flip that line's copy
    /// button. Returns whether anything changed.
    pub fn hover(&mut self, row: Option<usize>) -> bool {
        let target = row.and_then(|r| self.line_at_row(r)).map(|l| l.id);
        if target == self.hovered {
            return false;
        }
        if let Some(old) = self.hovered.take() {
            if let Some(line) = self.line_mut(old) {
                toggle_copy_button(line);
            }
        }
        if let Some(new) = target {
            if let Some(line) = self.line_mut(new) {
                toggle_copy_button(line);
            }
        }
        self.hovered = target;
        true
    }

    /// Text content of every mounted line.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.element.text_content()).collect()
    }
}

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalView {
    container: Element,
    prefix: String,
    pub region: OutputRegion,
    pub control: ControlBar,
    /// Copy confirmation, shown for a fixed time after a copy
    pub toast: Option<String>,
}

impl TerminalView {
    /// `container` keeps only its attributes; its children are replaced by
    /// the rendered view.
    pub fn new(mut container: Element, prefix: impl Into<String>, viewport_rows: usize) -> Self {
        container.children.clear();
        Self {
            container,
            prefix: prefix.into(),
            region: OutputRegion::new(viewport_rows),
            control: ControlBar::new(),
            toast: None,
        }
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn attr_name(&self, field: &str) -> String {
        format!("data-{}-{}", self.prefix, field)
    }

    /// Cursor glyph a line carries while it is being played.
    pub fn cursor_of<'a>(&self, line: &'a Element) -> Option<&'a str> {
        line.attr(&self.attr_name("cursor"))
    }

    /// Class override a line was authored with.
    pub fn class_of<'a>(&self, line: &'a Element) -> Option<&'a str> {
        line.attr(&self.attr_name("class"))
    }

    /// The full view as one element: top bar, lines, bottom bar.
    pub fn to_element(&self) -> Element {
        let mut top_bar = Element::new("div")
            .with_attr("data-terminal-top-bar", "")
            .with_child(copy_button(false));
        if let Some(toast) = &self.toast {
            top_bar.append(
                Element::new("span")
                    .with_attr("data-terminal-copy-popup", "")
                    .with_text(toast.as_str()),
            );
        }

        let mut root = self.container.clone();
        root.append(top_bar);
        for line in self.region.lines() {
            root.append(line.element.clone());
        }
        root.append(self.control.to_element());
        root
    }

    pub fn to_html(&self) -> String {
        self.to_element().outer_html()
    }
}
