//! Surface that draws into a real (or test) terminal through ratatui.

use anyhow::{Context, Result};
use ratatui::{backend::Backend, Terminal};

use crate::player::surface::{Surface, DEFAULT_VIEWPORT_ROWS};
use crate::player::view::TerminalView;

use super::frame::{body_rows, draw_view};
use super::theme::Theme;

/// A [`Surface`] backed by a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    rows: usize,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        let rows = terminal
            .size()
            .map(|size| body_rows(size.height))
            .unwrap_or(DEFAULT_VIEWPORT_ROWS);
        Self {
            terminal,
            theme: Theme::default(),
            rows,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn present(&mut self, view: &TerminalView) -> Result<()> {
        let theme = &self.theme;
        let frame = self
            .terminal
            .draw(|f| draw_view(f, view, theme))
            .context("Failed to draw terminal")?;
        self.rows = body_rows(frame.area.height);
        Ok(())
    }

    fn viewport_rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
    }

    fn surface(width: u16, height: u16) -> TerminalSurface<TestBackend> {
        TerminalSurface::new(Terminal::new(TestBackend::new(width, height)).unwrap())
    }

    #[test]
    fn viewport_excludes_bars() {
        assert_eq!(surface(40, 10).viewport_rows(), 8);
    }

    #[test]
    fn draws_lines_between_bars() {
        let mut surface = surface(40, 6);
        let mut view = TerminalView::new(Element::new("pre"), "ty", 4);
        view.region.mount(Element::new("span").with_text("first"), None);
        view.region.mount(
            Element::new("span")
                .with_attr("data-ty-cursor", "_")
                .with_text("second"),
            None,
        );
        surface.present(&view).unwrap();

        let buffer = surface.backend().buffer();
        assert!(row(buffer, 0).contains("c copy all"));
        assert_eq!(row(buffer, 1).trim_end(), "   first");
        assert_eq!(row(buffer, 2).trim_end(), "   second_");
        assert!(row(buffer, 5).contains("Created with termynal"));
        assert!(row(buffer, 5).contains("1x"));
    }

    #[test]
    fn scrolled_region_draws_visible_lines_only() {
        let mut surface = surface(30, 5);
        let mut view = TerminalView::new(Element::new("pre"), "ty", 3);
        for i in 0..6 {
            view.region.mount(Element::new("span").with_text(format!("line {}", i)), None);
        }
        view.region.scroll_to_bottom();
        surface.present(&view).unwrap();

        let buffer = surface.backend().buffer();
        assert_eq!(row(buffer, 1).trim_end(), "   line 3");
        assert_eq!(row(buffer, 3).trim_end(), "   line 5");
    }

    #[test]
    fn toast_and_restart_are_drawn() {
        let mut surface = surface(40, 4);
        let mut view = TerminalView::new(Element::new("pre"), "ty", 2);
        view.toast = Some("Copied!".to_string());
        view.control.switch_to_restart();
        surface.present(&view).unwrap();

        let buffer = surface.backend().buffer();
        assert!(row(buffer, 0).contains("Copied!"));
        assert!(row(buffer, 3).contains("restart ↻"));
    }
}
