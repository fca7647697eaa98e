//! Theme configuration for the player and CLI
//!
//! Centralizes all color and style definitions for easy customization.
//! Provides both ratatui styles (for the player) and ANSI escape codes (for
//! plain CLI output).

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the player.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Output lines and typed input
    pub text_primary: Color,
    /// Bars, comments, hints
    pub text_secondary: Color,
    /// Prompts and active controls
    pub accent: Color,
    /// Error color
    pub error: Color,
    /// Copy confirmations
    pub success: Color,
    /// Background color (usually default/transparent)
    pub background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::termynal()
    }
}

impl Theme {
    /// Light gray text with a green prompt.
    pub fn termynal() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Green,
            error: Color::Red,
            success: Color::Green,
            background: Color::Reset,
        }
    }

    /// Classic terminal theme - white text.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            background: Color::Reset,
        }
    }

    // Style helpers

    /// Style for output lines and typed input.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for secondary/dimmed text.
    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for prompts.
    pub fn prompt_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for comment lines.
    pub fn comment_style(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for the cursor glyph.
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Style for clickable controls.
    pub fn control_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for copy confirmations.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    // ANSI color helpers for CLI output

    /// Format text with the accent color (for CLI output).
    pub fn accent_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.accent), text, ANSI_RESET)
    }

    /// Format text with the primary color (for CLI output).
    pub fn primary_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.text_primary), text, ANSI_RESET)
    }

    /// Format text with the error color (for CLI output).
    pub fn error_text(&self, text: &str) -> String {
        format!("{}{}{}", color_to_ansi(self.error), text, ANSI_RESET)
    }
}

/// ANSI reset sequence
const ANSI_RESET: &str = "\x1b[0m";

/// Convert a ratatui Color to an ANSI escape code.
fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB and indexed colors fall back to no color
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_termynal() {
        let theme = Theme::default();
        assert_eq!(theme.text_primary, Color::Gray);
        assert_eq!(theme.accent, Color::Green);
    }

    #[test]
    fn classic_theme_uses_white() {
        assert_eq!(Theme::classic().text_primary, Color::White);
    }

    #[test]
    fn style_helpers_return_correct_colors() {
        let theme = Theme::termynal();
        assert_eq!(theme.text_style().fg, Some(Color::Gray));
        assert_eq!(theme.comment_style().fg, Some(Color::DarkGray));
        assert_eq!(theme.prompt_style().fg, Some(Color::Green));
        assert!(theme.prompt_style().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn ansi_text_helpers_wrap_with_color_codes() {
        let theme = Theme::termynal();
        let accent = theme.accent_text("test");
        assert!(accent.starts_with("\x1b[32m"));
        assert!(accent.ends_with("\x1b[0m"));

        let error = theme.error_text("bad");
        assert!(error.starts_with("\x1b[31m"));
        assert!(error.contains("bad"));
    }
}
