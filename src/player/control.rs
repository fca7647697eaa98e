//! Bottom-bar controls.
//!
//! Two mutually exclusive states: speed control (`◄ 1x ►`) while a run is
//! playing and a restart button once it has finished. Buttons only emit
//! [`Intent`]s; the label is whatever value the scheduler hands back.

use crate::lines::render::format_number;
use crate::markup::Element;

use super::state::Intent;

pub const BRANDING_TEXT: &str = "Created with termynal";
pub const RESTART_LABEL: &str = "restart ↻";
pub const SLOW_DOWN_GLYPH: &str = "◄";
pub const SPEED_UP_GLYPH: &str = "►";

/// Which control the bar currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    SpeedControl,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    SlowDown,
    SpeedUp,
    Restart,
}

impl ControlButton {
    pub fn intent(self) -> Intent {
        match self {
            ControlButton::SlowDown => Intent::SlowDown,
            ControlButton::SpeedUp => Intent::SpeedUp,
            ControlButton::Restart => Intent::Restart,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ControlButton::SlowDown => SLOW_DOWN_GLYPH,
            ControlButton::SpeedUp => SPEED_UP_GLYPH,
            ControlButton::Restart => RESTART_LABEL,
        }
    }
}

/// Display text for a speed multiplier, e.g. `2x` or `0.5x`.
pub fn speed_label(multiplier: f64) -> String {
    format!("{}x", format_number(multiplier))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlBar {
    mode: ControlMode,
    label: String,
}

impl Default for ControlBar {
    fn default() -> Self {
        Self {
            mode: ControlMode::SpeedControl,
            label: speed_label(1.0),
        }
    }
}

impl ControlBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Current speed label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Show the restart button. Returns false when it was already shown.
    pub fn switch_to_restart(&mut self) -> bool {
        let changed = self.mode != ControlMode::Restart;
        self.mode = ControlMode::Restart;
        changed
    }

    /// Show the speed control. Returns false when it was already shown.
    pub fn switch_to_speed_control(&mut self) -> bool {
        let changed = self.mode != ControlMode::SpeedControl;
        self.mode = ControlMode::SpeedControl;
        changed
    }

    /// Update the label with the value returned by a speed intent.
    pub fn show_speed(&mut self, multiplier: f64) {
        self.label = speed_label(multiplier);
    }

    /// Buttons currently on screen, left to right.
    pub fn buttons(&self) -> &'static [ControlButton] {
        match self.mode {
            ControlMode::SpeedControl => &[ControlButton::SlowDown, ControlButton::SpeedUp],
            ControlMode::Restart => &[ControlButton::Restart],
        }
    }

    /// Intent emitted by pressing `button`, if it is on screen.
    pub fn press(&self, button: ControlButton) -> Option<Intent> {
        self.buttons().contains(&button).then(|| button.intent())
    }

    /// Visible pieces, left to right, with the button each one belongs to.
    pub fn segments(&self) -> Vec<(Option<ControlButton>, String)> {
        match self.mode {
            ControlMode::SpeedControl => vec![
                (Some(ControlButton::SlowDown), SLOW_DOWN_GLYPH.to_string()),
                (None, format!(" {} ", self.label)),
                (Some(ControlButton::SpeedUp), SPEED_UP_GLYPH.to_string()),
            ],
            ControlMode::Restart => vec![(Some(ControlButton::Restart), RESTART_LABEL.to_string())],
        }
    }

    /// The bottom bar: branding plus the active control.
    pub fn to_element(&self) -> Element {
        let branding = Element::new("a")
            .with_attr("data-terminal-branding", "")
            .with_text(BRANDING_TEXT);

        let control = match self.mode {
            ControlMode::SpeedControl => {
                let speed = Element::new("span")
                    .with_attr("data-terminal-speed-control", "")
                    .with_child(control_link(SLOW_DOWN_GLYPH))
                    .with_child(Element::new("span").with_text(self.label.as_str()))
                    .with_child(control_link(SPEED_UP_GLYPH));
                Element::new("span")
                    .with_attr("data-terminal-speed-control-container", "")
                    .with_child(speed)
            }
            ControlMode::Restart => control_link(RESTART_LABEL).with_attr("href", "#"),
        };

        Element::new("div")
            .with_attr("data-terminal-bottom-bar", "")
            .with_child(branding)
            .with_child(
                Element::new("span")
                    .with_attr("data-terminal-control-container", "")
                    .with_child(control),
            )
    }
}

fn control_link(text: &str) -> Element {
    Element::new("a")
        .with_attr("data-terminal-control", "")
        .with_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_speed_control_at_1x() {
        let bar = ControlBar::new();
        assert_eq!(bar.mode(), ControlMode::SpeedControl);
        assert_eq!(bar.label(), "1x");
    }

    #[test]
    fn switching_is_idempotent() {
        let mut bar = ControlBar::new();
        assert!(!bar.switch_to_speed_control());
        assert!(bar.switch_to_restart());
        assert!(!bar.switch_to_restart());
        assert_eq!(bar.mode(), ControlMode::Restart);
        assert!(bar.switch_to_speed_control());
    }

    #[test]
    fn label_shows_returned_value() {
        let mut bar = ControlBar::new();
        bar.show_speed(16.0);
        assert_eq!(bar.label(), "16x");
        bar.show_speed(0.25);
        assert_eq!(bar.label(), "0.25x");
    }

    #[test]
    fn extreme_speeds_keep_a_short_label() {
        assert_eq!(speed_label(f64::INFINITY), "Infinityx");
        assert_eq!(speed_label(1e-10), "1e-10x");
        assert_eq!(speed_label(0.5_f64.powi(34)), "5.820766091346741e-11x");
    }

    #[test]
    fn only_displayed_buttons_emit_intents() {
        let mut bar = ControlBar::new();
        assert_eq!(bar.press(ControlButton::SpeedUp), Some(Intent::SpeedUp));
        assert_eq!(bar.press(ControlButton::SlowDown), Some(Intent::SlowDown));
        assert_eq!(bar.press(ControlButton::Restart), None);

        bar.switch_to_restart();
        assert_eq!(bar.press(ControlButton::Restart), Some(Intent::Restart));
        assert_eq!(bar.press(ControlButton::SpeedUp), None);
    }

    #[test]
    fn markup_swaps_control_in_place() {
        let mut bar = ControlBar::new();
        let html = bar.to_element().outer_html();
        assert!(html.contains("data-terminal-speed-control"));
        assert!(html.contains("<span>1x</span>"));
        assert!(html.contains(BRANDING_TEXT));

        bar.switch_to_restart();
        let html = bar.to_element().outer_html();
        assert!(!html.contains("data-terminal-speed-control"));
        assert!(html.contains("restart ↻"));
    }
}
