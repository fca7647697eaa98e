//! Progress line frames.
//!
//! A progress line fills one character per step and reports the rounded
//! percentage after the bar, e.g. `█████ 13%`.

/// One progress line: the fill pattern and how often it repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    fill: Vec<char>,
    length: usize,
}

impl ProgressBar {
    /// `fill` repeated `length` times; a multi-character fill makes the bar
    /// longer.
    pub fn new(fill: &str, length: usize) -> Self {
        Self {
            fill: fill.chars().collect(),
            length,
        }
    }

    /// Number of steps to fill the bar.
    pub fn len(&self) -> usize {
        self.fill.len().saturating_mul(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rounded percentage reached after `step` steps.
    pub fn percent(&self, step: usize) -> f64 {
        if self.is_empty() {
            return 100.0;
        }
        (step as f64 / self.len() as f64 * 100.0).round()
    }

    /// Text shown after `step` steps.
    pub fn frame(&self, step: usize) -> String {
        let step = step.min(self.len());
        let filled: String = self.fill.iter().cycle().take(step).collect();
        format!("{} {}%", filled, self.percent(step))
    }
}
