//! Cosmetic progress indicator.
//!
//! The bar and the animated ellipsis are driven by fixed-rate timers and have
//! no relation to bytes transferred. They only signal that work is happening.

use crate::constants::progress::{CAP_PERCENT, MAX_DOTS, STEP_PERCENT};

/// State of the progress bar and ellipsis for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSimulation {
    visible: bool,
    percent: u8,
    dots: u8,
}

impl ProgressSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the indicator from zero.
    pub fn start(&mut self) {
        *self = Self {
            visible: true,
            percent: 0,
            dots: 0,
        };
    }

    /// Advance the bar by one step. Never passes the cap.
    pub fn tick_progress(&mut self) {
        if self.visible && self.percent < CAP_PERCENT {
            self.percent = (self.percent + STEP_PERCENT).min(CAP_PERCENT);
        }
    }

    /// Advance the ellipsis animation by one frame.
    pub fn tick_dots(&mut self) {
        if self.visible {
            self.dots = (self.dots + 1) % (MAX_DOTS + 1);
        }
    }

    /// Snap to 100% and stop the ellipsis. The bar stays visible.
    pub fn complete(&mut self) {
        self.percent = 100;
        self.dots = 0;
    }

    /// Hide the indicator and clear the ellipsis.
    pub fn hide(&mut self) {
        self.visible = false;
        self.dots = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Current ellipsis text ("", ".", "..", "...").
    pub fn dots(&self) -> String {
        ".".repeat(self.dots as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_caps_at_ninety() {
        let mut p = ProgressSimulation::new();
        p.start();
        for _ in 0..44 {
            p.tick_progress();
        }
        assert_eq!(p.percent(), 88);
        p.tick_progress();
        assert_eq!(p.percent(), 90);
        for _ in 0..100 {
            p.tick_progress();
        }
        assert_eq!(p.percent(), 90);
    }

    #[test]
    fn test_dots_cycle() {
        let mut p = ProgressSimulation::new();
        p.start();
        let frames: Vec<String> = (0..5)
            .map(|_| {
                p.tick_dots();
                p.dots()
            })
            .collect();
        assert_eq!(frames, vec![".", "..", "...", "", "."]);
    }

    #[test]
    fn test_complete_snaps_to_hundred() {
        let mut p = ProgressSimulation::new();
        p.start();
        p.tick_progress();
        p.tick_dots();
        p.complete();
        assert_eq!(p.percent(), 100);
        assert_eq!(p.dots(), "");
        assert!(p.is_visible());
    }

    #[test]
    fn test_hidden_indicator_ignores_ticks() {
        let mut p = ProgressSimulation::new();
        p.tick_progress();
        p.tick_dots();
        assert_eq!(p.percent(), 0);
        assert_eq!(p.dots(), "");

        p.start();
        p.tick_progress();
        p.hide();
        p.tick_progress();
        assert_eq!(p.percent(), 2);
        assert!(!p.is_visible());
    }

    #[test]
    fn test_restart_resets() {
        let mut p = ProgressSimulation::new();
        p.start();
        p.complete();
        p.start();
        assert_eq!(p.percent(), 0);
        assert!(p.is_visible());
    }
}
