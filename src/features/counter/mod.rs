//! Counter Animation
//!
//! Stat numbers count up from zero the first time they become visible.
//! The ramp adds `target / (duration / tick)` per tick, shows the floored
//! running value and lands exactly on the target on the last tick.

mod controller;

pub use controller::CounterController;

use std::time::Duration;

use crate::utils::format::{format_number, split_affixes};

/// One tick of a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampStep {
    /// Value to display
    pub value: u64,
    /// True on the tick that reached the target
    pub finished: bool,
}

/// Numeric ramp from zero to a target
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRamp {
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterRamp {
    pub fn new(target: u64, duration: Duration, tick: Duration) -> Self {
        let tick_ms = tick.as_secs_f64() * 1000.0;
        let duration_ms = duration.as_secs_f64() * 1000.0;
        let steps = if tick_ms > 0.0 {
            (duration_ms / tick_ms).max(1.0)
        } else {
            1.0
        };

        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick
    pub fn tick(&mut self) -> RampStep {
        if !self.finished {
            self.current += self.increment;
            if self.current >= self.target as f64 {
                self.current = self.target as f64;
                self.finished = true;
            }
        }

        let value = if self.finished {
            self.target
        } else {
            (self.current.floor() as u64).min(self.target)
        };
        RampStep {
            value,
            finished: self.finished,
        }
    }
}

/// Rebuild the displayed text around a new value, keeping whatever
/// non-digit prefix and suffix the text currently has
pub fn render_value(current_text: &str, value: u64) -> String {
    let (prefix, suffix) = split_affixes(current_text);
    format!("{prefix}{}{suffix}", format_number(value))
}
