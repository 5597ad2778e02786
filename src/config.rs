// src/config.rs
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drivers::EmgError;
use crate::types::Channel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const RED: Rgb = Rgb(255, 0, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const PINK: Rgb = Rgb(255, 192, 203);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PURPLE: Rgb = Rgb(128, 0, 128);
pub const BLACK: Rgb = Rgb(0, 0, 0);

/// Display settings for the EMG chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    pub title: String,
    /// Legend label is `"{label_prefix} {channel}"`.
    pub label_prefix: String,
    /// Vertical display window. Data outside it is kept, only clipped on screen.
    pub y_min: f64,
    pub y_max: f64,
    /// Horizontal grid step in milliseconds.
    pub x_major_step: f64,
    /// Line colour per channel, wrapping if shorter than the channel count.
    pub palette: Vec<Rgb>,
    /// Repaint tick for coalesced redraws.
    pub refresh_interval_ms: u64,
    /// Samples kept per channel; `None` keeps the whole session.
    pub history_limit: Option<usize>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            title: "Myo EMG Data vs Time".to_owned(),
            label_prefix: "Sensor".to_owned(),
            y_min: -200.0,
            y_max: 200.0,
            x_major_step: 100.0,
            palette: vec![RED, BLUE, GREEN, YELLOW, PINK, ORANGE, PURPLE, BLACK],
            refresh_interval_ms: 100,
            history_limit: None,
        }
    }
}

impl VisConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EmgError> {
        let config: VisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EmgError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), EmgError> {
        if self.palette.is_empty() {
            return Err(EmgError::Config("palette must not be empty".into()));
        }
        if !(self.y_min < self.y_max) {
            return Err(EmgError::Config(format!(
                "y_min ({}) must be below y_max ({})",
                self.y_min, self.y_max
            )));
        }
        if !(self.x_major_step > 0.0) {
            return Err(EmgError::Config("x_major_step must be positive".into()));
        }
        if self.refresh_interval_ms == 0 {
            return Err(EmgError::Config("refresh_interval_ms must be positive".into()));
        }
        if self.history_limit == Some(0) {
            return Err(EmgError::Config("history_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn label_for(&self, channel: Channel) -> String {
        format!("{} {}", self.label_prefix, channel.index())
    }

    pub fn color_for(&self, channel: Channel) -> Rgb {
        self.palette[channel.index() % self.palette.len()]
    }
}
