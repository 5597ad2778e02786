// src/types.rs
use std::fmt;
use std::time::{Duration, SystemTime};

use serde::Serialize;

/// Number of EMG pods on the armband.
pub const NUMBER_OF_SENSORS: usize = 8;

/// One of the fixed sensor inputs, addressed by index `0..NUMBER_OF_SENSORS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(usize);

impl Channel {
    pub fn new(index: usize) -> Option<Self> {
        (index < NUMBER_OF_SENSORS).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// All channels in natural order.
    pub fn all() -> impl Iterator<Item = Channel> {
        (0..NUMBER_OF_SENSORS).map(Channel)
    }

    /// Identity of the line that plots this channel.
    pub fn series(self) -> SeriesId {
        SeriesId(self.0)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// Stable handle of one renderable line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeriesId(pub usize);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series {}", self.0)
    }
}

/// Front-to-back draw priority. Also the legend listing order.
pub type ZOrderList = Vec<SeriesId>;

/// One observation on one channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// Milliseconds since the session started.
    pub elapsed_ms: f64,
    /// Raw amplitude, not clamped to the display window.
    pub value: i32,
}

impl Sample {
    pub fn new(elapsed_ms: f64, value: i32) -> Self {
        Self { elapsed_ms, value }
    }

    pub fn from_elapsed(elapsed: Duration, value: i32) -> Self {
        Self::new(elapsed.as_secs_f64() * 1000.0, value)
    }
}

/// Pick location in renderer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickPoint {
    pub x: f32,
    pub y: f32,
}

impl PickPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the renderer found under a pick point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickResult {
    NoHit,
    Line(SeriesId),
    /// Slot index in the legend as currently drawn.
    Legend(usize),
}

/// Notifications delivered by the armband collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceEvent {
    Connected,
    Disconnected,
    Emg {
        timestamp: SystemTime,
        values: Vec<i32>,
    },
}
