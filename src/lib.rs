//! Core of a live eight-channel EMG armband chart.
//!
//! Armband batches are appended to a per-channel [`SeriesBuffer`]; a
//! [`ZOrderController`] keeps the plotted lines in recency order so a click on
//! a line or legend entry brings it to the front. [`EmgSession`] ties both to a
//! viewing session that can be shared between the device thread and the UI
//! thread, and hands [`ChartFrame`]s to whatever renderer implements
//! [`ChartSurface`]. Painting, windowing and device pairing live outside.

pub mod config;
pub mod drivers;
pub mod engine;
pub mod session;
pub mod types;

pub use config::{Rgb, VisConfig};
pub use drivers::{
    ArmbandSource, ChartFrame, ChartSurface, EmgError, HitTest, ManualSource, SeriesBuffer,
    SeriesLine, SimulatedArmband, ZOrderController,
};
pub use engine::{drain_events, spawn_device_thread, DrainStats};
pub use session::EmgSession;
pub use types::{
    Channel, DeviceEvent, PickPoint, PickResult, Sample, SeriesId, ZOrderList, NUMBER_OF_SENSORS,
};
