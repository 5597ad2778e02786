// src/drivers/mod.rs
pub mod buffer;
pub mod error;
pub mod frame;
pub mod source;
pub mod surface;
pub mod zorder;

pub use buffer::SeriesBuffer;
pub use error::EmgError;
pub use frame::{ChartFrame, SeriesLine};
pub use source::{ArmbandSource, ManualSource, SimulatedArmband, EMG_RATE_HZ};
pub use surface::{ChartSurface, HitTest};
pub use zorder::ZOrderController;
