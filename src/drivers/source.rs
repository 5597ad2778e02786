use std::collections::VecDeque;
use std::f64::consts::PI;
use std::time::{Duration, SystemTime};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::drivers::EmgError;
use crate::types::{DeviceEvent, NUMBER_OF_SENSORS};

/// Armband EMG streaming rate.
pub const EMG_RATE_HZ: f64 = 200.0;

/// Something that delivers armband notifications in arrival order.
pub trait ArmbandSource {
    /// `Ok(None)` once the source has nothing more to deliver.
    fn next_event(&mut self) -> Result<Option<DeviceEvent>, EmgError>;
}

/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<DeviceEvent>,
}

impl ManualSource {
    pub fn new(events: impl IntoIterator<Item = DeviceEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }
}

impl ArmbandSource for ManualSource {
    fn next_event(&mut self) -> Result<Option<DeviceEvent>, EmgError> {
        Ok(self.queue.pop_front())
    }
}

/// Synthetic armband: connects, streams a fixed number of batches with
/// per-channel bursts plus noise, then disconnects.
pub struct SimulatedArmband {
    rng: StdRng,
    started_at: SystemTime,
    total_batches: usize,
    emitted: usize,
    connected: bool,
    finished: bool,
}

impl SimulatedArmband {
    pub fn new(seed: u64, total_batches: usize) -> Self {
        Self::starting_at(seed, total_batches, SystemTime::now())
    }

    pub fn starting_at(seed: u64, total_batches: usize, started_at: SystemTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            started_at,
            total_batches,
            emitted: 0,
            connected: false,
            finished: false,
        }
    }

    fn batch(&mut self) -> DeviceEvent {
        let n = self.emitted;
        let t = n as f64 / EMG_RATE_HZ;
        let values = (0..NUMBER_OF_SENSORS)
            .map(|ch| {
                // Each pod bursts at its own slow rate.
                let envelope = (2.0 * PI * (0.5 + ch as f64 * 0.25) * t).sin().abs();
                let carrier = (2.0 * PI * 60.0 * t + ch as f64).sin();
                let noise: f64 = self.rng.gen_range(-8.0..8.0);
                (100.0 * envelope * carrier + noise).clamp(-128.0, 127.0) as i32
            })
            .collect();
        let offset = Duration::from_secs_f64(n as f64 / EMG_RATE_HZ);
        self.emitted += 1;
        DeviceEvent::Emg {
            timestamp: self.started_at + offset,
            values,
        }
    }
}

impl ArmbandSource for SimulatedArmband {
    fn next_event(&mut self) -> Result<Option<DeviceEvent>, EmgError> {
        if !self.connected {
            self.connected = true;
            return Ok(Some(DeviceEvent::Connected));
        }
        if self.emitted < self.total_batches {
            return Ok(Some(self.batch()));
        }
        if !self.finished {
            self.finished = true;
            return Ok(Some(DeviceEvent::Disconnected));
        }
        Ok(None)
    }
}
