// src/session.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use log::{debug, info, warn};

use crate::config::VisConfig;
use crate::drivers::{ChartFrame, ChartSurface, EmgError, HitTest, SeriesBuffer, ZOrderController};
use crate::types::{Channel, DeviceEvent, PickPoint, Sample, SeriesId, ZOrderList};

/// Shared state of one viewing session.
///
/// Samples arrive on the device delivery thread while picks and repaints
/// happen on the UI thread, so the buffer and the z-order each sit behind
/// their own lock. No method holds both locks at once.
pub struct EmgSession {
    config: VisConfig,
    ingest: Mutex<Ingest>,
    zorder: Mutex<ZOrderController>,
    started_at: Mutex<SystemTime>,
    device_attached: AtomicBool,
    dirty: AtomicBool,
}

/// Buffer plus the open flag, so closing and appending serialize.
struct Ingest {
    series: SeriesBuffer,
    open: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl EmgSession {
    pub fn new(config: VisConfig) -> Result<Self, EmgError> {
        config.validate()?;
        let series = SeriesBuffer::with_history_limit(config.history_limit)?;
        Ok(Self::with_buffer(config, series))
    }

    fn with_buffer(config: VisConfig, series: SeriesBuffer) -> Self {
        Self {
            ingest: Mutex::new(Ingest {
                series,
                open: false,
            }),
            zorder: Mutex::new(ZOrderController::new()),
            started_at: Mutex::new(SystemTime::now()),
            device_attached: AtomicBool::new(false),
            dirty: AtomicBool::new(false),
            config,
        }
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn start_session(&self) {
        self.start_session_at(SystemTime::now());
    }

    /// Reset to empty histories and natural order, measuring elapsed time
    /// from `started_at`.
    pub fn start_session_at(&self, started_at: SystemTime) {
        lock(&self.zorder).reset();
        *lock(&self.started_at) = started_at;
        let mut ingest = lock(&self.ingest);
        ingest.series.clear();
        ingest.open = true;
        self.dirty.store(true, Ordering::Release);
        info!("EMG session started");
    }

    /// Stop accepting batches and release accumulated history. Idempotent.
    pub fn end_session(&self) {
        let mut ingest = lock(&self.ingest);
        if ingest.open {
            info!(
                "EMG session ended after {} samples per channel",
                ingest.series.len()
            );
        }
        ingest.open = false;
        ingest.series.clear();
        self.device_attached.store(false, Ordering::Release);
        self.dirty.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        lock(&self.ingest).open
    }

    pub fn is_device_attached(&self) -> bool {
        self.device_attached.load(Ordering::Acquire)
    }

    pub fn append_batch(&self, elapsed_ms: f64, values: &[i32]) -> Result<(), EmgError> {
        let mut ingest = lock(&self.ingest);
        if !ingest.open {
            return Err(EmgError::SessionClosed);
        }
        ingest.series.append_batch(elapsed_ms, values)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    /// Append a device batch, timing it relative to the session start.
    pub fn on_emg(&self, timestamp: SystemTime, values: &[i32]) -> Result<(), EmgError> {
        let started_at = *lock(&self.started_at);
        let elapsed = timestamp.duration_since(started_at).unwrap_or_default();
        self.append_batch(elapsed.as_secs_f64() * 1000.0, values)
    }

    /// Apply one armband notification. Batches that arrive while no device
    /// is attached are ignored.
    pub fn handle_device_event(&self, event: DeviceEvent) -> Result<(), EmgError> {
        match event {
            DeviceEvent::Connected => {
                self.device_attached.store(true, Ordering::Release);
                info!("armband connected; EMG streaming enabled");
                Ok(())
            }
            DeviceEvent::Disconnected => {
                self.device_attached.store(false, Ordering::Release);
                info!("armband disconnected");
                Ok(())
            }
            DeviceEvent::Emg { timestamp, values } => {
                if !self.is_device_attached() {
                    debug!("dropping EMG batch from detached device");
                    return Ok(());
                }
                self.on_emg(timestamp, &values).map_err(|err| {
                    warn!("rejected EMG batch: {err}");
                    err
                })
            }
        }
    }

    pub fn sequence_for(&self, channel: Channel) -> Vec<Sample> {
        lock(&self.ingest)
            .series
            .sequence_for(channel)
            .iter()
            .copied()
            .collect()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        lock(&self.ingest).series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_order(&self) -> ZOrderList {
        lock(&self.zorder).snapshot()
    }

    pub fn resolve_pick<H>(&self, point: PickPoint, hit_test: &H) -> Option<SeriesId>
    where
        H: HitTest + ?Sized,
    {
        lock(&self.zorder).resolve_pick(point, hit_test)
    }

    pub fn promote(&self, id: SeriesId) -> Result<(), EmgError> {
        lock(&self.zorder).promote(id)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    /// Bring the clicked line (or legend entry) to the front and repaint.
    pub fn handle_click<S>(&self, point: PickPoint, surface: &mut S) -> Result<Option<SeriesId>, EmgError>
    where
        S: ChartSurface + ?Sized,
    {
        let picked = {
            let mut zorder = lock(&self.zorder);
            let Some(id) = zorder.resolve_pick(point, &*surface) else {
                return Ok(None);
            };
            zorder.promote(id)?;
            id
        };
        self.dirty.store(false, Ordering::Release);
        let frame = self.frame();
        surface.present(&frame);
        Ok(Some(picked))
    }

    pub fn frame(&self) -> ChartFrame {
        let order = self.current_order();
        let ingest = lock(&self.ingest);
        ChartFrame::build(&self.config, &order, &ingest.series)
    }

    /// A fresh frame if anything changed since the last one was taken.
    pub fn take_dirty_frame(&self) -> Option<ChartFrame> {
        self.dirty
            .swap(false, Ordering::AcqRel)
            .then(|| self.frame())
    }

    /// Repaint tick. Returns whether a frame was presented.
    pub fn refresh<S>(&self, surface: &mut S) -> bool
    where
        S: ChartSurface + ?Sized,
    {
        match self.take_dirty_frame() {
            Some(frame) => {
                surface.present(&frame);
                true
            }
            None => false,
        }
    }
}

impl Default for EmgSession {
    fn default() -> Self {
        Self::with_buffer(VisConfig::default(), SeriesBuffer::new())
    }
}
