// src/engine.rs
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::drivers::ArmbandSource;
use crate::session::EmgSession;
use crate::types::DeviceEvent;

/// Outcome of one drain pass on the UI side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub applied: usize,
    pub rejected: usize,
    /// The device thread has hung up and the queue is empty.
    pub disconnected: bool,
}

/// Pump `source` on its own thread, forwarding every event to `tx`.
///
/// The thread exits when the source runs dry, fails, or the receiving side
/// is dropped. Returns the number of events forwarded.
pub fn spawn_device_thread<S>(mut source: S, tx: Sender<DeviceEvent>) -> JoinHandle<usize>
where
    S: ArmbandSource + Send + 'static,
{
    thread::spawn(move || {
        let mut forwarded = 0;
        loop {
            match source.next_event() {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        info!("event receiver dropped; stopping device thread");
                        break;
                    }
                    forwarded += 1;
                }
                Ok(None) => break,
                Err(err) => {
                    warn!("armband source failed: {err}");
                    break;
                }
            }
        }
        forwarded
    })
}

/// Apply up to `max` queued device events to `session`. Meant to run on the
/// UI thread once per tick, so it never blocks.
pub fn drain_events(rx: &Receiver<DeviceEvent>, session: &EmgSession, max: usize) -> DrainStats {
    let mut stats = DrainStats::default();
    for _ in 0..max {
        match rx.try_recv() {
            Ok(event) => match session.handle_device_event(event) {
                Ok(()) => stats.applied += 1,
                Err(_) => stats.rejected += 1,
            },
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                stats.disconnected = true;
                break;
            }
        }
    }
    stats
}
