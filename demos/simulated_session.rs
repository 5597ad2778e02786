// Headless run of a simulated armband through an EMG session.
//
//   RUST_LOG=info cargo run --example simulated_session -- [config.json] [frame.json]
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use emg_vis::{
    drain_events, spawn_device_thread, ChartFrame, ChartSurface, EmgSession, HitTest, PickPoint,
    PickResult, SimulatedArmband, VisConfig,
};
use log::info;

/// Stand-in renderer: logs frames and reports a legend hit for any pick
/// inside the legend column.
struct LogSurface {
    frames: usize,
}

impl HitTest for LogSurface {
    fn hit_test(&self, point: PickPoint) -> PickResult {
        if point.x > 900.0 && point.y >= 0.0 {
            PickResult::Legend((point.y / 20.0) as usize)
        } else {
            PickResult::NoHit
        }
    }
}

impl ChartSurface for LogSurface {
    fn present(&mut self, frame: &ChartFrame) {
        self.frames += 1;
        let front: Vec<&str> = frame.lines.iter().map(|l| l.label.as_str()).collect();
        info!(
            "frame {}: {} samples/line, span {:?}, draw order {:?}",
            self.frames,
            frame.samples_per_line(),
            frame.x_span(),
            front
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = match std::env::args().nth(1) {
        Some(path) => VisConfig::from_json_file(&path)
            .with_context(|| format!("loading display config from {path}"))?,
        None => VisConfig::default(),
    };
    let tick = Duration::from_millis(config.refresh_interval_ms);
    let session = EmgSession::new(config)?;
    session.start_session();

    let (tx, rx) = channel();
    let device = spawn_device_thread(SimulatedArmband::new(42, 600), tx);
    let mut surface = LogSurface { frames: 0 };

    for ticks in 0.. {
        let stats = drain_events(&rx, &session, 64);
        session.refresh(&mut surface);
        if ticks == 3 {
            // Click the fifth legend entry.
            let picked = session.handle_click(PickPoint::new(950.0, 85.0), &mut surface)?;
            info!("click picked {picked:?}");
        }
        if stats.disconnected {
            break;
        }
        thread::sleep(tick);
    }

    device
        .join()
        .map_err(|_| anyhow::anyhow!("device thread panicked"))?;
    info!("{} samples per channel", session.len());
    if let Some(path) = std::env::args().nth(2) {
        let json = serde_json::to_string_pretty(&session.frame())?;
        std::fs::write(&path, json).with_context(|| format!("writing final frame to {path}"))?;
        info!("final frame written to {path}");
    }
    session.end_session();
    Ok(())
}
