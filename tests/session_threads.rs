use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::SystemTime;

use emg_vis::{
    drain_events, spawn_device_thread, Channel, ChartFrame, ChartSurface, EmgError, EmgSession,
    HitTest, PickPoint, PickResult, SeriesId, SimulatedArmband, VisConfig, NUMBER_OF_SENSORS,
};

struct LegendSurface {
    presented: Vec<usize>,
}

impl HitTest for LegendSurface {
    fn hit_test(&self, point: PickPoint) -> PickResult {
        PickResult::Legend(point.y as usize)
    }
}

impl ChartSurface for LegendSurface {
    fn present(&mut self, frame: &ChartFrame) {
        self.presented.push(frame.samples_per_line());
    }
}

#[test]
fn ingestion_and_promotion_race_without_breaking_invariants() {
    let session = Arc::new(EmgSession::new(VisConfig::default()).unwrap());
    session.start_session();

    let writer = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for step in 0..2_000 {
                let values = [step; NUMBER_OF_SENSORS];
                session.append_batch(step as f64, &values).unwrap();
            }
        })
    };
    let clicker = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for i in 0..2_000 {
                let slot = i % (NUMBER_OF_SENSORS + 2);
                let legend = move |_: PickPoint| PickResult::Legend(slot);
                if let Some(id) = session.resolve_pick(PickPoint::new(0.0, 0.0), &legend) {
                    session.promote(id).unwrap();
                }
                let frame = session.frame();
                let len = frame.samples_per_line();
                assert!(frame.lines.iter().all(|l| l.samples.len() == len));
            }
        })
    };
    writer.join().unwrap();
    clicker.join().unwrap();

    assert_eq!(session.len(), 2_000);
    let mut order = session.current_order();
    order.sort();
    assert_eq!(order, (0..NUMBER_OF_SENSORS).map(SeriesId).collect::<Vec<_>>());
    for ch in Channel::all() {
        let seq = session.sequence_for(ch);
        assert!(seq.windows(2).all(|w| w[0].elapsed_ms <= w[1].elapsed_ms));
    }
}

#[test]
fn simulated_armband_streams_through_engine() {
    let _ = env_logger::builder().is_test(true).try_init();
    let session = EmgSession::default();
    let start = SystemTime::now();
    session.start_session_at(start);

    let (tx, rx) = channel();
    let device = spawn_device_thread(SimulatedArmband::starting_at(9, 200, start), tx);
    device.join().unwrap();
    let stats = drain_events(&rx, &session, usize::MAX);

    assert_eq!(stats.rejected, 0);
    assert_eq!(session.len(), 200);
    let last = session.sequence_for(Channel::new(0).unwrap());
    let span = last.last().unwrap().elapsed_ms - last.first().unwrap().elapsed_ms;
    assert!((span - 995.0).abs() < 1.0, "span was {span}");
    let frame = session.take_dirty_frame().unwrap();
    assert_eq!(frame.samples_per_line(), 200);
    assert!(session.take_dirty_frame().is_none());
}

#[test]
fn nothing_lands_after_end_session() {
    for _ in 0..50 {
        let session = Arc::new(EmgSession::default());
        session.start_session();
        let writer = {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for step in 0..500 {
                    match session.append_batch(step as f64, &[step; NUMBER_OF_SENSORS]) {
                        Ok(()) => {}
                        Err(EmgError::SessionClosed) => break,
                        Err(err) => panic!("unexpected error: {err}"),
                    }
                }
            })
        };
        thread::yield_now();
        session.end_session();
        writer.join().unwrap();
        assert!(session.is_empty());
        assert!(session.take_dirty_frame().is_none());
    }
}

#[test]
fn clicks_during_streaming_never_swallow_the_last_batch() {
    let session = Arc::new(EmgSession::default());
    session.start_session();
    let writer = {
        let session = Arc::clone(&session);
        thread::spawn(move || {
            for step in 0..1_000 {
                session
                    .append_batch(step as f64, &[step; NUMBER_OF_SENSORS])
                    .unwrap();
            }
        })
    };
    let mut surface = LegendSurface {
        presented: Vec::new(),
    };
    let mut slot = 0;
    while !writer.is_finished() {
        session
            .handle_click(PickPoint::new(0.0, slot as f32), &mut surface)
            .unwrap();
        slot = (slot + 1) % NUMBER_OF_SENSORS;
    }
    writer.join().unwrap();
    session.refresh(&mut surface);
    assert_eq!(surface.presented.last().copied(), Some(1_000));
}
