use serde::Serialize;

use crate::config::{Rgb, VisConfig};
use crate::drivers::{SeriesBuffer, ZOrderController};
use crate::types::{Channel, Sample, SeriesId};

/// One line ready to paint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesLine {
    pub id: SeriesId,
    pub label: String,
    pub color: Rgb,
    pub samples: Vec<Sample>,
}

/// Snapshot handed to the renderer. `lines` is in z-order, front first,
/// which is also the order the legend lists them in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartFrame {
    pub title: String,
    pub y_range: (f64, f64),
    pub x_major_step: f64,
    pub lines: Vec<SeriesLine>,
}

impl ChartFrame {
    pub fn build(config: &VisConfig, order: &[SeriesId], buffer: &SeriesBuffer) -> Self {
        let mut lines: Vec<SeriesLine> = Channel::all()
            .map(|channel| SeriesLine {
                id: channel.series(),
                label: config.label_for(channel),
                color: config.color_for(channel),
                samples: buffer.sequence_for(channel).iter().copied().collect(),
            })
            .collect();
        ZOrderController::with_series(order.to_vec()).sort_draw_list(&mut lines, |l| l.id);
        Self {
            title: config.title.clone(),
            y_range: (config.y_min, config.y_max),
            x_major_step: config.x_major_step,
            lines,
        }
    }

    pub fn line(&self, id: SeriesId) -> Option<&SeriesLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn samples_per_line(&self) -> usize {
        self.lines.first().map(|l| l.samples.len()).unwrap_or(0)
    }

    /// Horizontal extent covered by the samples, in milliseconds.
    pub fn x_span(&self) -> Option<(f64, f64)> {
        let samples = &self.lines.first()?.samples;
        Some((samples.first()?.elapsed_ms, samples.last()?.elapsed_ms))
    }
}
