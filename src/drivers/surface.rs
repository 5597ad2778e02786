use crate::drivers::ChartFrame;
use crate::types::{PickPoint, PickResult};

/// Hit-test capability of the renderer: what sits under a pick point.
pub trait HitTest {
    fn hit_test(&self, point: PickPoint) -> PickResult;
}

impl<F> HitTest for F
where
    F: Fn(PickPoint) -> PickResult,
{
    fn hit_test(&self, point: PickPoint) -> PickResult {
        self(point)
    }
}

/// Rendering collaborator. Paints frames handed over by the session and
/// answers hit-tests against what it last painted.
pub trait ChartSurface: HitTest {
    fn present(&mut self, frame: &ChartFrame);
}
