use log::debug;

use crate::drivers::{EmgError, HitTest};
use crate::types::{Channel, PickPoint, PickResult, SeriesId, ZOrderList};

/// Recency-ordered draw priority over the plotted series.
///
/// `order[0]` is drawn on top and listed first in the legend, so the same
/// list answers both paint order and legend-slot lookups.
#[derive(Clone, Debug)]
pub struct ZOrderController {
    order: ZOrderList,
}

impl ZOrderController {
    /// One series per channel, channel 0 in front.
    pub fn new() -> Self {
        Self::with_series(Channel::all().map(Channel::series).collect())
    }

    pub fn with_series(order: ZOrderList) -> Self {
        Self { order }
    }

    /// Map a pick to a series without changing the order.
    ///
    /// Legend slots are read against the order as it stands now. A slot past
    /// the end means the legend changed under the pick and resolves to nothing.
    pub fn resolve_pick<H>(&self, point: PickPoint, hit_test: &H) -> Option<SeriesId>
    where
        H: HitTest + ?Sized,
    {
        match hit_test.hit_test(point) {
            PickResult::NoHit => None,
            PickResult::Line(id) => Some(id),
            PickResult::Legend(slot) => {
                let id = self.order.get(slot).copied();
                if id.is_none() {
                    debug!("legend slot {slot} is stale; ignoring pick");
                }
                id
            }
        }
    }

    /// Move `id` to the front; everything else keeps its relative order.
    pub fn promote(&mut self, id: SeriesId) -> Result<(), EmgError> {
        let pos = self
            .order
            .iter()
            .position(|&s| s == id)
            .ok_or(EmgError::InvalidState(id))?;
        if pos > 0 {
            let promoted = self.order.remove(pos);
            self.order.insert(0, promoted);
            debug!("promoted {id} to front");
        }
        Ok(())
    }

    pub fn current_order(&self) -> &[SeriesId] {
        &self.order
    }

    pub fn snapshot(&self) -> ZOrderList {
        self.order.clone()
    }

    pub fn rank_of(&self, id: SeriesId) -> Option<usize> {
        self.order.iter().position(|&s| s == id)
    }

    /// Stable-sort a renderer's draw list into z-order. Items whose id is not
    /// tracked go to the back.
    pub fn sort_draw_list<T, K>(&self, items: &mut [T], key: K)
    where
        K: Fn(&T) -> SeriesId,
    {
        items.sort_by_key(|item| self.rank_of(key(item)).unwrap_or(usize::MAX));
    }

    pub fn reset(&mut self) {
        self.order.sort();
    }
}

impl Default for ZOrderController {
    fn default() -> Self {
        Self::new()
    }
}
