use std::collections::VecDeque;

use crate::drivers::EmgError;
use crate::types::{Channel, Sample, NUMBER_OF_SENSORS};

/// Per-channel sample history backing the plotted lines.
///
/// Every channel always holds the same number of samples: a batch is either
/// appended to all channels or rejected as a whole. With a `history_limit`
/// the oldest sample of every channel is evicted together.
#[derive(Clone, Debug)]
pub struct SeriesBuffer {
    per_channel: Vec<VecDeque<Sample>>, // channel -> samples
    history_limit: Option<usize>,
}

impl SeriesBuffer {
    /// Unbounded buffer, one sequence per sensor.
    pub fn new() -> Self {
        Self::allocate(None)
    }

    /// Buffer keeping at most `history_limit` samples per channel.
    pub fn with_history_limit(history_limit: Option<usize>) -> Result<Self, EmgError> {
        if history_limit == Some(0) {
            return Err(EmgError::Config("history_limit must be at least 1".into()));
        }
        Ok(Self::allocate(history_limit))
    }

    fn allocate(history_limit: Option<usize>) -> Self {
        let capacity = history_limit.unwrap_or(0);
        let per_channel = (0..NUMBER_OF_SENSORS)
            .map(|_| VecDeque::with_capacity(capacity))
            .collect();
        Self {
            per_channel,
            history_limit,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.per_channel.len()
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    /// Append one multi-channel batch stamped with `elapsed_ms`.
    pub fn append_batch(&mut self, elapsed_ms: f64, values: &[i32]) -> Result<(), EmgError> {
        if values.len() != self.per_channel.len() {
            return Err(EmgError::InvalidInput {
                expected: self.per_channel.len(),
                actual: values.len(),
            });
        }
        for (channel_queue, &value) in self.per_channel.iter_mut().zip(values) {
            if Some(channel_queue.len()) == self.history_limit {
                channel_queue.pop_front();
            }
            channel_queue.push_back(Sample::new(elapsed_ms, value));
        }
        Ok(())
    }

    /// Full accumulated history of one channel, oldest first.
    pub fn sequence_for(&self, channel: Channel) -> &VecDeque<Sample> {
        &self.per_channel[channel.index()]
    }

    pub fn sequence_at(&self, index: usize) -> Result<&VecDeque<Sample>, EmgError> {
        self.per_channel
            .get(index)
            .ok_or(EmgError::InvalidChannel(index))
    }

    /// Samples per channel (identical for all channels).
    pub fn len(&self) -> usize {
        self.per_channel.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elapsed time of the newest batch, if any.
    pub fn latest_elapsed_ms(&self) -> Option<f64> {
        self.per_channel
            .first()
            .and_then(|c| c.back())
            .map(|s| s.elapsed_ms)
    }

    pub fn clear(&mut self) {
        for channel in &mut self.per_channel {
            channel.clear();
        }
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(i: usize) -> Channel {
        Channel::new(i).unwrap()
    }

    fn collected(buffer: &SeriesBuffer, i: usize) -> Vec<(f64, i32)> {
        buffer
            .sequence_for(channel(i))
            .iter()
            .map(|s| (s.elapsed_ms, s.value))
            .collect()
    }

    #[test]
    fn batches_land_on_their_channels() {
        let mut buffer = SeriesBuffer::new();
        buffer.append_batch(10.0, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        buffer.append_batch(20.0, &[9, 8, 7, 6, 5, 4, 3, 2]).unwrap();
        assert_eq!(collected(&buffer, 0), vec![(10.0, 1), (20.0, 9)]);
        assert_eq!(collected(&buffer, 7), vec![(10.0, 8), (20.0, 2)]);
        assert_eq!(buffer.latest_elapsed_ms(), Some(20.0));
    }

    #[test]
    fn short_batch_is_rejected_without_partial_append() {
        let mut buffer = SeriesBuffer::new();
        buffer.append_batch(1.0, &[0; 8]).unwrap();
        let err = buffer.append_batch(2.0, &[1, 2, 3, 4, 5, 6, 7]).unwrap_err();
        assert!(matches!(
            err,
            EmgError::InvalidInput {
                expected: 8,
                actual: 7
            }
        ));
        for ch in Channel::all() {
            assert_eq!(buffer.sequence_for(ch).len(), 1);
        }
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let mut buffer = SeriesBuffer::new();
        assert!(buffer.append_batch(1.0, &[0; 9]).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn channels_stay_aligned_and_time_ordered() {
        let mut buffer = SeriesBuffer::new();
        for step in 0..50 {
            let values: Vec<i32> = (0..8).map(|c| c * step).collect();
            buffer.append_batch(step as f64 * 5.0, &values).unwrap();
            if step % 7 == 0 {
                let _ = buffer.append_batch(0.0, &values[..3]);
            }
        }
        for ch in Channel::all() {
            let seq = buffer.sequence_for(ch);
            assert_eq!(seq.len(), 50);
            assert!(seq
                .iter()
                .zip(seq.iter().skip(1))
                .all(|(a, b)| a.elapsed_ms <= b.elapsed_ms));
        }
    }

    #[test]
    fn history_limit_evicts_oldest_from_every_channel() {
        let mut buffer = SeriesBuffer::with_history_limit(Some(3)).unwrap();
        for step in 0..5 {
            buffer.append_batch(step as f64, &[step; 8]).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        for ch in Channel::all() {
            let times: Vec<f64> = buffer.sequence_for(ch).iter().map(|s| s.elapsed_ms).collect();
            assert_eq!(times, vec![2.0, 3.0, 4.0]);
        }
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        assert!(matches!(
            SeriesBuffer::with_history_limit(Some(0)),
            Err(EmgError::Config(_))
        ));
    }

    #[test]
    fn history_limit_of_one_keeps_latest_batch() {
        let mut buffer = SeriesBuffer::with_history_limit(Some(1)).unwrap();
        buffer.append_batch(1.0, &[1; 8]).unwrap();
        buffer.append_batch(2.0, &[2; 8]).unwrap();
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.latest_elapsed_ms(), Some(2.0));
    }

    #[test]
    fn sequence_at_checks_bounds() {
        let buffer = SeriesBuffer::new();
        assert!(buffer.sequence_at(7).is_ok());
        assert!(matches!(
            buffer.sequence_at(8),
            Err(EmgError::InvalidChannel(8))
        ));
    }
}
