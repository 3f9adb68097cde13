//! Rolling window of recent acceleration samples

use crate::frame::AccelerationSample;
use std::collections::VecDeque;

/// Default window length
pub const HISTORY_CAPACITY: usize = 15;

/// Fixed-capacity FIFO of the most recent samples, oldest first
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    data: VecDeque<AccelerationSample>,
    capacity: usize,
}

impl HistoryWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: AccelerationSample) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the latest sample
    pub fn latest(&self) -> Option<&AccelerationSample> {
        self.data.back()
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &AccelerationSample> + '_ {
        self.data.iter()
    }

    /// Composite values of the last `n` samples, oldest first
    ///
    /// Returns `None` until at least `n` samples have been seen.
    pub fn recent_composites(&self, n: usize) -> Option<Vec<f64>> {
        if n == 0 || self.data.len() < n {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(self.data.len() - n)
                .map(|s| s.composite_g())
                .collect(),
        )
    }

    /// Peak-to-peak composite acceleration over the last `n` samples
    pub fn spread(&self, n: usize) -> Option<f64> {
        let values = self.recent_composites(n)?;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Some(max - min)
    }

    /// Mean composite acceleration over the last `n` samples and the largest
    /// absolute deviation from it
    pub fn mean_and_max_deviation(&self, n: usize) -> Option<(f64, f64)> {
        let values = self.recent_composites(n)?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max_deviation = values
            .iter()
            .map(|v| (v - mean).abs())
            .fold(0.0, f64::max);
        Some((mean, max_deviation))
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
