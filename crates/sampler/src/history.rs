use polar_core::{HistorySnapshot, Reading};
use std::collections::VecDeque;

/// Upper bound on up-front allocation; larger capacities grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// Rolling history of the most recent readings.
///
/// Holds at most `capacity` readings in insertion order; appending to a full
/// buffer evicts the oldest.  A capacity of `0` keeps nothing.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    readings: VecDeque<Reading>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// Push a new reading, evicting the oldest until the buffer fits.
    pub fn append(&mut self, reading: Reading) {
        self.readings.push_back(reading);
        self.evict_to(self.capacity);
    }

    /// Ordered copy of the current contents.
    pub fn snapshot(&self) -> HistorySnapshot {
        self.readings.iter().copied().collect::<Vec<_>>().into()
    }

    /// Most recently appended reading still held.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, keeping the newest readings that still fit.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_to(capacity);
    }

    fn evict_to(&mut self, capacity: usize) {
        while self.readings.len() > capacity {
            self.readings.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn reading(i: i64) -> Reading {
        let base = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Reading::new(i as f64, base + chrono::Duration::seconds(i))
    }

    fn values(h: &HistoryBuffer) -> Vec<f64> {
        h.snapshot().iter().map(|r| r.value).collect()
    }

    #[test]
    fn keeps_last_n_in_order() {
        let mut h = HistoryBuffer::new(5);
        for i in 0..8 {
            h.append(reading(i));
        }
        assert_eq!(h.len(), 5);
        assert_eq!(values(&h), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(h.latest().map(|r| r.value), Some(7.0));
    }

    #[test]
    fn under_capacity_keeps_everything() {
        let mut h = HistoryBuffer::new(5);
        h.append(reading(0));
        h.append(reading(1));
        assert_eq!(values(&h), vec![0.0, 1.0]);
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut h = HistoryBuffer::new(1);
        for i in 0..4 {
            h.append(reading(i));
            assert_eq!(h.len(), 1);
            assert_eq!(h.latest().map(|r| r.value), Some(i as f64));
        }
    }

    #[test]
    fn capacity_zero_is_always_empty() {
        let mut h = HistoryBuffer::new(0);
        for i in 0..10 {
            h.append(reading(i));
        }
        assert!(h.is_empty());
        assert!(h.latest().is_none());
        assert!(h.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_stable_and_detached() {
        let mut h = HistoryBuffer::new(3);
        h.append(reading(0));
        h.append(reading(1));

        let first = h.snapshot();
        let second = h.snapshot();
        assert_eq!(first, second);

        h.append(reading(2));
        h.append(reading(3));
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].value, 0.0);
        assert_eq!(h.snapshot()[0].value, 1.0);
    }

    #[test]
    fn resize_keeps_newest() {
        let mut h = HistoryBuffer::new(5);
        for i in 0..5 {
            h.append(reading(i));
        }
        h.resize(2);
        assert_eq!(values(&h), vec![3.0, 4.0]);

        h.resize(4);
        h.append(reading(5));
        h.append(reading(6));
        assert_eq!(values(&h), vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(h.capacity(), 4);
    }
}
