//! Ordered, optionally capacity-bounded list of stream records

use std::collections::VecDeque;

use agentpulse_types::ActivityRecord;

/// Capacity policy of a `StreamBuffer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Keep only the most recent `n` records
    Bounded(usize),
    Unbounded,
}

#[derive(Debug, Clone)]
pub struct StreamBuffer {
    records: VecDeque<ActivityRecord>,
    capacity: Capacity,
}

impl StreamBuffer {
    pub fn new(capacity: Capacity) -> Self {
        let records = match capacity {
            Capacity::Bounded(n) => VecDeque::with_capacity(n.saturating_add(1)),
            Capacity::Unbounded => VecDeque::new(),
        };
        Self { records, capacity }
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Append a record, evicting the oldest entries past capacity.
    pub fn push(&mut self, record: ActivityRecord) {
        self.records.push_back(record);
        if let Capacity::Bounded(limit) = self.capacity {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.records = VecDeque::new();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActivityRecord> + ExactSizeIterator {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ActivityRecord> {
        self.records.back()
    }
}
