//! Replay trace with a fixed capacity
//!
//! Keeps the most recent host-level happenings of a replay so the final
//! report can show what led to the resulting DOM. Oldest entries are dropped
//! first.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// One traced happening, stamped with the virtual clock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub at: Duration,
    pub message: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}ms] {}", self.at.as_millis(), self.message)
    }
}

/// Fixed-capacity trace log
#[derive(Clone, Debug)]
pub struct TraceLog {
    capacity: usize,
    entries: VecDeque<TraceEntry>,
    dropped: usize,
}

impl TraceLog {
    /// Create a trace keeping at most `capacity` entries. A zero capacity
    /// records nothing but still counts drops.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(256)),
            dropped: 0,
        }
    }

    /// Record a message at the given virtual time
    pub fn record(&mut self, at: Duration, message: impl Into<String>) {
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(TraceEntry {
            at,
            message: message.into(),
        });
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    /// Number of entries that no longer fit
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
