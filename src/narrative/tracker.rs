//! Active section tracking driven by section-enter events
//!
//! The tracker is owned by the page composition root. Readers (the frame loop) get a
//! [`TrackerHandle`], a read-only view of the same cell, so the core never reads scroll
//! state from anywhere ambient. Everything runs on the event-loop thread, hence `Rc`.

use std::cell::Cell;
use std::rc::Rc;

/// Sentinel index meaning "no section has been entered yet"
pub const SECTION_NONE: i64 = -1;

/// Read-only view of the active section index
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    index: Rc<Cell<i64>>,
}

impl TrackerHandle {
    pub fn current_index(&self) -> i64 {
        self.index.get()
    }
}

/// Owns the active section index and applies one write per enter event
#[derive(Debug)]
pub struct ScrollSectionTracker {
    index: Rc<Cell<i64>>,
    enter_count: u64,
}

impl ScrollSectionTracker {
    pub fn new() -> Self {
        Self {
            index: Rc::new(Cell::new(SECTION_NONE)),
            enter_count: 0,
        }
    }

    pub fn current_index(&self) -> i64 {
        self.index.get()
    }

    /// Records that the section at `index` crossed the visibility threshold
    ///
    /// Scroll direction is irrelevant; the last event delivered wins.
    pub fn on_section_entered(&mut self, index: i64) {
        let previous = self.index.replace(index);
        self.enter_count += 1;
        log::debug!(
            "section entered: {} -> {} (event #{})",
            previous,
            index,
            self.enter_count
        );
    }

    /// Number of enter events applied since construction
    pub fn enter_count(&self) -> u64 {
        self.enter_count
    }

    pub fn handle(&self) -> TrackerHandle {
        TrackerHandle {
            index: Rc::clone(&self.index),
        }
    }
}

impl Default for ScrollSectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
