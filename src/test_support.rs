//! Shared helpers for unit tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::timer::Clock;

/// Clock that only moves when told to.
pub(crate) struct ManualClock(Cell<f64>);

impl ManualClock {
    pub(crate) fn new(start: f64) -> Rc<Self> {
        Rc::new(ManualClock(Cell::new(start)))
    }

    pub(crate) fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}
