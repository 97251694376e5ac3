use std::rc::Rc;

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// Source of wall-clock time in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `Date.now()` in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

pub fn system_clock() -> Rc<dyn Clock> {
    Rc::new(SystemClock)
}

/// Stopwatch reporting seconds since the last reset.
pub struct Timer {
    clock: Rc<dyn Clock>,
    start_time: f64,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        let start_time = clock.now_ms();
        Timer { clock, start_time }
    }

    pub fn reset(&mut self) {
        self.start_time = self.clock.now_ms();
    }

    pub fn start(&mut self) {
        self.reset();
    }

    pub fn current_time(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Seconds since the last reset.
    pub fn elapsed_time(&self) -> f64 {
        (self.current_time() - self.start_time) / 1000.0
    }

    pub fn time_elapsed(&self) -> f64 {
        self.elapsed_time()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame-to-frame timer used by animations. Reports milliseconds.
pub struct AnimTimer {
    clock: Rc<dyn Clock>,
    last_time: f64,
    current_time: f64,
}

impl AnimTimer {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        let now = clock.now_ms();
        AnimTimer { clock, last_time: now, current_time: now }
    }

    pub fn start(&mut self) {
        self.current_time = self.clock.now_ms();
    }

    pub fn reset(&mut self) {
        self.start();
    }

    /// Milliseconds since the previous call (or since start/reset).
    pub fn time_elapsed(&mut self) -> f64 {
        self.last_time = self.current_time;
        self.current_time = self.clock.now_ms();
        self.current_time - self.last_time
    }
}
