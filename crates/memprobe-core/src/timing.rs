//! Scoped measurement handle.
//!
//! A kernel receives a `Measurement` and brackets any work that must not be
//! attributed to the timed interval with `suspend`/`resume`. Suspensions
//! nest: timing stops at the outermost `suspend` and restarts at the
//! matching outermost `resume`, provided it was running when suspended.

use std::time::{Duration, Instant};

/// Timing capability handed to a per-iteration operation.
pub trait Measurement {
    /// Stop attributing elapsed time to the current sample.
    fn suspend(&mut self);

    /// Undo one `suspend`.
    fn resume(&mut self);

    /// Run `f` with timing suspended.
    fn excluded<R>(&mut self, f: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        self.suspend();
        let out = f();
        self.resume();
        out
    }
}

/// Wall-clock accumulator honoring nested suspensions.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    running_since: Option<Instant>,
    accumulated: Duration,
    depth: u32,
    // Whether the outermost suspend interrupted a running span.
    resume_running: bool,
}

impl Stopwatch {
    /// A stopwatch that has not started; `elapsed` is zero until `start`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            running_since: None,
            accumulated: Duration::ZERO,
            depth: 0,
            resume_running: false,
        }
    }

    /// A stopwatch already running.
    #[must_use]
    pub fn started() -> Self {
        let mut sw = Self::new();
        sw.start();
        sw
    }

    /// Start (or restart after `stop`) accumulation. No-op while suspended
    /// or already running.
    pub fn start(&mut self) {
        if self.depth == 0 && self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Stop accumulation and return the total so far.
    pub fn stop(&mut self) -> Duration {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
        self.accumulated
    }

    /// Total measured time, including the currently running span.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .running_since
                .map_or(Duration::ZERO, |since| since.elapsed())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    #[must_use]
    pub fn suspend_depth(&self) -> u32 {
        self.depth
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Measurement for Stopwatch {
    fn suspend(&mut self) {
        self.depth += 1;
        if self.depth == 1 {
            self.resume_running = match self.running_since.take() {
                Some(since) => {
                    self.accumulated += since.elapsed();
                    true
                }
                None => false,
            };
        }
    }

    fn resume(&mut self) {
        debug_assert!(self.depth > 0, "resume without matching suspend");
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 && std::mem::take(&mut self.resume_running) {
            self.running_since = Some(Instant::now());
        }
    }
}
