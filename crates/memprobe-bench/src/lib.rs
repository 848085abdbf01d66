//! Criterion glue for the memprobe benchmark targets.
//!
//! Each `[[bench]]` target builds a [`BenchContext`] from the environment,
//! enumerates its sweep from the context's [`SweepPlan`], and times kernels
//! from `memprobe-core`. Work a kernel excludes from a sample runs under a
//! [`Stopwatch`] suspension and is invisible to criterion, which only sees
//! the duration returned from `iter_custom`.

pub mod pin;
pub mod stats;
pub mod structured_log;

use std::cell::RefCell;
use std::io::Write;
use std::time::Duration;

use memprobe_core::{
    AllocationCycler, MemprobeError, RawAllocator, RunConfig, Stopwatch, SweepPlan,
};
use serde_json::json;
use thiserror::Error;

use crate::stats::{BenchStats, StatsSummary};
use crate::structured_log::{LogEmitter, LogLevel, Outcome};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Kernel(#[from] MemprobeError),
    #[error("run log: {0}")]
    Io(#[from] std::io::Error),
}

/// Smallest duration handed back to criterion; it rejects zero samples.
const MIN_SAMPLE: Duration = Duration::from_nanos(1);

/// Time `iters` cycler steps. Drain and bookkeeping are excluded.
pub fn time_cycler<A: RawAllocator>(
    cycler: &mut AllocationCycler<A>,
    iters: u64,
) -> Result<Duration, MemprobeError> {
    let mut sw = Stopwatch::started();
    cycler.run(iters, &mut sw)?;
    Ok(sw.stop().max(MIN_SAMPLE))
}

/// Time `iters` calls of `op` back to back.
pub fn time_loop(iters: u64, mut op: impl FnMut()) -> Duration {
    let mut sw = Stopwatch::started();
    for _ in 0..iters {
        op();
    }
    sw.stop().max(MIN_SAMPLE)
}

/// Run-wide state shared by the benchmarks of one target.
pub struct BenchContext<W: Write = Box<dyn Write>> {
    pub run: RunConfig,
    pub plan: SweepPlan,
    log: RefCell<LogEmitter<W>>,
}

impl BenchContext {
    /// Resolve the environment, pin the thread if asked, open the run log.
    pub fn from_env(target: &str) -> Result<Self, HarnessError> {
        let run = RunConfig::from_env()?;
        let log = match &run.log_path {
            Some(path) => LogEmitter::to_file(path, target)?,
            None => LogEmitter::to_stderr(target),
        };
        let ctx = Self::with_emitter(run, log);
        ctx.apply_pinning()?;
        Ok(ctx)
    }
}

impl<W: Write> BenchContext<W> {
    pub fn with_emitter(run: RunConfig, log: LogEmitter<W>) -> Self {
        Self {
            run,
            plan: SweepPlan::default(),
            log: RefCell::new(log),
        }
    }

    pub fn apply_pinning(&self) -> Result<(), HarnessError> {
        if !self.run.pin_thread {
            return Ok(());
        }
        let mut log = self.log.borrow_mut();
        let entry = match pin::pin_current_thread() {
            Ok(cpu) => log
                .entry(LogLevel::Info, "thread_pinned")
                .with_details(json!({ "cpu": cpu })),
            Err(err) => log
                .entry(LogLevel::Warn, "thread_pin_failed")
                .with_details(json!({ "errno": err.raw_os_error(), "error": err.to_string() })),
        };
        log.write(&entry)?;
        Ok(())
    }

    pub fn log_start(&self, group: &str, param: &str) -> Result<(), HarnessError> {
        let mut log = self.log.borrow_mut();
        let entry = log
            .entry(LogLevel::Info, "bench_start")
            .with_benchmark(group, param);
        log.write(&entry)?;
        Ok(())
    }

    /// Print the stats line and log `bench_done` with any extra details.
    pub fn log_done(
        &self,
        group: &str,
        param: &str,
        stats: &BenchStats,
        extra: Option<serde_json::Value>,
    ) -> Result<Option<StatsSummary>, HarnessError> {
        let summary = stats.report(group, param);
        let mut log = self.log.borrow_mut();
        let mut entry = log
            .entry(LogLevel::Info, "bench_done")
            .with_benchmark(group, param);
        entry = match summary {
            Some(s) => entry.with_outcome(Outcome::Pass).with_latency_ns(s.p50_ns_op),
            None => entry.with_outcome(Outcome::Skip),
        };
        let mut details = json!({ "summary": summary });
        if let Some(extra) = extra {
            details["extra"] = extra;
        }
        log.write(&entry.with_details(details))?;
        Ok(summary)
    }

    /// Log a fatal kernel error before the target aborts.
    pub fn log_failure(&self, group: &str, param: &str, err: &MemprobeError) {
        let mut log = self.log.borrow_mut();
        let entry = log
            .entry(LogLevel::Error, "bench_failed")
            .with_benchmark(group, param)
            .with_outcome(Outcome::Fail)
            .with_details(json!({ "error": err.to_string() }));
        // Best effort; the target aborts right after.
        let _ = log.write(&entry);
    }
}

impl BenchContext<Vec<u8>> {
    /// Context writing its log to memory (for testing).
    #[must_use]
    pub fn in_memory(run: RunConfig) -> Self {
        Self::with_emitter(run, LogEmitter::to_buffer("test"))
    }

    #[must_use]
    pub fn log_contents(&self) -> String {
        self.log.borrow().contents()
    }
}
