//! Bounded allocation cycler.
//!
//! Each step requests one block (the only timed work), then, with timing
//! suspended, drains the pool if it is full and records the new block.
//! Process memory therefore follows a sawtooth: it grows up to the pool
//! capacity and drops at each drain.

use std::hint::black_box;

use serde::Serialize;

use super::{AllocationPool, Block, LibcAllocator, RawAllocator};
use crate::config::CyclerConfig;
use crate::error::{MemprobeError, Result};
use crate::timing::Measurement;

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclerStats {
    /// Successful allocation requests.
    pub allocations: u64,
    /// Full-pool drains triggered by a step.
    pub drains: u64,
    /// Blocks returned to the allocator (drains and teardown).
    pub released: u64,
    /// Highest live count observed.
    pub peak_live: usize,
}

/// Allocation benchmark state for one run.
///
/// Created once per benchmark run and kept across every sample the driver
/// takes. Blocks still held when the cycler is dropped are released.
pub struct AllocationCycler<A: RawAllocator = LibcAllocator> {
    allocator: A,
    pool: AllocationPool,
    block_size: usize,
    stats: CyclerStats,
}

impl AllocationCycler<LibcAllocator> {
    /// Cycler over the platform C allocator.
    #[must_use]
    pub fn libc(config: CyclerConfig) -> Self {
        Self::new(config, LibcAllocator)
    }
}

impl<A: RawAllocator> AllocationCycler<A> {
    #[must_use]
    pub fn new(config: CyclerConfig, allocator: A) -> Self {
        Self {
            allocator,
            pool: AllocationPool::with_capacity(config.pool_capacity()),
            block_size: config.block_size(),
            stats: CyclerStats::default(),
        }
    }

    /// One benchmark iteration.
    ///
    /// Allocation failure is returned before timing is touched, so the
    /// meter is never left suspended.
    pub fn step<M: Measurement>(&mut self, meter: &mut M) -> Result<()> {
        let block = self
            .allocator
            .request(self.block_size)
            .ok_or(MemprobeError::AllocationFailed {
                size: self.block_size,
            })?;
        black_box(block.as_ptr());

        meter.excluded(|| {
            if self.pool.is_full() {
                self.drain();
                self.stats.drains += 1;
            }
            self.record(block);
        });
        Ok(())
    }

    /// Run `iters` steps against `meter`.
    pub fn run<M: Measurement>(&mut self, iters: u64, meter: &mut M) -> Result<()> {
        for _ in 0..iters {
            self.step(meter)?;
        }
        Ok(())
    }

    /// Release every held block and reset the cursor. Returns the number
    /// of blocks released.
    pub fn release_all(&mut self) -> usize {
        self.drain()
    }

    #[must_use]
    pub fn pool(&self) -> &AllocationPool {
        &self.pool
    }

    #[must_use]
    pub fn stats(&self) -> CyclerStats {
        self.stats
    }

    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    fn drain(&mut self) -> usize {
        let mut released = 0usize;
        for block in self.pool.drain() {
            // SAFETY: the pool is private and only ever holds blocks this
            // cycler obtained from `self.allocator`; draining moves each out
            // exactly once.
            unsafe { self.allocator.release(block) };
            released += 1;
        }
        self.stats.released += released as u64;
        released
    }

    fn record(&mut self, block: Block) {
        if let Err(rejected) = self.pool.push(block) {
            // Only reachable with a zero-capacity pool, which CyclerConfig
            // rejects.
            // SAFETY: `rejected` was just obtained from `self.allocator`.
            unsafe { self.allocator.release(rejected) };
            self.stats.released += 1;
        }
        self.stats.allocations += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.pool.live());
    }
}

impl<A: RawAllocator> Drop for AllocationCycler<A> {
    fn drop(&mut self) {
        self.drain();
    }
}

impl<A: RawAllocator> std::fmt::Debug for AllocationCycler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationCycler")
            .field("block_size", &self.block_size)
            .field("capacity", &self.pool.capacity())
            .field("cursor", &self.pool.cursor())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::Stopwatch;

    fn cycler(block_size: usize, capacity: usize) -> AllocationCycler {
        AllocationCycler::libc(CyclerConfig::new(block_size, capacity).unwrap())
    }

    #[test]
    fn fills_then_drains_on_the_step_after_full() {
        let mut c = cycler(64, 4);
        let mut sw = Stopwatch::started();
        c.run(4, &mut sw).unwrap();
        assert_eq!(c.pool().cursor(), 4);
        assert_eq!(c.stats().drains, 0);

        c.step(&mut sw).unwrap();
        assert_eq!(c.pool().cursor(), 1);
        assert_eq!(c.stats().drains, 1);
        assert_eq!(c.stats().released, 4);
        assert_eq!(sw.suspend_depth(), 0);
    }

    #[test]
    fn release_all_empties_pool() {
        let mut c = cycler(512, 16);
        let mut sw = Stopwatch::started();
        c.run(10, &mut sw).unwrap();
        assert_eq!(c.release_all(), 10);
        assert!(c.pool().is_empty());
        assert_eq!(c.stats().allocations, 10);
    }

    #[test]
    fn peak_live_never_exceeds_capacity() {
        let mut c = cycler(64, 5);
        let mut sw = Stopwatch::started();
        c.run(23, &mut sw).unwrap();
        assert_eq!(c.stats().peak_live, 5);
        assert_eq!(c.stats().drains, 4);
        assert_eq!(c.pool().cursor(), 3);
    }
}
