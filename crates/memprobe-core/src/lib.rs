//! # memprobe-core
//!
//! Measurement kernels for allocator and memory-hierarchy microbenchmarks:
//! - [`alloc`]: bounded allocation cycler over a raw allocator seam.
//! - [`access`]: forward / reverse / shuffled traversal of one array.
//! - [`strided`]: strided summation of a large array.
//! - [`axis`]: row-wise vs column-wise reduction of a square matrix.
//! - [`rolling`]: fixed-width rolling sums, copied windows vs borrowed views.
//!
//! Kernels take explicit configuration records and, where work must be
//! excluded from a sample, a [`timing::Measurement`] handle. The benchmark
//! driver owns iteration counts and parameter sweeps.

pub mod access;
pub mod alloc;
pub mod axis;
pub mod config;
pub mod error;
pub mod rng;
pub mod rolling;
pub mod strided;
pub mod timing;

pub use access::{AccessOrder, AccessProbe};
pub use alloc::{
    AllocationCycler, AllocationPool, Block, CyclerStats, LibcAllocator, RawAllocator,
    SystemAllocator,
};
pub use axis::SquareMatrix;
pub use config::{CyclerConfig, RunConfig, StrideConfig, SweepPlan};
pub use error::{MemprobeError, Result};
pub use rng::XorShift64;
pub use strided::StridedArray;
pub use timing::{Measurement, Stopwatch};
