//! Benchmark configuration records and sweep plan.
//!
//! Every kernel takes an explicit configuration record; the driver owns the
//! sweep and hands one record per registered benchmark. Run-wide knobs are
//! resolved from the environment:
//! - `MEMPROBE_POOL_CAPACITY`: allocation pool slots (default 2^30).
//! - `MEMPROBE_SEED`: fixed shuffle seed. Unset means OS entropy per run.
//! - `MEMPROBE_BENCH_PIN`: `1` pins the bench thread to CPU 0.
//! - `MEMPROBE_LOG`: path of the JSONL run log. Unset means stderr.

use std::path::PathBuf;

use crate::error::{MemprobeError, Result};

/// Reference allocation pool capacity, in slots.
pub const REFERENCE_POOL_CAPACITY: usize = 1 << 30;

/// Smallest block size in the reference allocation sweep.
pub const MIN_BLOCK_SIZE: usize = 64;
/// Largest block size in the reference allocation sweep.
pub const MAX_BLOCK_SIZE: usize = 8096;
/// Geometric step between consecutive swept block sizes.
pub const BLOCK_SIZE_MULTIPLIER: usize = 8;

/// Largest stride in the reference strided-sum sweep (inclusive).
pub const MAX_STRIDE: usize = 63;

/// Element count of the access-order backing array.
pub const ACCESS_ARRAY_LEN: usize = 1_000_000;
/// Element count of the strided-sum backing array.
pub const STRIDED_ARRAY_LEN: usize = 10_000_000;
/// Side length of the axis-reduction matrix.
pub const AXIS_MATRIX_SIDE: usize = 4_096;
/// Element count of the flat-sum baseline.
pub const FLAT_SUM_LEN: usize = 10_000;
/// Element count of the rolling-sum input.
pub const ROLLING_ARRAY_LEN: usize = 10_000;
/// Window length of the rolling sum.
pub const ROLLING_WINDOW: usize = 20;

pub const ENV_POOL_CAPACITY: &str = "MEMPROBE_POOL_CAPACITY";
pub const ENV_SEED: &str = "MEMPROBE_SEED";
pub const ENV_BENCH_PIN: &str = "MEMPROBE_BENCH_PIN";
pub const ENV_LOG: &str = "MEMPROBE_LOG";

/// Configuration of one bounded allocation cycler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclerConfig {
    block_size: usize,
    pool_capacity: usize,
}

impl CyclerConfig {
    /// Build a cycler configuration. A zero-slot pool can never hold a
    /// block and is rejected.
    pub fn new(block_size: usize, pool_capacity: usize) -> Result<Self> {
        if pool_capacity == 0 {
            return Err(MemprobeError::invalid(
                "pool_capacity",
                "pool must hold at least one block",
            ));
        }
        Ok(Self {
            block_size,
            pool_capacity,
        })
    }

    /// Reference configuration: the given block size over a 2^30-slot pool.
    #[must_use]
    pub const fn reference(block_size: usize) -> Self {
        Self {
            block_size,
            pool_capacity: REFERENCE_POOL_CAPACITY,
        }
    }

    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    #[must_use]
    pub const fn pool_capacity(&self) -> usize {
        self.pool_capacity
    }
}

/// Configuration of one strided reduction measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrideConfig {
    stride: usize,
}

impl StrideConfig {
    pub fn new(stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(MemprobeError::invalid("stride", "stride must be positive"));
        }
        Ok(Self { stride })
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }
}

/// Parameter sweep enumerated by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    pub min_block_size: usize,
    pub max_block_size: usize,
    pub block_size_multiplier: usize,
    pub max_stride: usize,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            min_block_size: MIN_BLOCK_SIZE,
            max_block_size: MAX_BLOCK_SIZE,
            block_size_multiplier: BLOCK_SIZE_MULTIPLIER,
            max_stride: MAX_STRIDE,
        }
    }
}

impl SweepPlan {
    /// Block sizes from `min` to `max`: powers of the multiplier strictly
    /// inside the range, plus both endpoints.
    ///
    /// The reference plan yields `64, 512, 4096, 8096`.
    #[must_use]
    pub fn block_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.min_block_size];
        if self.max_block_size <= self.min_block_size {
            return sizes;
        }
        if self.block_size_multiplier > 1 {
            let mut power = 1usize;
            while let Some(next) = power.checked_mul(self.block_size_multiplier) {
                power = next;
                if power >= self.max_block_size {
                    break;
                }
                if power > self.min_block_size {
                    sizes.push(power);
                }
            }
        }
        sizes.push(self.max_block_size);
        sizes
    }

    /// Strides `1..=max_stride`.
    #[must_use]
    pub fn strides(&self) -> Vec<StrideConfig> {
        (1..=self.max_stride)
            .map(|stride| StrideConfig { stride })
            .collect()
    }
}

/// Run-wide settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub pool_capacity: usize,
    pub seed: Option<u64>,
    pub pin_thread: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pool_capacity: REFERENCE_POOL_CAPACITY,
            seed: None,
            pin_thread: false,
            log_path: None,
        }
    }
}

impl RunConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut cfg = Self::default();

        if let Some(raw) = get(ENV_POOL_CAPACITY) {
            cfg.pool_capacity = parse_usize(ENV_POOL_CAPACITY, &raw)?;
            if cfg.pool_capacity == 0 {
                return Err(MemprobeError::invalid(
                    ENV_POOL_CAPACITY,
                    "pool must hold at least one block",
                ));
            }
        }
        if let Some(raw) = get(ENV_SEED) {
            cfg.seed = Some(parse_seed(&raw)?);
        }
        if let Some(raw) = get(ENV_BENCH_PIN) {
            cfg.pin_thread = parse_flag(ENV_BENCH_PIN, &raw)?;
        }
        cfg.log_path = get(ENV_LOG).map(PathBuf::from);

        Ok(cfg)
    }

    /// Cycler configuration for one swept block size under this run.
    pub fn cycler(&self, block_size: usize) -> Result<CyclerConfig> {
        CyclerConfig::new(block_size, self.pool_capacity)
    }
}

fn parse_usize(field: &'static str, raw: &str) -> Result<usize> {
    let digits: String = raw.chars().filter(|c| *c != '_').collect();
    digits
        .parse::<usize>()
        .map_err(|e| MemprobeError::invalid(field, format!("`{raw}`: {e}")))
}

fn parse_seed(raw: &str) -> Result<u64> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|e| MemprobeError::invalid(ENV_SEED, format!("`{raw}`: {e}")))
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(MemprobeError::invalid(
            field,
            format!("`{raw}` is not a boolean flag"),
        )),
    }
}
