//! Rolling-window sums.
//!
//! Both kernels recompute every window from scratch in the same order, so
//! their outputs are bit-identical. The naive form copies each window into
//! a fresh buffer before summing it and grows its output one push at a
//! time. The view form sums borrowed `slice::windows` views into a
//! preallocated output.

use crate::error::{MemprobeError, Result};

/// Number of windows of length `window` over `len` values.
///
/// The window must be non-empty and strictly shorter than the input.
pub fn window_count(window: usize, len: usize) -> Result<usize> {
    if window == 0 {
        return Err(MemprobeError::invalid("window", "must be positive"));
    }
    if window >= len {
        return Err(MemprobeError::invalid(
            "window",
            format!("window of {window} needs more than {len} values"),
        ));
    }
    Ok(len - window + 1)
}

/// Sum of each `window`-long run of `values`, one copy per window.
pub fn rolling_sum_naive(window: usize, values: &[f64]) -> Result<Vec<f64>> {
    let count = window_count(window, values.len())?;
    let mut sums = Vec::new();
    for start in 0..count {
        let copied = values[start..start + window].to_vec();
        sums.push(copied.iter().sum());
    }
    Ok(sums)
}

/// Sum of each `window`-long run of `values`, read through borrowed views.
pub fn rolling_sum_windows(window: usize, values: &[f64]) -> Result<Vec<f64>> {
    let count = window_count(window, values.len())?;
    let mut sums = Vec::with_capacity(count);
    sums.extend(values.windows(window).map(|w| w.iter().sum::<f64>()));
    Ok(sums)
}
