//! Per-benchmark sample aggregation printed alongside criterion's own report.

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Default)]
pub struct BenchStats {
    samples_ns_per_op: Vec<f64>,
    total_iters: u64,
    total_ns: u128,
}

/// Percentile summary of the recorded samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub samples: usize,
    pub p50_ns_op: f64,
    pub p95_ns_op: f64,
    pub p99_ns_op: f64,
    pub mean_ns_op: f64,
    pub throughput_ops_s: f64,
}

impl BenchStats {
    pub fn record(&mut self, iters: u64, dur: Duration) {
        if iters == 0 {
            return;
        }
        let ns = dur.as_nanos();
        self.total_iters = self.total_iters.saturating_add(iters);
        self.total_ns = self.total_ns.saturating_add(ns);
        self.samples_ns_per_op.push(ns as f64 / iters as f64);
    }

    #[must_use]
    pub fn summary(&self) -> Option<StatsSummary> {
        if self.samples_ns_per_op.is_empty() {
            return None;
        }
        let mut samples = self.samples_ns_per_op.clone();
        samples.sort_by(f64::total_cmp);

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let throughput_ops_s = if self.total_ns == 0 {
            0.0
        } else {
            (self.total_iters as f64) / (self.total_ns as f64 / 1e9)
        };
        Some(StatsSummary {
            samples: samples.len(),
            p50_ns_op: percentile_sorted(&samples, 0.50),
            p95_ns_op: percentile_sorted(&samples, 0.95),
            p99_ns_op: percentile_sorted(&samples, 0.99),
            mean_ns_op: mean,
            throughput_ops_s,
        })
    }

    /// Print one `MEMPROBE_BENCH` line; silent when nothing was recorded.
    pub fn report(&self, group: &str, param: &str) -> Option<StatsSummary> {
        let summary = self.summary()?;
        println!(
            "MEMPROBE_BENCH group={} param={} samples={} p50_ns_op={:.3} p95_ns_op={:.3} p99_ns_op={:.3} mean_ns_op={:.3} throughput_ops_s={:.3}",
            group,
            param,
            summary.samples,
            summary.p50_ns_op,
            summary.p95_ns_op,
            summary.p99_ns_op,
            summary.mean_ns_op,
            summary.throughput_ops_s
        );
        Some(summary)
    }
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p));
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
