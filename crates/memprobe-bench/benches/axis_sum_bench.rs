//! Row-wise vs column-wise reduction of a row-major matrix, plus a flat
//! sum baseline.

use std::cell::RefCell;
use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, black_box, criterion_group, criterion_main};
use memprobe_bench::stats::BenchStats;
use memprobe_bench::{BenchContext, time_loop};
use memprobe_core::SquareMatrix;
use memprobe_core::axis::flat_sum;
use memprobe_core::config::{AXIS_MATRIX_SIDE, FLAT_SUM_LEN};

const GROUP: &str = "axis_sum";

fn timed(
    group: &mut BenchmarkGroup<'_, WallTime>,
    ctx: &BenchContext,
    label: &str,
    mut op: impl FnMut(),
) {
    ctx.log_start(GROUP, label).expect("run log");
    let stats = RefCell::new(BenchStats::default());
    group.bench_function(label, |b| {
        b.iter_custom(|iters| {
            let dur = time_loop(iters, &mut op);
            stats.borrow_mut().record(iters, dur);
            dur
        });
    });
    ctx.log_done(GROUP, label, &stats.borrow(), None).expect("run log");
}

fn bench_axis_sum(c: &mut Criterion) {
    let ctx = BenchContext::from_env("axis_sum_bench").expect("bench context");
    let matrix = SquareMatrix::arange(AXIS_MATRIX_SIDE);
    let flat: Vec<i64> = (0..FLAT_SUM_LEN as i64).collect();

    let mut group = c.benchmark_group(GROUP);
    timed(&mut group, &ctx, "rows", || matrix.measure_rows());
    timed(&mut group, &ctx, "columns", || matrix.measure_columns());
    timed(&mut group, &ctx, "flat", || {
        black_box(flat_sum(black_box(&flat)));
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(200))
        .measurement_time(Duration::from_secs(3))
        .sample_size(10);
    targets = bench_axis_sum
);
criterion_main!(benches);
