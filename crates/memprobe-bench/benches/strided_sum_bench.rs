//! Strided reduction over a 10M-element array, strides 1 through 63.

use std::cell::RefCell;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use memprobe_bench::stats::BenchStats;
use memprobe_bench::{BenchContext, time_loop};
use memprobe_core::StridedArray;
use memprobe_core::config::STRIDED_ARRAY_LEN;

const GROUP: &str = "strided_sum";

fn bench_strided_sum(c: &mut Criterion) {
    let ctx = BenchContext::from_env("strided_sum_bench").expect("bench context");
    let arr = StridedArray::random(STRIDED_ARRAY_LEN, ctx.run.seed).expect("array setup");

    let mut group = c.benchmark_group(GROUP);
    for cfg in ctx.plan.strides() {
        let stride = cfg.stride();
        let param = stride.to_string();
        ctx.log_start(GROUP, &param).expect("run log");

        let stats = RefCell::new(BenchStats::default());
        group.bench_with_input(BenchmarkId::new("sum", stride), &cfg, |b, &cfg| {
            b.iter_custom(|iters| {
                let dur = time_loop(iters, || arr.measure(cfg));
                stats.borrow_mut().record(iters, dur);
                dur
            });
        });

        ctx.log_done(GROUP, &param, &stats.borrow(), None).expect("run log");
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(200))
        .measurement_time(Duration::from_secs(2))
        .sample_size(20);
    targets = bench_strided_sum
);
criterion_main!(benches);
