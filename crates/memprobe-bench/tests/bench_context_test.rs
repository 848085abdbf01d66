use std::time::Duration;

use memprobe_bench::stats::BenchStats;
use memprobe_bench::structured_log::{LogLevel, Outcome, validate_log_line};
use memprobe_bench::{BenchContext, time_cycler, time_loop};
use memprobe_core::{AllocationCycler, LibcAllocator, MemprobeError, RunConfig};
use serde_json::json;

fn small_run() -> RunConfig {
    RunConfig {
        pool_capacity: 64,
        seed: Some(7),
        ..RunConfig::default()
    }
}

#[test]
fn cycler_samples_are_positive_and_keep_pool_bounded() {
    let ctx = BenchContext::in_memory(small_run());
    let mut cycler = AllocationCycler::new(ctx.run.cycler(512).unwrap(), LibcAllocator);
    let mut stats = BenchStats::default();
    for iters in [1u64, 10, 100, 1_000] {
        let dur = time_cycler(&mut cycler, iters).unwrap();
        assert!(dur >= Duration::from_nanos(1));
        assert!(cycler.pool().live() <= 64);
        stats.record(iters, dur);
    }
    let counters = cycler.stats();
    assert_eq!(counters.allocations, 1_111);
    assert_eq!(counters.peak_live, 64);
    assert_eq!(counters.drains, (1_111 - 1) / 64);
    assert_eq!(stats.summary().unwrap().samples, 4);
}

#[test]
fn time_loop_runs_the_op_iters_times() {
    let mut calls = 0u64;
    let dur = time_loop(250, || calls += 1);
    assert_eq!(calls, 250);
    assert!(dur > Duration::ZERO);
    assert!(time_loop(0, || unreachable!()) >= Duration::from_nanos(1));
}

#[test]
fn run_log_lines_follow_the_schema() {
    let ctx = BenchContext::in_memory(small_run());
    ctx.log_start("malloc", "libc/64").unwrap();

    let mut stats = BenchStats::default();
    stats.record(100, Duration::from_micros(2));
    let summary = ctx
        .log_done("malloc", "libc/64", &stats, Some(json!({ "drains": 3 })))
        .unwrap()
        .unwrap();
    assert_eq!(summary.p50_ns_op, 20.0);

    ctx.log_done("malloc", "libc/512", &BenchStats::default(), None)
        .unwrap();
    ctx.log_failure(
        "malloc",
        "libc/8096",
        &MemprobeError::AllocationFailed { size: 8096 },
    );

    let contents = ctx.log_contents();
    let entries: Vec<_> = contents
        .lines()
        .enumerate()
        .map(|(n, line)| validate_log_line(line, n + 1).expect("valid line"))
        .collect();
    assert_eq!(entries.len(), 4);

    assert_eq!(entries[0].event, "bench_start");
    assert_eq!(entries[0].benchmark.as_deref(), Some("malloc"));
    assert_eq!(entries[0].param.as_deref(), Some("libc/64"));

    assert_eq!(entries[1].event, "bench_done");
    assert_eq!(entries[1].outcome, Some(Outcome::Pass));
    assert_eq!(entries[1].latency_ns, Some(20.0));
    let details = entries[1].details.as_ref().unwrap();
    assert_eq!(details["extra"]["drains"], 3);
    assert_eq!(details["summary"]["samples"], 1);

    assert_eq!(entries[2].outcome, Some(Outcome::Skip));

    assert_eq!(entries[3].level, LogLevel::Error);
    assert_eq!(entries[3].outcome, Some(Outcome::Fail));

    let ids: Vec<&str> = entries.iter().map(|e| e.trace_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "memprobe::test::001",
            "memprobe::test::002",
            "memprobe::test::003",
            "memprobe::test::004"
        ]
    );
}

#[test]
fn pinning_is_logged_either_way() {
    let ctx = BenchContext::in_memory(RunConfig {
        pin_thread: true,
        ..small_run()
    });
    ctx.apply_pinning().unwrap();
    let line = ctx.log_contents();
    let entry = validate_log_line(line.trim_end(), 1).unwrap();
    assert!(entry.event == "thread_pinned" || entry.event == "thread_pin_failed");
}

#[test]
fn pinning_disabled_logs_nothing() {
    let ctx = BenchContext::in_memory(small_run());
    ctx.apply_pinning().unwrap();
    assert!(ctx.log_contents().is_empty());
}
