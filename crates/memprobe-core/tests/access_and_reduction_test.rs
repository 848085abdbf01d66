use memprobe_core::axis::{SquareMatrix, flat_sum};
use memprobe_core::strided::strided_sum;
use memprobe_core::{AccessOrder, AccessProbe, StrideConfig, StridedArray, XorShift64};

const LEN: usize = 50_000;

#[test]
fn all_orders_visit_the_same_multiset() {
    let expected_sum = (LEN as i64 - 1) * LEN as i64 / 2;
    // No fixed seed: only invariants over the permutation are asserted.
    for order in AccessOrder::all() {
        let probe = AccessProbe::new(LEN, order, None).unwrap();
        assert_eq!(probe.order(), order);
        assert_eq!(probe.indices().len(), LEN);
        assert_eq!(probe.visited_sum(), expected_sum, "order {}", order.as_str());

        let mut seen = vec![false; LEN];
        for &ix in probe.indices() {
            assert!(!seen[ix], "index {ix} visited twice");
            seen[ix] = true;
        }
        assert!(seen.iter().all(|s| *s));
        probe.traverse();
    }
}

#[test]
fn reverse_differs_from_forward_in_order_only() {
    let fwd = AccessProbe::new(LEN, AccessOrder::Forward, None).unwrap();
    let rev = AccessProbe::new(LEN, AccessOrder::Reverse, None).unwrap();
    assert_ne!(fwd.indices(), rev.indices());
    let mut reversed = rev.indices().to_vec();
    reversed.reverse();
    assert_eq!(fwd.indices(), reversed.as_slice());
}

fn reference_sum(values: &[f64], stride: usize) -> f64 {
    values
        .iter()
        .enumerate()
        .filter(|(ix, _)| ix % stride == 0)
        .map(|(_, v)| *v)
        .sum()
}

#[test]
fn strided_sum_matches_reference_for_selected_strides() {
    // Integers below 2^31 summed over 100k entries stay exact in f64.
    let arr = StridedArray::random(100_003, None).unwrap();
    let full: f64 = arr.values().iter().sum();
    assert_eq!(arr.sum(StrideConfig::new(1).unwrap()), full);

    for stride in [1usize, 2, 7, 63] {
        let cfg = StrideConfig::new(stride).unwrap();
        assert_eq!(
            arr.sum(cfg),
            reference_sum(arr.values(), stride),
            "stride {stride}"
        );
        arr.measure(cfg);
    }
}

#[test]
fn strided_sum_counts_only_indices_below_len() {
    let values: Vec<f64> = (0..130).map(f64::from).collect();
    // indices 0, 63, 126
    assert_eq!(strided_sum(&values, 63), 189.0);
}

#[test]
fn axis_sums_agree_with_flat_total() {
    let m = SquareMatrix::arange(257);
    let total = m.total();
    assert_eq!(m.row_sums().iter().sum::<i64>(), total);
    assert_eq!(m.column_sums().iter().sum::<i64>(), total);
    m.measure_rows();
    m.measure_columns();
}

#[test]
fn flat_sum_matches_closed_form_for_random_lengths() {
    let mut rng = XorShift64::new(0xC0FFEE);
    for _ in 0..16 {
        let n = rng.below(20_000) as i64;
        let values: Vec<i64> = (0..n).collect();
        assert_eq!(flat_sum(&values), n * (n - 1).max(0) / 2);
    }
}
