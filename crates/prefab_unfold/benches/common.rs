use std::time::Duration;

use criterion::{Criterion, Throughput};

/// Criterion tuned for pure-CPU expansion work: no IO, so short warm-ups
/// and modest measurement windows give stable numbers.
pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Throughput in evaluated elements per iteration.
pub fn elements_throughput(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}
