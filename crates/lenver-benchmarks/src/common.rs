//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(2))
        .measurement_time(std::time::Duration::from_secs(5))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Realistic version strings of mixed shape
pub const SAMPLE_VERSIONS: [&str; 12] = [
    "1.0",
    "v2.4.1",
    "version 3.2-beta.1",
    "10.15.7 Build 19H2",
    "96.0.4664.110",
    "1.2.3+exp.sha.5114f85",
    "2.0.0-rc.1+build.123",
    "  V7.1 ",
    "1.0beta-2",
    "Build 1234",
    "not a version",
    "18446744073709551616.1",
];

/// `n` distinct versions, cycling through patch and pre-release shapes
pub fn generate_versions(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 4 {
            0 => format!("{}.{}.{}", i % 17, i % 13, i),
            1 => format!("{}.{}-beta.{}", i % 17, i % 13, i % 5),
            2 => format!("v{}.{}.{}+build.{}", i % 17, i % 13, i % 7, i),
            _ => format!("{}.{}", i % 17, i % 13),
        })
        .collect()
}
