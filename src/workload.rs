//! Reproducible synthetic workloads.

use rand::prelude::*;

use crate::models::{ProcessRecord, ProcessSet};

/// Bernoulli arrival process over `ticks` whole time units.
///
/// At each tick a process arrives with probability `p_arrival`; it is
/// short (`short_service`) with probability `p_short`, otherwise long
/// (`long_service`). The same seed always yields the same set.
pub fn bernoulli_workload(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_service: u64,
    long_service: u64,
    seed: u64,
) -> ProcessSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = ProcessSet::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let service = if rng.random::<f64>() < p_short {
                short_service
            } else {
                long_service
            };
            processes.push(ProcessRecord::new(
                processes.len() + 1,
                t as f64,
                service as f64,
            ));
        }
    }

    processes
}

/// `n` processes with arrivals in `[0, max_arrival]` and service in
/// `[1, max_service]`, both whole numbers, in random input order.
pub fn uniform_workload(n: usize, max_arrival: u64, max_service: u64, seed: u64) -> ProcessSet {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n)
        .map(|index| {
            let arrival = rng.random_range(0..=max_arrival);
            let service = rng.random_range(1..=max_service.max(1));
            ProcessRecord::new(index, arrival as f64, service as f64)
        })
        .collect()
}
