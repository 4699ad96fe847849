//! Property tests across both engines.

use proptest::prelude::*;

use super::{HrrnEngine, RrEngine, RunOutcome};
use crate::models::ProcessSet;
use crate::report::outcome_report;
use crate::workload::bernoulli_workload;

fn workload() -> impl Strategy<Value = ProcessSet> {
    prop::collection::vec((0u64..20, 1u64..8), 1..12).prop_map(|pairs| {
        let pairs: Vec<(f64, f64)> = pairs
            .into_iter()
            .map(|(a, s)| (a as f64, s as f64))
            .collect();
        ProcessSet::from_pairs(&pairs)
    })
}

/// Non-preemptive first-come-first-served finish times, by index.
fn fcfs_finishes(input: &ProcessSet) -> Vec<(usize, f64)> {
    let mut clock = 0.0_f64;
    let mut finishes: Vec<(usize, f64)> = input
        .sorted_by_arrival()
        .iter()
        .map(|p| {
            clock = clock.max(p.arrival_time) + p.service_time;
            (p.index, clock)
        })
        .collect();
    finishes.sort_by_key(|&(index, _)| index);
    finishes
}

fn finishes(outcome: &RunOutcome) -> Vec<(usize, f64)> {
    let mut v: Vec<(usize, f64)> = outcome
        .processes
        .iter()
        .map(|p| (p.index, p.finish_time.unwrap_or(f64::NAN)))
        .collect();
    v.sort_by_key(|&(index, _)| index);
    v
}

fn assert_consistent(outcome: &RunOutcome, input: &ProcessSet) -> Result<(), TestCaseError> {
    prop_assert_eq!(outcome.processes.len(), input.len());
    prop_assert!(outcome.processes.all_finished());
    for p in &outcome.processes {
        let start = p.start_time.unwrap_or(f64::NAN);
        let finish = p.finish_time.unwrap_or(f64::NAN);
        prop_assert_eq!(p.wait_time + p.service_time, p.turnaround_time);
        prop_assert!(finish >= start && start >= p.arrival_time);
    }
    prop_assert_eq!(outcome.busy_time(), input.total_service_time());
    Ok(())
}

proptest! {
    #[test]
    fn prop_hrrn_complete(input in workload()) {
        let outcome = HrrnEngine::new().run(&input, &mut ()).unwrap();
        assert_consistent(&outcome, &input)?;

        let mut order = outcome.dispatch_order();
        prop_assert_eq!(order.len(), input.len());
        order.sort_unstable();
        order.dedup();
        prop_assert_eq!(order.len(), input.len());

        // Gaps between consecutive slices account for all non-busy time.
        let first_start = outcome.slices[0].start;
        let gaps: f64 = outcome
            .slices
            .windows(2)
            .map(|w| w[1].start - w[0].end)
            .sum();
        prop_assert!(outcome.slices.windows(2).all(|w| w[1].start >= w[0].end));
        prop_assert_eq!(
            gaps,
            outcome.processes.makespan() - first_start - input.total_service_time()
        );
        let last = &outcome.processes[outcome.processes.len() - 1];
        prop_assert_eq!(last.finish_time, Some(outcome.processes.makespan()));
    }

    #[test]
    fn prop_rr_complete(input in workload(), quantum in 1u64..5) {
        let outcome = RrEngine::new(quantum).run(&input, &mut ()).unwrap();
        assert_consistent(&outcome, &input)?;
        for p in &outcome.processes {
            prop_assert_eq!(p.runed_time as f64, p.service_time);
        }
    }

    #[test]
    fn prop_rr_large_quantum_is_fcfs(input in workload()) {
        let outcome = RrEngine::new(8).run(&input, &mut ()).unwrap();
        prop_assert_eq!(outcome.slices.len(), input.len());
        prop_assert_eq!(
            outcome.dispatch_order(),
            input.sorted_by_arrival().indices()
        );
        prop_assert_eq!(finishes(&outcome), fcfs_finishes(&input));
    }

    #[test]
    fn prop_deterministic(seed in 0u64..1000, quantum in 1u64..4) {
        let input = bernoulli_workload(60, 0.3, 0.4, 1, 5, seed);
        prop_assume!(!input.is_empty());

        let hrrn = HrrnEngine::new();
        let rr = RrEngine::new(quantum);
        prop_assert_eq!(
            outcome_report(&hrrn.run(&input, &mut ()).unwrap()),
            outcome_report(&hrrn.run(&input, &mut ()).unwrap())
        );
        prop_assert_eq!(
            outcome_report(&rr.run(&input, &mut ()).unwrap()),
            outcome_report(&rr.run(&input, &mut ()).unwrap())
        );
    }
}
