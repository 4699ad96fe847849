//! Plain-text tables for run results.
//!
//! Every function returns a `String`; callers decide where it goes.

use std::fmt::Write;

use crate::models::ProcessSet;
use crate::scheduler::{MetricsAggregator, RunOutcome};
use crate::trace::{TickSnapshot, WindowSnapshot};

fn time(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

/// Index, arrival and service of each process.
pub fn base_table(processes: &ProcessSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12}{:<14}{:<10}", "Process", "Arrival Time", "CPU Burst");
    for p in processes {
        let _ = writeln!(
            out,
            "{:<12}{:<14}{:<10}",
            p.index, p.arrival_time, p.service_time
        );
    }
    out
}

/// HRRN execution windows with the processes that arrived during each.
pub fn window_table(windows: &[WindowSnapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:<12}{:<12}{}",
        "Process", "Start Time", "End Time", "Ready Queue"
    );
    for w in windows {
        let ready: Vec<String> = w.ready_queue.iter().map(|i| i.to_string()).collect();
        let _ = writeln!(
            out,
            "{:<12}{:<12}{:<12}{}",
            w.index,
            w.start_time,
            w.finish_time,
            ready.join(" ")
        );
    }
    out
}

/// Start and finish time of each process.
pub fn start_finish_table(processes: &ProcessSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12}{:<12}{:<12}", "Process", "Start Time", "End Time");
    for p in processes {
        let _ = writeln!(
            out,
            "{:<12}{:<12}{:<12}",
            p.index,
            time(p.start_time),
            time(p.finish_time)
        );
    }
    out
}

/// Turnaround, weighted turnaround and wait of each process.
pub fn time_table(processes: &ProcessSet) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:<18}{:<28}{}",
        "Process", "Turnaround Time", "Weighted Turnaround Time", "Waiting Time"
    );
    for p in processes {
        let _ = writeln!(
            out,
            "{:<12}{:<18.4}{:<28.4}{:.4}",
            p.index, p.turnaround_time, p.weighted_turnaround_time, p.wait_time
        );
    }
    out
}

/// Status of every process after one RR tick.
pub fn tick_table(snapshot: &TickSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Current Time : {}", snapshot.current_time);
    let _ = writeln!(
        out,
        "{:<12}{:<12}{:<12}{}",
        "Process", "Start Time", "Runed Time", "Process Status"
    );
    for row in &snapshot.rows {
        let _ = writeln!(
            out,
            "{:<12}{:<12}{:<12}{}",
            row.index,
            time(row.start_time),
            row.runed_time,
            row.status.code()
        );
    }
    out
}

/// Full per-run report: start/finish plus time table plus averages row.
pub fn outcome_report(outcome: &RunOutcome) -> String {
    let mut out = start_finish_table(&outcome.processes);
    out.push('\n');
    out.push_str(&time_table(&outcome.processes));
    out.push('\n');
    let mut single = MetricsAggregator::new();
    single.record(outcome.metrics);
    out.push_str(&averages_table(&single));
    out
}

/// One averages row per algorithm that has run.
pub fn averages_table(metrics: &MetricsAggregator) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:<14}{:<14}{}",
        "Algorithm", "Average TAT", "Average WTAT", "Average WT"
    );
    for m in metrics.iter() {
        let _ = writeln!(
            out,
            "{:<12}{:<14.4}{:<14.4}{:.4}",
            m.algorithm.to_string(),
            m.avg_turnaround_time,
            m.avg_weighted_turnaround_time,
            m.avg_wait_time
        );
    }
    out
}
