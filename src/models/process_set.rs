//! Ordered process collections.
//!
//! `ProcessSet` is the unit every run consumes and produces. It is sized
//! to the actual input; there is no upper bound on process count.

use serde::{Deserialize, Serialize};

use super::ProcessRecord;

/// An ordered collection of processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSet {
    processes: Vec<ProcessRecord>,
}

impl ProcessSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(arrival, service)` pairs, assigning 1-based
    /// indices in input order.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, service))| ProcessRecord::new(i + 1, arrival, service))
            .collect()
    }

    /// Appends a process.
    pub fn push(&mut self, process: ProcessRecord) {
        self.processes.push(process);
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessRecord> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Finds a process by its stable index.
    pub fn get(&self, index: usize) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.index == index)
    }

    /// Stable identities in current order.
    pub fn indices(&self) -> Vec<usize> {
        self.processes.iter().map(|p| p.index).collect()
    }

    /// A copy with every mutable field re-initialized.
    pub fn fresh_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.processes.iter_mut().for_each(ProcessRecord::reset);
        copy
    }

    /// Returns a copy sorted ascending by arrival time.
    ///
    /// Equal arrivals are ordered by `index`, so the result never depends
    /// on the incoming order or on the sort implementation.
    pub fn sorted_by_arrival(&self) -> Self {
        let mut sorted = self.clone();
        sorted.sort_by_arrival();
        sorted
    }

    /// In-place form of [`sorted_by_arrival`](Self::sorted_by_arrival).
    pub fn sort_by_arrival(&mut self) {
        self.processes.sort_by(|a, b| {
            a.arrival_time
                .total_cmp(&b.arrival_time)
                .then(a.index.cmp(&b.index))
        });
    }

    /// Whether every process has reached `Finished`.
    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(ProcessRecord::is_finished)
    }

    /// Sum of service times.
    pub fn total_service_time(&self) -> f64 {
        self.processes.iter().map(|p| p.service_time).sum()
    }

    /// Latest finish time across the set (0 when nothing finished).
    pub fn makespan(&self) -> f64 {
        self.processes
            .iter()
            .filter_map(|p| p.finish_time)
            .fold(0.0, f64::max)
    }

    pub fn into_vec(self) -> Vec<ProcessRecord> {
        self.processes
    }
}

impl From<Vec<ProcessRecord>> for ProcessSet {
    fn from(processes: Vec<ProcessRecord>) -> Self {
        Self { processes }
    }
}

impl FromIterator<ProcessRecord> for ProcessSet {
    fn from_iter<I: IntoIterator<Item = ProcessRecord>>(iter: I) -> Self {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a ProcessRecord;
    type IntoIter = std::slice::Iter<'a, ProcessRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

impl std::ops::Index<usize> for ProcessSet {
    type Output = ProcessRecord;

    fn index(&self, position: usize) -> &ProcessRecord {
        &self.processes[position]
    }
}

impl std::ops::IndexMut<usize> for ProcessSet {
    fn index_mut(&mut self, position: usize) -> &mut ProcessRecord {
        &mut self.processes[position]
    }
}
