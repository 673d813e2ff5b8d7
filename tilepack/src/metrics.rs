//! Optional instrumentation for the packer.
//!
//! Packing and relocation cost grows with the number of items times the
//! number of free regions. Callers that want to see how much work a call did
//! can install a [`MetricsSink`] on the packer; without one nothing is
//! recorded.

use std::{cell::Cell, fmt, rc::Rc};

/// The kinds of unit work the packer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// A free region was examined while looking for room for an item.
    RegionScan,

    /// Two free regions were compared while pruning contained regions.
    ContainmentCheck,

    /// A snap target was measured against the pointer position.
    SnapCandidate,

    /// An item was visited during a relayout, alignment or rebuild pass.
    ItemVisit,
}

pub trait MetricsSink {
    fn record(&self, step: Step, count: usize);
}

/// A `MetricsSink` that keeps a running total per step kind.
#[derive(Debug, Default)]
pub struct StepCounter {
    region_scans: Cell<usize>,
    containment_checks: Cell<usize>,
    snap_candidates: Cell<usize>,
    item_visits: Cell<usize>,
}

impl StepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step: Step) -> usize {
        self.cell(step).get()
    }

    pub fn total(&self) -> usize {
        self.region_scans.get()
            + self.containment_checks.get()
            + self.snap_candidates.get()
            + self.item_visits.get()
    }

    pub fn reset(&self) {
        self.region_scans.set(0);
        self.containment_checks.set(0);
        self.snap_candidates.set(0);
        self.item_visits.set(0);
    }

    fn cell(&self, step: Step) -> &Cell<usize> {
        match step {
            Step::RegionScan => &self.region_scans,
            Step::ContainmentCheck => &self.containment_checks,
            Step::SnapCandidate => &self.snap_candidates,
            Step::ItemVisit => &self.item_visits,
        }
    }
}

impl MetricsSink for StepCounter {
    fn record(&self, step: Step, count: usize) {
        let cell = self.cell(step);
        cell.set(cell.get() + count);
    }
}

/// The packer's handle to an optional sink.
#[derive(Clone, Default)]
pub(crate) struct Probe(Option<Rc<dyn MetricsSink>>);

impl Probe {
    pub fn new(sink: Option<Rc<dyn MetricsSink>>) -> Self {
        Probe(sink)
    }

    #[inline]
    pub fn record(&self, step: Step, count: usize) {
        if let Some(sink) = &self.0 {
            sink.record(step, count);
        }
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(_) => write!(formatter, "Probe(Some(..))"),
            None => write!(formatter, "Probe(None)"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counter_accumulates_per_step() {
        let counter = StepCounter::new();

        counter.record(Step::RegionScan, 3);
        counter.record(Step::RegionScan, 2);
        counter.record(Step::SnapCandidate, 7);

        assert_eq!(counter.get(Step::RegionScan), 5);
        assert_eq!(counter.get(Step::SnapCandidate), 7);
        assert_eq!(counter.get(Step::ItemVisit), 0);
        assert_eq!(counter.total(), 12);

        counter.reset();
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn empty_probe_records_nothing() {
        let counter = Rc::new(StepCounter::new());
        let silent = Probe::default();
        let probe = Probe::new(Some(counter.clone() as Rc<dyn MetricsSink>));

        silent.record(Step::ItemVisit, 1);
        probe.record(Step::ItemVisit, 4);

        assert_eq!(counter.get(Step::ItemVisit), 4);
    }
}
