use std::cmp::Ordering;

use crate::{
    geometry::Rect,
    metrics::{Probe, Step},
};

/// Slack allowed when checking whether a region is tall enough for an item
/// during column alignment. Absorbs rounding in caller-measured sizes.
pub(crate) const COLUMN_TOLERANCE: f64 = 0.01;

/// The unoccupied area of a container, as a list of maximal free rectangles.
///
/// Regions may overlap each other, but no region is contained in another, and
/// the list is always sorted top to bottom, then left to right. That order is
/// what first-fit placement scans, so it decides where items end up.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    bounds: Rect,
    regions: Vec<Rect>,
    probe: Probe,
}

impl FreeSpace {
    pub(crate) fn new(bounds: Rect, probe: Probe) -> Self {
        Self {
            bounds,
            regions: vec![bounds],
            probe,
        }
    }

    pub(crate) fn set_probe(&mut self, probe: Probe) {
        self.probe = probe;
    }

    #[inline]
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Forgets every placement, leaving the whole container free.
    pub(crate) fn reset(&mut self) {
        self.regions.clear();
        self.regions.push(self.bounds);
    }

    /// The first region, in scan order, big enough to hold `item`.
    pub(crate) fn first_fit(&self, item: &Rect) -> Option<Rect> {
        let found = self.regions.iter().position(|region| region.can_fit(item));

        self.probe.record(
            Step::RegionScan,
            found.map_or(self.regions.len(), |index| index + 1),
        );

        found.map(|index| self.regions[index])
    }

    /// The first region, in scan order, that spans `item`'s current columns
    /// and is tall enough to hold it.
    pub(crate) fn column_for(&self, item: &Rect) -> Option<Rect> {
        let found = self.regions.iter().position(|region| {
            region.x <= item.x
                && region.right() >= item.right()
                && region.height >= item.height - COLUMN_TOLERANCE
        });

        self.probe.record(
            Step::RegionScan,
            found.map_or(self.regions.len(), |index| index + 1),
        );

        found.map(|index| self.regions[index])
    }

    /// Takes `placed` out of the free space.
    pub(crate) fn occupy(&mut self, placed: &Rect) {
        let regions: Vec<Rect> = self
            .regions
            .iter()
            .flat_map(|region| region.free_regions_after(placed))
            .collect();

        self.regions = regions;
        self.prune_and_sort();
    }

    /// Hands `rect` back to the free space as a region of its own.
    pub(crate) fn release(&mut self, rect: Rect) {
        self.regions.push(rect);
        self.prune_and_sort();
    }

    /// Drops every region contained in another one, then restores scan order.
    ///
    /// Containment is transitive, so checking every region against a snapshot
    /// of the list once is enough. Of a set of identical regions only the
    /// first is kept.
    fn prune_and_sort(&mut self) {
        let snapshot = &self.regions;
        let count = snapshot.len();

        let mut kept: Vec<Rect> = snapshot
            .iter()
            .enumerate()
            .filter(|&(index, region)| {
                !snapshot.iter().enumerate().any(|(other_index, other)| {
                    other_index != index
                        && other.contains(region)
                        && (other_index < index || !region.contains(other))
                })
            })
            .map(|(_, region)| *region)
            .collect();

        self.probe
            .record(Step::ContainmentCheck, count * count.saturating_sub(1));

        kept.sort_by(scan_order);

        log::trace!(
            "Pruned free space from {} to {} regions",
            count,
            kept.len()
        );

        self.regions = kept;
    }
}

/// Top to bottom, then left to right.
pub(crate) fn scan_order(a: &Rect, b: &Rect) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}
