use std::collections::HashSet;

use crate::{
    geometry::Rect,
    metrics::{Probe, Step},
};

/// How the packer picks candidate positions for an item being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapMode {
    /// One target per column along the top edge of the container, plus the
    /// top-left and bottom-left corners of every other item and one point per
    /// column along each item's bottom edge.
    Anchors,

    /// A uniform grid of `segment × segment` cells covering the container.
    Grid,
}

impl Default for SnapMode {
    fn default() -> Self {
        SnapMode::Anchors
    }
}

/// Candidate positions for one relocation, deduplicated by exact coordinates.
///
/// Targets are built fresh for every relocation and thrown away afterwards.
/// Any target that would push the moving item past the right edge of the
/// column grid is left out, except for targets on the container's left edge.
#[derive(Debug, Clone)]
pub struct SnapTargets {
    points: Vec<(f64, f64)>,
    keys: HashSet<(u64, u64)>,
    max_x: f64,
}

impl SnapTargets {
    /// Builds the targets for moving an item of width `moving_width` through
    /// a container of size `container`, given the footprints of every other
    /// item in layout order.
    pub(crate) fn build<'a, I>(
        mode: SnapMode,
        container: (f64, f64),
        segment: f64,
        moving_width: f64,
        others: I,
        probe: &Probe,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        let columns = (container.0 / segment).floor();
        let span = (moving_width / segment).ceil();

        let mut targets = SnapTargets {
            points: Vec::new(),
            keys: HashSet::new(),
            max_x: (columns - span) * segment,
        };

        let columns = columns as usize;

        match mode {
            SnapMode::Anchors => {
                for column in 0..columns {
                    targets.add(column as f64 * segment, 0.0);
                }

                let mut visited = 0;
                for rect in others {
                    visited += 1;

                    targets.add(rect.x, rect.y);
                    targets.add(rect.x, rect.bottom());

                    let cells = (rect.width / segment).round() as usize;
                    for cell in 1..cells {
                        targets.add(rect.x + segment * cell as f64, rect.bottom());
                    }
                }

                probe.record(Step::ItemVisit, visited);
            }
            SnapMode::Grid => {
                let rows = (container.1 / segment).ceil() as usize;

                for row in 0..rows {
                    for column in 0..columns {
                        targets.add(column as f64 * segment, row as f64 * segment);
                    }
                }
            }
        }

        log::trace!(
            "Built {} snap targets ({:?}, max x {})",
            targets.points.len(),
            mode,
            targets.max_x
        );

        targets
    }

    fn add(&mut self, x: f64, y: f64) {
        if x != 0.0 && x > self.max_x {
            return;
        }

        // Adding zero folds -0.0 into 0.0 so both map to the same key.
        let (x, y) = (x + 0.0, y + 0.0);

        if self.keys.insert((x.to_bits(), y.to_bits())) {
            self.points.push((x, y));
        }
    }

    #[inline]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The target closest to `pointer`. Of several equally close targets, the
    /// one added first wins.
    pub fn nearest(&self, pointer: (f64, f64)) -> Option<(f64, f64)> {
        self.nearest_with(pointer, &Probe::default())
    }

    pub(crate) fn nearest_with(&self, pointer: (f64, f64), probe: &Probe) -> Option<(f64, f64)> {
        probe.record(Step::SnapCandidate, self.points.len());

        let mut best = None;
        let mut best_distance = f64::INFINITY;

        for &(x, y) in &self.points {
            let distance = (x - pointer.0).hypot(y - pointer.1);

            if distance < best_distance {
                best = Some((x, y));
                best_distance = distance;
            }
        }

        best
    }
}
