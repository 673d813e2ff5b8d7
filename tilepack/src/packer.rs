use std::rc::Rc;

use crate::{
    free_space::{scan_order, FreeSpace},
    geometry::Rect,
    id::ItemId,
    metrics::{MetricsSink, Probe, Step},
    snap::{SnapMode, SnapTargets},
    types::{Item, PackError, Placement, Relocation},
};

/// Column width used for snapping when none is given.
pub const DEFAULT_SEGMENT_LENGTH: f64 = 60.0;

/// Upper bound on repacking passes in a single `relayout`.
const MAX_RELAYOUT_PASSES: usize = 16;

/// Packs items into a fixed-size container using first-fit over a list of
/// maximal free rectangles, and moves them around on request.
///
/// The packer owns every item. Callers refer to items through the `ItemId`
/// returned by [`Packer::append`] and read positions back through
/// [`Packer::items`] or [`Packer::item`].
///
/// All operations run to completion on the calling thread. Relocation
/// rebuilds the free space from scratch, so callers driving it from pointer
/// input should throttle how often they call it.
#[derive(Debug)]
pub struct Packer<T> {
    size: (f64, f64),
    segment_length: f64,
    snap_mode: SnapMode,
    free_space: FreeSpace,
    items: Vec<Option<Item<T>>>,
    probe: Probe,
}

impl<T> Packer<T> {
    pub fn new(size: (f64, f64)) -> Result<Self, PackError> {
        Self::with_segment_length(size, DEFAULT_SEGMENT_LENGTH)
    }

    pub fn with_segment_length(size: (f64, f64), segment_length: f64) -> Result<Self, PackError> {
        let (width, height) = size;

        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PackError::InvalidContainer { width, height });
        }

        if !(segment_length.is_finite() && segment_length > 0.0) {
            return Err(PackError::InvalidSegmentLength(segment_length));
        }

        let probe = Probe::default();

        Ok(Self {
            size,
            segment_length,
            snap_mode: SnapMode::default(),
            free_space: FreeSpace::new(Rect::sized(size), probe.clone()),
            items: Vec::new(),
            probe,
        })
    }

    pub fn snap_mode(mut self, snap_mode: SnapMode) -> Self {
        self.snap_mode = snap_mode;
        self
    }

    /// Installs or removes a sink that receives counts of the work done by
    /// later calls.
    pub fn set_metrics(&mut self, sink: Option<Rc<dyn MetricsSink>>) {
        self.probe = Probe::new(sink);
        self.free_space.set_probe(self.probe.clone());
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[inline]
    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    /// The currently unoccupied regions, top to bottom, then left to right.
    #[inline]
    pub fn free_space(&self) -> &[Rect] {
        self.free_space.regions()
    }

    /// Every item, in the order they were appended.
    pub fn items(&self) -> impl Iterator<Item = &Item<T>> {
        self.items.iter().flatten()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item<T>> {
        self.items.get(id.index()).and_then(Option::as_ref)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item<T>> {
        self.items.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }

    /// Item ids sorted top to bottom, then left to right, by their current
    /// positions. Items at the same position keep their append order.
    pub fn layout_order(&self) -> Vec<ItemId> {
        let mut ordered: Vec<&Item<T>> = self.items().collect();
        ordered.sort_by(|a, b| scan_order(&a.rect, &b.rect));
        ordered.into_iter().map(Item::id).collect()
    }

    /// Forgets every placement, making the whole container free again. Items
    /// keep their positions.
    pub fn reset(&mut self) {
        self.free_space.reset();

        for item in self.items.iter_mut().flatten() {
            item.placed = false;
        }
    }

    /// Adds an item and immediately tries to place it.
    ///
    /// `rect` gives the item's size and the position it keeps if no free
    /// region can hold it.
    pub fn append(&mut self, rect: Rect, payload: T) -> Result<(ItemId, Placement), PackError> {
        if !rect.is_valid() {
            return Err(PackError::invalid_geometry(&rect));
        }

        let id = ItemId::new(self.items.len());
        self.items.push(Some(Item {
            id,
            rect,
            placed: false,
            payload,
        }));

        log::trace!(
            "Appended item {} ({}x{})",
            id,
            rect.width,
            rect.height
        );

        let placement = self.place(id)?;
        Ok((id, placement))
    }

    /// Moves the item to the first free region that can hold it and takes
    /// its area out of the free space.
    pub fn place(&mut self, id: ItemId) -> Result<Placement, PackError> {
        let rect = self.rect(id)?;

        match self.free_space.first_fit(&rect) {
            Some(region) => {
                log::trace!("Item {} fit at region {:?}", id, region);

                let placed = rect.with_position(region.x, region.y);
                self.occupy(id, placed);

                Ok(Placement::Placed {
                    x: placed.x,
                    y: placed.y,
                })
            }
            None => {
                log::trace!(
                    "Item {} ({}x{}) did not fit in any of {} free regions",
                    id,
                    rect.width,
                    rect.height,
                    self.free_space.regions().len()
                );

                Ok(Placement::Exhausted)
            }
        }
    }

    /// Takes the item's current footprint out of the free space without
    /// moving it.
    pub fn apply_placement(&mut self, id: ItemId) -> Result<(), PackError> {
        let rect = self.rect(id)?;
        self.occupy(id, rect);
        Ok(())
    }

    /// Repacks every item from scratch, in layout order.
    ///
    /// Use this after changing item sizes. Packing can reorder items, and a
    /// second pass over the new order may then land somewhere else, so passes
    /// repeat until the layout order comes out the way it went in. That makes
    /// calling `relayout` again a no-op.
    pub fn relayout(&mut self) {
        let mut passes = 0;
        let mut exhausted;

        loop {
            passes += 1;

            let order = self.layout_order();
            exhausted = self.pack_in_order(&order);

            if self.layout_order() == order {
                break;
            }

            if passes == MAX_RELAYOUT_PASSES {
                log::debug!(
                    "Relayout order still changing after {} passes, keeping the last one",
                    passes
                );
                break;
            }
        }

        log::debug!(
            "Relayout of {} items finished after {} passes, {} did not fit",
            self.len(),
            passes,
            exhausted
        );
    }

    /// Resets the free space and places every item in the given order,
    /// returning how many didn't fit.
    fn pack_in_order(&mut self, order: &[ItemId]) -> usize {
        self.reset();
        self.probe.record(Step::ItemVisit, order.len());

        let mut exhausted = 0;
        for &id in order {
            // Ids come straight from the arena, so placing can't fail.
            if let Ok(Placement::Exhausted) = self.place(id) {
                exhausted += 1;
            }
        }

        exhausted
    }

    /// Moves the item up to the top of the first free region that spans its
    /// current columns, without moving it sideways.
    pub fn align_to_column(&mut self, id: ItemId) -> Result<Placement, PackError> {
        let rect = self.rect(id)?;

        match self.free_space.column_for(&rect) {
            Some(region) => {
                let placed = rect.with_position(rect.x, region.y);
                self.occupy(id, placed);

                Ok(Placement::Placed {
                    x: placed.x,
                    y: placed.y,
                })
            }
            None => {
                log::trace!("No column can hold item {} at x = {}", id, rect.x);
                Ok(Placement::Exhausted)
            }
        }
    }

    /// Settles every item into the top of its column.
    ///
    /// If `ignore` is given, that item keeps its position exactly and its area
    /// is reserved before anything else settles around it. An item with no
    /// room left in its column goes to the first free region instead, and if
    /// there is none it stays where it was without being placed.
    pub fn align_all(&mut self, ignore: Option<ItemId>) -> Result<(), PackError> {
        self.reset();

        if let Some(ignored) = ignore {
            self.apply_placement(ignored)?;
        }

        let order = self.layout_order();
        self.probe.record(Step::ItemVisit, order.len());

        for id in order {
            if Some(id) == ignore {
                continue;
            }

            let _ = self.settle(id)?;
        }

        Ok(())
    }

    /// Aligns the item to its column, falling back to first fit.
    fn settle(&mut self, id: ItemId) -> Result<Placement, PackError> {
        match self.align_to_column(id)? {
            Placement::Exhausted => {
                log::trace!("Item {} has no room in its column, trying first fit", id);
                self.place(id)
            }
            placed => Ok(placed),
        }
    }

    /// The positions the item could snap to if it were relocated now.
    pub fn snap_targets(&self, id: ItemId) -> Result<SnapTargets, PackError> {
        let moving = self.rect(id)?;

        let others: Vec<Rect> = self
            .layout_order()
            .into_iter()
            .filter(|&other| other != id)
            .filter_map(|other| self.item(other).map(Item::rect))
            .collect();

        Ok(SnapTargets::build(
            self.snap_mode,
            self.size,
            self.segment_length,
            moving.width,
            &others,
            &self.probe,
        ))
    }

    /// Drags an item to the snap target nearest `pointer` and resettles the
    /// rest of the layout around it.
    ///
    /// Every other item is settled as in [`Packer::align_all`] with the moved
    /// item's area reserved. The free space is then rebuilt from the footprints
    /// of the items that settled before the moved item itself settles, so the
    /// free space always matches where placed items actually are.
    ///
    /// Items that found no room are reported in [`Relocation::unsettled`].
    pub fn relocate(&mut self, id: ItemId, pointer: (f64, f64)) -> Result<Relocation, PackError> {
        let targets = self.snap_targets(id)?;

        if let Some((x, y)) = targets.nearest_with(pointer, &self.probe) {
            log::trace!(
                "Snapping item {} from pointer {:?} to ({}, {})",
                id,
                pointer,
                x,
                y
            );

            self.move_to(id, x, y)?;
        }

        self.align_all(Some(id))?;

        let (settled, unsettled): (Vec<ItemId>, Vec<ItemId>) = self
            .layout_order()
            .into_iter()
            .filter(|&other| other != id)
            .partition(|&other| self.item(other).map_or(false, Item::is_placed));

        self.reset();
        self.probe.record(Step::ItemVisit, settled.len());

        for &other in &settled {
            self.apply_placement(other)?;
        }

        let placement = self.settle(id)?;

        if !unsettled.is_empty() {
            log::debug!(
                "Relocating item {} left {} items without room: {:?}",
                id,
                unsettled.len(),
                unsettled
            );
        }

        log::debug!(
            "Relocated item {} toward {:?}: {:?}, {} free regions",
            id,
            pointer,
            placement,
            self.free_space.regions().len()
        );

        Ok(Relocation {
            placement,
            unsettled,
        })
    }

    /// Changes an item's size. Nothing is repacked until the next `relayout`,
    /// and until then the item counts as unplaced.
    pub fn resize(&mut self, id: ItemId, size: (f64, f64)) -> Result<(), PackError> {
        let item = self.item_mut(id).ok_or(PackError::UnknownItem(id))?;
        let resized = item.rect.with_size(size.0, size.1);

        if !resized.is_valid() {
            return Err(PackError::invalid_geometry(&resized));
        }

        item.rect = resized;
        item.placed = false;
        Ok(())
    }

    /// Removes an item, hands its area back to the free space and returns its
    /// payload.
    pub fn remove(&mut self, id: ItemId) -> Result<T, PackError> {
        let item = self
            .items
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(PackError::UnknownItem(id))?;

        let bounds = self.free_space.bounds();

        // Only the part inside the container was ever taken out.
        if item.placed && item.rect.overlaps(&bounds) {
            self.free_space.release(clip(&item.rect, &bounds));
        }

        log::trace!("Removed item {}", id);

        Ok(item.payload)
    }

    fn rect(&self, id: ItemId) -> Result<Rect, PackError> {
        self.item(id)
            .map(Item::rect)
            .ok_or(PackError::UnknownItem(id))
    }

    fn move_to(&mut self, id: ItemId, x: f64, y: f64) -> Result<(), PackError> {
        let item = self.item_mut(id).ok_or(PackError::UnknownItem(id))?;
        item.rect = item.rect.with_position(x, y);
        Ok(())
    }

    fn occupy(&mut self, id: ItemId, placed: Rect) {
        if let Some(item) = self.item_mut(id) {
            item.rect = placed;
            item.placed = true;
        }

        self.free_space.occupy(&placed);
    }
}

fn clip(rect: &Rect, bounds: &Rect) -> Rect {
    let x = rect.x.max(bounds.x);
    let y = rect.y.max(bounds.y);

    Rect::new(
        x,
        y,
        rect.right().min(bounds.right()) - x,
        rect.bottom().min(bounds.bottom()) - y,
    )
}
