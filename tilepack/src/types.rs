use thiserror::Error;

use crate::{geometry::Rect, id::ItemId};

/// An item owned by a packer: its current footprint plus whatever data the
/// caller associated with it.
///
/// Only the position is changed by packing operations. The size is whatever
/// the caller last gave to `append` or `resize`.
#[derive(Debug, Clone)]
pub struct Item<T> {
    pub(crate) id: ItemId,
    pub(crate) rect: Rect,
    pub(crate) placed: bool,
    pub(crate) payload: T,
}

impl<T> Item<T> {
    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.rect.position()
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.rect.size()
    }

    /// Whether the item's current footprint is accounted for in the free
    /// space. Cleared when the free space is reset or the item is resized.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

/// The outcome of trying to find room for an item.
///
/// Running out of room is not an error: the item keeps the position it had
/// before and the free space is left as it was.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The item now sits at this position and its area has been taken out of
    /// the free space.
    Placed { x: f64, y: f64 },

    /// No free region could hold the item.
    Exhausted,
}

impl Placement {
    #[inline]
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            Placement::Placed { x, y } => Some((x, y)),
            Placement::Exhausted => None,
        }
    }
}

/// What dragging an item did to the layout.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Relocation {
    /// Where the dragged item ended up.
    pub placement: Placement,

    /// Other items that found no room while the layout resettled, in layout
    /// order. They keep their previous positions and are left unplaced, so
    /// their area is still counted as free.
    pub unsettled: Vec<ItemId>,
}

impl Relocation {
    /// Whether every item, the dragged one included, holds a place in the
    /// free space. Only then is the layout guaranteed to be overlap free.
    pub fn is_settled(&self) -> bool {
        self.placement.is_placed() && self.unsettled.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Item geometry must be finite with a non-negative size, got {width}x{height} at ({x}, {y})")]
    InvalidGeometry {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("Container size must be finite and positive, got {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error("Segment length must be finite and positive, got {0}")]
    InvalidSegmentLength(f64),

    #[error("Item {0} does not belong to this packer")]
    UnknownItem(ItemId),
}

impl PackError {
    pub(crate) fn invalid_geometry(rect: &Rect) -> Self {
        PackError::InvalidGeometry {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}
