//! Tilepack keeps a set of rectangles packed inside a fixed-size container
//! and lets them be dragged around afterwards. It was built for Tiler, a tool
//! that lays out boards of tiles, but has no opinion on what the rectangles
//! stand for.
//!
//! The container's unoccupied area is tracked exactly as a list of maximal
//! free rectangles. New items go into the first free rectangle that can hold
//! them, scanning top to bottom and then left to right. Dragging an item snaps
//! it to a nearby anchor, settles every other item into the top of its column
//! and rebuilds the free space from scratch.
//!
//! ## Example
//! ```
//! use tilepack::{Packer, Placement, Rect};
//!
//! // A container 1800 wide and 15000 tall, with 80 wide snapping columns.
//! let mut packer = Packer::with_segment_length((1800.0, 15000.0), 80.0)?;
//!
//! // Items carry any payload; here it's just a name.
//! let (_, first) = packer.append(Rect::sized((200.0, 100.0)), "first")?;
//! let (second_id, second) = packer.append(Rect::sized((200.0, 100.0)), "second")?;
//!
//! assert_eq!(first, Placement::Placed { x: 0.0, y: 0.0 });
//! assert_eq!(second, Placement::Placed { x: 200.0, y: 0.0 });
//!
//! // Drag the second item somewhere far below. It snaps to the nearest anchor
//! // and floats up into the top of its column.
//! let relocation = packer.relocate(second_id, (0.0, 5000.0))?;
//! assert_eq!(relocation.placement, Placement::Placed { x: 0.0, y: 100.0 });
//! assert!(relocation.is_settled());
//! # Ok::<(), tilepack::PackError>(())
//! ```

mod free_space;
mod geometry;
mod id;
mod metrics;
mod packer;
mod snap;
mod types;

pub use geometry::*;
pub use id::*;
pub use metrics::{MetricsSink, Step, StepCounter};
pub use packer::*;
pub use snap::*;
pub use types::*;
