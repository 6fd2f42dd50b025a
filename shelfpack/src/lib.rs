//! Shelfpack is a small library for placing rectangles ("blocks") without
//! overlap. It backs `blockpack`, a tool for laying out posters, notes, and
//! other rectangular items on a board.
//!
//! Shelfpack exposes three packers sharing the [`Packer`][Packer] trait:
//!
//! - [`ShelfPacker`][ShelfPacker] fills a fixed-size bin first-fit using a
//!   binary tree of free regions.
//! - [`GrowingPacker`][GrowingPacker] uses the same tree but enlarges the bin
//!   whenever a block doesn't fit, so every block is placed.
//! - [`SpiralPacker`][SpiralPacker] spreads blocks outward from a center
//!   point with a margin between them.
//!
//! Blocks are usually sorted with a [`SortOrder`][SortOrder] first, and the
//! result can be summarized with a [`FitReport`][FitReport].
//!
//! ## Example
//! ```
//! use shelfpack::{Block, FitReport, Packer, ShelfPacker, SortOrder};
//!
//! let mut blocks = vec![
//!     Block::new("Poster1", (50.0, 20.0)),
//!     Block::new("Poster2", (40.0, 20.0)),
//!     Block::new("Note1", (20.0, 20.0)),
//! ];
//!
//! // Larger blocks first tends to give tighter layouts.
//! SortOrder::MaxSide.sort(&mut blocks);
//!
//! let output = ShelfPacker::new((100.0, 40.0)).pack(&blocks);
//! let report = FitReport::new(&output);
//!
//! assert!(report.all_fit());
//! assert_eq!(report.percent(), 55);
//! ```
//!
//! [Packer]: trait.Packer.html
//! [ShelfPacker]: struct.ShelfPacker.html
//! [GrowingPacker]: struct.GrowingPacker.html
//! [SpiralPacker]: struct.SpiralPacker.html
//! [SortOrder]: enum.SortOrder.html
//! [FitReport]: struct.FitReport.html

mod block;
mod error;
mod geometry;
mod growing;
mod packer;
mod report;
mod shelf;
mod sort;
mod spiral;
mod types;

pub use block::*;
pub use error::*;
pub use geometry::*;
pub use growing::{GrowingPacker, GrowthPolicy};
pub use packer::{Packer, ShelfPacker};
pub use report::*;
pub use sort::*;
pub use spiral::{SpiralPacker, DEFAULT_MARGIN, DEFAULT_STEP};
pub use types::*;
