use serde::{Deserialize, Serialize};

use crate::{block::Block, error::BlockError, geometry::Rect};

/// A block that was placed by a packing function.
///
/// `index` is the position of the block in the sequence that was handed to
/// the packer, which lets callers associate the result back to their own
/// objects even when names repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) rate: Option<f64>,
}

impl Placement {
    pub(crate) fn new(index: usize, block: &Block, rect: Rect) -> Self {
        Self {
            index,
            name: block.name.clone(),
            rect,
            rate: block.rate,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The top-left corner of the placed block.
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.rect.pos
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        self.rect.center()
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.rect.size
    }

    #[inline]
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }
}

/// A block that a packer could not find room for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unplaced {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) size: (f64, f64),
}

impl Unplaced {
    pub(crate) fn new(index: usize, block: &Block) -> Self {
        Self {
            index,
            name: block.name.clone(),
            size: block.size,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }
}

/// A block that was excluded from the run before packing started.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub(crate) index: usize,
    pub(crate) error: BlockError,
}

impl Rejected {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn error(&self) -> &BlockError {
        &self.error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Fixed,
    Growing,
    Spiral,
}

/// The results from running a packing function.
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub(crate) strategy: Strategy,
    pub(crate) bounds: Rect,
    pub(crate) placements: Vec<Placement>,
    pub(crate) unplaced: Vec<Unplaced>,
    pub(crate) rejected: Vec<Rejected>,
}

impl PackOutput {
    pub(crate) fn new(strategy: Strategy, bounds: Rect) -> Self {
        Self {
            strategy,
            bounds,
            placements: Vec::new(),
            unplaced: Vec::new(),
            rejected: Vec::new(),
        }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The region blocks were packed into: the configured bin, the final grown
    /// bin, or the spiral working area.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[inline]
    pub fn unplaced(&self) -> &[Unplaced] {
        &self.unplaced
    }

    #[inline]
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    /// Looks up where the block at `index` of the packed sequence ended up.
    pub fn placement_of(&self, index: usize) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.index == index)
    }

    pub fn placed_area(&self) -> f64 {
        self.placements
            .iter()
            .map(|placement| placement.rect.area())
            .sum()
    }
}
