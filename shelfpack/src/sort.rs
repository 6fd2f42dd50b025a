//! Orderings applied to a block sequence before it is handed to a packer.
//!
//! Every ordering except `Random` is a chain of descending keys compared with
//! `f64::total_cmp`, and sorting is stable, so the result is fully
//! deterministic and sorting an already sorted sequence leaves it unchanged.

use std::{cmp::Ordering, fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{block::Block, error::ParseSortOrderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep the input order.
    None,

    /// Width, then height.
    Width,

    /// Height, then width.
    Height,

    /// Area, then height, then width.
    Area,

    /// Longest side, then shortest side, then height, then width.
    #[serde(rename = "maxside")]
    MaxSide,

    /// A uniform shuffle.
    Random,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::MaxSide
    }
}

#[derive(Debug, Clone, Copy)]
enum Key {
    Width,
    Height,
    Area,
    Max,
    Min,
}

impl Key {
    fn of(self, block: &Block) -> f64 {
        match self {
            Key::Width => block.width(),
            Key::Height => block.height(),
            Key::Area => block.area(),
            Key::Max => block.max_side(),
            Key::Min => block.min_side(),
        }
    }
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::None,
        SortOrder::Width,
        SortOrder::Height,
        SortOrder::Area,
        SortOrder::MaxSide,
        SortOrder::Random,
    ];

    fn criteria(self) -> &'static [Key] {
        match self {
            SortOrder::Width => &[Key::Width, Key::Height],
            SortOrder::Height => &[Key::Height, Key::Width],
            SortOrder::Area => &[Key::Area, Key::Height, Key::Width],
            SortOrder::MaxSide => &[Key::Max, Key::Min, Key::Height, Key::Width],
            SortOrder::None | SortOrder::Random => &[],
        }
    }

    /// Compares two blocks, larger keys first. Always `Equal` for `None` and
    /// `Random`, which do not define a comparison.
    pub fn compare(self, a: &Block, b: &Block) -> Ordering {
        self.criteria()
            .iter()
            .map(|key| key.of(b).total_cmp(&key.of(a)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Reorders `blocks` in place, using the thread-local RNG for `Random`.
    pub fn sort(self, blocks: &mut [Block]) {
        self.sort_with_rng(blocks, &mut rand::rng());
    }

    /// Reorders `blocks` in place, drawing from `rng` for `Random`.
    pub fn sort_with_rng<R: Rng + ?Sized>(self, blocks: &mut [Block], rng: &mut R) {
        log::trace!("Sorting {} blocks by {}", blocks.len(), self);

        match self {
            SortOrder::None => {}
            SortOrder::Random => blocks.shuffle(rng),
            _ => blocks.sort_by(|a, b| self.compare(a, b)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::Width => "width",
            SortOrder::Height => "height",
            SortOrder::Area => "area",
            SortOrder::MaxSide => "maxside",
            SortOrder::Random => "random",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|order| order.name() == value)
            .ok_or_else(|| ParseSortOrderError(value.to_owned()))
    }
}
