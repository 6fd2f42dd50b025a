use std::mem;

use serde::{Deserialize, Serialize};

use crate::{
    block::Block,
    geometry::Rect,
    packer::{valid_blocks, Packer},
    shelf::ShelfNode,
    types::{PackOutput, Placement, Strategy},
};

/// Decides which way a growing bin expands when a block doesn't fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthPolicy {
    /// Grow along the shorter axis whenever the block allows it, which keeps
    /// the bin close to square.
    KeepSquare,

    /// Grow right whenever the block is no taller than the bin.
    PreferRight,

    /// Grow down whenever the block is no wider than the bin.
    PreferDown,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::KeepSquare
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    Right,
    Down,
    Both,
}

impl GrowthPolicy {
    pub(crate) fn choose(self, bin: (f64, f64), block: (f64, f64)) -> Growth {
        let can_grow_right = block.1 <= bin.1;
        let can_grow_down = block.0 <= bin.0;

        let should_grow_right = match self {
            GrowthPolicy::KeepSquare => can_grow_right && bin.1 >= bin.0 + block.0,
            GrowthPolicy::PreferRight => can_grow_right,
            GrowthPolicy::PreferDown => false,
        };

        let should_grow_down = match self {
            GrowthPolicy::KeepSquare => can_grow_down && bin.0 >= bin.1 + block.1,
            GrowthPolicy::PreferRight => false,
            GrowthPolicy::PreferDown => can_grow_down,
        };

        if should_grow_right {
            Growth::Right
        } else if should_grow_down {
            Growth::Down
        } else if can_grow_right {
            Growth::Right
        } else if can_grow_down {
            Growth::Down
        } else {
            Growth::Both
        }
    }
}

/// Packs blocks into a single bin that starts out the size of the first
/// block and grows whenever the next block doesn't fit.
///
/// Every block with valid dimensions ends up placed. The final size of the
/// bin is reported as the output's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowingPacker {
    policy: GrowthPolicy,
}

impl GrowingPacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(self, policy: GrowthPolicy) -> Self {
        Self { policy }
    }
}

impl Packer for GrowingPacker {
    fn pack(&self, blocks: &[Block]) -> PackOutput {
        let mut output = PackOutput::new(Strategy::Growing, Rect::new((0.0, 0.0), (0.0, 0.0)));
        let valid = valid_blocks(blocks, &mut output);

        let mut bin = match valid.first() {
            Some((_, first)) => GrowingBin::new(first.size),
            None => return output,
        };

        log::trace!("Packing {} blocks into a growing bin", valid.len());

        for (index, block) in valid {
            let rect = match bin.root.insert(block.size) {
                Some(rect) => rect,
                None => {
                    bin.grow(self.policy.choose(bin.size(), block.size), block.size);

                    match bin.root.insert(block.size) {
                        Some(rect) => rect,
                        None => unreachable!("grown bin has no room for {}", block.name),
                    }
                }
            };

            log::trace!("Placed {} at {:?}", block.name, rect.pos);
            output.placements.push(Placement::new(index, block, rect));
        }

        output.bounds = bin.root.rect;

        log::trace!(
            "Finished packing {} blocks into a {}x{} bin",
            output.placements.len(),
            output.bounds.size.0,
            output.bounds.size.1
        );

        output
    }
}

struct GrowingBin {
    root: ShelfNode,
}

impl GrowingBin {
    fn new(size: (f64, f64)) -> Self {
        Self {
            root: ShelfNode::free(Rect::new((0.0, 0.0), size)),
        }
    }

    fn size(&self) -> (f64, f64) {
        self.root.rect.size
    }

    /// Replaces the root with a larger one that owns the old root, adding a
    /// free region big enough for a block of `block` size.
    fn grow(&mut self, growth: Growth, block: (f64, f64)) {
        let (width, height) = self.size();

        log::debug!(
            "Growing {:?} from {}x{} for a {}x{} block",
            growth,
            width,
            height,
            block.0,
            block.1
        );

        let placeholder = ShelfNode::free(Rect::new((0.0, 0.0), (0.0, 0.0)));
        let old_root = mem::replace(&mut self.root, placeholder);

        self.root = match growth {
            Growth::Right => grow_right(old_root, block.0),
            Growth::Down => grow_down(old_root, block.1),
            Growth::Both => grow_right(grow_down(old_root, block.1), block.0),
        };
    }
}

fn grow_right(old_root: ShelfNode, extra_width: f64) -> ShelfNode {
    let (width, height) = old_root.rect.size;

    ShelfNode::joined(
        Rect::new((0.0, 0.0), (width + extra_width, height)),
        ShelfNode::free(Rect::new((width, 0.0), (extra_width, height))),
        old_root,
    )
}

fn grow_down(old_root: ShelfNode, extra_height: f64) -> ShelfNode {
    let (width, height) = old_root.rect.size;

    ShelfNode::joined(
        Rect::new((0.0, 0.0), (width, height + extra_height)),
        old_root,
        ShelfNode::free(Rect::new((0.0, height), (width, extra_height))),
    )
}
