use crate::{
    block::Block,
    geometry::Rect,
    shelf::ShelfNode,
    types::{PackOutput, Placement, Rejected, Strategy, Unplaced},
};

/// A packing strategy.
///
/// Packers hold configuration only. Every call to `pack` builds its own
/// working state from scratch, so the same packer can be reused for any number
/// of independent runs and always gives the same answer for the same input.
pub trait Packer {
    /// Places `blocks` in the order given. Sort them first with a
    /// [`SortOrder`](enum.SortOrder.html) if the order matters.
    fn pack(&self, blocks: &[Block]) -> PackOutput;
}

impl<P: Packer + ?Sized> Packer for Box<P> {
    fn pack(&self, blocks: &[Block]) -> PackOutput {
        (**self).pack(blocks)
    }
}

/// Splits off blocks with unusable dimensions, recording them as rejected on
/// `output`, and returns the rest along with their original indices.
pub(crate) fn valid_blocks<'a>(
    blocks: &'a [Block],
    output: &mut PackOutput,
) -> Vec<(usize, &'a Block)> {
    let mut valid = Vec::with_capacity(blocks.len());

    for (index, block) in blocks.iter().enumerate() {
        match block.validate() {
            Ok(()) => valid.push((index, block)),
            Err(error) => {
                log::warn!("Skipping block: {}", error);
                output.rejected.push(Rejected { index, error });
            }
        }
    }

    valid
}

/// Packs blocks into a single bin of fixed size, first-fit, using a binary
/// tree of free regions.
///
/// Blocks that don't fit anywhere are reported as unplaced; the rest of the
/// sequence is still packed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfPacker {
    size: (f64, f64),
}

impl ShelfPacker {
    pub fn new(size: (f64, f64)) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }
}

impl Packer for ShelfPacker {
    fn pack(&self, blocks: &[Block]) -> PackOutput {
        let bounds = Rect::new((0.0, 0.0), self.size);
        let mut output = PackOutput::new(Strategy::Fixed, bounds);
        let mut root = ShelfNode::free(bounds);

        log::trace!(
            "Packing {} blocks into a {}x{} bin",
            blocks.len(),
            self.size.0,
            self.size.1
        );

        for (index, block) in valid_blocks(blocks, &mut output) {
            match root.insert(block.size) {
                Some(rect) => {
                    log::trace!("Placed {} at {:?}", block.name, rect.pos);
                    output.placements.push(Placement::new(index, block, rect));
                }
                None => {
                    log::trace!(
                        "{} ({}x{}) did not fit",
                        block.name,
                        block.size.0,
                        block.size.1
                    );
                    output.unplaced.push(Unplaced::new(index, block));
                }
            }
        }

        log::trace!(
            "Finished packing: {} placed, {} did not fit",
            output.placements.len(),
            output.unplaced.len()
        );

        output
    }
}
