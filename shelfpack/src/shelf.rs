//! The binary tree of free and used regions shared by the fixed and growing
//! shelf packers.
//!
//! Every node exclusively owns its children. A free node is always a leaf;
//! placing a block into a free node marks it used and splits the leftover
//! space into a `right` region beside the block and a `down` region below it.

use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShelfNode {
    pub rect: Rect,
    pub used: bool,
    pub right: Option<Box<ShelfNode>>,
    pub down: Option<Box<ShelfNode>>,
}

impl ShelfNode {
    pub fn free(rect: Rect) -> Self {
        Self {
            rect,
            used: false,
            right: None,
            down: None,
        }
    }

    /// A used node that only exists to hold two other regions.
    pub fn joined(rect: Rect, right: ShelfNode, down: ShelfNode) -> Self {
        Self {
            rect,
            used: true,
            right: Some(Box::new(right)),
            down: Some(Box::new(down)),
        }
    }

    /// Finds the first free leaf that can hold a block of the given size,
    /// searching depth first, right before down.
    pub fn find(&mut self, size: (f64, f64)) -> Option<&mut ShelfNode> {
        if self.used {
            let ShelfNode { right, down, .. } = self;

            right
                .as_deref_mut()
                .and_then(|node| node.find(size))
                .or_else(move || down.as_deref_mut().and_then(|node| node.find(size)))
        } else if size.0 <= self.rect.size.0 && size.1 <= self.rect.size.1 {
            Some(self)
        } else {
            None
        }
    }

    /// Places a block of the given size in the top-left corner of this free
    /// node and returns the occupied rectangle.
    pub fn split(&mut self, size: (f64, f64)) -> Rect {
        debug_assert!(!self.used, "split called on a used node");

        let Rect {
            pos,
            size: node_size,
        } = self.rect;

        self.used = true;
        self.right = Some(Box::new(ShelfNode::free(Rect::new(
            (pos.0 + size.0, pos.1),
            (node_size.0 - size.0, size.1),
        ))));
        self.down = Some(Box::new(ShelfNode::free(Rect::new(
            (pos.0, pos.1 + size.1),
            (node_size.0, node_size.1 - size.1),
        ))));

        Rect::new(pos, size)
    }

    /// Searches for room and splits the node found. Returns `None` if no free
    /// leaf is large enough.
    pub fn insert(&mut self, size: (f64, f64)) -> Option<Rect> {
        self.find(size).map(|node| node.split(size))
    }

    /// Visits every node of the tree, parents before children.
    #[cfg(test)]
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ShelfNode)) {
        visit(self);

        if let Some(right) = &self.right {
            right.walk(visit);
        }

        if let Some(down) = &self.down {
            down.walk(visit);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn root(size: (f64, f64)) -> ShelfNode {
        ShelfNode::free(Rect::new((0.0, 0.0), size))
    }

    #[test]
    fn split_creates_right_and_down() {
        let mut node = root((100.0, 80.0));
        let placed = node.split((30.0, 20.0));

        assert_eq!(placed, Rect::new((0.0, 0.0), (30.0, 20.0)));
        assert!(node.used);

        let right = node.right.as_ref().unwrap();
        assert_eq!(right.rect, Rect::new((30.0, 0.0), (70.0, 20.0)));
        assert!(!right.used);

        let down = node.down.as_ref().unwrap();
        assert_eq!(down.rect, Rect::new((0.0, 20.0), (100.0, 60.0)));
        assert!(!down.used);
    }

    #[test]
    fn search_prefers_right_over_down() {
        let mut node = root((100.0, 100.0));
        node.insert((50.0, 50.0)).unwrap();

        let next = node.insert((50.0, 50.0)).unwrap();
        assert_eq!(next.pos, (50.0, 0.0));

        let after = node.insert((50.0, 50.0)).unwrap();
        assert_eq!(after.pos, (0.0, 50.0));
    }

    #[test]
    fn exact_fit_then_full() {
        let mut node = root((10.0, 10.0));

        assert!(node.insert((10.0, 10.0)).is_some());
        assert!(node.insert((1.0, 1.0)).is_none());
    }

    #[test]
    fn too_large_is_rejected_without_changing_the_tree() {
        let mut node = root((10.0, 10.0));
        let before = node.clone();

        assert!(node.insert((20.0, 20.0)).is_none());
        assert_eq!(node, before);
    }

    #[test]
    fn free_nodes_are_leaves_and_used_nodes_have_both_children() {
        let mut node = root((64.0, 64.0));
        for size in &[(16.0, 8.0), (8.0, 8.0), (32.0, 32.0), (4.0, 30.0)] {
            node.insert(*size);
        }

        node.walk(&mut |n| {
            if n.used {
                assert!(n.right.is_some() && n.down.is_some());
            } else {
                assert!(n.right.is_none() && n.down.is_none());
            }
        });
    }
}
