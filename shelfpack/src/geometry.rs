use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle described by its top-left corner and its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: (f64, f64),
    pub size: (f64, f64),
}

impl Rect {
    #[inline]
    pub fn new(pos: (f64, f64), size: (f64, f64)) -> Self {
        Self { pos, size }
    }

    /// Constructs a rectangle of the given size centered on `center`.
    pub fn from_center(center: (f64, f64), size: (f64, f64)) -> Self {
        Self {
            pos: (center.0 - size.0 / 2.0, center.1 - size.1 / 2.0),
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> (f64, f64) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.pos.0 + self.size.0 / 2.0,
            self.pos.1 + self.size.1 / 2.0,
        )
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.size.0 * self.size.1
    }

    /// Tells whether the interiors of the two rectangles overlap. Rectangles
    /// that only share an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        let x_overlap = self.pos.0 < other_max.0 && other.pos.0 < self_max.0;
        let y_overlap = self.pos.1 < other_max.1 && other.pos.1 < self_max.1;

        x_overlap && y_overlap
    }

    /// Tells whether `other` lies entirely inside this rectangle, edges
    /// included.
    pub fn contains(&self, other: &Rect) -> bool {
        let (self_max, other_max) = (self.max(), other.max());

        other.pos.0 >= self.pos.0
            && other.pos.1 >= self.pos.1
            && other_max.0 <= self_max.0
            && other_max.1 <= self_max.1
    }

    /// Grows the rectangle by `amount` on every side, keeping its center.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            pos: (self.pos.0 - amount, self.pos.1 - amount),
            size: (self.size.0 + amount * 2.0, self.size.1 + amount * 2.0),
        }
    }
}
