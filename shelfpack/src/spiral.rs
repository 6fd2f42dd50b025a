//! Centroid-outward placement for loose, roughly radial layouts.
//!
//! Candidate centers sit on a square grid with spacing `step` around the
//! center of the working area. They are tried ring by ring, where ring `k`
//! holds the grid points whose larger offset along either axis is `k` steps.
//! Inside a ring, points closer to the center come first, and points at the
//! same distance are ordered by angle, counter-clockwise from the positive x
//! axis. The first candidate whose padded box stays inside the working area
//! and clear of every earlier block wins.

use std::{f64::consts::PI, vec};

use crate::{
    block::Block,
    geometry::Rect,
    packer::{valid_blocks, Packer},
    types::{PackOutput, Placement, Strategy, Unplaced},
};

pub const DEFAULT_STEP: f64 = 10.0;
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Places blocks around a center point, keeping at least `margin` units of
/// empty space between any two of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralPacker {
    center: (f64, f64),
    half_extents: (f64, f64),
    step: f64,
    margin: f64,
}

impl SpiralPacker {
    pub fn new(center: (f64, f64), half_extents: (f64, f64)) -> Self {
        Self {
            center,
            half_extents,
            step: DEFAULT_STEP,
            margin: DEFAULT_MARGIN,
        }
    }

    /// A working area covering a `width` by `height` canvas anchored at the
    /// origin.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self::new((width / 2.0, height / 2.0), (width / 2.0, height / 2.0))
    }

    pub fn step(self, step: f64) -> Self {
        Self { step, ..self }
    }

    pub fn margin(self, margin: f64) -> Self {
        Self { margin, ..self }
    }

    pub fn working_area(&self) -> Rect {
        Rect::from_center(
            self.center,
            (self.half_extents.0 * 2.0, self.half_extents.1 * 2.0),
        )
    }
}

impl Packer for SpiralPacker {
    fn pack(&self, blocks: &[Block]) -> PackOutput {
        let mut output = PackOutput::new(Strategy::Spiral, self.working_area());
        let mut state = SpiralState::new(self);

        log::trace!(
            "Packing {} blocks around ({}, {}), searching up to {} rings",
            blocks.len(),
            self.center.0,
            self.center.1,
            state.rings
        );

        for (index, block) in valid_blocks(blocks, &mut output) {
            match state.place(block.size) {
                Some(rect) => {
                    log::trace!("Placed {} centered at {:?}", block.name, rect.center());
                    output.placements.push(Placement::new(index, block, rect));
                }
                None => {
                    log::trace!("Ran out of candidates for {}", block.name);
                    output.unplaced.push(Unplaced::new(index, block));
                }
            }
        }

        output
    }
}

struct SpiralState {
    center: (f64, f64),
    area: Rect,
    step: f64,
    half_margin: f64,

    /// How many rings of grid points surround the center candidate.
    rings: i64,

    /// Padded boxes of every block accepted so far.
    accepted: Vec<Rect>,
}

impl SpiralState {
    fn new(packer: &SpiralPacker) -> Self {
        let step = if packer.step.is_finite() && packer.step > 0.0 {
            packer.step
        } else {
            log::warn!(
                "Spiral step {} is not positive, using {} instead",
                packer.step,
                DEFAULT_STEP
            );
            DEFAULT_STEP
        };

        let margin = if packer.margin.is_finite() {
            packer.margin.max(0.0)
        } else {
            0.0
        };

        let reach = packer.half_extents.0.max(packer.half_extents.1).max(0.0);
        let rings = (reach / step).ceil() as i64;

        Self {
            center: packer.center,
            area: packer.working_area(),
            step,
            half_margin: margin / 2.0,
            rings,
            accepted: Vec::new(),
        }
    }

    fn place(&mut self, size: (f64, f64)) -> Option<Rect> {
        let (center, step, half_margin) = (self.center, self.step, self.half_margin);
        let (area, accepted) = (&self.area, &self.accepted);

        let padded_size = (size.0 + 2.0 * half_margin, size.1 + 2.0 * half_margin);
        if padded_size.0 > area.size.0 || padded_size.1 > area.size.1 {
            return None;
        }

        let (rect, padded) = search_offsets(self.rings)
            .map(|(i, j)| {
                let candidate = (center.0 + i as f64 * step, center.1 + j as f64 * step);
                let rect = Rect::from_center(candidate, size);
                (rect, rect.inflate(half_margin))
            })
            .find(|(_, padded)| {
                area.contains(padded) && accepted.iter().all(|other| !padded.intersects(other))
            })?;

        self.accepted.push(padded);
        Some(rect)
    }
}

/// Walks every grid offset with both coordinates within `rings` of the
/// origin, in search order. Rings are built one at a time as the search
/// reaches them.
fn search_offsets(rings: i64) -> SearchOffsets {
    SearchOffsets {
        ring: 0,
        rings,
        current: vec![(0, 0)].into_iter(),
    }
}

struct SearchOffsets {
    ring: i64,
    rings: i64,
    current: vec::IntoIter<(i64, i64)>,
}

impl Iterator for SearchOffsets {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(offset) = self.current.next() {
                return Some(offset);
            }

            if self.ring >= self.rings {
                return None;
            }

            self.ring += 1;
            self.current = ring_offsets(self.ring).into_iter();
        }
    }
}

/// The `8 * ring` grid points on the perimeter of a ring, sorted by distance
/// and then angle.
fn ring_offsets(ring: i64) -> Vec<(i64, i64)> {
    let mut offsets = Vec::with_capacity(8 * ring as usize);

    for i in -ring..=ring {
        offsets.push((i, -ring));
        offsets.push((i, ring));
    }

    for j in (1 - ring)..ring {
        offsets.push((-ring, j));
        offsets.push((ring, j));
    }

    offsets.sort_by(|a, b| {
        let distance = |(i, j): (i64, i64)| i * i + j * j;
        distance(*a)
            .cmp(&distance(*b))
            .then_with(|| angle(*a).total_cmp(&angle(*b)))
    });

    offsets
}

/// The angle of an offset, in `[0, 2π)`.
fn angle((i, j): (i64, i64)) -> f64 {
    let theta = (j as f64).atan2(i as f64);

    if theta < 0.0 {
        theta + 2.0 * PI
    } else {
        theta
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::time::{Duration, Instant};

    fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn search_order_starts_at_the_center() {
        let offsets: Vec<_> = search_offsets(2).collect();

        assert_eq!(offsets.len(), 25);
        assert_eq!(
            &offsets[..9],
            &[
                (0, 0),
                (1, 0),
                (0, 1),
                (-1, 0),
                (0, -1),
                (1, 1),
                (-1, 1),
                (-1, -1),
                (1, -1),
            ]
        );
        assert_eq!(offsets[9], (2, 0));
    }

    #[test]
    fn first_block_goes_in_the_middle() {
        let blocks = [Block::new("a", (10.0, 10.0))];
        let output = SpiralPacker::new((50.0, 50.0), (45.0, 45.0)).pack(&blocks);

        assert_eq!(output.placements()[0].center(), (50.0, 50.0));
        assert_eq!(output.placements()[0].position(), (45.0, 45.0));
    }

    #[test]
    fn second_block_keeps_the_margin() {
        let blocks = [Block::new("a", (10.0, 10.0)), Block::new("b", (10.0, 10.0))];
        let output = SpiralPacker::new((50.0, 50.0), (45.0, 45.0))
            .margin(10.0)
            .pack(&blocks);

        let placements = output.placements();
        assert_eq!(placements.len(), 2);
        assert!(distance(placements[0].center(), placements[1].center()) >= 20.0);
        assert_eq!(placements[1].center(), (70.0, 50.0));
    }

    #[test]
    fn blocks_that_cannot_fit_are_listed() {
        let blocks = [
            Block::new("wide", (30.0, 30.0)),
            Block::new("huge", (200.0, 10.0)),
            Block::new("also-wide", (60.0, 60.0)),
            Block::new("small", (5.0, 5.0)),
        ];
        let output = SpiralPacker::new((50.0, 50.0), (45.0, 45.0)).pack(&blocks);

        let unplaced: Vec<_> = output.unplaced().iter().map(Unplaced::name).collect();
        assert_eq!(unplaced, ["huge", "also-wide"]);
        assert_eq!(output.placements().len(), 2);
    }

    #[test]
    fn placements_stay_inside_and_apart() {
        let blocks: Vec<_> = (0..12)
            .map(|i| Block::new(format!("b{}", i), (8.0 + i as f64, 12.0 - i as f64 / 2.0)))
            .collect();
        let packer = SpiralPacker::new((100.0, 80.0), (90.0, 70.0)).step(5.0).margin(4.0);
        let output = packer.pack(&blocks);
        let area = packer.working_area();

        let placements = output.placements();
        for (n, a) in placements.iter().enumerate() {
            assert!(area.contains(&a.rect()));

            for b in &placements[n + 1..] {
                assert!(!a.rect().inflate(2.0).intersects(&b.rect().inflate(2.0)));
            }
        }
    }

    #[test]
    fn bad_step_falls_back_to_default() {
        let packer = SpiralPacker::new((50.0, 50.0), (45.0, 45.0)).step(0.0);
        let state = SpiralState::new(&packer);

        assert_eq!(state.step, DEFAULT_STEP);
        assert_eq!(state.rings, 5);
        assert_eq!(search_offsets(state.rings).count(), 121);
    }

    #[test]
    fn rings_hold_only_their_perimeter() {
        for ring in 1..=6 {
            let offsets = ring_offsets(ring);

            assert_eq!(offsets.len(), 8 * ring as usize);
            assert!(offsets
                .iter()
                .all(|(i, j)| i.abs().max(j.abs()) == ring));
        }
    }

    #[test]
    fn fine_grid_over_large_area_stays_fast() {
        let blocks = [
            Block::new("first", (10.0, 10.0)),
            Block::new("second", (10.0, 10.0)),
            Block::new("too-big", (2500.0, 10.0)),
            Block::new("third", (10.0, 10.0)),
        ];
        let packer = SpiralPacker::new((1000.0, 1000.0), (1000.0, 1000.0)).step(1.0);

        let started = Instant::now();
        let output = packer.pack(&blocks);

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(output.placements().len(), 3);
        assert_eq!(output.unplaced()[0].name(), "too-big");
        assert_eq!(output.placements()[0].center(), (1000.0, 1000.0));
        assert_eq!(output.placements()[1].center(), (1020.0, 1000.0));
    }

    #[test]
    fn bounds_are_the_working_area() {
        let output = SpiralPacker::for_canvas(300.0, 200.0).pack(&[]);

        assert_eq!(output.bounds(), Rect::new((0.0, 0.0), (300.0, 200.0)));
    }
}
