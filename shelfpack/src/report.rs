use std::fmt;

use serde::Serialize;

use crate::types::PackOutput;

/// A block that did not fit, as shown to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoFitEntry {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for NoFitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}x{})", self.name, self.width, self.height)
    }
}

/// Summarizes how well a packing run used its bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    /// Placed area over bin area, clamped to `[0, 1]`.
    pub utilization: f64,

    /// `utilization` as a whole percentage between 0 and 100.
    pub percent: u32,

    /// The bin extent the utilization was measured against.
    pub bin_size: (f64, f64),

    pub placed: usize,
    pub unplaced: Vec<NoFitEntry>,
}

impl FitReport {
    pub fn new(output: &PackOutput) -> Self {
        let bin_size = output.bounds().size;
        let bin_area = bin_size.0 * bin_size.1;

        let utilization = if bin_area > 0.0 {
            (output.placed_area() / bin_area).max(0.0).min(1.0)
        } else {
            0.0
        };

        let unplaced = output
            .unplaced()
            .iter()
            .map(|block| NoFitEntry {
                name: block.name().to_owned(),
                width: block.size().0,
                height: block.size().1,
            })
            .collect();

        Self {
            utilization,
            percent: (utilization * 100.0).round() as u32,
            bin_size,
            placed: output.placements().len(),
            unplaced,
        }
    }

    #[inline]
    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn all_fit(&self) -> bool {
        self.unplaced.is_empty()
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Utilization: {}% of {}x{}",
            self.percent(),
            self.bin_size.0,
            self.bin_size.1
        )?;

        if !self.all_fit() {
            let names: Vec<_> = self.unplaced.iter().map(ToString::to_string).collect();
            writeln!(f, "Did not fit ({}) : {}", self.unplaced.len(), names.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::{
        block::Block,
        geometry::Rect,
        types::{Placement, Strategy, Unplaced},
    };

    fn output_with(bounds: (f64, f64), placed: &[(f64, f64)]) -> PackOutput {
        let mut output = PackOutput::new(Strategy::Fixed, Rect::new((0.0, 0.0), bounds));
        for (index, size) in placed.iter().enumerate() {
            let block = Block::new(format!("b{}", index), *size);
            output
                .placements
                .push(Placement::new(index, &block, Rect::new((0.0, 0.0), *size)));
        }
        output
    }

    #[test]
    fn rounds_to_whole_percent() {
        let report = FitReport::new(&output_with((100.0, 100.0), &[(50.0, 33.3)]));

        assert!((report.utilization - 0.1665).abs() < 1e-9);
        assert_eq!(report.percent(), 17);
        assert_eq!(report.percent, 17);
    }

    #[test]
    fn clamps_to_one() {
        let report = FitReport::new(&output_with((10.0, 10.0), &[(10.0, 10.0), (10.0, 10.0)]));

        assert_eq!(report.utilization, 1.0);
        assert_eq!(report.percent(), 100);
    }

    #[test]
    fn empty_bin_reports_zero() {
        let report = FitReport::new(&output_with((0.0, 0.0), &[]));

        assert_eq!(report.utilization, 0.0);
        assert_eq!(report.percent(), 0);
        assert!(report.all_fit());
    }

    #[test]
    fn lists_unplaced_blocks() {
        let mut output = output_with((100.0, 100.0), &[(10.0, 10.0)]);
        output
            .unplaced
            .push(Unplaced::new(1, &Block::new("Poster1", (120.0, 48.5))));
        output
            .unplaced
            .push(Unplaced::new(2, &Block::new("Note1", (200.0, 200.0))));

        let report = FitReport::new(&output);

        assert_eq!(report.placed, 1);
        assert_eq!(report.unplaced.len(), 2);
        assert_eq!(
            report.to_string(),
            "Utilization: 1% of 100x100\nDid not fit (2) : Poster1(120x48.5), Note1(200x200)\n"
        );
    }
}
