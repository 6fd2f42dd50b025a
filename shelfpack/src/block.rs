use crate::error::BlockError;

/// An input to the packing routines.
///
/// A `Block` is a named 2D size. Packers never modify blocks; placements are
/// reported back by the block's index in the sequence that was packed, so
/// names only need to be unique for the benefit of whoever reads the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub(crate) name: String,
    pub(crate) size: (f64, f64),

    /// The scale factor this block's size was derived with, if any. Carried
    /// through packing untouched for display purposes.
    pub(crate) rate: Option<f64>,
}

impl Block {
    #[inline]
    pub fn new<S: Into<String>>(name: S, size: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            size,
            rate: None,
        }
    }

    pub fn with_rate(self, rate: f64) -> Self {
        Self {
            rate: Some(rate),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.1
    }

    #[inline]
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.size.0 * self.size.1
    }

    #[inline]
    pub fn max_side(&self) -> f64 {
        self.size.0.max(self.size.1)
    }

    #[inline]
    pub fn min_side(&self) -> f64 {
        self.size.0.min(self.size.1)
    }

    /// Checks that both dimensions are finite and strictly positive.
    pub fn validate(&self) -> Result<(), BlockError> {
        let valid = |side: f64| side.is_finite() && side > 0.0;

        if valid(self.size.0) && valid(self.size.1) {
            Ok(())
        } else {
            Err(BlockError::InvalidDimension {
                name: self.name.clone(),
                width: self.size.0,
                height: self.size.1,
            })
        }
    }
}
