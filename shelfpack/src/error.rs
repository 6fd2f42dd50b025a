use thiserror::Error;

/// Reasons a block can be excluded from a packing run.
///
/// These are never fatal: packers skip the offending block, record it in
/// [`PackOutput::rejected`](struct.PackOutput.html#method.rejected), and keep
/// going with the rest of the sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockError {
    #[error("block {name:?} has an invalid size {width}x{height}")]
    InvalidDimension {
        name: String,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order {0:?}, expected one of: none, width, height, area, maxside, random")]
pub struct ParseSortOrderError(pub String);
