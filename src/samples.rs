//! Built-in block lists to try blockpack with.

use crate::block_list::{BlockList, BlockSpec, Ratio};

pub static SAMPLE_NAMES: &[&str] = &["sample"];

/// Looks up a built-in sample by name.
pub fn sample(name: &str) -> Option<BlockList> {
    let specs = match name {
        "sample" => vec![
            BlockSpec::new("Poster1", (50.0, 20.0), Ratio::Range(0.8, 1.2)),
            BlockSpec::new("Poster2", (40.0, 20.0), Ratio::Range(0.8, 1.2)),
            BlockSpec::new("Poster3", (30.0, 20.0), Ratio::Choices(vec![0.8, 1.2])),
            BlockSpec::new("Note1", (20.0, 20.0), Ratio::Range(0.8, 1.2)),
        ],
        _ => return None,
    };

    Some(BlockList {
        specs,
        skipped: Vec::new(),
    })
}
