use anyhow::bail;

use crate::options::SampleOptions;
use crate::samples::{sample, SAMPLE_NAMES};

pub fn print_sample(options: SampleOptions) -> anyhow::Result<()> {
    match sample(&options.name) {
        Some(list) => {
            print!("{}", list);
            Ok(())
        }
        None => bail!(
            "There is no sample named '{}'. Available samples: {}",
            options.name,
            SAMPLE_NAMES.join(", ")
        ),
    }
}
