mod pack;
mod sample;

pub use pack::*;
pub use sample::*;
