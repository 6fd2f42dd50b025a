use std::path::PathBuf;

use shelfpack::SortOrder;
use structopt::StructOpt;

use crate::config::{BinSize, StrategyKind};

#[derive(Debug, StructOpt)]
#[structopt(about = "Lays out rectangular blocks on a board from the command line")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Sets verbosity level. Can be specified multiple times.
    #[structopt(long = "verbose", short, global(true), parse(from_occurrences))]
    pub verbosity: u8,

    /// The path to a blockpack.toml file, or a folder containing one. If not
    /// specified, blockpack looks in the current directory and falls back to
    /// its defaults.
    #[structopt(long, global(true))]
    pub config: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the blocks listed in a file and print where each one went.
    Pack(PackOptions),

    /// Print one of the built-in sample block lists.
    Sample(SampleOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The block list to pack. Each line has the form
    /// `name,WIDTHxHEIGHT,ratio`, where ratio is either `min-max` or a list of
    /// choices like `0.8/1.2`.
    pub input: PathBuf,

    /// The bin to pack into: `auto` for a bin that grows to fit everything, or
    /// a fixed size like `500x400`.
    #[structopt(long)]
    pub bin: Option<BinSize>,

    /// How to order blocks before packing.
    ///
    /// Options: none, width, height, area, maxside, random
    #[structopt(long)]
    pub sort: Option<SortOrder>,

    /// Which placement strategy to use.
    ///
    /// Options:
    ///
    /// - shelf: Pack tightly from the top-left corner
    ///
    /// - spiral: Spread blocks outward from the center of the bin
    #[structopt(long)]
    pub strategy: Option<StrategyKind>,

    /// Seed for scale ratios and random sorting. Runs with the same seed and
    /// inputs produce the same layout.
    #[structopt(long)]
    pub seed: Option<u64>,

    /// Write the placements and fit report as JSON to this path.
    #[structopt(long)]
    pub json: Option<PathBuf>,

    /// Render the layout to a PNG image at this path.
    #[structopt(long)]
    pub render: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct SampleOptions {
    /// The name of the sample to print.
    #[structopt(default_value = "sample")]
    pub name: String,
}
