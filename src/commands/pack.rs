use std::io::{BufWriter, Write};

use anyhow::{bail, Context};
use fs_err as fs;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use shelfpack::{
    FitReport, GrowingPacker, PackOutput, Packer, Placement, Rect, ShelfPacker, SpiralPacker,
    Strategy, Unplaced,
};

use crate::{
    block_list::BlockList,
    config::{BinSize, Config, StrategyKind},
    options::{GlobalOptions, PackOptions},
    render::Renderer,
};

pub fn pack(global: GlobalOptions, options: PackOptions) -> anyhow::Result<()> {
    let mut config = Config::discover(global.config.as_deref())?;
    apply_overrides(&mut config, &options);

    log::debug!("Packing with {:#?}", config);

    let text = fs::read_to_string(&options.input)?;
    let list = BlockList::parse(&text);

    if !list.skipped.is_empty() {
        log::warn!(
            "{} line(s) of {} could not be read and were skipped",
            list.skipped.len(),
            options.input.display()
        );
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut blocks = list.expand(&mut rng);
    config.sort.sort_with_rng(&mut blocks, &mut rng);

    log::info!(
        "Packing {} blocks, sorted by {}",
        blocks.len(),
        config.sort
    );

    let packer = build_packer(&config)?;
    let output = packer.pack(&blocks);
    let report = FitReport::new(&output);

    print_placements(&output);
    print!("{}", report);

    if let Some(path) = &options.json {
        let mut file = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut file, &JsonOutput::new(&output, &report))?;
        file.flush()?;

        log::info!("Wrote layout to {}", path.display());
    }

    if let Some(path) = &options.render {
        let image_dir = config
            .render
            .image_dir
            .as_ref()
            .map(|dir| config.resolve(dir));

        let image = Renderer::new(&config.render, image_dir).render(&output);
        let file = BufWriter::new(fs::File::create(path)?);
        image
            .encode_png(file)
            .with_context(|| format!("could not write {}", path.display()))?;

        log::info!("Rendered layout to {}", path.display());
    }

    Ok(())
}

/// Command line options win over whatever the config file says.
fn apply_overrides(config: &mut Config, options: &PackOptions) {
    if let Some(bin) = options.bin {
        config.bin = bin;
    }

    if let Some(sort) = options.sort {
        config.sort = sort;
    }

    if let Some(strategy) = options.strategy {
        config.strategy = strategy;
    }

    if options.seed.is_some() {
        config.seed = options.seed;
    }
}

fn build_packer(config: &Config) -> anyhow::Result<Box<dyn Packer>> {
    let packer: Box<dyn Packer> = match (config.strategy, config.bin) {
        (StrategyKind::Shelf, BinSize::Fixed(width, height)) => {
            Box::new(ShelfPacker::new((width, height)))
        }
        (StrategyKind::Shelf, BinSize::Auto) => {
            Box::new(GrowingPacker::new().policy(config.growth))
        }
        (StrategyKind::Spiral, bin) => {
            let half_bin = match bin {
                BinSize::Fixed(width, height) => Some((width / 2.0, height / 2.0)),
                BinSize::Auto => None,
            };

            let center = config.spiral.center.or(half_bin);
            let half_extents = config.spiral.half_extents.or(half_bin);

            match (center, half_extents) {
                (Some(center), Some(half_extents)) => Box::new(
                    SpiralPacker::new(center, half_extents)
                        .step(config.spiral.step)
                        .margin(config.spiral.margin),
                ),
                _ => bail!(
                    "The spiral strategy needs a fixed bin size, or a center and \
                     half-extents in the [spiral] section of blockpack.toml"
                ),
            }
        }
    };

    Ok(packer)
}

fn print_placements(output: &PackOutput) {
    for placement in output.placements() {
        let (width, height) = placement.size();

        match output.strategy() {
            Strategy::Spiral => {
                let (x, y) = placement.center();
                println!(
                    "{} {}x{} centered at ({}, {})",
                    placement.name(),
                    width,
                    height,
                    x,
                    y
                );
            }
            Strategy::Fixed | Strategy::Growing => {
                let (x, y) = placement.position();
                println!("{} {}x{} at ({}, {})", placement.name(), width, height, x, y);
            }
        }
    }

    for rejected in output.rejected() {
        println!("Skipped: {}", rejected.error());
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonOutput<'a> {
    strategy: Strategy,
    bounds: Rect,
    placements: &'a [Placement],
    unplaced: &'a [Unplaced],
    rejected: Vec<String>,
    report: &'a FitReport,
}

impl<'a> JsonOutput<'a> {
    fn new(output: &'a PackOutput, report: &'a FitReport) -> Self {
        Self {
            strategy: output.strategy(),
            bounds: output.bounds(),
            placements: output.placements(),
            unplaced: output.unplaced(),
            rejected: output
                .rejected()
                .iter()
                .map(|rejected| rejected.error().to_string())
                .collect(),
            report,
        }
    }
}
