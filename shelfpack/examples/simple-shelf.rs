use shelfpack::{Block, FitReport, GrowingPacker, Packer, SortOrder};

fn main() {
    env_logger::init();

    let mut blocks: Vec<_> = (1..=6)
        .map(|i| Block::new(format!("Poster{}", i), (10.0 * i as f64, 40.0)))
        .collect();
    SortOrder::MaxSide.sort(&mut blocks);

    let output = GrowingPacker::new().pack(&blocks);

    for placement in output.placements() {
        println!("{} at {:?}", placement.name(), placement.position());
    }

    println!("{}", FitReport::new(&output));
}
