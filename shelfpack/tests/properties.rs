use rand::{rngs::StdRng, Rng, SeedableRng};

use shelfpack::{
    Block, FitReport, GrowingPacker, GrowthPolicy, PackOutput, Packer, ShelfPacker, SortOrder,
    SpiralPacker,
};

fn random_blocks(rng: &mut StdRng, count: usize) -> Vec<Block> {
    (0..count)
        .map(|i| {
            // Whole-number sizes keep every coordinate exact.
            let width: u32 = rng.random_range(1..60);
            let height: u32 = rng.random_range(1..60);
            let size = (f64::from(width), f64::from(height));
            Block::new(format!("block{}", i), size)
        })
        .collect()
}

fn assert_no_overlaps(output: &PackOutput) {
    let placements = output.placements();

    for (n, a) in placements.iter().enumerate() {
        for b in &placements[n + 1..] {
            assert!(
                !a.rect().intersects(&b.rect()),
                "{} {:?} overlaps {} {:?}",
                a.name(),
                a.rect(),
                b.name(),
                b.rect()
            );
        }
    }
}

fn assert_inside_bounds(output: &PackOutput) {
    let bounds = output.bounds();

    for placement in output.placements() {
        assert!(
            bounds.contains(&placement.rect()),
            "{} {:?} is outside {:?}",
            placement.name(),
            placement.rect(),
            bounds
        );
    }
}

fn assert_accounted_for(output: &PackOutput, count: usize) {
    let mut indices: Vec<_> = output
        .placements()
        .iter()
        .map(|p| p.index())
        .chain(output.unplaced().iter().map(|u| u.index()))
        .chain(output.rejected().iter().map(|r| r.index()))
        .collect();
    indices.sort();

    assert_eq!(indices, (0..count).collect::<Vec<_>>());
}

#[test]
fn fixed_bin_never_overlaps() {
    let mut rng = StdRng::seed_from_u64(1);

    for order in SortOrder::ALL.iter() {
        for _ in 0..20 {
            let mut blocks = random_blocks(&mut rng, 40);
            order.sort_with_rng(&mut blocks, &mut rng);

            let output = ShelfPacker::new((200.0, 150.0)).pack(&blocks);

            assert_no_overlaps(&output);
            assert_inside_bounds(&output);
            assert_accounted_for(&output, blocks.len());
        }
    }
}

#[test]
fn growing_bin_places_everything() {
    let mut rng = StdRng::seed_from_u64(2);
    let policies = [
        GrowthPolicy::KeepSquare,
        GrowthPolicy::PreferRight,
        GrowthPolicy::PreferDown,
    ];

    for policy in policies.iter() {
        for order in SortOrder::ALL.iter() {
            let mut blocks = random_blocks(&mut rng, 50);
            order.sort_with_rng(&mut blocks, &mut rng);

            let output = GrowingPacker::new().policy(*policy).pack(&blocks);

            assert!(output.unplaced().is_empty());
            assert_eq!(output.placements().len(), blocks.len());
            assert_no_overlaps(&output);
            assert_inside_bounds(&output);
        }
    }
}

#[test]
fn spiral_never_overlaps() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..10 {
        let mut blocks = random_blocks(&mut rng, 15);
        SortOrder::Area.sort(&mut blocks);

        let output = SpiralPacker::new((150.0, 150.0), (140.0, 140.0))
            .margin(6.0)
            .pack(&blocks);

        assert_no_overlaps(&output);
        assert_inside_bounds(&output);
        assert_accounted_for(&output, blocks.len());
    }
}

#[test]
fn utilization_is_a_ratio() {
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..20 {
        let blocks = random_blocks(&mut rng, 30);
        let outputs = [
            ShelfPacker::new((120.0, 120.0)).pack(&blocks),
            GrowingPacker::new().pack(&blocks),
            SpiralPacker::for_canvas(200.0, 200.0).pack(&blocks),
        ];

        for output in outputs.iter() {
            let report = FitReport::new(output);
            assert!(report.utilization >= 0.0 && report.utilization <= 1.0);
            assert!(report.percent() <= 100);
        }
    }
}

#[test]
fn sorted_runs_are_repeatable() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut blocks = random_blocks(&mut rng, 25);
    SortOrder::MaxSide.sort(&mut blocks);

    let packers: Vec<Box<dyn Packer>> = vec![
        Box::new(ShelfPacker::new((100.0, 100.0))),
        Box::new(GrowingPacker::new()),
        Box::new(SpiralPacker::for_canvas(160.0, 160.0)),
    ];

    for packer in &packers {
        let first = packer.pack(&blocks);
        let second = packer.pack(&blocks);

        assert_eq!(first.placements(), second.placements());
        assert_eq!(first.unplaced(), second.unplaced());
        assert_eq!(first.bounds(), second.bounds());
    }
}

#[test]
fn invalid_blocks_are_skipped_by_every_packer() {
    let blocks = [
        Block::new("ok", (10.0, 10.0)),
        Block::new("zero", (0.0, 10.0)),
        Block::new("nan", (f64::NAN, 2.0)),
        Block::new("also-ok", (5.0, 5.0)),
    ];

    let packers: Vec<Box<dyn Packer>> = vec![
        Box::new(ShelfPacker::new((100.0, 100.0))),
        Box::new(GrowingPacker::new()),
        Box::new(SpiralPacker::for_canvas(100.0, 100.0)),
    ];

    for packer in &packers {
        let output = packer.pack(&blocks);

        assert_eq!(output.placements().len(), 2);
        assert!(output.unplaced().is_empty());
        assert_eq!(output.rejected().len(), 2);
    }
}
