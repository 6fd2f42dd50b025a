//! Draws a packing result onto an image.
//!
//! Each placed block is filled with its palette color. If an image directory
//! is configured and holds a `<block name>.png`, that picture is stretched over
//! the block; a missing or unreadable picture just leaves the fill visible.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use fs_err as fs;
use shelfpack::{PackOutput, Rect};

use crate::{
    config::RenderConfig,
    image::{Image, Pixel},
    palette::Palette,
};

static OUTLINE: Pixel = Pixel {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

pub struct Renderer {
    zoom: u32,
    palette: Palette,
    outline: bool,
    images: ImageLookup,
}

impl Renderer {
    pub fn new(config: &RenderConfig, image_dir: Option<PathBuf>) -> Self {
        Self {
            zoom: config.zoom.max(1),
            palette: config.palette,
            outline: config.outline,
            images: ImageLookup::new(image_dir),
        }
    }

    pub fn render(&mut self, output: &PackOutput) -> Image {
        let bounds = output.bounds();
        let extent = bounds.max();

        // One extra pixel so the bin's right and bottom outline stay visible.
        let size = (self.scale(extent.0) + 1, self.scale(extent.1) + 1);
        let mut canvas = Image::new_empty_rgba8(size);

        log::debug!(
            "Rendering {} blocks onto a {:?} canvas",
            output.placements().len(),
            canvas.size()
        );

        for (n, placement) in output.placements().iter().enumerate() {
            let (min, max) = self.pixel_bounds(&placement.rect());

            canvas.fill_rect(min, max, self.palette.color(n));

            if let Some(picture) = self.images.get(placement.name()) {
                canvas.draw_scaled(picture, min, max);
            }

            if self.outline {
                canvas.stroke_rect(min, (max.0 + 1, max.1 + 1), OUTLINE);
            }
        }

        if self.outline {
            let (min, max) = self.pixel_bounds(&bounds);
            canvas.stroke_rect(min, (max.0 + 1, max.1 + 1), OUTLINE);
        }

        canvas
    }

    fn scale(&self, value: f64) -> u32 {
        (value * f64::from(self.zoom)).round().max(0.0) as u32
    }

    fn pixel_bounds(&self, rect: &Rect) -> ((u32, u32), (u32, u32)) {
        let max = rect.max();

        (
            (self.scale(rect.pos.0), self.scale(rect.pos.1)),
            (self.scale(max.0), self.scale(max.1)),
        )
    }
}

/// Finds and caches the overlay picture for each block name.
struct ImageLookup {
    dir: Option<PathBuf>,
    cache: HashMap<String, Option<Image>>,
}

impl ImageLookup {
    fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            cache: HashMap::new(),
        }
    }

    fn get(&mut self, name: &str) -> Option<&Image> {
        let dir = self.dir.as_ref()?;

        self.cache
            .entry(name.to_owned())
            .or_insert_with(|| load_picture(&dir.join(format!("{}.png", name))))
            .as_ref()
    }
}

fn load_picture(path: &Path) -> Option<Image> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::debug!("No picture for block: {}", err);
            return None;
        }
    };

    match Image::decode_png(file) {
        Ok(image) => Some(image),
        Err(err) => {
            log::warn!("Could not read {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use shelfpack::{Block, Packer, ShelfPacker};

    fn render_default(output: &PackOutput, zoom: u32) -> Image {
        let config = RenderConfig {
            zoom,
            ..RenderConfig::default()
        };

        Renderer::new(&config, None).render(output)
    }

    #[test]
    fn canvas_covers_the_bin() {
        let output = ShelfPacker::new((40.0, 30.0)).pack(&[]);

        assert_eq!(render_default(&output, 1).size(), (41, 31));
        assert_eq!(render_default(&output, 3).size(), (121, 91));
    }

    #[test]
    fn blocks_are_filled_with_palette_colors() {
        let blocks = [Block::new("a", (10.0, 10.0)), Block::new("b", (10.0, 10.0))];
        let output = ShelfPacker::new((20.0, 10.0)).pack(&blocks);
        let canvas = render_default(&output, 2);

        assert_eq!(canvas.get_pixel((5, 5)), Palette::Pastel.color(0));
        assert_eq!(canvas.get_pixel((25, 5)), Palette::Pastel.color(1));
        assert_eq!(canvas.get_pixel((0, 0)), OUTLINE);
    }

    #[test]
    fn missing_pictures_fall_back_to_the_fill() {
        let blocks = [Block::new("no-such-picture", (10.0, 10.0))];
        let output = ShelfPacker::new((10.0, 10.0)).pack(&blocks);

        let dir = std::env::temp_dir().join("blockpack-render-test-missing");
        let mut renderer = Renderer::new(&RenderConfig::default(), Some(dir));
        let canvas = renderer.render(&output);

        assert_eq!(canvas.get_pixel((5, 5)), Palette::Pastel.color(0));
    }

    #[test]
    fn pictures_are_drawn_over_blocks() {
        let dir = std::env::temp_dir().join(format!("blockpack-render-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut picture = Image::new_empty_rgba8((1, 1));
        let teal = Pixel::new(0, 128, 128, 255);
        picture.set_pixel((0, 0), teal);
        picture
            .encode_png(fs::File::create(dir.join("Poster1.png")).unwrap())
            .unwrap();

        let blocks = [Block::new("Poster1", (10.0, 10.0)), Block::new("Note1", (10.0, 10.0))];
        let output = ShelfPacker::new((20.0, 10.0)).pack(&blocks);
        let canvas = Renderer::new(&RenderConfig::default(), Some(dir.clone())).render(&output);

        assert_eq!(canvas.get_pixel((5, 5)), teal);
        assert_eq!(canvas.get_pixel((15, 5)), Palette::Pastel.color(1));

        fs::remove_dir_all(&dir).unwrap();
    }
}
