//! A simple RGBA canvas that layouts are drawn onto, plus PNG encoding and
//! decoding.

use std::io::{Read, Write};

use thiserror::Error;

const STRIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composites `self` over `below`, assuming `below` is opaque or empty.
    fn over(self, below: Pixel) -> Pixel {
        match self.a {
            0 => below,
            255 => self,
            alpha => {
                let alpha = u32::from(alpha);
                let mix = |top: u8, bottom: u8| {
                    ((u32::from(top) * alpha + u32::from(bottom) * (255 - alpha)) / 255) as u8
                };

                Pixel {
                    r: mix(self.r, below.r),
                    g: mix(self.g, below.g),
                    b: mix(self.b, below.b),
                    a: below.a.max(self.a),
                }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    Decoding(#[from] png::DecodingError),

    #[error("unsupported PNG format {color_type:?} at {bit_depth:?}")]
    UnsupportedFormat {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
}

#[derive(Debug, Clone)]
pub struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();

        assert!(data.len() == size.0 as usize * size.1 as usize * STRIDE);

        Self { size, data }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; size.0 as usize * size.1 as usize * STRIDE];
        Self::new_rgba8(size, data)
    }

    /// Decodes an 8-bit RGB or RGBA PNG. Other formats are reported as
    /// `UnsupportedFormat`.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, ImageError> {
        let decoder = png::Decoder::new(input);
        let (info, mut reader) = decoder.read_info()?;

        if info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::UnsupportedFormat {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            });
        }

        let mut buffer = vec![0; info.buffer_size()];
        reader.next_frame(&mut buffer)?;

        let data = match info.color_type {
            png::ColorType::RGBA => buffer,
            png::ColorType::RGB => buffer
                .chunks_exact(3)
                .flat_map(|rgb| vec![rgb[0], rgb[1], rgb[2], 255])
                .collect(),
            color_type => {
                return Err(ImageError::UnsupportedFormat {
                    color_type,
                    bit_depth: info.bit_depth,
                })
            }
        };

        Ok(Self::new_rgba8((info.width, info.height), data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(png::ColorType::RGBA);
        encoder.set_depth(png::BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn offset(&self, pos: (u32, u32)) -> usize {
        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        let start = self.offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    /// Draws `pixel` over whatever is already at `pos`. Positions outside the
    /// image are ignored.
    pub fn blend_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        if pos.0 < self.size.0 && pos.1 < self.size.1 {
            let below = self.get_pixel(pos);
            self.set_pixel(pos, pixel.over(below));
        }
    }

    /// Fills the region from `min` (inclusive) to `max` (exclusive), clipped
    /// to the image.
    pub fn fill_rect(&mut self, min: (u32, u32), max: (u32, u32), pixel: Pixel) {
        for y in min.1..max.1.min(self.size.1) {
            for x in min.0..max.0.min(self.size.0) {
                self.blend_pixel((x, y), pixel);
            }
        }
    }

    /// Draws a one pixel outline just inside the region from `min` to `max`.
    pub fn stroke_rect(&mut self, min: (u32, u32), max: (u32, u32), pixel: Pixel) {
        if max.0 <= min.0 || max.1 <= min.1 {
            return;
        }

        let (right, bottom) = (max.0 - 1, max.1 - 1);

        for x in min.0..max.0 {
            self.blend_pixel((x, min.1), pixel);
            self.blend_pixel((x, bottom), pixel);
        }

        for y in min.1..max.1 {
            self.blend_pixel((min.0, y), pixel);
            self.blend_pixel((right, y), pixel);
        }
    }

    /// Draws `other` stretched over the region from `min` to `max` using
    /// nearest-neighbor sampling.
    pub fn draw_scaled(&mut self, other: &Image, min: (u32, u32), max: (u32, u32)) {
        if other.size.0 == 0 || other.size.1 == 0 || max.0 <= min.0 || max.1 <= min.1 {
            return;
        }

        let target = (u64::from(max.0 - min.0), u64::from(max.1 - min.1));

        for y in min.1..max.1.min(self.size.1) {
            let source_y = u64::from(y - min.1) * u64::from(other.size.1) / target.1;

            for x in min.0..max.0.min(self.size.0) {
                let source_x = u64::from(x - min.0) * u64::from(other.size.0) / target.0;
                let pixel = other.get_pixel((source_x as u32, source_y as u32));
                self.blend_pixel((x, y), pixel);
            }
        }
    }
}
