//! Fill colors for rendered blocks. Block `n` of a layout gets color
//! `n % len` of the chosen palette.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::image::Pixel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    Pastel,
    Basic,
    Gray,
    Vintage,
    Solarized,
    None,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Pastel
    }
}

static PASTEL: &[u32] = &[0xFFF7A5, 0xFFA5E0, 0xA5B3FF, 0xBFFFA5, 0xFFCBA5];

// silver, gray, red, maroon, yellow, olive, lime, green, aqua, teal, blue,
// navy, fuchsia, purple
static BASIC: &[u32] = &[
    0xC0C0C0, 0x808080, 0xFF0000, 0x800000, 0xFFFF00, 0x808000, 0x00FF00, 0x008000, 0x00FFFF,
    0x008080, 0x0000FF, 0x000080, 0xFF00FF, 0x800080,
];

static GRAY: &[u32] = &[
    0x111111, 0x222222, 0x333333, 0x444444, 0x555555, 0x666666, 0x777777, 0x888888, 0x999999,
    0xAAAAAA, 0xBBBBBB, 0xCCCCCC, 0xDDDDDD, 0xEEEEEE,
];

static VINTAGE: &[u32] = &[
    0xEFD279, 0x95CBE9, 0x024769, 0xAFD775, 0x2C5700, 0xDE9D7F, 0x7F9DDE, 0x00572C, 0x75D7AF,
    0x694702, 0xE9CB95, 0x79D2EF,
];

static SOLARIZED: &[u32] = &[
    0xB58900, 0xCB4B16, 0xDC322F, 0xD33682, 0x6C71C4, 0x268BD2, 0x2AA198, 0x859900,
];

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::Pastel,
        Palette::Basic,
        Palette::Gray,
        Palette::Vintage,
        Palette::Solarized,
        Palette::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Pastel => "pastel",
            Palette::Basic => "basic",
            Palette::Gray => "gray",
            Palette::Vintage => "vintage",
            Palette::Solarized => "solarized",
            Palette::None => "none",
        }
    }

    /// The color for the `n`th placed block.
    pub fn color(self, n: usize) -> Pixel {
        let colors = match self {
            Palette::Pastel => PASTEL,
            Palette::Basic => BASIC,
            Palette::Gray => GRAY,
            Palette::Vintage => VINTAGE,
            Palette::Solarized => SOLARIZED,
            Palette::None => return Pixel::new(0, 0, 0, 0),
        };

        let rgb = colors[n % colors.len()];
        Pixel::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(value: &str) -> Result<Palette, Self::Err> {
        Palette::ALL
            .iter()
            .copied()
            .find(|palette| palette.name() == value)
            .ok_or_else(|| {
                format!(
                    "Invalid palette '{}'. Valid options are pastel, basic, gray, vintage, solarized and none.",
                    value
                )
            })
    }
}
