//! Piece colours and the UI theme.
//!
//! Each palette index has a dark body colour and a light highlight, drawn
//! side by side so a cell reads as a bevelled block.

use crate::frame::{Rgb, Style};

/// Body colours, indexed by a cell's palette index
pub const DARK: [Rgb; 11] = [
    Rgb::new(0, 108, 224),   // blue
    Rgb::new(0, 155, 0),     // green
    Rgb::new(237, 28, 91),   // red
    Rgb::new(245, 236, 136), // yellow
    Rgb::new(241, 71, 255),  // pink
    Rgb::new(40, 211, 183),  // turquoise
    Rgb::new(255, 141, 27),  // orange
    Rgb::new(31, 35, 38),    // noir
    Rgb::new(247, 247, 247), // pale
    Rgb::new(0, 166, 237),   // aqua
    Rgb::new(133, 190, 0),   // leaf
];

/// Highlight colours, same order as [`DARK`]
pub const LIGHT: [Rgb; 11] = [
    Rgb::new(10, 137, 255),
    Rgb::new(20, 175, 20),
    Rgb::new(255, 48, 13),
    Rgb::new(255, 245, 71),
    Rgb::new(245, 145, 255),
    Rgb::new(47, 252, 218),
    Rgb::new(255, 176, 0),
    Rgb::new(45, 49, 61),
    Rgb::new(252, 252, 252),
    Rgb::new(39, 200, 237),
    Rgb::new(146, 255, 0),
];

pub const BACKGROUND: Rgb = Rgb::new(10, 20, 87);
pub const BORDER: Rgb = Rgb::new(55, 33, 255);
pub const BORDER_SHADE: Rgb = Rgb::new(89, 71, 255);
pub const TEXT: Rgb = Rgb::new(252, 252, 252);

/// Dark and light shades of palette index `color`
///
/// Indices past the palette wrap around, so larger configured palettes still
/// render.
pub fn shades(color: u8) -> (Rgb, Rgb) {
    let i = color as usize % DARK.len();
    (DARK[i], LIGHT[i])
}

pub fn border_style() -> Style {
    Style::new(BORDER_SHADE, BORDER).bold()
}

pub fn text_style() -> Style {
    Style::new(TEXT, BACKGROUND)
}

pub fn empty_style() -> Style {
    Style::new(Rgb::new(40, 50, 120), BACKGROUND).dim()
}
