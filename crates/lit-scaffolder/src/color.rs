//! Random editor theme colors with a legibility guarantee

use rand::Rng;
use std::fmt;

/// Minimum luma distance between title bar background and foreground
pub const MIN_LUMA_DIFFERENCE: f64 = 125.0;

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`; bits above 24 are ignored
    pub const fn from_u24(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_u24(rng.gen_range(0..=0xFF_FF_FF))
    }

    /// Perceptual brightness on a 0-255 scale (ITU-R BT.601 weights)
    pub fn luma(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Background/foreground pair accepted only once it clears [`MIN_LUMA_DIFFERENCE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl ColorPair {
    pub fn luma_difference(&self) -> f64 {
        (self.background.luma() - self.foreground.luma()).abs()
    }

    pub fn is_legible(&self) -> bool {
        self.luma_difference() >= MIN_LUMA_DIFFERENCE
    }
}

/// Draw random pairs until one is legible.
///
/// Around one uniform draw in fifteen qualifies, so a pair usually turns up
/// within a few dozen attempts. There is no attempt cap.
pub fn generate_contrasting_pair<R: Rng + ?Sized>(rng: &mut R) -> ColorPair {
    loop {
        let candidate = ColorPair {
            background: Rgb::random(rng),
            foreground: Rgb::random(rng),
        };
        if candidate.is_legible() {
            return candidate;
        }
    }
}
