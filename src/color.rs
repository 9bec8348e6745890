//! Color samples coming off the wheel.
//!
//! The wheel only produces fully saturated colors: hue runs around the rim and
//! lightness runs from 50 (vivid edge) to 100 (white center). Everything the
//! models compute is a function of these two numbers.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const HUE_PERIOD: f32 = 360.0;
pub const LIGHTNESS_EDGE: f32 = 50.0;
pub const LIGHTNESS_CENTER: f32 = 100.0;

/// A validated (hue, lightness) sample.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    hue: f32,
    lightness: f32,
}

impl Color {
    /// Build a color, rejecting anything outside `hue ∈ [0, 360)` and
    /// `lightness ∈ [50, 100]`. Nothing is clamped here.
    pub fn new(hue: f32, lightness: f32) -> Result<Self> {
        if !(0.0..HUE_PERIOD).contains(&hue) {
            return Err(Error::HueOutOfRange { hue });
        }
        if !(LIGHTNESS_EDGE..=LIGHTNESS_CENTER).contains(&lightness) {
            return Err(Error::LightnessOutOfRange { lightness });
        }
        Ok(Self { hue, lightness })
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Normalized distance from the vivid edge (0.0) to the white center (1.0).
    #[inline]
    pub fn lt(&self) -> f32 {
        (self.lightness - LIGHTNESS_EDGE) / (LIGHTNESS_CENTER - LIGHTNESS_EDGE)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H:{:.0}° L:{:.0}%", self.hue, self.lightness)
    }
}

/// Named spots on the wheel, handy for the CLI and for tests.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl Swatch {
    pub const ALL: [Swatch; 7] = [
        Swatch::Red,
        Swatch::Orange,
        Swatch::Yellow,
        Swatch::Green,
        Swatch::Blue,
        Swatch::Purple,
        Swatch::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Swatch::Red => "red",
            Swatch::Orange => "orange",
            Swatch::Yellow => "yellow",
            Swatch::Green => "green",
            Swatch::Blue => "blue",
            Swatch::Purple => "purple",
            Swatch::White => "white",
        }
    }

    /// The wheel position this swatch stands for.
    pub fn color(self) -> Color {
        let (hue, lightness) = match self {
            Swatch::Red => (0.0, LIGHTNESS_EDGE),
            Swatch::Orange => (30.0, LIGHTNESS_EDGE),
            Swatch::Yellow => (60.0, LIGHTNESS_EDGE),
            Swatch::Green => (120.0, LIGHTNESS_EDGE),
            Swatch::Blue => (240.0, LIGHTNESS_EDGE),
            Swatch::Purple => (270.0, LIGHTNESS_EDGE),
            // Hue is irrelevant at the center; keep it on red.
            Swatch::White => (0.0, LIGHTNESS_CENTER),
        };
        Color { hue, lightness }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Swatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Swatch::ALL
            .into_iter()
            .find(|swatch| swatch.name() == wanted)
            .ok_or(Error::UnknownSwatch { name: s.to_string() })
    }
}
