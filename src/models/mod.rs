//! Color-to-voice mapping models.
//!
//! A model is a personality: the same color yields entirely different sounds
//! depending on which model maps it. Every model is a pure function of the
//! color, so the same (hue, lightness) always gives the same `SynthParams`.
//!
//! # Example
//!
//! ```
//! use chroma_fm::models::ModelKey;
//!
//! let model = ModelKey::Kandinsky.model();
//! let params = model.map_color(60.0, 50.0).unwrap();
//! assert_eq!(params.carrier_freq, 880.0);
//! ```
//!
//! Adding a model means adding one more mapping function here and one more
//! registry entry.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    error::{Error, Result},
    params::SynthParams,
};

mod kandinsky;
mod messiaen;

pub use kandinsky::kandinsky;
pub use messiaen::messiaen;

/// A named mapping from color to voice.
#[derive(Debug)]
pub struct Model {
    pub key: ModelKey,
    pub name: &'static str,
    pub description: &'static str,
    map: fn(Color) -> SynthParams,
}

impl Model {
    /// Map an already validated color.
    pub fn map(&self, color: Color) -> SynthParams {
        (self.map)(color)
    }

    /// Validate `(hue, lightness)` and map it.
    ///
    /// Out-of-range input is rejected, never clamped.
    pub fn map_color(&self, hue: f32, lightness: f32) -> Result<SynthParams> {
        Color::new(hue, lightness).map(|color| self.map(color))
    }
}

pub static MESSIAEN: Model = Model {
    key: ModelKey::Messiaen,
    name: "Messiaen",
    description: "layered, luminous, harmony-derived",
    map: messiaen,
};

pub static KANDINSKY: Model = Model {
    key: ModelKey::Kandinsky,
    name: "Kandinsky",
    description: "direction, sharpness, space",
    map: kandinsky,
};

/// Registry key for a model.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelKey {
    #[default]
    Messiaen,
    Kandinsky,
}

impl ModelKey {
    pub const ALL: [ModelKey; 2] = [ModelKey::Messiaen, ModelKey::Kandinsky];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKey::Messiaen => "messiaen",
            ModelKey::Kandinsky => "kandinsky",
        }
    }

    pub fn model(self) -> &'static Model {
        match self {
            ModelKey::Messiaen => &MESSIAEN,
            ModelKey::Kandinsky => &KANDINSKY,
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ModelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or(Error::UnknownModel { key: s.to_string() })
    }
}
