//! Color to FM sound.
//!
//! A (hue, lightness) sample goes through a color model to become a
//! [`SynthParams`] voice description; the [`VoiceEngine`] turns that into a
//! scheduled graph on an [`AudioHost`](graph::AudioHost).
//!
//! ```
//! use chroma_fm::{graph::OfflineHost, models::ModelKey, VoiceEngine};
//!
//! let params = ModelKey::Messiaen.model().map_color(60.0, 50.0).unwrap();
//!
//! let mut engine = VoiceEngine::new(OfflineHost::new(8_000.0));
//! engine.play(&params).unwrap();
//! let audio = engine.host_mut().render(0.5);
//! assert!(audio.iter().any(|s| s.abs() > 0.0));
//! ```

pub mod color;
pub mod dsp;
pub mod engine; // Voice construction, scheduling, cleanup
pub mod error;
pub mod graph; // Host boundary and renderers
pub mod interp;
pub mod models; // Color → SynthParams
pub mod params;

pub use color::{Color, Swatch};
pub use engine::{voice::VoiceId, EngineConfig, VoiceEngine};
pub use error::{Error, Result};
pub use models::{Model, ModelKey};
pub use params::{Envelope, Operator, SubOscillator, SynthParams, Waveform};

pub const MAX_BLOCK_SIZE: usize = 2048;
