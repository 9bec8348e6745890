//! The voice description handed from a color model to the engine.
//!
//! A `SynthParams` value is everything the engine needs to build one voice:
//!
//! ```text
//!   operators[0] → operators[1] → … → operators[n-1] → carrier → envelope → bus
//!                                                         sub → sub envelope → bus
//! ```
//!
//! Values are plain data and never change after a model produces them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::dsp::oscillator::Waveform;

/// Gain of the sub layer when the model leaves it unset.
pub const DEFAULT_SUB_GAIN: f32 = 0.2;

/// One modulator in the serial FM chain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operator {
    /// Modulator frequency as a multiple of the carrier frequency.
    pub ratio: f32,
    /// Modulation depth as a multiple of the modulator frequency.
    pub index: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub waveform: Waveform,
    /// Fraction of the initial depth left at 70% of the voice duration.
    /// `None` keeps the depth constant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub index_decay: Option<f32>,
}

impl Operator {
    /// A sine modulator with constant depth.
    pub fn sine(ratio: f32, index: f32) -> Self {
        Self {
            ratio,
            index,
            waveform: Waveform::Sine,
            index_decay: None,
        }
    }

    pub fn with_index_decay(mut self, remaining: f32) -> Self {
        self.index_decay = Some(remaining);
        self
    }

    /// Modulator frequency in Hz for a given carrier.
    #[inline]
    pub fn frequency(&self, carrier_freq: f32) -> f32 {
        carrier_freq * self.ratio
    }

    /// Peak frequency deviation in Hz for a given carrier.
    #[inline]
    pub fn depth(&self, carrier_freq: f32) -> f32 {
        self.frequency(carrier_freq) * self.index
    }
}

/// Attack/decay/sustain/release shape, times in seconds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

/// Optional second layer, independent of the modulator chain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubOscillator {
    /// Defaults to half the carrier frequency.
    pub freq: Option<f32>,
    /// Defaults to sine.
    pub waveform: Option<Waveform>,
    /// Defaults to [`DEFAULT_SUB_GAIN`].
    pub gain: Option<f32>,
}

impl SubOscillator {
    pub fn frequency(&self, carrier_freq: f32) -> f32 {
        self.freq.unwrap_or(carrier_freq / 2.0)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform.unwrap_or_default()
    }

    pub fn gain(&self) -> f32 {
        self.gain.unwrap_or(DEFAULT_SUB_GAIN)
    }
}

/// Complete description of one voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthParams {
    pub carrier_freq: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub carrier_waveform: Waveform,
    /// Serial chain, first entry furthest from the carrier.
    pub operators: Vec<Operator>,
    pub envelope: Envelope,
    /// Total voice lifetime in seconds.
    pub duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub: Option<SubOscillator>,
}
