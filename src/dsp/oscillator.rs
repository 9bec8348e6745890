#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulating Oscillator
=============================

The oscillator keeps a phase in [0, 1) and advances it by `frequency /
sample_rate` every sample. The waveform is a pure function of the phase:

  Sine:      sin(2π·phase)
  Triangle:  4·|phase − 0.5| − 1     (starts at +1, dips to −1 halfway)
  Sawtooth:  2·phase − 1             (ramps −1 → +1)
  Square:    +1 for phase < 0.5, −1 after

Frequency is passed per sample rather than stored. That is what makes FM
work: the caller adds the modulator's output to the base frequency before
every step, so the carrier's pitch wobbles at audio rate. Under deep
modulation the instantaneous frequency can go negative; the phase then runs
backwards, which `rem_euclid` keeps inside [0, 1).
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Sample the waveform at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample at `frequency` Hz, then advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase = (self.phase + frequency / sample_rate).rem_euclid(1.0);
        out
    }

    /// Fill `destination` at a constant frequency.
    pub fn render(&mut self, destination: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in destination.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
