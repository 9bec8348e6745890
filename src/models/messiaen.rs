//! Messiaen model: layered, luminous, harmony-derived.
//!
//! Integer ratios keep every partial harmonic, so the result sounds like
//! stacked stained glass rather than noise.
//!
//! # How It Works
//!
//! 1. Hue picks the carrier pitch: a warm curve that peaks at yellow (A4)
//!    and bottoms out at blue (G3)
//! 2. Three sine modulators in series, ratios 2 → 2|3 → 4|5 depending on
//!    which half of the wheel the hue sits in
//! 3. Vivid colors (edge) get deep modulation, short attack and a long
//!    sustain; toward white everything softens and lengthens
//! 4. A sine sub an octave below adds body, fading as the color whitens

use crate::{
    color::Color,
    interp::{lerp, lerp_anchors, Anchor},
    params::{Envelope, Operator, SubOscillator, SynthParams, Waveform},
};

const CARRIER: [Anchor; 7] = [
    Anchor::new(0.0, 220.0),   // red: A3
    Anchor::new(30.0, 277.0),  // orange: C#4
    Anchor::new(60.0, 440.0),  // yellow: A4, the bright peak
    Anchor::new(120.0, 330.0), // green: E4
    Anchor::new(240.0, 196.0), // blue: G3, the deep trough
    Anchor::new(270.0, 262.0), // purple: C4
    Anchor::new(330.0, 220.0), // back toward red
];

/// Map a color to a Messiaen voice.
pub fn messiaen(color: Color) -> SynthParams {
    let hue = color.hue();
    let lt = color.lt();

    let carrier_freq = lerp_anchors(&CARRIER, hue);

    // Cool half of the wheel shifts the upper pair from octaves to fifths
    let (ratio2, ratio3) = if hue > 180.0 { (3.0, 5.0) } else { (2.0, 4.0) };

    let operators = vec![
        Operator::sine(2.0, lerp(4.5, 1.5, lt)).with_index_decay(lerp(0.3, 0.6, lt)),
        Operator::sine(ratio2, lerp(3.0, 1.0, lt)).with_index_decay(lerp(0.4, 0.7, lt)),
        Operator::sine(ratio3, lerp(1.5, 0.3, lt)).with_index_decay(lerp(0.5, 0.8, lt)),
    ];

    SynthParams {
        carrier_freq,
        carrier_waveform: Waveform::Sine,
        operators,
        envelope: Envelope::adsr(
            lerp(0.03, 0.15, lt),
            lerp(0.2, 0.4, lt),
            lerp(0.7, 0.4, lt),
            lerp(0.6, 1.2, lt),
        ),
        duration: lerp(2.0, 3.5, lt),
        sub: Some(SubOscillator {
            freq: Some(carrier_freq / 2.0),
            waveform: Some(Waveform::Sine),
            gain: Some(lerp(0.2, 0.08, lt)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(hue: f32, lightness: f32) -> SynthParams {
        messiaen(Color::new(hue, lightness).unwrap())
    }

    #[test]
    fn red_at_the_edge() {
        let p = map(0.0, 50.0);
        assert_eq!(p.carrier_freq, 220.0);
        assert_eq!(p.carrier_waveform, Waveform::Sine);

        let ratios: Vec<f32> = p.operators.iter().map(|op| op.ratio).collect();
        let indices: Vec<f32> = p.operators.iter().map(|op| op.index).collect();
        assert_eq!(ratios, vec![2.0, 2.0, 4.0]);
        assert_eq!(indices, vec![4.5, 3.0, 1.5]);

        assert_eq!(p.envelope.attack, 0.03);
        assert_eq!(p.duration, 2.0);

        let sub = p.sub.unwrap();
        assert_eq!(sub.gain, Some(0.2));
        assert_eq!(sub.freq, Some(110.0));
    }

    #[test]
    fn white_center() {
        let p = map(0.0, 100.0);
        assert_eq!(p.duration, 3.5);
        assert!((p.envelope.release - 1.2).abs() < 1e-6);
        assert!((p.envelope.sustain - 0.4).abs() < 1e-6);
        assert!((p.sub.unwrap().gain.unwrap() - 0.08).abs() < 1e-6);

        let decays: Vec<f32> = p.operators.iter().map(|op| op.index_decay.unwrap()).collect();
        for (got, want) in decays.iter().zip([0.6, 0.7, 0.8]) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn ratio_pair_switches_after_180() {
        let warm = map(180.0, 60.0);
        assert_eq!(warm.operators[1].ratio, 2.0);
        assert_eq!(warm.operators[2].ratio, 4.0);

        let cool = map(180.5, 60.0);
        assert_eq!(cool.operators[0].ratio, 2.0);
        assert_eq!(cool.operators[1].ratio, 3.0);
        assert_eq!(cool.operators[2].ratio, 5.0);
    }

    #[test]
    fn yellow_peak_and_blue_trough() {
        assert_eq!(map(60.0, 50.0).carrier_freq, 440.0);
        assert_eq!(map(240.0, 50.0).carrier_freq, 196.0);
    }
}
