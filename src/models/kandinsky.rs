//! Kandinsky model: direction, sharpness, space.
//!
//! Bold non-integer ratios give piercing, geometric tones. Yellow shoots up
//! to A5, blue sinks to E2.
//!
//! # How It Works
//!
//! 1. Hue picks the carrier pitch over a wide range, and also its waveform:
//!    sawtooth for warm colors, triangle for greens, sine for cool colors
//! 2. Two sine modulators with ratios kept off the integers, so partials
//!    never line up into a harmonic series
//! 3. Between 240° and 300° the first ratio snaps to √2, a tritone-like
//!    interval
//! 4. Lightness blunts everything: vivid colors strike hard and die fast,
//!    white swells slowly and rings long
//!
//! There is no sub layer.

use crate::{
    color::Color,
    interp::{lerp, lerp_anchors, Anchor},
    params::{Envelope, Operator, SynthParams, Waveform},
};

const CARRIER: [Anchor; 7] = [
    Anchor::new(0.0, 330.0),   // red
    Anchor::new(30.0, 392.0),  // orange
    Anchor::new(60.0, 880.0),  // yellow: piercing high
    Anchor::new(120.0, 262.0), // green
    Anchor::new(240.0, 82.0),  // blue: deep low
    Anchor::new(270.0, 311.0), // purple
    Anchor::new(330.0, 330.0), // back to red
];

const TRITONE_RATIO: f32 = 1.414;

fn carrier_waveform(hue: f32) -> Waveform {
    if hue < 90.0 || hue > 300.0 {
        Waveform::Sawtooth
    } else if hue < 180.0 {
        Waveform::Triangle
    } else {
        Waveform::Sine
    }
}

/// Map a color to a Kandinsky voice.
pub fn kandinsky(color: Color) -> SynthParams {
    let hue = color.hue();
    let lt = color.lt();
    let turn = hue / 360.0;

    let ratio1 = if hue > 240.0 && hue < 300.0 {
        TRITONE_RATIO
    } else {
        lerp(1.5, 3.0, turn)
    };
    // .01 offset keeps the ratio off the integers
    let ratio2 = lerp(3.01, 7.01, turn);

    let operators = vec![
        Operator::sine(ratio1, lerp(8.0, 2.0, lt)).with_index_decay(lerp(0.15, 0.5, lt)),
        Operator::sine(ratio2, lerp(5.0, 1.0, lt)).with_index_decay(lerp(0.2, 0.6, lt)),
    ];

    SynthParams {
        carrier_freq: lerp_anchors(&CARRIER, hue),
        carrier_waveform: carrier_waveform(hue),
        operators,
        envelope: Envelope::adsr(
            lerp(0.005, 0.2, lt),
            lerp(0.08, 0.5, lt),
            lerp(0.3, 0.7, lt),
            lerp(0.2, 1.5, lt),
        ),
        duration: lerp(1.0, 4.0, lt),
        sub: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(hue: f32, lightness: f32) -> SynthParams {
        kandinsky(Color::new(hue, lightness).unwrap())
    }

    #[test]
    fn yellow_at_the_edge() {
        let p = map(60.0, 50.0);
        assert_eq!(p.carrier_freq, 880.0);
        assert_eq!(p.carrier_waveform, Waveform::Sawtooth);
        assert!((p.operators[1].ratio - 3.6767).abs() < 1e-3);
        assert_eq!(p.operators[0].index, 8.0);
        assert_eq!(p.duration, 1.0);
        assert!(p.sub.is_none());
    }

    #[test]
    fn waveform_regions() {
        assert_eq!(carrier_waveform(0.0), Waveform::Sawtooth);
        assert_eq!(carrier_waveform(89.999), Waveform::Sawtooth);
        assert_eq!(carrier_waveform(90.0), Waveform::Triangle);
        assert_eq!(carrier_waveform(179.999), Waveform::Triangle);
        assert_eq!(carrier_waveform(180.0), Waveform::Sine);
        assert_eq!(carrier_waveform(300.0), Waveform::Sine);
        assert_eq!(carrier_waveform(300.001), Waveform::Sawtooth);
    }

    #[test]
    fn tritone_only_inside_open_interval() {
        assert_ne!(map(240.0, 50.0).operators[0].ratio, TRITONE_RATIO);
        assert_eq!(map(240.001, 50.0).operators[0].ratio, TRITONE_RATIO);
        assert_eq!(map(299.999, 50.0).operators[0].ratio, TRITONE_RATIO);
        assert_ne!(map(300.0, 50.0).operators[0].ratio, TRITONE_RATIO);
    }

    #[test]
    fn ratios_stay_off_integers() {
        let mut hue = 0.0f32;
        while hue < 360.0 {
            let r2 = map(hue, 75.0).operators[1].ratio;
            assert!((r2 - r2.round()).abs() > 1e-3, "hue {hue}: ratio2 {r2}");
            hue += 7.5;
        }
    }

    #[test]
    fn blue_is_deep() {
        let p = map(240.0, 50.0);
        assert_eq!(p.carrier_freq, 82.0);
        assert_eq!(p.carrier_waveform, Waveform::Sine);
    }
}
