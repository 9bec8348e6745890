use chroma_fm::{interp::lerp_anchors, Color, Error, ModelKey, Swatch, SynthParams, Waveform};

const EPS: f32 = 1e-4;

fn map(key: ModelKey, hue: f32, lightness: f32) -> SynthParams {
    key.model().map_color(hue, lightness).unwrap()
}

fn hue_grid() -> impl Iterator<Item = f32> {
    (0..720).map(|i| i as f32 * 0.5)
}

#[test]
fn mapping_is_deterministic() {
    for key in ModelKey::ALL {
        for hue in hue_grid().step_by(7) {
            for lightness in [50.0, 62.5, 75.0, 99.9, 100.0] {
                assert_eq!(
                    map(key, hue, lightness),
                    map(key, hue, lightness),
                    "{key} at ({hue}, {lightness})"
                );
            }
        }
    }
}

#[test]
fn every_color_yields_a_playable_voice() {
    for key in ModelKey::ALL {
        for hue in hue_grid() {
            for lightness in [50.0, 75.0, 100.0] {
                let p = map(key, hue, lightness);
                assert!(p.carrier_freq > 0.0, "{key} hue {hue}");
                assert!(p.duration > 0.0);
                assert!((0.0..=1.0).contains(&p.envelope.sustain));
                assert!(p.envelope.attack >= 0.0 && p.envelope.release >= 0.0);
                assert!(p.envelope.attack + p.envelope.release <= p.duration);
                for op in &p.operators {
                    assert!(op.ratio > 0.0 && op.index >= 0.0);
                    let decay = op.index_decay.unwrap();
                    assert!((0.0..=1.0).contains(&decay));
                }
            }
        }
    }
}

#[test]
fn messiaen_red_edge() {
    let p = map(ModelKey::Messiaen, 0.0, 50.0);

    assert_eq!(p.carrier_freq, 220.0);
    let ratios: Vec<f32> = p.operators.iter().map(|op| op.ratio).collect();
    let indices: Vec<f32> = p.operators.iter().map(|op| op.index).collect();
    assert_eq!(ratios, vec![2.0, 2.0, 4.0]);
    assert_eq!(indices, vec![4.5, 3.0, 1.5]);
    assert_eq!(p.envelope.attack, 0.03);
    assert_eq!(p.duration, 2.0);
    assert_eq!(p.sub.unwrap().gain(), 0.2);
}

#[test]
fn kandinsky_yellow_edge() {
    let p = map(ModelKey::Kandinsky, 60.0, 50.0);

    assert_eq!(p.carrier_freq, 880.0);
    assert_eq!(p.carrier_waveform, Waveform::Sawtooth);
    assert!((p.operators[1].ratio - 3.677).abs() < 1e-3);
    assert_eq!(p.operators[0].index, 8.0);
    assert_eq!(p.duration, 1.0);
    assert!(p.sub.is_none());
}

#[test]
fn messiaen_softens_toward_white() {
    for hue in [0.0, 45.0, 200.0, 300.0] {
        let mut prev = map(ModelKey::Messiaen, hue, 50.0);
        for step in 1..=50 {
            let next = map(ModelKey::Messiaen, hue, 50.0 + step as f32);
            for (a, b) in prev.operators.iter().zip(&next.operators) {
                assert!(b.index < a.index, "index at hue {hue}, step {step}");
            }
            assert!(next.envelope.sustain < prev.envelope.sustain);
            prev = next;
        }
    }
}

#[test]
fn kandinsky_attack_blunts_toward_white() {
    for hue in [10.0, 150.0, 250.0] {
        let mut prev = map(ModelKey::Kandinsky, hue, 50.0).envelope.attack;
        for step in 1..=50 {
            let attack = map(ModelKey::Kandinsky, hue, 50.0 + step as f32)
                .envelope
                .attack;
            assert!(attack > prev, "hue {hue}, step {step}");
            prev = attack;
        }
    }
}

#[test]
fn kandinsky_region_boundaries() {
    let wave = |hue| map(ModelKey::Kandinsky, hue, 50.0).carrier_waveform;
    assert_eq!(wave(89.999), Waveform::Sawtooth);
    assert_eq!(wave(90.0), Waveform::Triangle);
    assert_eq!(wave(179.999), Waveform::Triangle);
    assert_eq!(wave(180.0), Waveform::Sine);
    assert_eq!(wave(300.0), Waveform::Sine);
    assert_eq!(wave(300.001), Waveform::Sawtooth);

    let ratio1 = |hue| map(ModelKey::Kandinsky, hue, 50.0).operators[0].ratio;
    assert_ne!(ratio1(240.0), 1.414);
    assert_eq!(ratio1(240.001), 1.414);
    assert_eq!(ratio1(299.999), 1.414);
    assert_ne!(ratio1(300.0), 1.414);
}

#[test]
fn carrier_is_continuous_across_the_wrap() {
    for key in ModelKey::ALL {
        let at_zero = map(key, 0.0, 50.0).carrier_freq;
        let near_full = map(key, 359.999, 50.0).carrier_freq;
        assert!(
            (at_zero - near_full).abs() < 0.01,
            "{key}: {at_zero} vs {near_full}"
        );
    }
}

#[test]
fn carrier_peaks_and_troughs() {
    let messiaen = |hue| map(ModelKey::Messiaen, hue, 75.0).carrier_freq;
    assert!(hue_grid().all(|h| messiaen(h) <= messiaen(60.0) + EPS));
    assert!(hue_grid().all(|h| messiaen(h) >= messiaen(240.0) - EPS));

    let kandinsky = |hue| map(ModelKey::Kandinsky, hue, 75.0).carrier_freq;
    assert_eq!(kandinsky(60.0), 880.0);
    assert_eq!(kandinsky(240.0), 82.0);
}

#[test]
fn anchors_wrap_without_zero_anchor() {
    use chroma_fm::interp::Anchor;

    let anchors = [Anchor::new(90.0, 100.0), Anchor::new(270.0, 300.0)];
    // 270 → 450 segment covers the wrap: hue 0 is its midpoint.
    assert!((lerp_anchors(&anchors, 0.0) - 200.0).abs() < EPS);
    assert!((lerp_anchors(&anchors, 180.0) - 200.0).abs() < EPS);
}

#[test]
fn out_of_domain_colors_fail_fast() {
    let model = ModelKey::Messiaen.model();
    assert!(matches!(
        model.map_color(360.0, 60.0),
        Err(Error::HueOutOfRange { .. })
    ));
    assert!(matches!(
        model.map_color(-1.0, 60.0),
        Err(Error::HueOutOfRange { .. })
    ));
    assert!(matches!(
        model.map_color(10.0, 49.0),
        Err(Error::LightnessOutOfRange { .. })
    ));
    assert!(matches!(
        model.map_color(10.0, f32::NAN),
        Err(Error::LightnessOutOfRange { .. })
    ));
}

#[test]
fn swatches_and_keys_parse() {
    let blue: Swatch = " Blue ".parse().unwrap();
    assert_eq!(blue.color(), Color::new(240.0, 50.0).unwrap());
    assert!("mauve".parse::<Swatch>().is_err());

    for key in ModelKey::ALL {
        assert_eq!(key.to_string().parse::<ModelKey>().unwrap(), key);
    }
    assert!(matches!(
        "scriabin".parse::<ModelKey>(),
        Err(Error::UnknownModel { .. })
    ));
}
