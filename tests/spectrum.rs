//! Spectral checks on rendered voices.

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use chroma_fm::{graph::OfflineHost, Envelope, Operator, SynthParams, VoiceEngine, Waveform};

const SAMPLE_RATE: f32 = 8_000.0;
const FFT_LEN: usize = 4096;

/// Magnitude spectrum of a Hann-windowed slice taken from the sustain.
fn spectrum(params: &SynthParams) -> Vec<f32> {
    let mut engine = VoiceEngine::new(OfflineHost::new(SAMPLE_RATE));
    engine.play(params).unwrap();
    let audio = engine.host_mut().render(params.duration as f64);

    let start = (0.25 * SAMPLE_RATE) as usize;
    let mut buffer: Vec<Complex<f32>> = audio[start..start + FFT_LEN]
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5
                * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (FFT_LEN - 1) as f32).cos());
            Complex::new(s * w, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(FFT_LEN).process(&mut buffer);

    buffer[..FFT_LEN / 2].iter().map(|c| c.norm()).collect()
}

fn bin(freq: f32) -> usize {
    (freq * FFT_LEN as f32 / SAMPLE_RATE).round() as usize
}

/// Strongest magnitude within one bin of `freq`.
fn level_at(spectrum: &[f32], freq: f32) -> f32 {
    let b = bin(freq);
    spectrum[b - 1..=b + 1].iter().copied().fold(0.0, f32::max)
}

fn peak_bin(spectrum: &[f32]) -> usize {
    spectrum
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap()
}

fn tone(operators: Vec<Operator>) -> SynthParams {
    SynthParams {
        carrier_freq: 1_000.0,
        carrier_waveform: Waveform::Sine,
        operators,
        envelope: Envelope::adsr(0.01, 0.01, 1.0, 0.01),
        duration: 1.0,
        sub: None,
    }
}

#[test]
fn plain_carrier_peaks_at_its_frequency() {
    let spectrum = spectrum(&tone(Vec::new()));

    let peak = peak_bin(&spectrum);
    assert!(peak.abs_diff(bin(1_000.0)) <= 1, "peak at bin {peak}");

    let max = spectrum[peak];
    assert!(level_at(&spectrum, 1_250.0) < 0.01 * max);
    assert!(level_at(&spectrum, 750.0) < 0.01 * max);
}

#[test]
fn modulator_adds_sidebands() {
    // β = 1 at a quarter of the carrier: J1(1) ≈ 0.44 against J0(1) ≈ 0.77
    let spectrum = spectrum(&tone(vec![Operator::sine(0.25, 1.0)]));

    let peak = peak_bin(&spectrum);
    assert!(peak.abs_diff(bin(1_000.0)) <= 1, "peak at bin {peak}");

    let max = spectrum[peak];
    for sideband in [750.0, 1_250.0] {
        let level = level_at(&spectrum, sideband);
        assert!(level > 0.3 * max, "{sideband} Hz: {level} vs {max}");
    }
}
