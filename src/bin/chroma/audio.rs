//! Realtime playback through the default output device.

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use chroma_fm::{
    graph::{stream::DEFAULT_COMMAND_CAPACITY, stream_pair, AudioHost, StreamRenderer},
    SynthParams, VoiceEngine, MAX_BLOCK_SIZE,
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Play one voice and return once the engine has disposed it.
pub fn play(params: &SynthParams) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!(sample_rate, channels, "output device ready");

    let (stream_host, mut renderer) = stream_pair(sample_rate, DEFAULT_COMMAND_CAPACITY);
    let fault = stream_host.fault();

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| write_frames(&mut renderer, &mut render_buf, data, channels),
        move |err| {
            error!(%err, "output stream error");
            fault.raise();
        },
        None,
    )?;
    stream.play()?;

    let mut engine = VoiceEngine::new(stream_host);
    engine.init()?;
    engine.play(params)?;

    while engine.active_voices() > 0 {
        thread::sleep(POLL_INTERVAL);
        engine.host().check()?;
        engine.poll();
    }

    engine.shutdown();
    Ok(())
}

/// Fill an interleaved device buffer, mono to all channels.
fn write_frames(
    renderer: &mut StreamRenderer,
    render_buf: &mut [f32],
    data: &mut [f32],
    channels: usize,
) {
    let total_frames = data.len() / channels;
    let mut frames_written = 0;

    while frames_written < total_frames {
        let frames_to_render = (total_frames - frames_written).min(render_buf.len());
        let block = &mut render_buf[..frames_to_render];
        renderer.render(block);

        let out_off = frames_written * channels;
        for (i, &s) in block.iter().enumerate() {
            for ch in 0..channels {
                data[out_off + i * channels + ch] = s;
            }
        }

        frames_written += frames_to_render;
    }
}
