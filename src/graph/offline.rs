use std::path::Path;

use crate::{
    dsp::AutomationEvent,
    error::Result,
    graph::{
        command::GraphCommand,
        host::{AudioHost, NodeIds},
        node::{NodeId, NodeSpec, Param, RenderCtx, Sink},
        renderer::GraphRenderer,
    },
    MAX_BLOCK_SIZE,
};

/// Deterministic host: commands apply immediately and the clock only moves
/// when audio is rendered.
///
/// Tests drive it like a simulated audio thread: schedule through the
/// engine, `render` some seconds, `poll` the engine, repeat. The renderer is
/// exposed read-only so the scheduled graph can be inspected.
pub struct OfflineHost {
    renderer: GraphRenderer,
    ids: NodeIds,
    frames: u64,
}

impl OfflineHost {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            renderer: GraphRenderer::new(sample_rate),
            ids: NodeIds::default(),
            frames: 0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.renderer.sample_rate()
    }

    pub fn renderer(&self) -> &GraphRenderer {
        &self.renderer
    }

    /// Render `seconds` of output, advancing the clock.
    pub fn render(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds * self.sample_rate() as f64).round().max(0.0) as usize;
        let mut out = vec![0.0f32; frames];
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
        out
    }

    /// Render exactly `out.len()` frames, advancing the clock.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let ctx = RenderCtx::new(self.sample_rate(), self.current_time());
        self.renderer.render(out, &ctx);
        self.frames += out.len() as u64;
    }

    fn apply(&mut self, command: GraphCommand) {
        self.renderer.apply(command);
    }
}

impl AudioHost for OfflineHost {
    fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate() as f64
    }

    fn create(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.ids.next_id();
        self.apply(GraphCommand::Create { id, spec });
        id
    }

    fn connect(&mut self, from: NodeId, to: Sink) {
        self.apply(GraphCommand::Connect { from, to });
    }

    fn schedule(&mut self, node: NodeId, param: Param, event: AutomationEvent) {
        self.apply(GraphCommand::Schedule { node, param, event });
    }

    fn prune(&mut self, node: NodeId, param: Param, before: f64) {
        self.apply(GraphCommand::Prune { node, param, before });
    }

    fn start(&mut self, node: NodeId, at: f64) {
        self.apply(GraphCommand::Start { node, at });
    }

    fn stop(&mut self, node: NodeId, at: f64) {
        self.apply(GraphCommand::Stop { node, at });
    }

    fn dispose(&mut self, node: NodeId) {
        self.apply(GraphCommand::Dispose { node });
    }
}

/// Write mono samples as a 32-bit float WAV.
pub fn write_wav(path: impl AsRef<Path>, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
