use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};
use tracing::warn;

use crate::{
    dsp::AutomationEvent,
    error::{Error, Result},
    graph::{
        command::GraphCommand,
        host::{AudioHost, NodeIds},
        node::{NodeId, NodeSpec, Param, RenderCtx, Sink},
        renderer::{GraphRenderer, DEFAULT_NODE_CAPACITY},
    },
};

pub const DEFAULT_COMMAND_CAPACITY: usize = 1024;

/// Control-thread half of a realtime host.
///
/// Every call becomes a `GraphCommand` pushed onto a lock-free ring; the
/// audio thread drains the ring at the top of each block. The clock is the
/// number of frames the audio thread has rendered so far.
pub struct StreamHost {
    tx: Producer<GraphCommand>,
    ids: NodeIds,
    frames: Arc<AtomicU64>,
    fault: StreamFault,
    sample_rate: f32,
}

/// Audio-thread half: owns the renderer.
pub struct StreamRenderer {
    rx: Consumer<GraphCommand>,
    renderer: GraphRenderer,
    frames: Arc<AtomicU64>,
}

/// Shared flag the device error callback raises when the stream dies.
#[derive(Clone, Default)]
pub struct StreamFault {
    failed: Arc<AtomicBool>,
}

impl StreamFault {
    pub fn raise(&self) {
        self.failed.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }
}

/// Create a connected host/renderer pair.
pub fn stream_pair(sample_rate: f32, capacity: usize) -> (StreamHost, StreamRenderer) {
    let (tx, rx) = RingBuffer::<GraphCommand>::new(capacity);
    let frames = Arc::new(AtomicU64::new(0));

    let host = StreamHost {
        tx,
        ids: NodeIds::default(),
        frames: frames.clone(),
        fault: StreamFault::default(),
        sample_rate,
    };
    let renderer = StreamRenderer {
        rx,
        renderer: GraphRenderer::with_capacity(sample_rate, DEFAULT_NODE_CAPACITY),
        frames,
    };
    (host, renderer)
}

impl StreamHost {
    pub fn fault(&self) -> StreamFault {
        self.fault.clone()
    }

    fn send(&mut self, command: GraphCommand) {
        // Nobody is listening; `check` reports that.
        if self.tx.is_abandoned() {
            return;
        }
        if self.tx.push(command).is_err() {
            warn!(?command, "renderer command queue full, dropping command");
        }
    }
}

impl AudioHost for StreamHost {
    fn current_time(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    fn check(&self) -> Result<()> {
        if self.fault.is_raised() {
            return Err(Error::audio_unavailable("output stream reported an error"));
        }
        if self.tx.is_abandoned() {
            return Err(Error::audio_unavailable("audio thread has shut down"));
        }
        Ok(())
    }

    fn create(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.ids.next_id();
        self.send(GraphCommand::Create { id, spec });
        id
    }

    fn connect(&mut self, from: NodeId, to: Sink) {
        self.send(GraphCommand::Connect { from, to });
    }

    fn schedule(&mut self, node: NodeId, param: Param, event: AutomationEvent) {
        self.send(GraphCommand::Schedule { node, param, event });
    }

    fn prune(&mut self, node: NodeId, param: Param, before: f64) {
        self.send(GraphCommand::Prune { node, param, before });
    }

    fn start(&mut self, node: NodeId, at: f64) {
        self.send(GraphCommand::Start { node, at });
    }

    fn stop(&mut self, node: NodeId, at: f64) {
        self.send(GraphCommand::Stop { node, at });
    }

    fn dispose(&mut self, node: NodeId) {
        self.send(GraphCommand::Dispose { node });
    }
}

impl StreamRenderer {
    /// Apply pending commands, then render one block.
    pub fn render(&mut self, out: &mut [f32]) {
        while let Ok(command) = self.rx.pop() {
            self.renderer.apply(command);
        }

        let frames = self.frames.load(Ordering::Relaxed);
        let sample_rate = self.renderer.sample_rate();
        let ctx = RenderCtx::new(sample_rate, frames as f64 / sample_rate as f64);
        self.renderer.render(out, &ctx);

        self.frames
            .store(frames + out.len() as u64, Ordering::Release);
    }
}
