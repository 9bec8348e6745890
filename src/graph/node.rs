use crate::dsp::Waveform;

/// Handle to a node living in the renderer.
///
/// Ids are handed out by the host on the control thread and are never
/// reused, so a stale id simply refers to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Schedulable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Oscillator frequency in Hz.
    Frequency,
    /// Gain stage level (linear).
    Gain,
}

/// Where a node's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    /// Audio input of another node (gain stages sum their inputs).
    Node(NodeId),
    /// Added to another node's parameter every sample.
    Param(NodeId, Param),
    /// The hardware output.
    Output,
}

/// What to build when a node is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSpec {
    Oscillator(Waveform),
    Gain,
}

/// Unscheduled oscillator frequency.
pub const DEFAULT_FREQUENCY: f32 = 440.0;
/// Unscheduled gain level.
pub const DEFAULT_GAIN: f32 = 1.0;

/// Context passed to the renderer for one block.
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Host time of the block's first sample, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, time: f64) -> Self {
        Self { sample_rate, time }
    }

    /// Host time of sample `n` within the block.
    #[inline]
    pub fn time_of(&self, n: usize) -> f64 {
        self.time + n as f64 / self.sample_rate as f64
    }
}
