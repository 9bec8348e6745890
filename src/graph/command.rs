use crate::{
    dsp::AutomationEvent,
    graph::node::{NodeId, NodeSpec, Param, Sink},
};

/// One instruction for the renderer.
///
/// Hosts translate every `AudioHost` call into one of these. The offline
/// host applies them immediately; the stream host ships them over a ring
/// buffer to the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphCommand {
    Create { id: NodeId, spec: NodeSpec },
    Connect { from: NodeId, to: Sink },
    Schedule { node: NodeId, param: Param, event: AutomationEvent },
    Prune { node: NodeId, param: Param, before: f64 },
    Start { node: NodeId, at: f64 },
    Stop { node: NodeId, at: f64 },
    Dispose { node: NodeId },
}
