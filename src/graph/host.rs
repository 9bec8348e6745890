use crate::{
    dsp::{AutomationEvent, Waveform},
    error::Result,
    graph::node::{NodeId, NodeSpec, Param, Sink},
};

/// The primitives the voice engine needs from whatever actually renders audio.
///
/// The engine only ever creates nodes, wires them, writes parameter
/// timelines and schedules start/stop/dispose. It never reads audio back, so
/// a host is free to run the graph on another thread, offline, or not at all.
/// All calls return immediately; time is expressed as absolute host seconds.
pub trait AudioHost {
    /// Current host clock in seconds.
    fn current_time(&self) -> f64;

    /// Surface fatal environment problems (no device, dead stream).
    fn check(&self) -> Result<()> {
        Ok(())
    }

    fn create(&mut self, spec: NodeSpec) -> NodeId;

    fn connect(&mut self, from: NodeId, to: Sink);

    fn schedule(&mut self, node: NodeId, param: Param, event: AutomationEvent);

    /// Forget timeline events that cannot affect `param` at or after `before`.
    fn prune(&mut self, node: NodeId, param: Param, before: f64);

    fn start(&mut self, node: NodeId, at: f64);

    fn stop(&mut self, node: NodeId, at: f64);

    /// Drop `node` and every upstream node that only feeds into it.
    fn dispose(&mut self, node: NodeId);

    fn create_oscillator(&mut self, waveform: Waveform) -> NodeId {
        self.create(NodeSpec::Oscillator(waveform))
    }

    fn create_gain(&mut self) -> NodeId {
        self.create(NodeSpec::Gain)
    }

    fn set_value_at_time(&mut self, node: NodeId, param: Param, value: f32, time: f64) {
        self.schedule(node, param, AutomationEvent::SetValue { value, time });
    }

    fn linear_ramp_to_value_at_time(&mut self, node: NodeId, param: Param, value: f32, time: f64) {
        self.schedule(node, param, AutomationEvent::LinearRamp { value, time });
    }

    fn exponential_ramp_to_value_at_time(
        &mut self,
        node: NodeId,
        param: Param,
        value: f32,
        time: f64,
    ) {
        self.schedule(node, param, AutomationEvent::ExponentialRamp { value, time });
    }
}

/// Monotonic id source shared by the host implementations.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ids = NodeIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }
}
