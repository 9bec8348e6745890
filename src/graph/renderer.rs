use std::ops::Range;

use crate::{
    dsp::{OscillatorBlock, ParamTimeline, Waveform},
    graph::{
        command::GraphCommand,
        node::{NodeId, NodeSpec, Param, RenderCtx, Sink, DEFAULT_FREQUENCY, DEFAULT_GAIN},
    },
};

/*
Graph Renderer
==============

The renderer owns every live node and turns their scheduled timelines into
samples. It is the piece that "actually runs oscillators and gain stages":
the engine never touches it directly, only through host commands.

Evaluation is per sample. Nodes are kept in topological order (inputs before
the nodes they feed), so one pass over the list computes the whole graph:

    operators[0] ──► operators[0] depth ──► operators[1].frequency
    operators[1] ──► operators[1] depth ──► carrier.frequency
    carrier ──► voice gain ──► master gain ──► Output

  Oscillator:  out = wave(phase); phase += (frequency(t) + Σ param inputs) / sr
               silent (and frozen) outside [start, stop)
  Gain:        out = Σ audio inputs × (gain(t) + Σ param inputs)

Sending the same node to several places is fine: each node is evaluated
exactly once per sample and its output read by every consumer. A cycle
would read the previous sample's value, which the engine never builds.

Memory
------
Graph changes happen on the audio thread, so nothing here is dropped or
freshly allocated once the renderer has reached its working size:

  create    pops a node from the spare pool and resets it
  dispose   pushes the node back onto the pool
  rebuild   refills flat index buffers that keep their capacity

`with_capacity` sizes all of it up front.
*/

/// Nodes a realtime renderer is sized for before it has to grow.
pub const DEFAULT_NODE_CAPACITY: usize = 256;

/// Events a fresh parameter timeline holds before it reallocates.
const TIMELINE_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Oscillator,
    Gain,
}

struct Node {
    id: NodeId,
    kind: NodeKind,
    osc: OscillatorBlock,
    /// Frequency for an oscillator, level for a gain stage.
    values: ParamTimeline,
    start: Option<f64>,
    stop: Option<f64>,
    disposed: bool,
    rank: usize,
}

impl Node {
    fn spare() -> Self {
        Self {
            id: NodeId(u64::MAX),
            kind: NodeKind::Gain,
            osc: OscillatorBlock::new(Waveform::Sine),
            values: ParamTimeline::with_capacity(DEFAULT_GAIN, TIMELINE_CAPACITY),
            start: None,
            stop: None,
            disposed: false,
            rank: 0,
        }
    }

    fn reset(&mut self, id: NodeId, spec: NodeSpec) {
        self.id = id;
        self.start = None;
        self.stop = None;
        self.disposed = false;
        match spec {
            NodeSpec::Oscillator(waveform) => {
                self.kind = NodeKind::Oscillator;
                self.osc = OscillatorBlock::new(waveform);
                self.values.reset(DEFAULT_FREQUENCY);
            }
            NodeSpec::Gain => {
                self.kind = NodeKind::Gain;
                self.values.reset(DEFAULT_GAIN);
            }
        }
    }

    fn param(&self) -> Param {
        match self.kind {
            NodeKind::Oscillator => Param::Frequency,
            NodeKind::Gain => Param::Gain,
        }
    }

    fn timeline(&self, param: Param) -> Option<&ParamTimeline> {
        (self.param() == param).then_some(&self.values)
    }

    fn timeline_mut(&mut self, param: Param) -> Option<&mut ParamTimeline> {
        if self.param() == param {
            Some(&mut self.values)
        } else {
            None
        }
    }
}

/// Inputs of one node, as ranges into the renderer's flat edge lists.
struct Step {
    audio: Range<usize>,
    modulation: Range<usize>,
}

pub struct GraphRenderer {
    sample_rate: f32,
    nodes: Vec<Node>,
    spare: Vec<Node>,
    connections: Vec<(NodeId, Sink)>,
    plan: Vec<Step>,
    audio_edges: Vec<usize>,
    modulation_edges: Vec<usize>,
    outputs: Vec<f32>,
    taps: Vec<usize>,
    // rebuild scratch
    edges: Vec<(usize, usize)>,
    visited: Vec<bool>,
    order: Vec<usize>,
    dirty: bool,
}

impl GraphRenderer {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_capacity(sample_rate, 0)
    }

    /// Renderer that can hold `nodes` live nodes without allocating.
    pub fn with_capacity(sample_rate: f32, nodes: usize) -> Self {
        let connections = nodes * 2;
        Self {
            sample_rate,
            nodes: Vec::with_capacity(nodes),
            spare: (0..nodes).map(|_| Node::spare()).collect(),
            connections: Vec::with_capacity(connections),
            plan: Vec::with_capacity(nodes),
            audio_edges: Vec::with_capacity(connections),
            modulation_edges: Vec::with_capacity(connections),
            outputs: Vec::with_capacity(nodes),
            taps: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(connections),
            visited: Vec::with_capacity(nodes),
            order: Vec::with_capacity(nodes),
            dirty: false,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn apply(&mut self, command: GraphCommand) {
        match command {
            GraphCommand::Create { id, spec } => {
                let mut node = self.spare.pop().unwrap_or_else(Node::spare);
                node.reset(id, spec);
                self.nodes.push(node);
                self.dirty = true;
            }
            GraphCommand::Connect { from, to } => {
                if !self.connections.contains(&(from, to)) {
                    self.connections.push((from, to));
                    self.dirty = true;
                }
            }
            GraphCommand::Schedule { node, param, event } => {
                if let Some(timeline) = self.node_mut(node).and_then(|n| n.timeline_mut(param)) {
                    timeline.schedule(event);
                }
            }
            GraphCommand::Prune { node, param, before } => {
                if let Some(timeline) = self.node_mut(node).and_then(|n| n.timeline_mut(param)) {
                    timeline.prune_before(before);
                }
            }
            GraphCommand::Start { node, at } => {
                if let Some(n) = self.oscillator_mut(node) {
                    n.start = Some(at);
                }
            }
            GraphCommand::Stop { node, at } => {
                if let Some(n) = self.oscillator_mut(node) {
                    n.stop = Some(at);
                }
            }
            GraphCommand::Dispose { node } => self.dispose(node),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    fn oscillator_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.node_mut(id).filter(|n| n.kind == NodeKind::Oscillator)
    }

    fn dispose(&mut self, id: NodeId) {
        let Some(root) = self.node_mut(id) else { return };
        root.disposed = true;

        // Spread to nodes whose every output now leads into disposed nodes.
        loop {
            let mut grew = false;
            for i in 0..self.nodes.len() {
                if self.nodes[i].disposed {
                    continue;
                }
                let from_id = self.nodes[i].id;
                let mut sinks = self
                    .connections
                    .iter()
                    .filter(|(from, _)| *from == from_id)
                    .map(|(_, to)| to)
                    .peekable();
                if sinks.peek().is_none() {
                    continue;
                }
                if sinks.all(|to| sink_target(to).is_some_and(|t| is_disposed(&self.nodes, t))) {
                    self.nodes[i].disposed = true;
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        let Self {
            nodes,
            spare,
            connections,
            ..
        } = self;
        connections.retain(|(from, to)| {
            !is_disposed(nodes, *from) && !sink_target(to).is_some_and(|t| is_disposed(nodes, t))
        });
        let mut i = 0;
        while i < nodes.len() {
            if nodes[i].disposed {
                spare.push(nodes.swap_remove(i));
            } else {
                i += 1;
            }
        }
        self.dirty = true;
    }

    /// Re-sort nodes so every input precedes its consumers, then resolve
    /// connections into index ranges.
    fn rebuild(&mut self) {
        let Self {
            nodes,
            connections,
            plan,
            audio_edges,
            modulation_edges,
            outputs,
            taps,
            edges,
            visited,
            order,
            ..
        } = self;

        edges.clear();
        for (from, to) in connections.iter() {
            let src = index_of(nodes, *from);
            let dst = sink_target(to).and_then(|t| index_of(nodes, t));
            if let (Some(src), Some(dst)) = (src, dst) {
                edges.push((src, dst));
            }
        }

        order.clear();
        visited.clear();
        visited.resize(nodes.len(), false);
        for root in 0..nodes.len() {
            visit(root, edges, visited, order);
        }
        for (rank, &i) in order.iter().enumerate() {
            nodes[i].rank = rank;
        }
        nodes.sort_unstable_by_key(|n| n.rank);

        plan.clear();
        audio_edges.clear();
        modulation_edges.clear();
        taps.clear();
        for node in nodes.iter() {
            let audio_start = audio_edges.len();
            let modulation_start = modulation_edges.len();
            for (from, to) in connections.iter() {
                let Some(src) = index_of(nodes, *from) else { continue };
                match *to {
                    Sink::Node(target) if target == node.id => audio_edges.push(src),
                    Sink::Param(target, param) if target == node.id && param == node.param() => {
                        modulation_edges.push(src)
                    }
                    _ => {}
                }
            }
            plan.push(Step {
                audio: audio_start..audio_edges.len(),
                modulation: modulation_start..modulation_edges.len(),
            });
        }
        for (from, to) in connections.iter() {
            if *to == Sink::Output {
                if let Some(src) = index_of(nodes, *from) {
                    taps.push(src);
                }
            }
        }

        outputs.clear();
        outputs.resize(nodes.len(), 0.0);
        self.dirty = false;
    }

    /// Render a block of the summed output, starting at `ctx.time`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.dirty {
            self.rebuild();
        }

        let Self {
            nodes,
            plan,
            audio_edges,
            modulation_edges,
            outputs,
            taps,
            ..
        } = self;
        let sample_rate = ctx.sample_rate;

        for (n, sample) in out.iter_mut().enumerate() {
            let t = ctx.time_of(n);

            for (i, node) in nodes.iter_mut().enumerate() {
                let step = &plan[i];
                let modulation: f32 = modulation_edges[step.modulation.clone()]
                    .iter()
                    .map(|&j| outputs[j])
                    .sum();

                let value = match node.kind {
                    NodeKind::Oscillator => {
                        let playing = node.start.is_some_and(|s| t >= s)
                            && node.stop.map_or(true, |e| t < e);
                        if playing {
                            node.osc
                                .next_sample(node.values.value_at(t) + modulation, sample_rate)
                        } else {
                            0.0
                        }
                    }
                    NodeKind::Gain => {
                        let input: f32 =
                            audio_edges[step.audio.clone()].iter().map(|&j| outputs[j]).sum();
                        input * (node.values.value_at(t) + modulation)
                    }
                };
                outputs[i] = value;
            }

            *sample = taps.iter().map(|&j| outputs[j]).sum();
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Scheduled timeline for a node's parameter.
    pub fn timeline(&self, id: NodeId, param: Param) -> Option<&ParamTimeline> {
        self.node(id).and_then(|n| n.timeline(param))
    }

    /// `(start, stop)` for an oscillator.
    pub fn play_window(&self, id: NodeId) -> Option<(Option<f64>, Option<f64>)> {
        let node = self.node(id)?;
        (node.kind == NodeKind::Oscillator).then_some((node.start, node.stop))
    }

    pub fn waveform(&self, id: NodeId) -> Option<Waveform> {
        let node = self.node(id)?;
        (node.kind == NodeKind::Oscillator).then(|| node.osc.waveform())
    }

    /// Everything `id` feeds into.
    pub fn sinks_of(&self, id: NodeId) -> Vec<Sink> {
        self.connections
            .iter()
            .filter(|(from, _)| *from == id)
            .map(|(_, to)| *to)
            .collect()
    }

    /// Everything feeding into `sink`.
    pub fn sources_of(&self, sink: Sink) -> Vec<NodeId> {
        self.connections
            .iter()
            .filter(|(_, to)| *to == sink)
            .map(|(from, _)| *from)
            .collect()
    }
}

fn sink_target(sink: &Sink) -> Option<NodeId> {
    match *sink {
        Sink::Node(id) | Sink::Param(id, _) => Some(id),
        Sink::Output => None,
    }
}

fn index_of(nodes: &[Node], id: NodeId) -> Option<usize> {
    nodes.iter().position(|n| n.id == id)
}

fn is_disposed(nodes: &[Node], id: NodeId) -> bool {
    nodes.iter().any(|n| n.id == id && n.disposed)
}

/// Depth-first post-order over `(source, destination)` index pairs.
fn visit(i: usize, edges: &[(usize, usize)], visited: &mut [bool], order: &mut Vec<usize>) {
    if visited[i] {
        return;
    }
    visited[i] = true;
    for &(src, dst) in edges {
        if dst == i {
            visit(src, edges, visited, order);
        }
    }
    order.push(i);
}
