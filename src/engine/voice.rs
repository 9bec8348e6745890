use crate::{
    engine::{envelope::Breakpoints, EngineConfig},
    graph::{host::AudioHost, NodeId, Param, Sink},
    params::SynthParams,
};

/// Identifier of a played voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub u64);

/// Oscillator and depth stage for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModulatorNodes {
    pub osc: NodeId,
    pub depth: NodeId,
}

/// Oscillator and its own envelope stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubNodes {
    pub osc: NodeId,
    pub gain: NodeId,
}

/// The live graph of one played sound.
///
/// Built once, never touched again until it is disposed. The fields only
/// record which host nodes belong to the voice.
#[derive(Debug, Clone)]
pub struct Voice {
    pub id: VoiceId,
    pub started: f64,
    pub ends: f64,
    pub envelope: Breakpoints,
    /// Voice-level envelope stage feeding the master bus.
    pub output: NodeId,
    pub carrier: NodeId,
    /// In operator order: `modulators[0]` is furthest from the carrier.
    pub modulators: Vec<ModulatorNodes>,
    pub sub: Option<SubNodes>,
}

impl Voice {
    /// Allocate and schedule the whole graph for `params`, starting at `now`.
    pub fn build<H: AudioHost + ?Sized>(
        host: &mut H,
        id: VoiceId,
        params: &SynthParams,
        now: f64,
        bus: NodeId,
        config: &EngineConfig,
    ) -> Self {
        let SynthParams {
            carrier_freq,
            carrier_waveform,
            ref operators,
            ref envelope,
            duration,
            sub,
        } = *params;
        let ends = now + duration as f64;
        let breakpoints = Breakpoints::new(now, envelope, duration);

        // Voice envelope into the bus
        let output = host.create_gain();
        breakpoints.schedule(host, output, envelope, 1.0);
        host.connect(output, Sink::Node(bus));

        let carrier = host.create_oscillator(carrier_waveform);
        host.set_value_at_time(carrier, Param::Frequency, carrier_freq, now);

        // Serial chain, wired from the carrier outwards: the last operator
        // drives the carrier, each earlier one drives the operator after it.
        let decay_at = now + (duration * config.index_decay_point) as f64;
        let mut target = Sink::Param(carrier, Param::Frequency);
        let mut modulators = Vec::with_capacity(operators.len());

        for op in operators.iter().rev() {
            let freq = op.frequency(carrier_freq);
            let depth = op.depth(carrier_freq);

            let osc = host.create_oscillator(op.waveform);
            host.set_value_at_time(osc, Param::Frequency, freq, now);

            let depth_gain = host.create_gain();
            host.set_value_at_time(depth_gain, Param::Gain, depth, now);
            if let Some(remaining) = op.index_decay.filter(|r| *r > 0.0) {
                host.exponential_ramp_to_value_at_time(
                    depth_gain,
                    Param::Gain,
                    depth * remaining,
                    decay_at,
                );
            }

            host.connect(osc, Sink::Node(depth_gain));
            host.connect(depth_gain, target);

            host.start(osc, now);
            host.stop(osc, ends);

            target = Sink::Param(osc, Param::Frequency);
            modulators.push(ModulatorNodes {
                osc,
                depth: depth_gain,
            });
        }
        modulators.reverse();

        host.connect(carrier, Sink::Node(output));
        host.start(carrier, now);
        host.stop(carrier, ends);

        // Independent sub layer straight into the bus
        let sub = sub.map(|sub| {
            let osc = host.create_oscillator(sub.waveform());
            host.set_value_at_time(osc, Param::Frequency, sub.frequency(carrier_freq), now);

            let gain = host.create_gain();
            breakpoints.schedule(host, gain, envelope, sub.gain());

            host.connect(osc, Sink::Node(gain));
            host.connect(gain, Sink::Node(bus));
            host.start(osc, now);
            host.stop(osc, ends);

            SubNodes { osc, gain }
        });

        Self {
            id,
            started: now,
            ends,
            envelope: breakpoints,
            output,
            carrier,
            modulators,
            sub,
        }
    }

    /// Every host node owned by this voice.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = vec![self.output, self.carrier];
        for m in &self.modulators {
            nodes.push(m.osc);
            nodes.push(m.depth);
        }
        if let Some(sub) = self.sub {
            nodes.push(sub.osc);
            nodes.push(sub.gain);
        }
        nodes
    }

    /// Release the voice's graph. The host drops each output stage together
    /// with everything that only feeds it.
    pub fn dispose<H: AudioHost + ?Sized>(&self, host: &mut H) {
        host.dispose(self.output);
        if let Some(sub) = self.sub {
            host.dispose(sub.gain);
        }
    }
}
