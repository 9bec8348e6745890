use crate::{
    graph::{host::AudioHost, NodeId, Param},
    params::Envelope,
};

/*
Scheduled ADSR
==============

A voice has a fixed lifetime, so its envelope is not gated: all five
breakpoints are known the moment the voice is built.

  Level
   peak ┤     ╱╲
        │    ╱  ╲___________
   S·pk ┤   ╱               ╲
        │  ╱                 ╲
    0.0 └─●───●───●─────────●─●──→ Time
         now  t1  t2       t3 t4
              │   │         │  └ now + duration
              │   │         └ now + duration − release   (hold ends)
              │   └ t1 + decay                           (sustain reached)
              └ now + attack                             (peak reached)

When attack + decay + release outruns the duration the raw times cross
(t3 < t2). Each time is clamped to be no earlier than the one before it,
so the schedule never runs backwards: the voice then skips straight from
the end of decay into release.
*/

/// Absolute envelope times in host seconds, non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    pub start: f64,
    pub peak: f64,
    pub sustain: f64,
    pub release: f64,
    pub end: f64,
}

impl Breakpoints {
    pub fn new(now: f64, envelope: &Envelope, duration: f32) -> Self {
        let duration = duration as f64;

        let start = now;
        let peak = (now + envelope.attack as f64).max(start);
        let sustain = (peak + envelope.decay as f64).max(peak);
        let release = (now + duration - envelope.release as f64).max(sustain);
        let end = (now + duration).max(release);

        Self {
            start,
            peak,
            sustain,
            release,
            end,
        }
    }

    pub fn times(&self) -> [f64; 5] {
        [self.start, self.peak, self.sustain, self.release, self.end]
    }

    /// Write the envelope onto `node`'s gain, scaled so the peak is `level`.
    pub fn schedule<H: AudioHost + ?Sized>(
        &self,
        host: &mut H,
        node: NodeId,
        envelope: &Envelope,
        level: f32,
    ) {
        let held = level * envelope.sustain;

        host.set_value_at_time(node, Param::Gain, 0.0, self.start);
        host.linear_ramp_to_value_at_time(node, Param::Gain, level, self.peak);
        host.linear_ramp_to_value_at_time(node, Param::Gain, held, self.sustain);
        host.set_value_at_time(node, Param::Gain, held, self.release);
        host.linear_ramp_to_value_at_time(node, Param::Gain, 0.0, self.end);
    }
}
