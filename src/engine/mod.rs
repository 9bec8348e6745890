//! The voice engine: turns `SynthParams` into scheduled host graphs.
//!
//! Every `play` builds a fresh, disposable graph and writes its whole
//! timeline up front:
//!
//! ```text
//!   op[0] → op[1] → … → op[n-1] ─freq→ carrier → voice env ─┐
//!                                     sub → sub env ────────┼→ master bus → output
//!                                  (other voices) ──────────┘
//! ```
//!
//! Nothing here blocks. The only deferred work (disposing finished voices,
//! restoring the bus after a panic-mute) lives in a [`Scheduler`] keyed by
//! host time and runs when the owner calls [`VoiceEngine::poll`].

pub mod envelope;
pub mod scheduler;
pub mod voice;

use std::collections::BTreeMap;

use tracing::{debug, info};

use self::{
    scheduler::{ScheduledTask, Scheduler, TaskId},
    voice::{Voice, VoiceId},
};
use crate::{
    error::Result,
    graph::{host::AudioHost, NodeId, Param, Sink},
    params::SynthParams,
};

/// Engine timing and level settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Master bus level while not muted.
    pub master_level: f32,
    /// Extra time after a voice ends before its graph is disposed.
    pub dispose_grace: f64,
    /// Fade-out time of `stop_all`.
    pub stop_fade: f64,
    /// Delay after `stop_all` before the bus level is restored.
    pub stop_restore: f64,
    /// Fraction of the duration at which operator depth reaches its decayed value.
    pub index_decay_point: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_level: 0.3,
            dispose_grace: 0.5,
            stop_fade: 0.1,
            stop_restore: 0.15,
            index_decay_point: 0.7,
        }
    }
}

/// Deferred engine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineTask {
    DisposeVoice(VoiceId),
    RestoreMaster,
}

pub struct VoiceEngine<H: AudioHost> {
    host: H,
    config: EngineConfig,
    bus: Option<NodeId>,
    voices: BTreeMap<VoiceId, Voice>,
    scheduler: Scheduler<EngineTask>,
    restore: Option<TaskId>,
    next_voice: u64,
}

impl<H: AudioHost> VoiceEngine<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, EngineConfig::default())
    }

    pub fn with_config(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            config,
            bus: None,
            voices: BTreeMap::new(),
            scheduler: Scheduler::new(),
            restore: None,
            next_voice: 0,
        }
    }

    /// Create the master bus if it does not exist yet. Safe to call any
    /// number of times; a host that cannot render reports it here.
    ///
    /// The host is only checked while the bus is being created. Once
    /// initialised, `play` does not report a stream that dies later; poll
    /// [`AudioHost::check`] for that.
    pub fn init(&mut self) -> Result<()> {
        self.ensure_bus().map(|_| ())
    }

    fn ensure_bus(&mut self) -> Result<NodeId> {
        if let Some(bus) = self.bus {
            return Ok(bus);
        }
        self.host.check()?;

        let bus = self.host.create_gain();
        let now = self.host.current_time();
        self.host
            .set_value_at_time(bus, Param::Gain, self.config.master_level, now);
        self.host.connect(bus, Sink::Output);
        self.bus = Some(bus);

        info!(level = self.config.master_level, "master bus ready");
        Ok(bus)
    }

    /// Build and schedule one voice starting now.
    ///
    /// Voices never steal from or wait on each other: each call adds an
    /// independent graph that mixes into the bus.
    pub fn play(&mut self, params: &SynthParams) -> Result<VoiceId> {
        let bus = self.ensure_bus()?;

        let id = VoiceId(self.next_voice);
        self.next_voice += 1;

        let now = self.host.current_time();
        let voice = Voice::build(&mut self.host, id, params, now, bus, &self.config);

        self.scheduler.schedule(
            voice.ends + self.config.dispose_grace,
            EngineTask::DisposeVoice(id),
        );
        debug!(
            voice = id.0,
            carrier = params.carrier_freq,
            operators = params.operators.len(),
            duration = params.duration,
            sub = params.sub.is_some(),
            "voice scheduled"
        );

        self.voices.insert(id, voice);
        Ok(id)
    }

    /// Panic-mute: fade the master bus to silence, then bring it back.
    ///
    /// Individual voices keep running on their own timelines; only the bus
    /// level moves.
    pub fn stop_all(&mut self) {
        let Some(bus) = self.bus else {
            return;
        };
        let now = self.host.current_time();

        match self.restore.take() {
            // Already fading or silent: extend the silence.
            Some(pending) => {
                self.scheduler.cancel(pending);
            }
            None => {
                self.host
                    .set_value_at_time(bus, Param::Gain, self.config.master_level, now);
            }
        }
        self.host
            .linear_ramp_to_value_at_time(bus, Param::Gain, 0.0, now + self.config.stop_fade);
        self.restore = Some(
            self.scheduler
                .schedule(now + self.config.stop_restore, EngineTask::RestoreMaster),
        );

        debug!(voices = self.voices.len(), "stop all");
    }

    /// Run every deferred task that is due by the host clock.
    pub fn poll(&mut self) -> usize {
        let now = self.host.current_time();
        let due = self.scheduler.drain_due(now);
        let count = due.len();
        for task in due {
            self.run(task);
        }
        count
    }

    fn run(&mut self, task: EngineTask) {
        match task {
            EngineTask::DisposeVoice(id) => {
                if let Some(voice) = self.voices.remove(&id) {
                    voice.dispose(&mut self.host);
                    debug!(voice = id.0, "voice disposed");
                }
            }
            EngineTask::RestoreMaster => {
                self.restore = None;
                if let Some(bus) = self.bus {
                    let now = self.host.current_time();
                    // The fade is over; keep the bus timeline from growing.
                    self.host.prune(bus, Param::Gain, now);
                    self.host
                        .set_value_at_time(bus, Param::Gain, self.config.master_level, now);
                }
            }
        }
    }

    /// Tear everything down: pending tasks, live voices, the bus.
    ///
    /// The engine can be initialised again afterwards.
    pub fn shutdown(&mut self) {
        self.scheduler.clear();
        self.restore = None;

        let voices = std::mem::take(&mut self.voices);
        for voice in voices.values() {
            voice.dispose(&mut self.host);
        }
        if let Some(bus) = self.bus.take() {
            self.host.dispose(bus);
        }

        info!(voices = voices.len(), "engine shut down");
    }

    pub fn bus(&self) -> Option<NodeId> {
        self.bus
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.voices.get(&id)
    }

    pub fn is_muted(&self) -> bool {
        self.restore.is_some()
    }

    pub fn pending_tasks(&self) -> &[ScheduledTask<EngineTask>] {
        self.scheduler.pending()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
