/*
Parameter Automation
====================

Every scheduled parameter (oscillator frequency, gain level) carries a
timeline of events in absolute seconds. The engine writes the whole
timeline up front when a voice is built; the renderer only ever reads it.

Three kinds of event:

  SetValue(v, t)          jump to v at t, hold afterwards
  LinearRamp(v, t)        straight line from the previous event to v at t
  ExponentialRamp(v, t)   geometric curve from the previous event to v at t

A ramp always starts from the PREVIOUS event's time and value:

    value
      1 ┤     ●
        │    ╱ ╲
      S ┤   ╱   ●──────●
        │  ╱            ╲
      0 ┤ ●              ●
        └─┬───┬───┬──────┬──┬──→ t
          set lin lin  set lin

An exponential ramp cannot cross or touch zero (the ratio v1/v0 would be
zero, infinite or negative). In that case the previous value is held until
the ramp's end time, after which the target value applies.

Events sharing a timestamp keep insertion order, so scheduling
`SetValue(0, t)` followed by `LinearRamp(1, t)` yields 1 from t onwards.

A long-lived parameter (the master bus level) keeps receiving events.
`prune_before(t)` drops everything that can no longer affect a value at or
after t: it keeps the last event at or before t, because the next ramp
starts from it.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutomationEvent {
    SetValue { value: f32, time: f64 },
    LinearRamp { value: f32, time: f64 },
    ExponentialRamp { value: f32, time: f64 },
}

impl AutomationEvent {
    pub fn time(&self) -> f64 {
        match *self {
            AutomationEvent::SetValue { time, .. }
            | AutomationEvent::LinearRamp { time, .. }
            | AutomationEvent::ExponentialRamp { time, .. } => time,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            AutomationEvent::SetValue { value, .. }
            | AutomationEvent::LinearRamp { value, .. }
            | AutomationEvent::ExponentialRamp { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParamTimeline {
    default: f32,
    events: Vec<AutomationEvent>,
}

impl ParamTimeline {
    pub fn new(default: f32) -> Self {
        Self {
            default,
            events: Vec::new(),
        }
    }

    /// Timeline with room for `capacity` events before it reallocates.
    pub fn with_capacity(default: f32, capacity: usize) -> Self {
        Self {
            default,
            events: Vec::with_capacity(capacity),
        }
    }

    /// Empty the timeline and change its default, keeping the allocation.
    pub fn reset(&mut self, default: f32) {
        self.default = default;
        self.events.clear();
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn events(&self) -> &[AutomationEvent] {
        &self.events
    }

    /// Insert an event, after any already scheduled at the same time.
    pub fn schedule(&mut self, event: AutomationEvent) {
        let at = self.events.partition_point(|e| e.time() <= event.time());
        self.events.insert(at, event);
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(AutomationEvent::SetValue { value, time });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(AutomationEvent::LinearRamp { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.schedule(AutomationEvent::ExponentialRamp { value, time });
    }

    /// Value of the parameter at absolute time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        let idx = self.events.partition_point(|e| e.time() <= t);

        // Before anything ramps, a ramp with no predecessor starts at (0, default).
        let (t0, v0) = match idx.checked_sub(1).map(|i| self.events[i]) {
            Some(prev) => (prev.time(), prev.value()),
            None => (0.0, self.default),
        };

        match self.events.get(idx) {
            Some(&AutomationEvent::LinearRamp { value, time }) if time > t0 => {
                let progress = (t - t0) / (time - t0);
                (v0 as f64 + (value as f64 - v0 as f64) * progress) as f32
            }
            Some(&AutomationEvent::ExponentialRamp { value, time }) if time > t0 => {
                if v0 == 0.0 || value == 0.0 || (v0 < 0.0) != (value < 0.0) {
                    return v0;
                }
                let progress = (t - t0) / (time - t0);
                (v0 as f64 * (value as f64 / v0 as f64).powf(progress)) as f32
            }
            _ => v0,
        }
    }

    /// Time of the last scheduled event, if any.
    pub fn end_time(&self) -> Option<f64> {
        self.events.last().map(AutomationEvent::time)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Forget events that no longer matter from `t` onwards.
    ///
    /// `value_at` is unchanged for every time at or after `t`.
    pub fn prune_before(&mut self, t: f64) {
        let idx = self.events.partition_point(|e| e.time() <= t);
        if idx > 1 {
            self.events.drain(..idx - 1);
        }
    }
}
