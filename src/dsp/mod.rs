//! Low-level primitives used by the graph renderer.
//!
//! These stay focused on the signal math: an oscillator that advances one
//! sample at a time at whatever frequency it is handed, and a parameter
//! timeline that answers "what is this value at time t". The renderer in
//! `graph` layers node wiring and scheduling on top.

/// Breakpoint timelines for scheduled parameters.
pub mod automation;
/// Oscillator waveforms.
pub mod oscillator;

pub use automation::{AutomationEvent, ParamTimeline};
pub use oscillator::{OscillatorBlock, Waveform};
