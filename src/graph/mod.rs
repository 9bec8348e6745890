//! The boundary between the voice engine and whatever renders audio.
//!
//! The engine talks to an [`AudioHost`]: create oscillators and gain stages,
//! wire them, write parameter timelines, start/stop, dispose. Two hosts are
//! provided, both backed by the same [`GraphRenderer`]:
//!
//! - [`OfflineHost`] renders on demand; its clock only moves when you render.
//!   Tests and WAV bounces use it.
//! - [`StreamHost`] ships commands over a lock-free ring to a
//!   [`StreamRenderer`] living inside a realtime audio callback.

/// Renderer instructions.
pub mod command;
/// The `AudioHost` trait.
pub mod host;
/// Node handles, parameters and connection targets.
pub mod node;
/// Deterministic on-demand host.
pub mod offline;
/// Sample-by-sample graph evaluation.
pub mod renderer;
/// Realtime host over an `rtrb` ring.
#[cfg(feature = "rtrb")]
pub mod stream;

pub use command::GraphCommand;
pub use host::AudioHost;
pub use node::{NodeId, NodeSpec, Param, RenderCtx, Sink};
pub use offline::{write_wav, OfflineHost};
pub use renderer::GraphRenderer;
#[cfg(feature = "rtrb")]
pub use stream::{stream_pair, StreamFault, StreamHost, StreamRenderer};
