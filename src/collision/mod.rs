//! Ball-ball collision detection and resolution.
//!
//! Detection and resolution are decoupled so the orchestrator can
//! batch-detect and then resolve each reported pair. Detection is discrete
//! and positional (overlap test on current positions, no time-of-impact
//! solving); resolution re-derives the contact geometry fresh rather than
//! trusting detection output, which tolerates several simultaneous
//! overlaps being resolved in sequence within one step.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
