//! Local asset access: path normalization and recording probes.

/// Asciicast duration probe.
pub mod cast;
pub(crate) mod paths;

pub use cast::AsciicastProbe;
