//! Speech asset builder.
//!
//! Each speech cue becomes an encoded audio file under `<public>/speech/<timeline>/`, named by a
//! content hash of voice and (pronunciation-adjusted) text. Existing files are reused, so a
//! second build over a warm cache synthesizes nothing.

/// Output codec profiles.
pub mod codec;
/// Synthesis and encoding collaborators.
pub mod engine;
/// `ffmpeg` encoder.
pub mod ffmpeg;
/// Cache keys and asset basenames.
pub mod key;
/// Pronunciation table.
pub mod pronounce;
/// Directory-wide build runs.
pub mod run;

mod builder;
mod output;

pub use builder::{BuildOpts, BuildStats, ManifestEntry, NarrationBuilder, SPEECH_FORMAT_ENV};
pub use codec::SpeechFormat;
pub use engine::{AudioEncoder, CommandSynthesizer, LazySynth, SpeechSynthesizer};
pub use ffmpeg::FfmpegEncoder;
pub use output::{Registry, module_href, speech_module};
pub use run::{RunFailure, RunReport, build_all};
