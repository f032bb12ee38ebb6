//! Scenecast compiles scene scripts into narrated terminal-demo timelines.
//!
//! A scene script is a short line-oriented text file naming title cards, recorded terminal
//! sessions, the transitions between them and the narration spoken over them. The crate:
//!
//! - Parses scripts into a [`Timeline`] ([`parse_script`])
//! - Lays clips out on an absolute frame timeline ([`schedule`])
//! - Turns narration into cached, encoded audio assets and writes the compiled documents a
//!   playback host loads ([`narration`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod narration;
/// Timeline data model.
pub mod scene;
pub mod schedule;
pub mod script;

pub use crate::foundation::core::Fps;
pub use crate::foundation::defaults;
pub use crate::foundation::error::{ScenecastError, ScenecastResult};

pub use crate::assets::AsciicastProbe;
pub use crate::narration::{
    BuildOpts, CommandSynthesizer, FfmpegEncoder, LazySynth, NarrationBuilder, RunReport,
    SpeechFormat, build_all,
};
pub use crate::scene::model::{
    AudioAnchor, AudioAttachment, CardItem, CastItem, ClipKind, SpeechCue, TimelineItem,
    TransitionItem, TransitionName,
};
pub use crate::scene::timeline::Timeline;
pub use crate::schedule::{Plan, Schedule, plan};
pub use crate::script::parse as parse_script;
