use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::narration::codec::SpeechFormat;
use crate::narration::engine::{AudioEncoder, LazySynth};
use crate::narration::ffmpeg::ensure_parent_dir;
use crate::narration::key;
use crate::narration::output;
use crate::narration::pronounce;
use crate::scene::model::{AudioAttachment, SpeechCue, TimelineItem};
use crate::scene::timeline::Timeline;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Environment variable selecting the speech format.
pub const SPEECH_FORMAT_ENV: &str = "SPEECH_FORMAT";

/// Directory layout and codec for a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOpts {
    /// Root of everything a host serves. Speech and compiled timelines land below it.
    pub public_dir: PathBuf,
    /// Where `*.timeline` scripts are read from.
    pub timelines_dir: PathBuf,
    /// Encoded speech format.
    pub format: SpeechFormat,
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            timelines_dir: PathBuf::from("timelines"),
            format: SpeechFormat::default(),
        }
    }
}

impl BuildOpts {
    /// Apply `SPEECH_FORMAT` when set. An unknown value is logged and ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(v) = std::env::var(SPEECH_FORMAT_ENV)
            && !v.trim().is_empty()
        {
            match v.parse() {
                Ok(format) => self.format = format,
                Err(e) => tracing::warn!(value = v.as_str(), "ignoring {SPEECH_FORMAT_ENV}: {e}"),
            }
        }
        self
    }

    /// `<public>/speech`.
    pub fn speech_root(&self) -> PathBuf {
        self.public_dir.join("speech")
    }

    /// `<public>/timelines`, where compiled documents and the registry are written.
    pub fn output_dir(&self) -> PathBuf {
        self.public_dir.join("timelines")
    }
}

/// Per-timeline cue counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Speech cues seen.
    pub cues: usize,
    /// Cues whose encoded asset already existed.
    pub cached: usize,
    /// Synthesizer invocations.
    pub synthesized: usize,
    /// Encoder invocations.
    pub encoded: usize,
}

/// What the run records about one built timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Timeline name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Host path of the self-registering module.
    pub module: String,
    /// Cue counters.
    pub stats: BuildStats,
}

/// Turns speech cues into cached audio assets and writes the compiled outputs.
///
/// One builder serves a whole run: the synthesis handle is created at most once.
pub struct NarrationBuilder<'a> {
    opts: BuildOpts,
    synth: LazySynth<'a>,
    encoder: Box<dyn AudioEncoder + 'a>,
}

impl<'a> NarrationBuilder<'a> {
    /// Builder over the given collaborators.
    pub fn new(opts: BuildOpts, synth: LazySynth<'a>, encoder: Box<dyn AudioEncoder + 'a>) -> Self {
        Self {
            opts,
            synth,
            encoder,
        }
    }

    /// Build options in use.
    pub fn opts(&self) -> &BuildOpts {
        &self.opts
    }

    /// Synthesis slot, for inspecting whether a handle was ever created.
    pub fn synth(&self) -> &LazySynth<'a> {
        &self.synth
    }

    /// Fail when the encoder cannot run.
    pub fn ensure_encoder(&self) -> ScenecastResult<()> {
        self.encoder.ensure_available()
    }

    /// Validate, enrich and write one timeline.
    ///
    /// Returns the enriched timeline (no speech left, one audio attachment per former cue) and
    /// its manifest entry. Any error leaves previously cached assets in place.
    #[tracing::instrument(skip_all, fields(timeline = %timeline.name))]
    pub fn build(&mut self, timeline: &Timeline) -> ScenecastResult<(Timeline, ManifestEntry)> {
        timeline.validate()?;
        let (enriched, stats) = self.enrich(timeline)?;

        let out_dir = self.opts.output_dir();
        let json_path = out_dir.join(format!("{}.json", enriched.name));
        write_text(&json_path, &enriched.to_json_pretty()?)?;
        let module_path = out_dir.join(format!("{}.speech.js", enriched.name));
        write_text(&module_path, &output::speech_module(&enriched)?)?;
        tracing::info!(
            cues = stats.cues,
            synthesized = stats.synthesized,
            cached = stats.cached,
            "wrote {}.{{json,speech.js}}",
            enriched.name
        );

        let entry = ManifestEntry {
            name: enriched.name.clone(),
            title: enriched.name.clone(),
            module: output::module_href(&enriched.name),
            stats,
        };
        Ok((enriched, entry))
    }

    /// Replace every speech cue with an attachment to its encoded asset, producing assets that
    /// are not cached yet.
    pub fn enrich(&mut self, timeline: &Timeline) -> ScenecastResult<(Timeline, BuildStats)> {
        let speech_dir = self.opts.speech_root().join(&timeline.name);
        let mut stats = BuildStats::default();
        let mut items = Vec::with_capacity(timeline.items.len());

        for item in &timeline.items {
            let mut item = item.clone();
            if let Some((speech, audio)) = take_speech(&mut item) {
                for cue in &speech {
                    let src = self.produce(&timeline.name, &speech_dir, cue, &mut stats)?;
                    audio.push(AudioAttachment::new(src, Some(cue.anchor), cue.offset_sec));
                }
            }
            items.push(item);
        }

        Ok((
            Timeline {
                name: timeline.name.clone(),
                items,
            },
            stats,
        ))
    }

    /// Make sure the encoded asset for `cue` exists and return its host path.
    fn produce(
        &mut self,
        name: &str,
        speech_dir: &Path,
        cue: &SpeechCue,
        stats: &mut BuildStats,
    ) -> ScenecastResult<String> {
        stats.cues += 1;
        let text = pronounce::apply(&cue.text);
        let base = key::basename(&text, &cue.voice);
        let ext = self.opts.format.ext();
        let wav = speech_dir.join(format!("{base}.wav"));
        let encoded = speech_dir.join(format!("{base}.{ext}"));
        let src = format!("speech/{name}/{base}.{ext}");

        if encoded.exists() {
            tracing::debug!(asset = src.as_str(), "speech cached");
            stats.cached += 1;
            return Ok(src);
        }

        if !wav.exists() {
            tracing::info!(voice = cue.voice.as_str(), text = %preview(&text), "synthesizing");
            ensure_parent_dir(&wav)?;
            self.synth.get()?.synthesize(&text, &cue.voice, &wav)?;
            stats.synthesized += 1;
        }
        self.encoder.encode(&wav, &encoded, self.opts.format)?;
        stats.encoded += 1;

        match std::fs::remove_file(&wav) {
            Ok(()) => tracing::debug!(wav = %wav.display(), "removed intermediate wav"),
            Err(e) => tracing::warn!(wav = %wav.display(), "could not delete intermediate wav: {e}"),
        }
        Ok(src)
    }
}

impl std::fmt::Debug for NarrationBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationBuilder")
            .field("opts", &self.opts)
            .field("synth", &self.synth)
            .finish_non_exhaustive()
    }
}

/// Detach a clip's speech cues, returning them with the clip's audio list.
fn take_speech(item: &mut TimelineItem) -> Option<(Vec<SpeechCue>, &mut Vec<AudioAttachment>)> {
    match item {
        TimelineItem::Transition(_) => None,
        TimelineItem::Card(c) => Some((std::mem::take(&mut c.speech), &mut c.audio)),
        TimelineItem::Cast(c) => Some((std::mem::take(&mut c.speech), &mut c.audio)),
    }
}

/// First 42 characters, with an ellipsis when cut.
fn preview(text: &str) -> String {
    const MAX: usize = 42;
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_owned(),
    }
}

pub(crate) fn write_text(path: &Path, body: &str) -> ScenecastResult<()> {
    use anyhow::Context as _;
    ensure_parent_dir(path)?;
    std::fs::write(path, body)
        .with_context(|| format!("write '{}'", path.display()))
        .map_err(ScenecastError::from)
}
