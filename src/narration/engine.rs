use crate::foundation::error::{ScenecastError, ScenecastResult};
use crate::narration::codec::SpeechFormat;
use crate::narration::ffmpeg::ensure_parent_dir;
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

/// Turns text into a WAV file.
pub trait SpeechSynthesizer {
    /// Synthesize `text` spoken by `voice` into `wav_path`.
    fn synthesize(&mut self, text: &str, voice: &str, wav_path: &Path) -> ScenecastResult<()>;
}

/// Turns a WAV file into the distributable speech format.
pub trait AudioEncoder {
    /// Fail with an asset error when the encoder cannot run at all.
    fn ensure_available(&self) -> ScenecastResult<()>;

    /// Encode `wav_path` into `out_path`, overwriting it.
    fn encode(&self, wav_path: &Path, out_path: &Path, format: SpeechFormat)
    -> ScenecastResult<()>;
}

type SynthFactory<'a> = Box<dyn FnMut() -> ScenecastResult<Box<dyn SpeechSynthesizer>> + 'a>;

/// Synthesis handle created on first use and kept for the rest of a build run.
///
/// A run over a warm cache never creates one.
pub struct LazySynth<'a> {
    factory: SynthFactory<'a>,
    handle: Option<Box<dyn SpeechSynthesizer>>,
    inits: usize,
}

impl<'a> LazySynth<'a> {
    /// Slot that calls `factory` the first time a handle is needed.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> ScenecastResult<Box<dyn SpeechSynthesizer>> + 'a,
    {
        Self {
            factory: Box::new(factory),
            handle: None,
            inits: 0,
        }
    }

    /// Return the handle, creating it first if needed.
    pub fn get(&mut self) -> ScenecastResult<&mut dyn SpeechSynthesizer> {
        if self.handle.is_none() {
            let synth = (self.factory)()?;
            self.inits += 1;
            tracing::info!("speech synthesizer ready");
            self.handle = Some(synth);
        }
        let Some(handle) = self.handle.as_mut() else {
            return Err(ScenecastError::asset("speech synthesizer unavailable"));
        };
        let synth: &mut dyn SpeechSynthesizer = handle.as_mut();
        Ok(synth)
    }

    /// Return `true` once a handle exists.
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    /// How many times the factory produced a handle.
    pub fn init_count(&self) -> usize {
        self.inits
    }
}

impl std::fmt::Debug for LazySynth<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySynth")
            .field("initialized", &self.is_initialized())
            .field("inits", &self.inits)
            .finish()
    }
}

/// Default TTS command line.
pub const DEFAULT_TTS_COMMAND: &str = "kokoro-tts - {out} --voice {voice}";

/// Synthesizer that runs an external TTS program once per cue.
///
/// Arguments may contain `{voice}`, `{out}` and `{text}`. When no argument mentions `{text}`, the
/// text is written to the program's stdin.
#[derive(Clone, Debug)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    /// Parse a whitespace-separated command template.
    pub fn from_template(template: &str) -> ScenecastResult<Self> {
        let mut parts = template.split_whitespace().map(str::to_owned);
        let program = parts
            .next()
            .ok_or_else(|| ScenecastError::validation("TTS command must not be empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn text_on_stdin(&self) -> bool {
        !self.args.iter().any(|a| a.contains("{text}"))
    }

    fn render_args(&self, text: &str, voice: &str, out: &Path) -> Vec<String> {
        let out = out.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace("{voice}", voice)
                    .replace("{out}", &out)
                    .replace("{text}", text)
            })
            .collect()
    }
}

impl Default for CommandSynthesizer {
    fn default() -> Self {
        Self {
            program: "kokoro-tts".to_owned(),
            args: ["-", "{out}", "--voice", "{voice}"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn synthesize(&mut self, text: &str, voice: &str, wav_path: &Path) -> ScenecastResult<()> {
        ensure_parent_dir(wav_path)?;
        let stdin = self.text_on_stdin();

        let mut cmd = Command::new(&self.program);
        cmd.args(self.render_args(text, voice, wav_path))
            .stdin(if stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            ScenecastError::asset(format!("failed to spawn TTS command '{}': {e}", self.program))
        })?;
        if stdin && let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(text.as_bytes()).map_err(|e| {
                ScenecastError::asset(format!("failed to write text to TTS stdin: {e}"))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            ScenecastError::asset(format!("failed to wait for TTS command: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScenecastError::asset(format!(
                "TTS command exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if !wav_path.exists() {
            return Err(ScenecastError::asset(format!(
                "TTS command produced no file at '{}'",
                wav_path.display()
            )));
        }
        Ok(())
    }
}
