use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use scenecast::narration::engine::DEFAULT_TTS_COMMAND;
use scenecast::narration::SpeechSynthesizer;
use scenecast::{
    AsciicastProbe, BuildOpts, CommandSynthesizer, FfmpegEncoder, Fps, LazySynth,
    NarrationBuilder, SpeechFormat, Timeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scenecast", version, about = "Compile scene scripts into narrated timelines")]
struct Cli {
    /// Log at debug level.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Log level or filter (overrides RUST_LOG).
    #[arg(long, global = true, value_name = "LEVEL")]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one script and print the timeline JSON.
    Parse(ParseArgs),
    /// Build speech assets, compiled timelines and the registry for a directory of scripts.
    Build(BuildArgs),
    /// Print the frame schedule of a script or compiled timeline.
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Script path, or `-` for stdin.
    script: PathBuf,

    /// Write the JSON here instead of stdout.
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Directory holding `*.timeline` scripts.
    #[arg(long, default_value = "timelines")]
    timelines: PathBuf,

    /// Public asset root; speech and compiled timelines are written below it.
    #[arg(long, default_value = "public")]
    public: PathBuf,

    /// Speech format (default: $SPEECH_FORMAT, else opus).
    #[arg(long)]
    format: Option<SpeechFormat>,

    /// ffmpeg binary (default: $FFMPEG_PATH, else ffmpeg on PATH).
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// TTS command template with {voice}, {out} and optionally {text}.
    #[arg(long, default_value = DEFAULT_TTS_COMMAND)]
    tts_command: String,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// `.timeline` script or compiled `.json` timeline.
    input: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = scenecast::defaults::FPS)]
    fps: u32,

    /// Directory cast paths are resolved against (default: the input's directory).
    #[arg(long)]
    casts: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log.as_deref());

    let res = match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Build(args) => cmd_build(args),
        Command::Schedule(args) => cmd_schedule(args),
    };
    match res {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool, level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<ExitCode> {
    let script = read_input(&args.script)?;
    let timeline = scenecast::parse_script(&script)?;
    let json = timeline.to_json_pretty()?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<ExitCode> {
    let mut opts = BuildOpts {
        public_dir: args.public,
        timelines_dir: args.timelines,
        ..BuildOpts::default()
    }
    .with_env();
    if let Some(format) = args.format {
        opts.format = format;
    }

    let encoder = match args.ffmpeg {
        Some(bin) => FfmpegEncoder::new(bin),
        None => FfmpegEncoder::from_env(),
    };
    let template = args.tts_command;
    let synth = LazySynth::new(move || {
        let synth = CommandSynthesizer::from_template(&template)?;
        Ok(Box::new(synth) as Box<dyn SpeechSynthesizer>)
    });
    let mut builder = NarrationBuilder::new(opts, synth, Box::new(encoder));

    let report = scenecast::build_all(&mut builder)?;
    if report.is_success() {
        tracing::info!(built = report.built.len(), "ok");
        Ok(ExitCode::SUCCESS)
    } else {
        for f in &report.failures {
            eprintln!("failed: {}: {}", f.file.display(), f.error);
        }
        Ok(ExitCode::from(1))
    }
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<ExitCode> {
    let text = read_input(&args.input)?;
    let is_json = args
        .input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let timeline = if is_json {
        Timeline::from_json_str(&text)?
    } else {
        scenecast::parse_script(&text)?
    };

    let fps = Fps::whole(args.fps)?;
    let root = args.casts.unwrap_or_else(|| {
        args.input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let plan = scenecast::plan(&timeline, fps, &AsciicastProbe::new(root))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("serialize schedule")?
    );
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}
