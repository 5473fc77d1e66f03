use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use geoscript::{
    DiagramRef, DrawController, EngineConfig, JsonSource, PipelineService, RecordingDiagram,
    StatementError, StepController,
};

#[derive(Parser, Debug)]
#[command(name = "geoscript", version)]
struct Cli {
    /// Engine config JSON (playback timing and styles).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the whole program instantly.
    Draw(ProgramArgs),
    /// Play the whole program with animations.
    Play(ProgramArgs),
    /// Step through the program.
    Step(StepArgs),
}

#[derive(Parser, Debug)]
struct ProgramArgs {
    /// Program file: one JSON syntax tree per line.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the draw log here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StepArgs {
    #[command(flatten)]
    program: ProgramArgs,

    /// Number of steps to take.
    #[arg(long, default_value_t = 1)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let pipeline = PipelineService::new(Box::new(JsonSource)).with_config(&config);
    let recording = Rc::new(RefCell::new(RecordingDiagram::new()));
    let diagram: DiagramRef = recording.clone();

    let out = match cli.cmd {
        Command::Draw(args) => {
            let lines = read_program(&args.in_path)?;
            let mut ctl = DrawController::new(pipeline, diagram);
            check(ctl.compile(&lines)?)?;
            args.out
        }
        Command::Play(args) => {
            let lines = read_program(&args.in_path)?;
            let mut ctl = DrawController::new(pipeline, diagram);
            check(ctl.compile(&lines)?)?;
            pollster::block_on(ctl.play_all())?.into_result()?;
            args.out
        }
        Command::Step(args) => {
            let lines = read_program(&args.program.in_path)?;
            let mut ctl = StepController::new(pipeline, diagram);
            check(ctl.start(&lines)?)?;
            for _ in 0..args.steps {
                if pollster::block_on(ctl.next())?.is_none() {
                    break;
                }
            }
            eprintln!("{}", serde_json::to_string(&ctl.state())?);
            args.program.out
        }
    };

    let log = serde_json::to_string_pretty(recording.borrow().events())?;
    match out {
        Some(path) => {
            std::fs::write(&path, log)
                .with_context(|| format!("write draw log '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{log}"),
    }
    Ok(())
}

fn read_program(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read program '{}'", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

fn check(errors: Vec<StatementError>) -> anyhow::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        eprintln!("line {}: {}", e.index + 1, e.error);
    }
    anyhow::bail!("{} statement(s) failed", errors.len())
}
