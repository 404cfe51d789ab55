use std::{path::PathBuf, str::FromStr};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slidekit", version)]
struct Cli {
    /// Log trigger dispatch and navigation at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a project document and print its diagnostics.
    Validate(ValidateArgs),
    /// Play a project headlessly, printing the session state after each event.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Event to dispatch, in order: `click:<objectId>` or `enter:<slideId>`.
    #[arg(long = "event")]
    events: Vec<Event>,

    /// Play even if the validator reports diagnostics.
    #[arg(long)]
    unchecked: bool,

    /// Stop after this many queued trigger runs per event.
    #[arg(long, default_value_t = slidekit::SessionOpts::default().max_queue_steps)]
    max_queue_steps: usize,
}

#[derive(Clone, Debug)]
enum Event {
    Click(String),
    Enter(String),
}

impl FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("click", id)) if !id.is_empty() => Ok(Self::Click(id.to_owned())),
            Some(("enter", id)) if !id.is_empty() => Ok(Self::Enter(id.to_owned())),
            _ => Err(format!(
                "invalid event '{s}' (expected click:<objectId> or enter:<slideId>)"
            )),
        }
    }
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

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let project = slidekit::Project::from_path(&args.in_path)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;
    let diagnostics = slidekit::validate(Some(&project));
    if diagnostics.is_empty() {
        eprintln!("{}: ok", args.in_path.display());
        return Ok(());
    }
    for d in &diagnostics {
        println!("{d}");
    }
    anyhow::bail!("{} diagnostic(s)", diagnostics.len());
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let project = slidekit::Project::from_path(&args.in_path)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;

    let mut engine = slidekit::PlaybackEngine::new(slidekit::SessionOpts {
        validate_on_load: !args.unchecked,
        max_queue_steps: args.max_queue_steps,
    });
    engine.load_project(project)?;
    print_snapshot(&mut engine)?;

    for event in args.events {
        let dispatched = match &event {
            Event::Click(id) => engine.on_object_clicked(id).map(|_| ()),
            Event::Enter(id) => engine.on_slide_entered(id),
        };
        if let Err(e) = dispatched {
            eprintln!("{event:?}: {e}");
        }
        print_snapshot(&mut engine)?;
    }
    Ok(())
}

fn print_snapshot(engine: &mut slidekit::PlaybackEngine) -> anyhow::Result<()> {
    for fault in engine.take_faults() {
        eprintln!("fault: {fault}");
    }
    let s = serde_json::to_string(&engine.snapshot()).context("encode session snapshot")?;
    println!("{s}");
    Ok(())
}
