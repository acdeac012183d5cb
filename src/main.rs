use std::{path::PathBuf, process};

use clap::Parser;
use scavenger::{
    BracketDice, Difficulty, DifficultyTable, LocalLedger, Phase, RunSummary, Scavenger,
    ScavengerResult,
    render::{frame_lines, hud_line},
    scripted_input::{Command, ScriptedInput},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Plays one Scavenger run from a move script and prints the result.
#[derive(Parser, Debug)]
#[command(name = "scavenger")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Difficulty tier: easy, medium or hard
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON difficulty table replacing the built-in tiers
    #[arg(long)]
    tiers: Option<PathBuf>,

    /// Move script: w/a/s/d or h/j/k/l per step, q to abandon
    #[arg(long)]
    script: Option<PathBuf>,

    /// Energy available to the local ledger
    #[arg(short, long, default_value = "100")]
    energy: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print a text frame after every turn
    #[arg(long)]
    frames: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(err) = run(args) {
        error!(%err, "scavenger run failed");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> ScavengerResult<()> {
    let table = match &args.tiers {
        Some(path) => DifficultyTable::load(path)?,
        None => DifficultyTable::builtin(),
    };
    let dice = match args.seed {
        Some(seed) => BracketDice::seeded(seed),
        None => BracketDice::new(),
    };
    let mut script = match &args.script {
        Some(path) => ScriptedInput::from_file(path)?,
        None => ScriptedInput::default(),
    };
    info!(commands = script.len(), tier = %args.difficulty, "script loaded");

    let mut game = Scavenger::new(LocalLedger::new(args.energy), table, Box::new(dice))?;
    if !game.start_run(args.difficulty) {
        warn!(
            energy = args.energy,
            cost = game.table().get(args.difficulty).energy_cost,
            "run not started"
        );
        return Ok(());
    }
    if args.frames {
        print_frame(&game);
    }

    while game.phase() == Phase::Playing {
        match script.next_command() {
            Some(Command::Step(direction)) => {
                if game.step(direction) && args.frames {
                    print_frame(&game);
                }
            }
            Some(Command::Abandon) => {
                game.abandon_run();
            }
            None => {
                info!("script exhausted, abandoning run");
                game.abandon_run();
            }
        }
    }

    if let Some(summary) = game.summary() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary, game.backend());
        }
    }
    Ok(())
}

fn print_frame(game: &Scavenger<LocalLedger>) {
    println!("{}", hud_line(game));
    for line in frame_lines(game) {
        println!("{line}");
    }
    println!();
}

fn print_summary(summary: &RunSummary, ledger: &LocalLedger) {
    let result = summary
        .result
        .map(|result| result.as_str())
        .unwrap_or("unfinished");
    println!("Difficulty: {}", summary.difficulty);
    println!("Result:     {result}");
    println!(
        "Turns:      {} ({}/{} moves left)",
        summary.turns, summary.moves_remaining, summary.move_budget
    );
    println!("Fragments:  {}", summary.data_fragments);
    for item in &summary.loot {
        println!("  {:<16} {:>4}  {}", item.name, item.value, item.kind.as_str());
    }
    println!("Banked:     {} GC", summary.banked_total);
    println!("Balance:    {} GC, {} energy left", ledger.balance(), ledger.energy());
}
