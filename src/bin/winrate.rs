use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser, ValueEnum};
use plotters::prelude::*;

use nimbot::{
    Action, Bot, GameError, GameState, WinRate, create_bot_from_spec, label_for_spec, play_match,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = (0x0417_u64 << 32) | 0x5EED_u64;

/// Output format for the generated chart. Currently only PNG is supported.
#[derive(Clone, Debug, ValueEnum)]
enum ChartFormat {
    Png,
}

impl ChartFormat {
    fn from_path(path: &PathBuf) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Play many Nim games between two bots and plot their win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1000)]
    games: usize,

    /// Base RNG seed (bot RNGs and training runs are derived from it)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Starting piles, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_value = "1,3,5,7")]
    piles: Vec<i64>,

    /// Output chart file
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Explicit output format (inferred from --out when omitted)
    #[arg(long = "format", value_enum)]
    format: Option<ChartFormat>,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Player bot specs: e.g., qlearn random (exactly 2)
    bots: Vec<String>,
}

/// Accumulates the time a bot spends choosing moves.
struct Timed {
    inner: Box<dyn Bot>,
    elapsed: Duration,
    decisions: usize,
}

impl Bot for Timed {
    fn select_action(
        &mut self,
        state: &GameState,
        legal_actions: &[Action],
    ) -> Result<Action, GameError> {
        let t0 = Instant::now();
        let action = self.inner.select_action(state, legal_actions);
        self.elapsed += t0.elapsed();
        self.decisions += 1;
        action
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.len() != 2 {
        return Err(format!(
            "expected exactly 2 bot specs (e.g., qlearn random), received {}",
            args.bots.len()
        )
        .into());
    }
    // Disallow human in batch sims; it would block waiting for input.
    if args.bots.iter().any(|s| label_for_spec(s) == "human") {
        return Err("human players are not supported in winrate runs".into());
    }

    let initial = GameState::from_counts(&args.piles)?.piles().to_vec();
    let mut labels: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();
    if labels[0] == labels[1] {
        labels[0].push_str("#0");
        labels[1].push_str("#1");
    }
    let timed = |index: usize| -> Result<Timed, Box<dyn Error>> {
        Ok(Timed {
            inner: create_bot_from_spec(&args.bots[index], index, args.seed, &initial)?,
            elapsed: Duration::ZERO,
            decisions: 0,
        })
    };
    let mut bot_a = timed(0)?;
    let mut bot_b = timed(1)?;

    let mut records = [WinRate::default(); 2];
    let mut total_moves = 0usize;
    for game_idx in 0..args.games {
        // Alternate who moves first each game.
        let outcome = if game_idx % 2 == 0 {
            play_match(&mut bot_a, &mut bot_b, &initial)?
        } else {
            play_match(&mut bot_b, &mut bot_a, &initial)?
        };
        let first_seat = game_idx % 2;
        let winner_seat = (first_seat + outcome.winner.index()) % 2;
        records[winner_seat].record(true);
        records[1 - winner_seat].record(false);
        total_moves += outcome.moves;
    }

    let results: Vec<(String, WinRate)> = labels.iter().cloned().zip(records).collect();
    println!("Win rates over {} games on {initial:?}:", args.games);
    for (label, record) in &results {
        println!(
            "  {label:<12}  {}/{}  ({:.2}% ± {:.2})",
            record.wins,
            record.games,
            record.rate() * 100.0,
            record.standard_error() * 100.0
        );
    }
    if args.games > 0 {
        println!(
            "  average game length: {:.2} moves",
            total_moves as f64 / args.games as f64
        );
    }

    println!("\nDecision time (per bot):");
    for (label, bot) in labels.iter().zip([&bot_a, &bot_b]) {
        let total_ms = bot.elapsed.as_secs_f64() * 1.0e3;
        let avg_ms = if bot.decisions > 0 {
            total_ms / bot.decisions as f64
        } else {
            0.0
        };
        println!(
            "  {label:<12}  decisions: {:<7}  total: {total_ms:.3} ms  avg: {avg_ms:.3} ms",
            bot.decisions
        );
    }

    if !args.no_chart {
        let format = args
            .format
            .or_else(|| ChartFormat::from_path(&args.out))
            .unwrap_or(ChartFormat::Png);
        if !matches!(format, ChartFormat::Png) {
            return Err("only PNG output is supported currently; use --out with .png".into());
        }
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    Ok(())
}

fn render_bar_chart(out: &PathBuf, data: &[(String, WinRate)]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, record)| record.rate() * 100.0).collect();

    let root = BitMapBackend::new(out, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Nim Bot Win Rates", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..100.0)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_else(|| idx.to_string()))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i + 1, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
