use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use connect_four_search::ai::{Agent, AlphaBetaAgent, RandomAgent};
use connect_four_search::config::AppConfig;
use connect_four_search::game::{GameOutcome, GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Moves typed on stdin
    Human,
    /// Uniformly random legal moves
    Random,
}

/// Play Connect Four against an alpha-beta search opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against an alpha-beta search")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Let the AI make the first move
    #[arg(long)]
    ai_first: bool,

    /// Override the AI's time budget per move, in seconds
    #[arg(long)]
    time_budget: Option<f64>,

    /// Who plays X against the AI
    #[arg(long, value_enum, default_value = "human")]
    opponent: Opponent,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.ai_first {
        config.game.ai_first = true;
    }
    if let Some(budget) = cli.time_budget {
        config.search.time_budget_secs = budget;
    }
    config.validate().context("invalid command line overrides")?;

    let mut ai = AlphaBetaAgent::new(config.search.clone());
    let mut random = RandomAgent::new();
    let mut state = GameState::new(config.game.new_board(), config.game.first_player());

    println!("Welcome to Connect Four!");
    match cli.opponent {
        Opponent::Human => println!("You are X, the AI is O"),
        Opponent::Random => println!("{} plays X, the AI is O", random.name()),
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !state.is_terminal() {
        println!("\n{}\n", state.board());

        let column = match (state.current_player(), cli.opponent) {
            (Player::Human, Opponent::Human) => prompt_column(&state, &mut input)?,
            (Player::Human, Opponent::Random) => {
                let column = random.select_action(&state)?;
                println!("{} plays column {}", random.name(), column);
                column
            }
            (Player::Ai, _) => {
                println!("AI is thinking...");
                let column = ai.select_action(&state)?;
                println!("AI plays column {}", column);
                column
            }
        };

        state.apply_move_mut(column)?;
    }

    println!("\n{}\n", state.board());
    match (state.outcome(), cli.opponent) {
        (GameOutcome::Win(Player::Human), Opponent::Human) => println!("You win!"),
        (GameOutcome::Win(Player::Human), Opponent::Random) => println!("{} wins!", random.name()),
        (GameOutcome::Win(Player::Ai), _) => println!("AI wins..."),
        (GameOutcome::Draw, _) => println!("Draw!"),
        (GameOutcome::InProgress, _) => bail!("game loop ended before the game was over"),
    }

    let timings = ai.timings();
    if let (Some(mean), Some(max)) = (timings.mean(), timings.max()) {
        info!(
            "AI made {} moves: mean {:.3} s, slowest {:.3} s",
            timings.len(),
            mean.as_secs_f64(),
            max.as_secs_f64()
        );
    }

    Ok(())
}

/// Ask for a column until the answer is an integer naming a legal column.
fn prompt_column(state: &GameState, input: &mut impl BufRead) -> Result<usize> {
    let legal = state.legal_actions();
    let last = state.board().columns().saturating_sub(1);

    loop {
        print!("Your turn (X). Choose column [0-{}]: ", last);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }
        match line.trim().parse::<usize>() {
            Ok(column) if legal.contains(&column) => return Ok(column),
            _ => continue,
        }
    }
}
