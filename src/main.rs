//! quizboard CLI - play a trivia board in the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use quizboard::display::{self, Command};
use quizboard::{
    BankFile, BoardController, CategorySource, Config, JServiceClient, QuizError, RoundOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "quizboard")]
#[command(version)]
#[command(about = "Trivia board with staged question/answer reveals")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Offline JSON-lines question bank instead of the API
    #[arg(short, long, global = true)]
    bank: Option<PathBuf>,

    /// Seed for category selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Categories per board
    #[arg(long, global = true)]
    categories: Option<usize>,

    /// Clues per category
    #[arg(long, global = true)]
    clues: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deal a board and play it interactively
    Play,

    /// List categories the source offers
    Categories {
        /// Number of categories to list
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Validate configuration file
    Validate,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# quizboard configuration file

[source]
base_url = "http://jservice.io/api"
timeout_secs = 30
candidate_count = 100
candidate_offset = 0
max_concurrent_fetches = 6
# Offline play from a JSON-lines bank instead of the API
# bank = "bank.jsonl"

[board]
categories = 6
clues_per_category = 5
hidden_placeholder = "?"
column_width = 18
"#;
    println!("{example}");
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => Config::default(),
    };

    if let Some(bank) = &cli.bank {
        config.source.bank = Some(bank.clone());
    }
    if let Some(categories) = cli.categories {
        config.board.categories = categories;
    }
    if let Some(clues) = cli.clues {
        config.board.clues_per_category = clues;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_source(config: &Config) -> Result<Arc<dyn CategorySource>> {
    let source: Arc<dyn CategorySource> = match &config.source.bank {
        Some(path) => Arc::new(
            BankFile::load(path)
                .with_context(|| format!("Failed to load question bank {path:?}"))?,
        ),
        None => Arc::new(
            JServiceClient::from_config(&config.source)
                .context("Failed to create question bank client")?,
        ),
    };
    Ok(source)
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg} [{elapsed}]")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_board(controller: &BoardController, config: &Config) -> Result<()> {
    if let Some(board) = controller.store().snapshot()? {
        println!(
            "{}",
            display::render_board(
                &board,
                &config.board.hidden_placeholder,
                config.board.column_width
            )
        );
    }
    Ok(())
}

/// Deal a board, replaying the last pool when there is one.
///
/// Round failures are shown and leave the previous board in play.
async fn deal(controller: &BoardController, config: &Config, restart: bool) -> Result<()> {
    let pb = spinner("Dealing a new board...");
    let outcome = if restart {
        match controller.restart().await {
            Err(QuizError::NoRoundStarted) => {
                controller.new_round(config.board.round_params()).await
            }
            other => other,
        }
    } else {
        controller.new_round(config.board.round_params()).await
    };
    pb.finish_and_clear();

    match outcome {
        Ok(RoundOutcome::Published(board)) => {
            info!(generation = board.generation, "Board dealt");
            print_board(controller, config)?;
            println!(
                "Round {} dealt at {}",
                board.generation,
                board.dealt_at.format("%H:%M:%S UTC")
            );
        }
        Ok(RoundOutcome::Superseded { .. }) => {}
        Err(e) => eprintln!("Could not deal a board: {e}"),
    }
    Ok(())
}

async fn play(config: Config, seed: Option<u64>) -> Result<()> {
    let source = build_source(&config)?;
    let controller = BoardController::from_config(source, &config, seed);
    let engine = controller.engine();

    deal(&controller, &config, false).await?;
    println!("{}\n", display::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match display::parse_command(&line) {
            Command::Address { category, clue } => match engine.address(category, clue) {
                Ok(reveal) => {
                    let Some(text) = reveal.text() else {
                        continue;
                    };
                    print_board(&controller, &config)?;
                    println!("{text}");
                    if controller
                        .store()
                        .snapshot()?
                        .is_some_and(|board| board.is_cleared())
                    {
                        println!("Board cleared! `r` deals a new one.");
                    }
                }
                Err(e) if e.is_ignorable() => {
                    debug!(category, clue, error = %e, "Ignoring address");
                }
                Err(e) => return Err(e.into()),
            },
            Command::Restart => deal(&controller, &config, true).await?,
            Command::Show => print_board(&controller, &config)?,
            Command::Help => println!("{}", display::HELP),
            Command::Quit => break,
            Command::Unknown(input) => {
                println!("Unrecognised input {input:?}; type `help` for commands")
            }
        }
    }

    Ok(())
}

async fn list_categories(config: Config, seed: Option<u64>, count: usize) -> Result<()> {
    let source = build_source(&config)?;
    let controller = BoardController::from_config(source, &config, seed);

    let pb = spinner("Fetching categories...");
    let summaries = controller.list_candidates(count).await;
    pb.finish_and_clear();

    for summary in summaries? {
        let clues = summary
            .clues_count
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!("{:>8}  {:>5}  {}", summary.id, clues, summary.title);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Commands::Example => {
            print_example_config();
        }

        Commands::Validate => {
            let config = load_config(&cli)?;
            info!("Configuration is valid");
            println!("Configuration is valid");
            println!(
                "  Board:   {} categories × {} clues",
                config.board.categories, config.board.clues_per_category
            );
            match &config.source.bank {
                Some(bank) => println!("  Source:  bank file {bank:?}"),
                None => println!(
                    "  Source:  {} ({} candidates)",
                    config.source.base_url, config.source.candidate_count
                ),
            }
        }

        Commands::Categories { count } => {
            let config = load_config(&cli)?;
            list_categories(config, cli.seed, *count).await?;
        }

        Commands::Play => {
            let config = load_config(&cli)?;
            play(config, cli.seed).await?;
        }
    }

    Ok(())
}
