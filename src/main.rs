// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use composer_quiz::catalog::Catalog;
use composer_quiz::config::QuizConfig;
use composer_quiz::media::{AnyPlayer, CommandPlayer, NullPlayer};
use composer_quiz::quiz::{QuestionGenerator, QuizEngine, StartMode};
use composer_quiz::score::{FileScoreStore, Handoff, ScoreStore};
use composer_quiz::ui::{App, KeyBindings, SessionOutcome, TerminalPresenter};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "composer-quiz")]
#[command(about = "Listen to a clip and name the composer")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "COMPOSER_QUIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog YAML file (overrides the config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Pause after each answer, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Start a new game even if the last run left one unfinished
    #[arg(long)]
    new_game: bool,

    /// Print the catalog and exit
    #[arg(long)]
    list_samples: bool,

    /// Print the stored scores and exit
    #[arg(long)]
    show_scores: bool,

    /// Reset the stored scores and exit
    #[arg(long)]
    reset_scores: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    // The terminal belongs to the UI, so logs go to the file only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "composer_quiz=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<QuizConfig> {
    let mut config = match &args.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };
    if let Some(catalog) = &args.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = args.delay_ms {
        config.reveal_delay_ms = delay;
    }
    Ok(config)
}

fn build_player(config: &QuizConfig) -> AnyPlayer {
    match &config.player {
        Some(player) => AnyPlayer::Command(CommandPlayer::new(
            player.command.clone(),
            player.args.clone(),
        )),
        None => AnyPlayer::Null(NullPlayer::new()),
    }
}

fn list_samples(catalog: &Catalog) {
    println!("{} samples:", catalog.len());
    for sample in catalog.iter() {
        match &sample.title {
            Some(title) => println!("  {:>3}  {:<24} {}", sample.id, sample.composer, title),
            None => println!("  {:>3}  {}", sample.id, sample.composer),
        }
    }
}

fn play(
    config: &QuizConfig,
    catalog: &Catalog,
    store: &mut FileScoreStore,
    handoff: &Handoff,
    new_game: bool,
) -> Result<()> {
    let keys = KeyBindings::with_defaults();
    let mut questions = match config.seed {
        Some(seed) => QuestionGenerator::seeded(seed),
        None => QuestionGenerator::from_entropy(),
    };
    let mut app = App::new(config.frame_rate())?;
    let mut first = true;

    loop {
        // Only the first game of a run can pick up an unfinished one
        let mode = if first {
            match handoff.start_mode(new_game) {
                Ok(mode) => mode,
                Err(e) => {
                    warn!(error = %e, "unreadable hand-off, starting a new game");
                    StartMode::NewGame
                }
            }
        } else {
            StartMode::NewGame
        };
        first = false;

        let mut engine = QuizEngine::new(
            catalog,
            &mut *store,
            &mut questions,
            TerminalPresenter::new(),
            build_player(config),
        )
        .with_reveal_delay(config.reveal_delay());
        engine.start(mode);

        let outcome = app.run(&mut engine, &keys)?;

        if engine.is_ended() {
            handoff.clear()?;
        } else {
            handoff.save(engine.pool())?;
            info!(remaining = engine.pool().len(), "saved unfinished game");
        }
        engine.dispose();

        if outcome == SessionOutcome::Quit {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.log_file)?;

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let mut store = FileScoreStore::open(&config.score_file)
        .with_context(|| format!("Failed to open score file: {:?}", config.score_file))?;
    let handoff = Handoff::new(&config.handoff_file);

    if args.list_samples {
        list_samples(&catalog);
        return Ok(());
    }

    if args.show_scores {
        println!("Current score: {}", store.current());
        println!("Best score:    {}", store.best());
        return Ok(());
    }

    if args.reset_scores {
        store.reset()?;
        handoff.clear()?;
        println!("Scores reset");
        return Ok(());
    }

    info!(samples = catalog.len(), seed = ?config.seed, "starting quiz");
    play(&config, &catalog, &mut store, &handoff, args.new_game)
}
