//! Guess the Word - play a timed word-guessing game in the terminal
//!
//! This is the main entry point for the guess-the-word application.

use std::sync::Arc;
use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use guess_the_word::{
    config::Config,
    presentation::{spawn_line_reader, EventLine, PlayerCommand, ScoreReport, TerminalHaptics},
    state::load_words,
    GameEvent, GameScreen, GameSession, Navigation, ScoreScreen, TokioScheduler, WordPool,
    shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::fmt()
        .with_env_filter(format!("guess_the_word={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let game_config = config.game_config().context("Invalid game configuration")?;
    let words = match &config.words {
        Some(path) => load_words(path)?,
        None => WordPool::default_words(),
    };
    info!(
        "Configuration: countdown={:?}, tick={:?}, panic={}s, words={}",
        game_config.countdown(),
        game_config.tick_interval(),
        game_config.panic_seconds(),
        words.len()
    );

    let scheduler = Arc::new(TokioScheduler::current()?);
    let session = Arc::new(GameSession::with_words(game_config, words, config.seed, scheduler)?);
    let mut events = session.subscribe();
    let mut screen = GameScreen::new(Arc::clone(&session), TerminalHaptics::stderr());
    let mut input = spawn_line_reader(std::io::stdin());
    let mut input_open = true;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    if !config.json {
        println!("Enter (or c) = correct, s = skip, q = quit");
    }
    session.start();
    if !config.json {
        println!("{}", screen.render());
    }

    let navigation: Option<Navigation> = loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    if config.json {
                        println!("{}", serde_json::to_string(&EventLine::new(event.clone()))?);
                    }
                    if let Some(navigation) = screen.handle_event(&event) {
                        break Some(navigation);
                    }
                    let redraw = matches!(
                        event,
                        GameEvent::WordChanged { .. } | GameEvent::SecondsLeftChanged { .. }
                    );
                    if redraw && !config.json {
                        println!("{}", screen.render());
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!("Missed {} game events", missed),
                Err(RecvError::Closed) => break None,
            },

            line = input.recv(), if input_open => match line {
                Some(line) => match PlayerCommand::parse(&line) {
                    Some(PlayerCommand::Correct) => {
                        session.on_correct();
                    }
                    Some(PlayerCommand::Skip) => {
                        session.on_skip();
                    }
                    Some(PlayerCommand::Quit) => {
                        info!("Player quit");
                        break None;
                    }
                    None => warn!("Unknown command: {}", line.trim()),
                },
                None => {
                    info!("Input closed, playing out the countdown");
                    input_open = false;
                }
            },

            result = &mut shutdown => {
                result.context("Failed to install signal handler")?;
                info!("Shutdown signal received");
                break None;
            }
        }
    };

    let snapshot = session.snapshot();
    session.dispose();

    let report = match navigation {
        Some(_) => ScoreReport::finished(&snapshot),
        None => ScoreReport::aborted(&snapshot),
    };
    if config.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        let screen = navigation
            .map(ScoreScreen::from)
            .unwrap_or(ScoreScreen { score: snapshot.score });
        println!("{}", screen);
    }

    info!("Game over, status={}", report.status);
    Ok(())
}
