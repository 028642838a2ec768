mod cli;
mod commands;
mod config;
mod draw;
mod engine;
mod error;
mod export;
mod logging;
mod reveal;
mod roster;
mod tui;

use anyhow::Context;
use cli::{Cli, Commands};
use commands::DrawOptions;
use config::{Config, ConfigManager};
use engine::DrawEngine;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config_manager = ConfigManager::new()?;
    if let Err(e) = logging::init(&config_manager) {
        eprintln!("Warning: {}", e);
    }

    match cli.command {
        None => {
            launch_tui(&config_manager, None).await?;
        }
        Some(Commands::Tui { file }) => {
            launch_tui(&config_manager, file).await?;
        }
        Some(Commands::Draw {
            file,
            winners,
            allow_duplicates,
            no_weights,
            no_animation,
            export,
            out,
        }) => {
            commands::run_draw(DrawOptions {
                file,
                winners,
                allow_duplicates,
                no_weights,
                no_animation,
                export,
                out,
            })
            .await?;
        }
        Some(Commands::Check { file }) => {
            commands::run_check(&file).await?;
        }
        Some(Commands::Setup) => {
            commands::run_setup().await?;
        }
        Some(Commands::Config) => {
            commands::run_config().await?;
        }
    }

    Ok(())
}

async fn launch_tui(config_manager: &ConfigManager, file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config_manager
        .load()
        .with_context(|| format!("reading {}", config_manager.get_config_path().display()))?;

    let mut engine = DrawEngine::new();
    let preload = match &file {
        Some(path) => Some(
            commands::load_roster(path, &mut engine)
                .with_context(|| format!("loading roster {}", path.display()))?,
        ),
        None => None,
    };

    let mut stdout = std::io::stdout();
    crossterm::terminal::enable_raw_mode().context("enabling raw mode")?;
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let terminal = ratatui::Terminal::new(backend)?;

    let (w, h) = crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24));

    let mut app = tui::App::new(engine, &config, w, h);
    if let Some(summary) = preload {
        app.show_message(summary.message());
    }

    let result = run_tui(terminal, &mut app, &config).await;

    crossterm::terminal::disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    result?;

    for winner in app.winners() {
        println!("{}", export::format_winner(winner));
    }

    Ok(())
}

async fn run_tui(
    mut terminal: ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut tui::App,
    config: &Config,
) -> anyhow::Result<()> {
    let mut event_handler = tui::EventHandler::new(config.frame_interval());

    loop {
        terminal.draw(|f| {
            tui::draw(f, app);
        })?;

        if let Some(event) = event_handler.next().await {
            if tui::handlers::EventHandler::handle(&event, app) {
                break;
            }
        } else {
            break;
        }
    }

    event_handler.stop();
    Ok(())
}
