use crate::commands::load_roster;
use crate::config::{Config, ConfigManager};
use crate::draw::DrawConfig;
use crate::engine::DrawEngine;
use crate::error::Result;
use crate::export::{export_results, format_winner};
use crate::reveal::RevealAnimation;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct DrawOptions {
    pub file: PathBuf,
    pub winners: Option<usize>,
    pub allow_duplicates: bool,
    pub no_weights: bool,
    pub no_animation: bool,
    pub export: bool,
    pub out: Option<PathBuf>,
}

impl DrawOptions {
    /// Command-line flags layered over the configured defaults
    fn draw_config(&self, config: &Config) -> DrawConfig {
        let defaults = config.draw_config();
        DrawConfig {
            num_winners: self.winners.unwrap_or(defaults.num_winners),
            allow_duplicates: self.allow_duplicates || defaults.allow_duplicates,
            use_weights: !self.no_weights && defaults.use_weights,
        }
    }
}

pub async fn run_draw(options: DrawOptions) -> Result<()> {
    let config = ConfigManager::new()?.load()?;
    let mut engine = DrawEngine::new();

    let summary = load_roster(&options.file, &mut engine)?;
    println!("\n{}", summary.message());

    let draw_config = options.draw_config(&config);
    let mut rng = StdRng::from_entropy();
    let mut session = engine.begin_draw(draw_config)?;

    println!("\n🎟  Drawing {} winner(s)...\n", draw_config.num_winners);

    while let Some(reveal) = engine.reveal_next(&mut session, &mut rng) {
        if options.no_animation {
            if let Some(winner) = engine.settle(&mut session) {
                println!("  {}", format_winner(&winner));
            }
            continue;
        }

        let mut animation =
            RevealAnimation::new(reveal, config.reveal_frames, config.pause_frames());
        let mut settled = false;

        while !animation.is_done() {
            animation.advance(&mut rng);

            if animation.winner_revealed() && !settled {
                settled = true;
                if let Some(winner) = engine.settle(&mut session) {
                    print!("\r\x1b[2K  {}\n", format_winner(&winner));
                }
            } else if !animation.winner_revealed() {
                print!("\r\x1b[2K  🎲 {}", animation.current_name());
            }
            io::stdout().flush()?;

            sleep(config.frame_interval()).await;
        }
    }

    println!("\n✓ {} winner(s) drawn", engine.winners().len());

    if options.export {
        let dir = options.out.clone().unwrap_or_else(|| config.export_dir());
        let path = export_results(engine.winners(), &dir, &Local::now())?;
        println!("✓ Results exported to {}", path.display());
    }

    println!();

    Ok(())
}
