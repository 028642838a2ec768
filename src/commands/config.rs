use crate::config::ConfigManager;
use crate::error::Result;

pub async fn run_config() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    let source = if config_manager.exists() { "file" } else { "defaults" };

    println!("\nRaffle Configuration");
    println!("====================\n");

    println!("Config Path:     {} ({})", config_manager.get_config_path().display(), source);
    println!("Log Path:        {}", config_manager.get_log_path().display());
    println!("Winners:         {}", config.num_winners);
    println!("Duplicates:      {}", yes_no(config.allow_duplicates));
    println!("Use Tickets:     {}", yes_no(config.use_weights));
    println!("Export Dir:      {}", config.export_dir().display());
    println!(
        "Reveal:          {} frames x {} ms, {} ms pause\n",
        config.reveal_frames, config.frame_interval_ms, config.pause_ms
    );

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
