use crate::config::{Config, ConfigManager};
use crate::error::Result;
use std::io::{self, Write};

pub async fn run_setup() -> Result<()> {
    println!("\n🎟  Raffle Setup\n");

    let config_manager = ConfigManager::new()?;
    let config_path = config_manager.get_config_path();

    if config_manager.exists() {
        print!(
            "A configuration already exists at {}. Overwrite with defaults? [y/N]: ",
            config_path.display()
        );
        io::stdout().flush()?;

        let mut response = String::with_capacity(16);
        io::stdin().read_line(&mut response)?;
        if !response.trim().eq_ignore_ascii_case("y") {
            println!("Setup cancelled.\n");
            return Ok(());
        }
    }

    config_manager.save(&Config::default())?;
    println!("✓ Configuration written to {}", config_path.display());

    println!("\nSetup complete! 🎉");
    println!("\nNext steps:");
    println!("  1. Edit the config to change draw defaults or the export directory");
    println!("  2. Run 'raffle' to open the raffle, or 'raffle draw <file>' to draw directly\n");

    Ok(())
}
