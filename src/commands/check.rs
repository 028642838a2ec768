use crate::commands::load_roster;
use crate::engine::DrawEngine;
use crate::error::Result;
use std::path::Path;

pub async fn run_check(file: &Path) -> Result<()> {
    let mut engine = DrawEngine::new();
    let summary = load_roster(file, &mut engine)?;

    println!("\nRoster: {}\n", file.display());
    for participant in engine.participants() {
        println!(
            "  {:<24} {:<10} ×{}",
            participant.name, participant.class, participant.weight
        );
    }

    println!("\n{}", summary.message());
    if summary.skipped > 0 {
        println!("Skipped {} line(s) without a name.", summary.skipped);
    }
    println!(
        "{} participant(s), {} ticket(s) in total.\n",
        engine.roster().len(),
        engine.roster().total_tickets()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_check_reads_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "Ann, 2B, 2\nBen").unwrap();
        assert!(run_check(tmp.path()).await.is_ok());
    }
}
