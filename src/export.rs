use crate::draw::Winner;
use crate::error::{RaffleError, Result};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Plain-text results: header, timestamp, then one `#rank name (class)` line
/// per winner.
pub fn render_results(winners: &[Winner], generated_at: &DateTime<Local>) -> String {
    let mut content = String::from("Raffle Results\n");
    content.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    for winner in winners {
        content.push_str(&format!("{}\n", format_winner(winner)));
    }
    content
}

pub fn format_winner(winner: &Winner) -> String {
    format!("#{} {} ({})", winner.rank, winner.name, winner.class)
}

/// `raffle-results-<millis>-<digest>.txt`, so two exports in the same
/// millisecond only collide when their content does too
pub fn results_filename(content: &str, generated_at: &DateTime<Local>) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let short = hex::encode(&digest[..4]);
    format!(
        "raffle-results-{}-{}.txt",
        generated_at.timestamp_millis(),
        short
    )
}

/// Write the winners to a new file in `dir` and return its path
pub fn export_results(
    winners: &[Winner],
    dir: &Path,
    generated_at: &DateTime<Local>,
) -> Result<PathBuf> {
    if winners.is_empty() {
        return Err(RaffleError::NoWinnersToExport);
    }

    let content = render_results(winners, generated_at);
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(results_filename(&content, generated_at));
    fs::write(&path, &content)?;

    info!(path = %path.display(), winners = winners.len(), "results exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn winners() -> Vec<Winner> {
        vec![
            Winner {
                rank: 1,
                participant_id: 4,
                name: "Ada".to_string(),
                class: "5C".to_string(),
            },
            Winner {
                rank: 2,
                participant_id: 9,
                name: "Linus".to_string(),
                class: "N/A".to_string(),
            },
        ]
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_render_results() {
        let text = render_results(&winners(), &fixed_time());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Raffle Results");
        assert_eq!(lines[1], "Generated: 2024-03-14 09:26:53");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "#1 Ada (5C)");
        assert_eq!(lines[4], "#2 Linus (N/A)");
    }

    #[test]
    fn test_filename_shape() {
        let name = results_filename("abc", &fixed_time());
        assert!(name.starts_with("raffle-results-"));
        assert!(name.ends_with(".txt"));
        let digest = name
            .trim_end_matches(".txt")
            .rsplit('-')
            .next()
            .unwrap();
        assert_eq!(digest.len(), 8);
    }

    #[test]
    fn test_export_writes_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("results");
        let path = export_results(&winners(), &out, &fixed_time()).unwrap();

        assert!(path.starts_with(&out));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("#2 Linus (N/A)"));
    }

    #[test]
    fn test_export_without_winners_fails() {
        let tmp = TempDir::new().unwrap();
        let result = export_results(&[], tmp.path(), &fixed_time());
        assert!(matches!(result, Err(RaffleError::NoWinnersToExport)));
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
