use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "raffle",
    about = "A keyboard-driven weighted raffle drawer for the terminal",
    version = "1.0.0"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive raffle
    #[command(about = "Launch the interactive raffle")]
    Tui {
        /// Roster file to load, one `name, class, tickets` per line
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Draw winners from a roster file
    #[command(about = "Draw winners from a roster file")]
    Draw {
        /// Roster file, one `name, class, tickets` per line
        file: PathBuf,

        /// Number of winners (defaults to the configured value)
        #[arg(short = 'n', long)]
        winners: Option<usize>,

        /// Let the same participant win more than once
        #[arg(long)]
        allow_duplicates: bool,

        /// Give every participant the same chance regardless of tickets
        #[arg(long)]
        no_weights: bool,

        /// Print winners without the spinning reveal
        #[arg(long)]
        no_animation: bool,

        /// Write the results to a text file
        #[arg(long)]
        export: bool,

        /// Directory for the exported file
        #[arg(long, requires = "export")]
        out: Option<PathBuf>,
    },

    /// Parse a roster file and show the resulting participants
    #[command(about = "Check a roster file")]
    Check {
        /// Roster file, one `name, class, tickets` per line
        file: PathBuf,
    },

    /// Write the default configuration file
    #[command(about = "Write the default configuration")]
    Setup,

    /// Show the configuration in effect
    #[command(about = "Show the configuration")]
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["raffle"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_draw_parsing() {
        let cli = Cli::try_parse_from([
            "raffle",
            "draw",
            "class.txt",
            "-n",
            "3",
            "--allow-duplicates",
            "--export",
            "--out",
            "results",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Draw {
                file,
                winners,
                allow_duplicates,
                no_weights,
                export,
                out,
                ..
            }) => {
                assert_eq!(file, PathBuf::from("class.txt"));
                assert_eq!(winners, Some(3));
                assert!(allow_duplicates);
                assert!(!no_weights);
                assert!(export);
                assert_eq!(out, Some(PathBuf::from("results")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_out_requires_export() {
        let result = Cli::try_parse_from(["raffle", "draw", "class.txt", "--out", "results"]);
        assert!(result.is_err());
    }
}
