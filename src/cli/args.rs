//! Command-line argument definitions

use crate::config::{ColorOption, OutputFormat as ConfigOutputFormat};
use clap::{Parser, Subcommand, ValueEnum};

/// Keep track of your colleagues' local time
#[derive(Debug, Parser)]
#[command(name = "teamtime", version, about)]
pub struct Cli {
    /// When to colour output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorChoice>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the colleague store in ~/.teamtime
    Init,

    /// Add a new colleague
    Add {
        name: String,
        city: String,
        /// IANA time zone, e.g. Europe/London
        timezone: String,
    },

    /// Remove a colleague by the ID shown in `list`
    Remove {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Show every colleague with city, time zone and local time
    List {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the current local time for a colleague, or `all`
    Check {
        /// Colleague name, or `all`
        query: String,

        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,

        /// Refresh interval in minutes for --watch
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl From<ColorChoice> for ColorOption {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => ColorOption::Auto,
            ColorChoice::Always => ColorOption::Always,
            ColorChoice::Never => ColorOption::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Jsonl,
}

impl From<OutputFormat> for ConfigOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => ConfigOutputFormat::Human,
            OutputFormat::Jsonl => ConfigOutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["teamtime", "add", "Alice", "London", "Europe/London"])
            .unwrap();
        match cli.command {
            Command::Add {
                name,
                city,
                timezone,
            } => {
                assert_eq!(name, "Alice");
                assert_eq!(city, "London");
                assert_eq!(timezone, "Europe/London");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_remove_negative() {
        let cli = Cli::try_parse_from(["teamtime", "remove", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Remove { position: -1 }));
    }

    #[test]
    fn test_parse_check_watch() {
        let cli = Cli::try_parse_from([
            "teamtime", "--color", "never", "check", "all", "--watch", "-i", "5",
        ])
        .unwrap();

        assert_eq!(cli.color, Some(ColorChoice::Never));
        match cli.command {
            Command::Check {
                query,
                watch,
                interval,
                format,
            } => {
                assert_eq!(query, "all");
                assert!(watch);
                assert_eq!(interval, Some(5));
                assert_eq!(format, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["teamtime", "check", "all", "-w", "-i", "0"]).is_err());
    }

    #[test]
    fn test_add_requires_three_args() {
        assert!(Cli::try_parse_from(["teamtime", "add", "Alice", "London"]).is_err());
    }
}
