#![forbid(unsafe_code)]

//! Parsing of the optional `~/.teamtime/config.toml`
//!
//! Every key is optional. A missing file yields [`Config::default`].
//!
//! ```toml
//! [output]
//! color = "auto"     # auto | always | never
//! format = "human"   # human | jsonl
//!
//! [watch]
//! interval_minutes = 10
//! ```

use crate::storage::store::APP_DIR;
use serde::Deserialize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration file inside the application folder
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Watch-mode refresh interval used when nothing else is configured
pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}: watch.interval_minutes must be at least 1", path.display())]
    InvalidInterval { path: PathBuf },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

/// `[output]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorOption,
    #[serde(default)]
    pub format: OutputFormat,
}

/// `[watch]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(default = "default_interval")]
    pub interval_minutes: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MINUTES
}

/// When to emit ANSI colour codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorOption {
    /// Resolves the option against the current process environment
    pub fn color_enabled(self) -> bool {
        let no_color = std::env::var("NO_COLOR").ok();
        let term = std::env::var("TERM").ok();
        self.resolve(
            no_color.as_deref(),
            term.as_deref(),
            io::stdout().is_terminal(),
        )
    }

    /// Resolves the option given explicit environment values
    ///
    /// `Auto` enables colour only when `NO_COLOR` is unset or empty, `TERM` is
    /// set to something other than `dumb`, and stdout is a terminal.
    pub fn resolve(self, no_color: Option<&str>, term: Option<&str>, is_terminal: bool) -> bool {
        match self {
            ColorOption::Always => true,
            ColorOption::Never => false,
            ColorOption::Auto => {
                let no_color_set = no_color.is_some_and(|v| !v.is_empty());
                let dumb_term = matches!(term, None | Some("") | Some("dumb"));
                !no_color_set && !dumb_term && is_terminal
            }
        }
    }
}

/// Output format for `list` and one-shot `check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Jsonl,
}

impl Config {
    /// Path of the configuration file for a given home directory
    pub fn path_in(home_dir: &Path) -> PathBuf {
        home_dir.join(APP_DIR).join(CONFIG_FILE_NAME)
    }

    /// Loads configuration from `path`, falling back to defaults if absent
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&content).map_err(|e| match e {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::ZeroInterval => ConfigError::InvalidInterval {
                path: path.to_path_buf(),
            },
        })
    }

    fn parse(content: &str) -> Result<Self, ParseFailure> {
        let config: Config = toml::from_str(content).map_err(ParseFailure::Toml)?;
        if config.watch.interval_minutes == 0 {
            return Err(ParseFailure::ZeroInterval);
        }
        Ok(config)
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    ZeroInterval,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.output.color, ColorOption::Auto);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.watch.interval_minutes, DEFAULT_INTERVAL_MINUTES);
    }

    #[test]
    fn test_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
[output]
color = "never"
format = "jsonl"

[watch]
interval_minutes = 5
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.output.color, ColorOption::Never);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.watch.interval_minutes, 5);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[watch]\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.watch.interval_minutes, DEFAULT_INTERVAL_MINUTES);
        assert_eq!(config.output.color, ColorOption::Auto);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[output]\ncolour = \"always\"\n");

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "[watch]\ninterval_minutes = 0\n");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval { .. }));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_path_in_home() {
        let path = Config::path_in(Path::new("/home/me"));
        assert_eq!(path, Path::new("/home/me/.teamtime/config.toml"));
    }

    #[test]
    fn test_color_resolution() {
        assert!(ColorOption::Always.resolve(Some("1"), None, false));
        assert!(!ColorOption::Never.resolve(None, Some("xterm"), true));

        assert!(ColorOption::Auto.resolve(None, Some("xterm-256color"), true));
        assert!(ColorOption::Auto.resolve(Some(""), Some("xterm"), true));
        assert!(!ColorOption::Auto.resolve(Some("1"), Some("xterm"), true));
        assert!(!ColorOption::Auto.resolve(None, Some("dumb"), true));
        assert!(!ColorOption::Auto.resolve(None, None, true));
        assert!(!ColorOption::Auto.resolve(None, Some("xterm"), false));
    }
}
