//! Configuration file parsing and validation

pub mod teamtime_toml;

pub use teamtime_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, ConfigError, DEFAULT_INTERVAL_MINUTES, OutputConfig,
    OutputFormat, WatchConfig,
};
