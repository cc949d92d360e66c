use anyhow::Result;
use serde::Deserialize;
use std::{fs::File, str::FromStr};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, writer::MakeWriterExt},
    prelude::*,
    Registry,
};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Plain,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

/// Logging settings for the client binaries.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct LogConfig {
    /// Log level, e.g. "info", "debug", "trace".
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Path to the log file, required if output is "file".
    pub file_path: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
            output: LogOutput::Stdout,
            file_path: None,
        }
    }
}

/// Installs the global `tracing` subscriber described by `config`.
pub fn init(config: &LogConfig) -> Result<()> {
    let level = Level::from_str(&config.level).unwrap_or(Level::INFO);
    let registry = Registry::default().with(LevelFilter::from_level(level));

    match config.output {
        LogOutput::File => {
            let path = config.file_path.as_deref().ok_or_else(|| {
                anyhow::anyhow!("log output is 'file' but 'file-path' is not set")
            })?;
            let writer = File::create(path)?.with_max_level(level);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            match config.format {
                LogFormat::Json => registry.with(layer.json()).init(),
                LogFormat::Plain => registry.with(layer).init(),
            }
        }
        LogOutput::Stdout => {
            let writer = std::io::stdout.with_max_level(level);
            let layer = fmt::layer().with_writer(writer);
            match config.format {
                LogFormat::Json => registry.with(layer.json()).init(),
                LogFormat::Plain => registry.with(layer.compact()).init(),
            }
        }
    }

    Ok(())
}
