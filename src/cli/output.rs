use crate::cli::args::OutputFormat;
use crate::core::broker::HealthStatus;
use crate::domain::config::RelayConfig;
use std::io;

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_health(&self, health: &HealthStatus) -> Result<(), OutputError>;
    fn write_config(&self, config: &RelayConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::RelayError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_health(&self, health: &HealthStatus) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("Status: {}", health.status);
                println!("  OPENAI_API_KEY set: {}", health.api_key_set);
                println!("  CHATKIT_WORKFLOW_ID set: {}", health.workflow_id_set);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(health)?);
            }
        }
        Ok(())
    }

    fn write_config(&self, config: &RelayConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                print!("{}", toml::to_string_pretty(config)?);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        println!("{}", message);
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        eprintln!("Error: {}", error);
        Ok(())
    }
}
