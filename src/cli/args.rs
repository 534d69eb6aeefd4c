use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Command line arguments for the ChatKit relay
#[derive(Parser, Debug)]
#[command(
    name = "chatkit-relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "ChatKit session relay backend",
    long_about = "A minimal backend relay that keeps the OpenAI API key server-side, creates ChatKit sessions on behalf of a frontend widget, and hands the resulting client secret back to the caller."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay HTTP server
    Serve(ServeArgs),
    /// Report credential and configuration presence without serving
    Check,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

/// Server arguments
#[derive(ClapArgs, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides the configuration file)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides the configuration file)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<String>,
    },
    /// Create default project configuration
    Init {
        /// Directory to place .chatkit-relay/config.toml in
        #[arg(long)]
        output: Option<String>,
    },
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
