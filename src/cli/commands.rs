use crate::cli::args::{Args, Command, ConfigArgs, ConfigCommand, ServeArgs};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::broker::SessionBroker;
use crate::domain::config::RelayConfig;
use crate::domain::error::RelayError;
use crate::infrastructure::config::{environment_summary, load_credentials, ConfigManager};
use crate::infrastructure::http::RelayServer;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::openai::OpenAiSessionClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Execute CLI command
pub async fn execute_command(args: Args) -> Result<(), RelayError> {
    let writer = ConsoleWriter::new(args.output.clone());

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    // Initialize logging
    if !args.quiet {
        setup_logging(&config, args.verbose)?;
    }

    match args.command {
        Command::Serve(serve_args) => execute_serve(serve_args, &config).await,
        Command::Check => {
            writer.write_health(&environment_summary())?;
            Ok(())
        }
        Command::Config(config_args) => {
            execute_config_command(config_args, &writer, &config, &config_manager)
        }
        Command::Version => {
            writer.write_message(&format!("chatkit-relay {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

fn setup_logging(config: &RelayConfig, verbose: bool) -> Result<(), RelayError> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.log_level.as_str()
    };

    init_logging(level).map_err(|e| RelayError::Config {
        message: format!("Failed to initialize logging: {}", e),
    })
}

async fn execute_serve(args: ServeArgs, config: &RelayConfig) -> Result<(), RelayError> {
    // Missing API key is fatal here, before the listener binds.
    let credentials = Arc::new(load_credentials()?);
    if let Some(frontend_url) = &credentials.frontend_url {
        info!("Expecting frontend requests from {}", frontend_url);
    }

    let client = OpenAiSessionClient::new(credentials.api_key.clone(), &config.upstream)?;
    let broker = Arc::new(SessionBroker::new(credentials, Arc::new(client)));

    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| RelayError::Config {
            message: format!("Invalid bind address {}:{}: {}", host, port, e),
        })?;

    RelayServer::new(broker).run(addr).await
}

fn execute_config_command(
    args: ConfigArgs,
    writer: &ConsoleWriter,
    config: &RelayConfig,
    config_manager: &ConfigManager,
) -> Result<(), RelayError> {
    match args.command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            match file {
                Some(path) => {
                    config_manager.load_config_from_path(path.as_ref())?;
                    writer.write_message(&format!("Configuration file '{}' is valid", path))?;
                }
                None => {
                    config_manager.load_config()?;
                    writer.write_message("Configuration is valid")?;
                }
            }
            Ok(())
        }
        ConfigCommand::Init { output } => {
            let target = match output {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            config_manager.init_project_config(&target)?;
            writer.write_message(&format!(
                "Created {}",
                target.join(".chatkit-relay").join("config.toml").display()
            ))?;
            Ok(())
        }
    }
}
