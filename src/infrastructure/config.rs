use crate::core::broker::HealthStatus;
use crate::domain::{
    config::{Credentials, RelayConfig},
    error::{RelayError, RelayResult},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> RelayResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files.
    ///
    /// Defaults first, then the global file, then a project-local file
    /// found by walking up from the working directory.
    pub fn load_config(&self) -> RelayResult<RelayConfig> {
        let mut config = RelayConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config = self.load_config_from_path(project_path)?;
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> RelayResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| RelayError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("chatkit-relay").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".chatkit-relay").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> RelayResult<RelayConfig> {
        let content = fs::read_to_string(path).map_err(|e| RelayError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| RelayError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &RelayConfig) -> RelayResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| RelayError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| RelayError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path) -> RelayResult<()> {
        let config_dir = path.join(".chatkit-relay");
        let config_file = config_dir.join("config.toml");

        if config_file.exists() {
            return Err(RelayError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        fs::create_dir_all(&config_dir).map_err(|e| RelayError::Config {
            message: format!("Failed to create .chatkit-relay directory: {}", e),
        })?;

        self.save_config_to_path(&config_file, &RelayConfig::default())?;

        Ok(())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

/// Load server-held credentials from the process environment.
///
/// A missing API key is fatal; a missing workflow id or domain public
/// key only warns, matching the startup contract: the process boots but
/// every session request fails until the workflow id is configured.
pub fn load_credentials() -> RelayResult<Credentials> {
    let api_key = non_empty_var("OPENAI_API_KEY").ok_or_else(|| RelayError::Misconfigured {
        message: "OPENAI_API_KEY environment variable is not set".to_string(),
    })?;

    let workflow_id = non_empty_var("CHATKIT_WORKFLOW_ID");
    if workflow_id.is_none() {
        warn!("CHATKIT_WORKFLOW_ID is not set; session requests will fail until it is configured");
    }

    let domain_public_key = non_empty_var("CHATKIT_DOMAIN_PUBLIC_KEY");
    if domain_public_key.is_none() {
        warn!("CHATKIT_DOMAIN_PUBLIC_KEY is not set; the widget may not work on your domain");
    }

    Ok(Credentials {
        api_key,
        workflow_id,
        domain_public_key,
        frontend_url: non_empty_var("FRONTEND_URL"),
    })
}

/// Summarize credential presence without requiring any of them.
///
/// Used by `check` so operators can inspect an environment that would
/// fail `load_credentials`.
pub fn environment_summary() -> HealthStatus {
    HealthStatus {
        status: "ok",
        workflow_id_set: non_empty_var("CHATKIT_WORKFLOW_ID").is_some(),
        api_key_set: non_empty_var("OPENAI_API_KEY").is_some(),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_manager_creation() {
        let _manager = ConfigManager::new().unwrap();
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = RelayConfig::default();
        config.server.port = 9999;
        config.upstream.timeout_secs = 5;

        manager.save_config_to_path(&path, &config).unwrap();
        let loaded = manager.load_config_from_path(&path).unwrap();

        assert_eq!(loaded.server.port, 9999);
        assert_eq!(loaded.upstream.timeout_secs, 5);
        assert_eq!(loaded.upstream.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_init_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path()).unwrap();

        let config_file = temp_dir.path().join(".chatkit-relay").join("config.toml");
        assert!(config_file.exists());

        let loaded = manager.load_config_from_path(&config_file).unwrap();
        assert_eq!(loaded.server.port, 8000);

        // A second init must refuse to clobber the existing file
        assert!(manager.init_project_config(temp_dir.path()).is_err());
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "server = \"not a table\"").unwrap();

        let result = manager.load_config_from_path(&path);
        assert!(matches!(result, Err(RelayError::Config { .. })));
    }
}
