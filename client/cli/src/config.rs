use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_SKILLS_URL: &str = "http://localhost:18789";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Server root; `/api/v1` is appended by the client.
    pub server_url: Option<String>,
    pub token: Option<String>,
    /// Root of the assistant skills service.
    pub skills_url: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub skills_url: Option<String>,
}

/// Effective connection settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub token: Option<String>,
    pub skills_url: String,
}

impl Config {
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "ainas", "ainas")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overrides win over the file, the file wins over built-in defaults.
    pub fn resolve(&self, overrides: Overrides) -> Settings {
        Settings {
            server_url: overrides
                .server_url
                .or_else(|| self.server_url.clone())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            token: overrides
                .token
                .or_else(|| self.token.clone())
                .filter(|t| !t.trim().is_empty()),
            skills_url: overrides
                .skills_url
                .or_else(|| self.skills_url.clone())
                .unwrap_or_else(|| DEFAULT_SKILLS_URL.to_string()),
        }
    }
}

impl Settings {
    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No access token. Run: ainas configure --token <token>"))
    }
}
