use crate::core::cache::DEFAULT_TTL;
use crate::core::dirs::get_config_directory;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Version-control command line tool
    pub tool_path: String,
    /// Paths under this root are in the managed view
    pub managed_root: PathBuf,
    /// Graphical two-way diff viewer
    pub diff_tool: String,
    /// Graphical checkout finder
    pub find_checkouts_tool: String,
    pub cache_ttl_secs: u64,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_path: "cleartool".to_string(),
            managed_root: PathBuf::from("/view"),
            diff_tool: "kdiff3".to_string(),
            find_checkouts_tool: "clearfindco".to_string(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            debug: false,
        }
    }
}

impl Config {
    pub fn load_or_create() -> Result<Self> {
        let config_file = get_config_directory()?.join("config.json");
        Self::load_or_create_at(&config_file)
    }

    /// Load `config_file`, writing the defaults there first if it does not exist
    pub fn load_or_create_at(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            Self::load_from(config_file)
        } else {
            let config = Self::default();
            config.save_to(config_file)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
