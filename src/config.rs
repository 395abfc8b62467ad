use crate::util::watch_store::FileStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// How often every watched volume is re-polled, in milliseconds
    pub refresh_interval_ms: u64,
    /// Color theme: default, dracula, gruvbox, nord
    pub theme: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the watch list is kept. Empty = ~/.local/share/volwatch/volumes.json
    pub watch_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { refresh_interval_ms: 3000, theme: "default".into() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(e) => {
                log::debug!("using default config: {e:#}");
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("volwatch").join("volwatch.toml"))
    }

    /// Resolved location of the watch list.
    pub fn watch_file(&self) -> Option<PathBuf> {
        if self.storage.watch_file.is_empty() {
            FileStore::default_path()
        } else {
            Some(PathBuf::from(&self.storage.watch_file))
        }
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    parse(&text)
}

fn parse(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# volwatch configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
