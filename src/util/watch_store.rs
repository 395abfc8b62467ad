use crate::watchlist::WatchStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Watch list persisted as a JSON array of identifiers.
/// Stored at ~/.local/share/volwatch/volumes.json unless overridden.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("volwatch").join("volumes.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Newline-delimited list read when no JSON store exists yet.
    fn legacy_path(&self) -> PathBuf {
        self.path.with_extension("txt")
    }
}

impl WatchStore for FileStore {
    fn load(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                log::debug!("loading watch list from {}", self.path.display());
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", self.path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let legacy = self.legacy_path();
                match fs::read_to_string(&legacy) {
                    Ok(text) => {
                        log::info!("importing legacy watch list {}", legacy.display());
                        Ok(text.lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(String::from)
                            .collect())
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
                    Err(e) => Err(e).with_context(|| format!("reading {}", legacy.display())),
                }
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn save(&mut self, ids: &[&str]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(ids)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}
