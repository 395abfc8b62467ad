use crate::collectors::VolumeInfoProvider;
use crate::models::volume::{VolumeError, VolumeStats};
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Queries volumes with `statvfs(3)`. Holds no handles between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsProvider;

impl VolumeInfoProvider for StatvfsProvider {
    fn query(&self, id: &str) -> Result<VolumeStats, VolumeError> {
        use nix::sys::statvfs::statvfs;

        let path = Path::new(id);
        if !path.is_dir() {
            return Err(VolumeError::NotReady);
        }
        let stat = statvfs(path)?;

        let frsize = stat.fragment_size() as u64;
        let total_bytes = stat.blocks() as u64 * frsize;
        if total_bytes == 0 {
            return Err(VolumeError::NotReady);
        }

        Ok(VolumeStats {
            total_bytes,
            free_bytes:  stat.blocks_free() as u64 * frsize,
            avail_bytes: stat.blocks_available() as u64 * frsize,
        })
    }
}

/// Resolve the volume root that holds `path`: the deepest mount point
/// containing it, or the filesystem root if the mount table can't be read.
pub fn volume_root(path: &str) -> Result<String> {
    let expanded = expand_home(path);
    let canonical = std::fs::canonicalize(&expanded)
        .with_context(|| format!("cannot resolve {}", expanded.display()))?;

    let mounts = read_mount_points().unwrap_or_else(|e| {
        log::debug!("mount table unavailable: {e:#}");
        Vec::new()
    });
    Ok(root_for(&canonical, &mounts).to_string_lossy().into_owned())
}

/// Longest mount point that is a component-wise prefix of `path`.
pub fn root_for(path: &Path, mounts: &[PathBuf]) -> PathBuf {
    mounts
        .iter()
        .filter(|m| path.starts_with(m))
        .max_by_key(|m| m.components().count())
        .cloned()
        .unwrap_or_else(|| fs_root(path))
}

fn fs_root(path: &Path) -> PathBuf {
    let mut root = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::Prefix(_) | Component::RootDir => root.push(comp.as_os_str()),
            _ => break,
        }
    }
    if root.as_os_str().is_empty() { PathBuf::from("/") } else { root }
}

fn expand_home(path: &str) -> PathBuf {
    let trimmed = path.trim();
    match trimmed.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None       => PathBuf::from(trimmed),
        },
        _ => PathBuf::from(trimmed),
    }
}

fn read_mount_points() -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string("/proc/mounts").context("reading /proc/mounts")?;
    Ok(parse_mount_points(&content))
}

fn parse_mount_points(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(|m| PathBuf::from(unescape_mount(m)))
        .collect()
}

/// /proc/mounts encodes space, tab, newline and backslash as 3-digit octal.
fn unescape_mount(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let oct = &bytes[i + 1..i + 4];
            if oct.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let v = oct.iter().fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                if let Ok(v) = u8::try_from(v) {
                    out.push(v);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
