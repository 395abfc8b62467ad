use crate::util::human::{color_tier, compute_percent};
use thiserror::Error;

/// Raw byte counts reported by a volume-info provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStats {
    pub total_bytes: u64,
    /// All free blocks, including those reserved for root.
    pub free_bytes:  u64,
    /// Free blocks usable by an unprivileged user.
    pub avail_bytes: u64,
}

/// Why a volume could not be read on a poll.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("volume not ready")]
    NotReady,
    #[error("statvfs failed: {0}")]
    Stat(#[from] nix::errno::Errno),
}

/// Display tier for a volume's bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    Normal,
    Warning,
    Unreadable,
}

impl ColorTier {
    pub fn label(&self) -> &'static str {
        match self {
            ColorTier::Normal     => "normal",
            ColorTier::Warning    => "warning",
            ColorTier::Unreadable => "unreadable",
        }
    }
}

/// Usage figures for a volume whose last query succeeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    pub total_bytes: u64,
    pub free_bytes:  u64,
    pub avail_bytes: u64,
    pub used_pct:    f64,
}

/// Per-volume state, recomputed in place on every poll and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeState {
    Ready(Usage),
    Unreadable,
}

impl VolumeState {
    /// Turn a provider answer into a display state. Any error, or a zero-sized
    /// volume, collapses to `Unreadable` with no numeric fields.
    pub fn from_query(result: Result<VolumeStats, VolumeError>) -> Self {
        match result {
            Ok(stats) if stats.total_bytes > 0 => VolumeState::Ready(Usage {
                total_bytes: stats.total_bytes,
                free_bytes:  stats.free_bytes.min(stats.total_bytes),
                avail_bytes: stats.avail_bytes.min(stats.total_bytes),
                used_pct:    compute_percent(stats.total_bytes, stats.free_bytes.min(stats.total_bytes)),
            }),
            _ => VolumeState::Unreadable,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, VolumeState::Ready(_))
    }

    pub fn usage(&self) -> Option<&Usage> {
        match self {
            VolumeState::Ready(u)   => Some(u),
            VolumeState::Unreadable => None,
        }
    }

    pub fn tier(&self) -> ColorTier {
        match self {
            VolumeState::Ready(u)   => color_tier(u.used_pct),
            VolumeState::Unreadable => ColorTier::Unreadable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn ready_state_carries_usage() {
        let state = VolumeState::from_query(Ok(VolumeStats {
            total_bytes: 100 * GIB,
            free_bytes:  25 * GIB,
            avail_bytes: 20 * GIB,
        }));
        let usage = state.usage().unwrap();
        assert!(state.is_readable());
        assert_eq!(usage.used_pct, 75.0);
        assert_eq!(usage.avail_bytes, 20 * GIB);
        assert_eq!(state.tier(), ColorTier::Normal);
    }

    #[test]
    fn nearly_full_volume_is_warning() {
        let state = VolumeState::from_query(Ok(VolumeStats {
            total_bytes: 100 * GIB,
            free_bytes:  10 * GIB,
            avail_bytes: 5 * GIB,
        }));
        assert_eq!(state.tier(), ColorTier::Warning);
    }

    #[test]
    fn errors_become_unreadable() {
        assert_eq!(VolumeState::from_query(Err(VolumeError::NotReady)), VolumeState::Unreadable);
        let state = VolumeState::from_query(Err(VolumeError::Stat(nix::errno::Errno::EACCES)));
        assert!(!state.is_readable());
        assert!(state.usage().is_none());
        assert_eq!(state.tier(), ColorTier::Unreadable);
    }

    #[test]
    fn zero_sized_volume_is_unreadable() {
        let state = VolumeState::from_query(Ok(VolumeStats {
            total_bytes: 0,
            free_bytes:  0,
            avail_bytes: 0,
        }));
        assert_eq!(state, VolumeState::Unreadable);
    }
}
