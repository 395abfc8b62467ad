use crate::models::volume::{ColorTier, VolumeState};

const MB: f64 = 1_048_576.0;
const GB: f64 = 1_073_741_824.0;
const TB: f64 = 1_099_511_627_776.0;

/// Used share at or above which a volume is drawn in the warning colour.
pub const WARN_PCT: f64 = 90.0;

/// Percentage of the volume in use. Caller guarantees `total > 0`.
pub fn compute_percent(total_bytes: u64, free_bytes: u64) -> f64 {
    (total_bytes - free_bytes) as f64 / total_bytes as f64 * 100.0
}

/// Warning at 90% and above, inclusive.
pub fn color_tier(pct: f64) -> ColorTier {
    if pct >= WARN_PCT { ColorTier::Warning } else { ColorTier::Normal }
}

/// Format a raw byte count with binary multiples: "512.0 MB", "2.0 GB", "3.00 TB"
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < GB      { format!("{:.1} MB", b / MB) }
    else if b < TB { format!("{:.1} GB", b / GB) }
    else           { format!("{:.2} TB", b / TB) }
}

/// Format a percentage with one decimal: "84.5%"
pub fn fmt_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Caption shown above a volume's bar.
pub fn volume_label(id: &str, state: &VolumeState) -> String {
    match state {
        VolumeState::Ready(u) => format!(
            "{}  {} free of {}  ({} used)",
            id,
            format_size(u.avail_bytes),
            format_size(u.total_bytes),
            fmt_pct(u.used_pct),
        ),
        VolumeState::Unreadable => format!("{}  unreadable", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::volume::Usage;

    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    const TIB: u64 = GIB * 1024;

    #[test]
    fn percent_bounds() {
        assert_eq!(compute_percent(500, 0), 100.0);
        assert_eq!(compute_percent(500, 500), 0.0);
        for free in [0, 1, 123, 250, 499, 500] {
            let pct = compute_percent(500, free);
            assert!((0.0..=100.0).contains(&pct), "{pct} out of range");
        }
    }

    #[test]
    fn percent_on_large_volumes() {
        let pct = compute_percent(4 * TIB, TIB);
        assert!((pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn tier_boundary_is_inclusive() {
        assert_eq!(color_tier(89.999), ColorTier::Normal);
        assert_eq!(color_tier(90.0), ColorTier::Warning);
        assert_eq!(color_tier(100.0), ColorTier::Warning);
        assert_eq!(color_tier(0.0), ColorTier::Normal);
    }

    #[test]
    fn size_tiers() {
        assert_eq!(format_size(500 * MIB), "500.0 MB");
        assert_eq!(format_size(2 * GIB), "2.0 GB");
        assert_eq!(format_size(3 * TIB), "3.00 TB");
        assert_eq!(format_size(0), "0.0 MB");
        assert_eq!(format_size(GIB - MIB), "1023.0 MB");
        assert_eq!(format_size(GIB), "1.0 GB");
        assert_eq!(format_size(TIB), "1.00 TB");
    }

    #[test]
    fn labels() {
        let ready = VolumeState::Ready(Usage {
            total_bytes: 2 * GIB,
            free_bytes:  GIB,
            avail_bytes: 512 * MIB,
            used_pct:    50.0,
        });
        assert_eq!(volume_label("/data", &ready), "/data  512.0 MB free of 2.0 GB  (50.0% used)");
        assert_eq!(volume_label("/mnt/usb", &VolumeState::Unreadable), "/mnt/usb  unreadable");
    }
}
