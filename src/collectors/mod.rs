pub mod statvfs;

use crate::models::volume::{VolumeError, VolumeStats};

/// Source of total/free byte counts for a volume, queried fresh on each poll.
pub trait VolumeInfoProvider {
    fn query(&self, id: &str) -> Result<VolumeStats, VolumeError>;
}
