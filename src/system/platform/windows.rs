use std::path::Path;

use super::{MountStats, NamedLimit, PlatformProbes};
use crate::system::snapshot::{FilesystemLimits, LimitValue};

pub struct Platform;

/// Windows has no getrlimit, pathconf, or statvfs. Every probe reports
/// the facility as absent; the collector falls back to the space
/// numbers from mount enumeration and renders the limit sections as
/// unavailable.
impl PlatformProbes for Platform {
    fn resource_limits_supported() -> bool {
        false
    }

    fn resource_limit(_limit: NamedLimit) -> Option<(LimitValue, LimitValue)> {
        None
    }

    fn filesystem_limits() -> Option<FilesystemLimits> {
        None
    }

    fn mount_stats_supported() -> bool {
        false
    }

    fn mount_stats(_mount_point: &Path) -> Option<MountStats> {
        None
    }
}
