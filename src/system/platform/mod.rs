use std::path::Path;

use super::snapshot::{FilesystemLimits, InodeUsage, LimitEntry, LimitValue};

/// Space and inode statistics for one mount point, as read from the
/// platform (statvfs on Unix).
#[derive(Clone, Copy, Debug)]
pub struct MountStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub inodes: Option<InodeUsage>,
}

pub trait PlatformProbes {
    /// Capability probe: whether POSIX resource limits exist here at all.
    /// Computed from the target, not from a failed query.
    fn resource_limits_supported() -> bool;
    fn resource_limit(
        limit: NamedLimit,
    ) -> Option<(LimitValue, LimitValue)>;
    fn filesystem_limits() -> Option<FilesystemLimits>;
    /// Whether per-mount statistics come from a platform facility that
    /// can fail per mount. When false, callers fall back to the space
    /// numbers the mount enumeration itself provides.
    fn mount_stats_supported() -> bool;
    fn mount_stats(mount_point: &Path) -> Option<MountStats>;
}

/// The five resource limits this tool reports, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedLimit {
    OpenFiles,
    UserProcesses,
    StackSize,
    AddressSpace,
    CpuTime,
}

pub const NAMED_LIMITS: [NamedLimit; 5] = [
    NamedLimit::OpenFiles,
    NamedLimit::UserProcesses,
    NamedLimit::StackSize,
    NamedLimit::AddressSpace,
    NamedLimit::CpuTime,
];

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as platform_impl;
#[cfg(windows)]
use windows as platform_impl;

pub fn resource_limits_supported() -> bool {
    platform_impl::Platform::resource_limits_supported()
}

pub fn resource_limit(limit: NamedLimit) -> Option<(LimitValue, LimitValue)> {
    platform_impl::Platform::resource_limit(limit)
}

pub fn filesystem_limits() -> Option<FilesystemLimits> {
    platform_impl::Platform::filesystem_limits()
}

pub fn mount_stats_supported() -> bool {
    platform_impl::Platform::mount_stats_supported()
}

pub fn mount_stats(mount_point: &Path) -> Option<MountStats> {
    platform_impl::Platform::mount_stats(mount_point)
}

/// Builds one model entry from a raw platform query, attaching the
/// display name and unit. Returns `None` when the platform cannot read
/// that particular limit.
pub fn limit_entry(limit: NamedLimit) -> Option<LimitEntry> {
    use super::snapshot::LimitUnit;

    let (name, unit) = match limit {
        NamedLimit::OpenFiles => ("Max Open Files", LimitUnit::Count),
        NamedLimit::UserProcesses => ("Max User Processes", LimitUnit::Count),
        NamedLimit::StackSize => ("Stack Size", LimitUnit::Bytes),
        NamedLimit::AddressSpace => ("Address Space", LimitUnit::Bytes),
        NamedLimit::CpuTime => ("CPU Time", LimitUnit::Seconds),
    };
    let (soft, hard) = resource_limit(limit)?;
    Some(LimitEntry {
        name,
        soft,
        hard,
        unit,
    })
}
