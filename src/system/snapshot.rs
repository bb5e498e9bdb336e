/// A resource-limit value as exposed by the data model.
///
/// The platform layer translates the OS "unlimited" sentinel
/// (`RLIM_INFINITY` on POSIX) into [`LimitValue::Unlimited`] before it
/// reaches this type; downstream code never sees the raw sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitValue {
    Limited(u64),
    Unlimited,
}

impl LimitValue {
    /// True unless both sides are concrete and soft exceeds hard.
    /// `Unlimited` imposes no constraint on the comparison.
    pub fn respects_hard_bound(self, hard: LimitValue) -> bool {
        match (self, hard) {
            (LimitValue::Limited(soft), LimitValue::Limited(hard)) => soft <= hard,
            _ => true,
        }
    }
}

/// Selects how a limit magnitude is formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitUnit {
    Count,
    Bytes,
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitEntry {
    pub name: &'static str,
    pub soft: LimitValue,
    pub hard: LimitValue,
    pub unit: LimitUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuInfo {
    /// Physical core count; some platforms cannot report it.
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
}

/// Path constants reported by pathconf for the filesystem root. Either
/// constant can be independently unreported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesystemLimits {
    pub max_filename_len: Option<u64>,
    pub max_path_len: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InodeUsage {
    pub total: u64,
    pub used: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountUsage {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    /// Inode statistics come from statvfs and are absent on platforms
    /// without it (Windows).
    pub inodes: Option<InodeUsage>,
}

/// One immutable, point-in-time result of the introspection pass.
///
/// `None` for a section means the facility is unavailable on this
/// platform, which is distinct from a present-but-empty section
/// (`mounts` may legitimately be an empty list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub cpu: CpuInfo,
    pub memory: Option<MemoryInfo>,
    pub process_limits: Option<Vec<LimitEntry>>,
    pub filesystem_limits: Option<FilesystemLimits>,
    pub mounts: Vec<MountUsage>,
}

impl Snapshot {
    /// A snapshot with no usable data in any section. Collection treats
    /// this as a fatal condition rather than returning it.
    pub fn is_empty(&self) -> bool {
        self.cpu.logical_cores == 0
            && self.cpu.physical_cores.is_none()
            && self.memory.is_none()
            && self.process_limits.is_none()
            && self.filesystem_limits.is_none()
            && self.mounts.is_empty()
    }
}
