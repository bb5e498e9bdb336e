use std::collections::HashSet;
use std::ffi::OsString;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Disks, System};
use tracing::{debug, warn};

use super::platform::{self, MountStats, NAMED_LIMITS};
use super::snapshot::{CpuInfo, LimitEntry, MemoryInfo, MountUsage, Snapshot};

pub struct Collector {
    sys: System,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Collector { sys: System::new() }
    }

    /// Runs one full introspection pass and returns a fresh snapshot.
    ///
    /// Individual facilities that are missing or unreadable degrade to
    /// absent sections or omitted mounts; the only error is the total
    /// inability to query anything.
    pub fn collect(&mut self) -> Result<Snapshot> {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();

        let snapshot = Snapshot {
            cpu: self.collect_cpu(),
            memory: self.collect_memory(),
            process_limits: collect_process_limits(),
            filesystem_limits: platform::filesystem_limits(),
            mounts: collect_mounts(),
        };

        if snapshot.is_empty() {
            return Err(eyre!("could not query any OS facility"));
        }
        Ok(snapshot)
    }

    fn collect_cpu(&self) -> CpuInfo {
        CpuInfo {
            physical_cores: System::physical_core_count(),
            logical_cores: self.sys.cpus().len(),
        }
    }

    fn collect_memory(&self) -> Option<MemoryInfo> {
        let total_bytes = self.sys.total_memory();
        // A zero total means the memory facility reported nothing;
        // mark the whole section absent rather than showing zeros.
        if total_bytes == 0 {
            return None;
        }
        Some(MemoryInfo {
            total_bytes,
            available_bytes: self.sys.available_memory(),
            swap_total_bytes: self.sys.total_swap(),
            swap_used_bytes: self.sys.used_swap(),
        })
    }
}

fn collect_process_limits() -> Option<Vec<LimitEntry>> {
    if !platform::resource_limits_supported() {
        return None;
    }
    let mut entries = Vec::with_capacity(NAMED_LIMITS.len());
    for limit in NAMED_LIMITS {
        match platform::limit_entry(limit) {
            Some(entry) => entries.push(entry),
            None => debug!(?limit, "resource limit not readable, skipping"),
        }
    }
    Some(entries)
}

/// Enumerates mounts in the order the OS reports them. One unreadable
/// mount is dropped and the rest survive.
fn collect_mounts() -> Vec<MountUsage> {
    let disks = Disks::new_with_refreshed_list();
    let per_mount_stats = platform::mount_stats_supported();

    let mut seen_devices: HashSet<OsString> = HashSet::new();
    let mut candidates = Vec::new();

    for disk in disks.list() {
        // Skip duplicate views of one device (bind mounts) and
        // zero-sized pseudo-filesystems.
        if !seen_devices.insert(disk.name().to_os_string()) {
            continue;
        }
        if disk.total_space() == 0 {
            continue;
        }

        let mount_point = disk.mount_point();
        let stats = if per_mount_stats {
            platform::mount_stats(mount_point)
        } else {
            // No statvfs on this platform; the enumeration itself is
            // the only source of space numbers, and inodes are absent.
            let total_bytes = disk.total_space();
            let free_bytes = disk.available_space();
            Some(MountStats {
                total_bytes,
                used_bytes: total_bytes.saturating_sub(free_bytes),
                free_bytes,
                inodes: None,
            })
        };
        candidates.push((mount_point.to_string_lossy().into_owned(), stats));
    }

    surviving_mounts(candidates)
}

/// Per-item degradation policy: a mount whose statistics read failed is
/// dropped; survivors keep their enumeration order.
fn surviving_mounts(candidates: Vec<(String, Option<MountStats>)>) -> Vec<MountUsage> {
    candidates
        .into_iter()
        .filter_map(|(mount_point, stats)| match stats {
            Some(stats) => Some(MountUsage {
                mount_point,
                total_bytes: stats.total_bytes,
                used_bytes: stats.used_bytes,
                free_bytes: stats.free_bytes,
                inodes: stats.inodes,
            }),
            None => {
                warn!(mount = %mount_point, "mount statistics unreadable, skipping");
                None
            }
        })
        .collect()
}
