use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::{MountStats, NamedLimit, PlatformProbes};
use crate::system::snapshot::{FilesystemLimits, InodeUsage, LimitValue};

pub struct Platform;

/// Sentinel translation happens here and nowhere else: `RLIM_INFINITY`
/// must never leave this module as a magnitude.
fn from_raw(raw: libc::rlim_t) -> LimitValue {
    if raw == libc::RLIM_INFINITY {
        LimitValue::Unlimited
    } else {
        LimitValue::Limited(raw as u64)
    }
}

fn pathconf_value(path: &CString, name: libc::c_int) -> Option<u64> {
    // pathconf returns -1 both for errors and for "no fixed limit";
    // either way there is nothing to report.
    let value = unsafe { libc::pathconf(path.as_ptr(), name) };
    u64::try_from(value).ok()
}

impl PlatformProbes for Platform {
    fn resource_limits_supported() -> bool {
        true
    }

    fn resource_limit(limit: NamedLimit) -> Option<(LimitValue, LimitValue)> {
        let resource = match limit {
            NamedLimit::OpenFiles => libc::RLIMIT_NOFILE,
            NamedLimit::UserProcesses => libc::RLIMIT_NPROC,
            NamedLimit::StackSize => libc::RLIMIT_STACK,
            NamedLimit::AddressSpace => libc::RLIMIT_AS,
            NamedLimit::CpuTime => libc::RLIMIT_CPU,
        };
        let mut rl = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        let rc = unsafe { libc::getrlimit(resource as _, &mut rl) };
        if rc != 0 {
            return None;
        }
        Some((from_raw(rl.rlim_cur), from_raw(rl.rlim_max)))
    }

    fn filesystem_limits() -> Option<FilesystemLimits> {
        let root = CString::new("/").ok()?;
        let max_filename_len = pathconf_value(&root, libc::_PC_NAME_MAX);
        let max_path_len = pathconf_value(&root, libc::_PC_PATH_MAX);
        if max_filename_len.is_none() && max_path_len.is_none() {
            return None;
        }
        Some(FilesystemLimits {
            max_filename_len,
            max_path_len,
        })
    }

    fn mount_stats_supported() -> bool {
        true
    }

    fn mount_stats(mount_point: &Path) -> Option<MountStats> {
        let path = CString::new(mount_point.as_os_str().as_bytes()).ok()?;
        let mut vfs: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(path.as_ptr(), &mut vfs) };
        if rc != 0 {
            return None;
        }

        let frsize = vfs.f_frsize as u64;
        let blocks = vfs.f_blocks as u64;
        let bfree = vfs.f_bfree as u64;
        let bavail = vfs.f_bavail as u64;

        // Inode counts of 0 mean the filesystem does not track inodes
        // (e.g. some FUSE mounts); report them as absent.
        let files = vfs.f_files as u64;
        let inodes = (files > 0).then(|| InodeUsage {
            total: files,
            used: files.saturating_sub(vfs.f_ffree as u64),
        });

        Some(MountStats {
            total_bytes: blocks * frsize,
            used_bytes: blocks.saturating_sub(bfree) * frsize,
            free_bytes: bavail * frsize,
            inodes,
        })
    }
}
