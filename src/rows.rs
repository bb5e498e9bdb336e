//! Turns a [`Snapshot`] into the flat row sequence the table renders.
//! Pure shaping and formatting; no OS access happens here.

use crate::format::{format_bytes, group_thousands};
use crate::system::snapshot::{LimitUnit, LimitValue, Snapshot};

pub const SECTION_CPU: &str = "CPU";
pub const SECTION_MEMORY: &str = "Memory";
pub const SECTION_PROCESS_LIMITS: &str = "Process Limits";
pub const SECTION_FILESYSTEM_LIMITS: &str = "Filesystem Limits";
pub const SECTION_MOUNTS: &str = "Mounts";

/// Fixed section order, independent of which sections have data.
pub const SECTION_ORDER: [&str; 5] = [
    SECTION_CPU,
    SECTION_MEMORY,
    SECTION_PROCESS_LIMITS,
    SECTION_FILESYSTEM_LIMITS,
    SECTION_MOUNTS,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub section: &'static str,
    pub item: String,
    pub value: String,
}

impl DisplayRow {
    fn new(section: &'static str, item: impl Into<String>, value: impl Into<String>) -> Self {
        DisplayRow {
            section,
            item: item.into(),
            value: value.into(),
        }
    }
}

pub fn format_limit_value(value: LimitValue, unit: LimitUnit) -> String {
    match value {
        LimitValue::Unlimited => "Unlimited".to_string(),
        LimitValue::Limited(v) => match unit {
            LimitUnit::Count => group_thousands(v),
            LimitUnit::Bytes => format_bytes(v),
            LimitUnit::Seconds => format!("{} s", group_thousands(v)),
        },
    }
}

fn unavailable(section: &'static str) -> DisplayRow {
    DisplayRow::new(
        section,
        "(unavailable)",
        "not supported on this platform",
    )
}

/// Builds the complete display row sequence for one snapshot.
///
/// Absent sections yield exactly one explanatory row so the user sees
/// why data is missing; mounts keep the collector's enumeration order.
pub fn build_rows(snapshot: &Snapshot) -> Vec<DisplayRow> {
    let mut rows = Vec::new();

    rows.push(DisplayRow::new(
        SECTION_CPU,
        "Logical Cores",
        group_thousands(snapshot.cpu.logical_cores as u64),
    ));
    rows.push(DisplayRow::new(
        SECTION_CPU,
        "Physical Cores",
        match snapshot.cpu.physical_cores {
            Some(n) => group_thousands(n as u64),
            None => "unknown".to_string(),
        },
    ));

    match &snapshot.memory {
        Some(mem) => {
            rows.push(DisplayRow::new(
                SECTION_MEMORY,
                "Total",
                format_bytes(mem.total_bytes),
            ));
            rows.push(DisplayRow::new(
                SECTION_MEMORY,
                "Available",
                format_bytes(mem.available_bytes),
            ));
            rows.push(DisplayRow::new(
                SECTION_MEMORY,
                "Total Swap",
                format_bytes(mem.swap_total_bytes),
            ));
            rows.push(DisplayRow::new(
                SECTION_MEMORY,
                "Used Swap",
                format_bytes(mem.swap_used_bytes),
            ));
        }
        None => rows.push(unavailable(SECTION_MEMORY)),
    }

    match &snapshot.process_limits {
        Some(limits) if limits.is_empty() => rows.push(DisplayRow::new(
            SECTION_PROCESS_LIMITS,
            "(none)",
            "no readable limits",
        )),
        Some(limits) => {
            for limit in limits {
                rows.push(DisplayRow::new(
                    SECTION_PROCESS_LIMITS,
                    limit.name,
                    format!(
                        "{} / {}",
                        format_limit_value(limit.soft, limit.unit),
                        format_limit_value(limit.hard, limit.unit)
                    ),
                ));
            }
        }
        None => rows.push(unavailable(SECTION_PROCESS_LIMITS)),
    }

    match &snapshot.filesystem_limits {
        Some(fs) => {
            let constant = |v: Option<u64>| match v {
                Some(v) => group_thousands(v),
                None => "unknown".to_string(),
            };
            rows.push(DisplayRow::new(
                SECTION_FILESYSTEM_LIMITS,
                "Max Filename Length",
                constant(fs.max_filename_len),
            ));
            rows.push(DisplayRow::new(
                SECTION_FILESYSTEM_LIMITS,
                "Max Path Length",
                constant(fs.max_path_len),
            ));
        }
        None => rows.push(unavailable(SECTION_FILESYSTEM_LIMITS)),
    }

    if snapshot.mounts.is_empty() {
        rows.push(DisplayRow::new(SECTION_MOUNTS, "(none)", "no readable mounts"));
    } else {
        for mount in &snapshot.mounts {
            rows.push(DisplayRow::new(
                SECTION_MOUNTS,
                mount.mount_point.clone(),
                format!(
                    "{} total, {} used, {} free",
                    format_bytes(mount.total_bytes),
                    format_bytes(mount.used_bytes),
                    format_bytes(mount.free_bytes)
                ),
            ));
            if let Some(inodes) = mount.inodes {
                rows.push(DisplayRow::new(
                    SECTION_MOUNTS,
                    format!("{} inodes", mount.mount_point),
                    format!(
                        "{} total, {} used",
                        group_thousands(inodes.total),
                        group_thousands(inodes.used)
                    ),
                ));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::snapshot::{
        CpuInfo, FilesystemLimits, InodeUsage, LimitEntry, MemoryInfo, MountUsage,
    };

    const GIB: u64 = 1024 * 1024 * 1024;

    fn calibration_snapshot() -> Snapshot {
        Snapshot {
            cpu: CpuInfo {
                physical_cores: Some(4),
                logical_cores: 8,
            },
            memory: Some(MemoryInfo {
                total_bytes: 16 * GIB,
                available_bytes: 4 * GIB,
                swap_total_bytes: 2 * GIB,
                swap_used_bytes: GIB / 2,
            }),
            process_limits: Some(vec![LimitEntry {
                name: "Max Open Files",
                soft: LimitValue::Limited(1024),
                hard: LimitValue::Unlimited,
                unit: LimitUnit::Count,
            }]),
            filesystem_limits: Some(FilesystemLimits {
                max_filename_len: Some(255),
                max_path_len: Some(4096),
            }),
            // "/data" failed its statistics read upstream, so only "/"
            // survives into the snapshot.
            mounts: vec![MountUsage {
                mount_point: "/".to_string(),
                total_bytes: 100 * GIB,
                used_bytes: 40 * GIB,
                free_bytes: 60 * GIB,
                inodes: Some(InodeUsage {
                    total: 6_553_600,
                    used: 812_021,
                }),
            }],
        }
    }

    fn find<'a>(rows: &'a [DisplayRow], section: &str, item: &str) -> &'a DisplayRow {
        rows.iter()
            .find(|r| r.section == section && r.item == item)
            .unwrap_or_else(|| panic!("missing row {section}/{item}"))
    }

    #[test]
    fn calibration_scenario_rows() {
        let rows = build_rows(&calibration_snapshot());

        assert_eq!(find(&rows, "CPU", "Logical Cores").value, "8");
        assert_eq!(find(&rows, "CPU", "Physical Cores").value, "4");
        assert_eq!(find(&rows, "Memory", "Total").value, "16.0 GB");
        assert_eq!(find(&rows, "Memory", "Available").value, "4.0 GB");
        assert_eq!(
            find(&rows, "Process Limits", "Max Open Files").value,
            "1,024 / Unlimited"
        );
        assert_eq!(find(&rows, "Filesystem Limits", "Max Path Length").value, "4,096");

        let mount_rows: Vec<_> = rows.iter().filter(|r| r.section == "Mounts").collect();
        assert_eq!(mount_rows.len(), 2);
        assert_eq!(mount_rows[0].item, "/");
        assert_eq!(
            mount_rows[0].value,
            "100.0 GB total, 40.0 GB used, 60.0 GB free"
        );
        assert_eq!(mount_rows[1].item, "/ inodes");
        assert_eq!(mount_rows[1].value, "6,553,600 total, 812,021 used");
    }

    #[test]
    fn unlimited_formats_to_literal() {
        assert_eq!(
            format_limit_value(LimitValue::Unlimited, LimitUnit::Count),
            "Unlimited"
        );
        assert_eq!(
            format_limit_value(LimitValue::Unlimited, LimitUnit::Bytes),
            "Unlimited"
        );
        assert_eq!(
            format_limit_value(LimitValue::Limited(8 * 1024 * 1024), LimitUnit::Bytes),
            "8.0 MB"
        );
        assert_eq!(
            format_limit_value(LimitValue::Limited(60), LimitUnit::Seconds),
            "60 s"
        );
    }

    #[test]
    fn absent_sections_render_exactly_one_explanatory_row() {
        let mut snapshot = calibration_snapshot();
        snapshot.memory = None;
        snapshot.process_limits = None;
        snapshot.filesystem_limits = None;
        snapshot.mounts.clear();

        let rows = build_rows(&snapshot);

        for section in ["Memory", "Process Limits", "Filesystem Limits"] {
            let matching: Vec<_> = rows.iter().filter(|r| r.section == section).collect();
            assert_eq!(matching.len(), 1, "section {section}");
            assert_eq!(matching[0].item, "(unavailable)");
            assert_eq!(matching[0].value, "not supported on this platform");
        }

        let mounts: Vec<_> = rows.iter().filter(|r| r.section == "Mounts").collect();
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts[0].item, "(none)");
    }

    #[test]
    fn unknown_physical_cores_render_as_text_not_zero() {
        let mut snapshot = calibration_snapshot();
        snapshot.cpu.physical_cores = None;
        let rows = build_rows(&snapshot);
        assert_eq!(find(&rows, "CPU", "Physical Cores").value, "unknown");
    }

    #[test]
    fn section_order_is_fixed_regardless_of_absence() {
        let mut snapshot = calibration_snapshot();
        snapshot.process_limits = None;

        let rows = build_rows(&snapshot);
        let mut seen = Vec::new();
        for row in &rows {
            if seen.last() != Some(&row.section) {
                seen.push(row.section);
            }
        }
        assert_eq!(seen, SECTION_ORDER.to_vec());
    }

    #[test]
    fn mounts_preserve_enumeration_order() {
        let mut snapshot = calibration_snapshot();
        snapshot.mounts = vec![
            MountUsage {
                mount_point: "/zz".to_string(),
                total_bytes: 10,
                used_bytes: 1,
                free_bytes: 9,
                inodes: None,
            },
            MountUsage {
                mount_point: "/aa".to_string(),
                total_bytes: 10,
                used_bytes: 1,
                free_bytes: 9,
                inodes: None,
            },
        ];

        let rows = build_rows(&snapshot);
        let items: Vec<_> = rows
            .iter()
            .filter(|r| r.section == "Mounts")
            .map(|r| r.item.as_str())
            .collect();
        // OS enumeration order, not alphabetical.
        assert_eq!(items, vec!["/zz", "/aa"]);
    }

    #[test]
    fn identical_snapshots_render_identically() {
        let snapshot = calibration_snapshot();
        assert_eq!(build_rows(&snapshot), build_rows(&snapshot.clone()));
    }
}
