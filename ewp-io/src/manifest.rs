//! `manifest.json` describing an optimizer run

use crate::report::BatchReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated: DateTime<Utc>,
    pub statistics: ManifestStatistics,
    pub roles: BTreeMap<String, RoleEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestStatistics {
    pub total_images: usize,
    pub failed: usize,
    pub skipped: usize,
    pub input_size: u64,
    pub output_size: u64,
    pub compression_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleEntry {
    pub count: usize,
}

impl Manifest {
    pub fn from_report(report: &BatchReport, generated: DateTime<Utc>) -> Self {
        Self {
            generated,
            statistics: ManifestStatistics {
                total_images: report.processed,
                failed: report.failed,
                skipped: report.skipped,
                input_size: report.input_bytes,
                output_size: report.output_bytes,
                compression_ratio: report.compression_ratio(),
            },
            roles: report
                .by_role
                .iter()
                .map(|(role, &count)| (role.clone(), RoleEntry { count }))
                .collect(),
        }
    }

    /// Write to `{output_dir}/manifest.json`
    pub fn write(&self, output_dir: &Path) -> ewp_common::Result<()> {
        ewp_common::config::write_json_atomic(self, &output_dir.join(MANIFEST_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manifest_shape() {
        let mut report = BatchReport {
            processed: 3,
            failed: 1,
            input_bytes: 1000,
            output_bytes: 400,
            ..BatchReport::default()
        };
        report.by_role.insert("hero".to_string(), 2);
        report.by_role.insert("icon".to_string(), 1);

        let generated = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
        let manifest = Manifest::from_report(&report, generated);
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["generated"], "2025-01-15T10:30:00Z");
        assert_eq!(json["statistics"]["total_images"], 3);
        assert_eq!(json["statistics"]["failed"], 1);
        assert_eq!(json["statistics"]["compression_ratio"], "60.0%");
        assert_eq!(json["roles"]["hero"]["count"], 2);
        assert_eq!(json["roles"]["icon"]["count"], 1);
    }
}
