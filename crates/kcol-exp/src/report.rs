use std::fs;
use std::path::Path;

use csv::Writer;
use kcol_core::errors::{ErrorInfo, KcolError};
use serde::{Deserialize, Serialize};

/// Column names of the per-policy report.
pub const REPORT_HEADER: [&str; 10] = [
    "TestID",
    "K",
    "Node_Num",
    "Density",
    "MaxDegree",
    "Distribution",
    "Is-Colored-Correctly",
    "K-Correctness",
    "Duration",
    "Test_Type",
];

/// One (parameter combination, policy) result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Sequential id in combination-major, policy-minor order.
    pub test_id: usize,
    /// Planted color count.
    pub k: usize,
    /// Requested node count.
    pub num_nodes: usize,
    /// Edge density.
    pub density: f64,
    /// Degree cap, `None` when unbounded.
    pub max_degree: Option<usize>,
    /// Class size distribution; always `Uniform` for now.
    pub distribution: String,
    /// True when every trial verified.
    pub correct: bool,
    /// Mean colors used minus `k`.
    pub k_correctness: f64,
    /// Mean coloring time in nanoseconds.
    pub duration_ns: u64,
    /// Policy name.
    pub test_type: String,
}

impl ReportRow {
    /// Formats the row in [`REPORT_HEADER`] column order.
    pub fn to_record(&self) -> [String; 10] {
        [
            self.test_id.to_string(),
            self.k.to_string(),
            self.num_nodes.to_string(),
            self.density.to_string(),
            self.max_degree
                .map_or_else(|| "unbounded".to_string(), |cap| cap.to_string()),
            self.distribution.clone(),
            self.correct.to_string(),
            self.k_correctness.to_string(),
            self.duration_ns.to_string(),
            self.test_type.clone(),
        ]
    }
}

/// Writes `rows` as CSV to `path`, creating parent directories and truncating
/// any previous file.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<(), KcolError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| KcolError::io("report-parent", parent, err))?;
    }
    let mut writer = Writer::from_path(path).map_err(|err| wrap_csv("report-open", path, err))?;
    writer
        .write_record(REPORT_HEADER)
        .map_err(|err| wrap_csv("report-write-header", path, err))?;
    for row in rows {
        writer
            .write_record(row.to_record())
            .map_err(|err| wrap_csv("report-write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| KcolError::io("report-flush", path, err))
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> KcolError {
    KcolError::Io(
        ErrorInfo::new(code, "failed to write CSV report")
            .with_context("path", path.display())
            .with_hint(err.to_string()),
    )
}
