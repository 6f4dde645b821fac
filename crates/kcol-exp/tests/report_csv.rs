use std::fs;

use kcol_exp::{write_report, ReportRow, REPORT_HEADER};
use tempfile::tempdir;

fn row(test_id: usize, max_degree: Option<usize>, k_correctness: f64) -> ReportRow {
    ReportRow {
        test_id,
        k: 3,
        num_nodes: 12,
        density: 0.4,
        max_degree,
        distribution: "Uniform".to_string(),
        correct: true,
        k_correctness,
        duration_ns: 1500,
        test_type: "StrictDecreasing".to_string(),
    }
}

#[test]
fn report_has_header_and_one_line_per_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("report.csv");
    write_report(&path, &[row(0, None, 1.0), row(1, Some(4), 0.5)]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], REPORT_HEADER.join(","));
    assert_eq!(lines[1], "0,3,12,0.4,unbounded,Uniform,true,1,1500,StrictDecreasing");
    assert_eq!(lines[2], "1,3,12,0.4,4,Uniform,true,0.5,1500,StrictDecreasing");
    assert_eq!(lines.len(), 3);
}

#[test]
fn rewriting_truncates_previous_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.csv");
    write_report(&path, &[row(0, None, 0.0), row(1, None, 0.0)]).unwrap();
    write_report(&path, &[row(0, None, 2.0)]).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, REPORT_HEADER);
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][7], "2");
}
