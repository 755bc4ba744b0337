use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::finding::Findings;
use crate::settings::OutputTarget;

pub const HEADERS: [&str; 6] = ["Email", "Name", "Type", "Date", "Has Passwords", "URL or ID"];

pub type Row = [String; 6];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not create {}: {}", path.display(), source)]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not write CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not open {}: {}", path.display(), source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub duplicates: usize,
}

/// CSV rows with exact duplicates removed. First occurrence wins.
pub fn unique_rows(findings: &Findings) -> Vec<Row> {
    let mut seen = HashSet::new();
    findings
        .iter()
        .map(|f| f.csv_row())
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the deduplicated report to `target`, creating its directory.
pub fn export(findings: &Findings, target: &OutputTarget) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(&target.dir).map_err(|source| ExportError::CreateDir {
        path: target.dir.clone(),
        source,
    })?;

    let path = target.path();
    let rows = unique_rows(findings);
    write_rows(fs::File::create(&path)?, &rows)?;

    info!(path = %path.display(), rows = rows.len(), "report written");

    Ok(ExportSummary {
        duplicates: findings.len() - rows.len(),
        rows: rows.len(),
        path,
    })
}

/// Hand the file to the desktop's default application.
pub fn open_report(path: &Path) -> Result<(), ExportError> {
    open::that(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::finding::{Finding, FindingKind, PasswordExposure};
    use tempfile::TempDir;

    fn finding(email: &str, name: &str) -> Finding {
        Finding {
            email: email.to_string(),
            name: name.to_string(),
            kind: FindingKind::Breach,
            date: "2019-01-07".to_string(),
            has_passwords: PasswordExposure::Exposed,
            url_or_id: String::new(),
            title: name.to_string(),
        }
    }

    #[test]
    fn duplicates_are_dropped_keeping_first_order() {
        let mut findings = Findings::new();
        findings.push(finding("b@example.com", "Collection1"));
        findings.push(finding("a@example.com", "Adobe"));
        findings.push(finding("b@example.com", "Collection1"));

        let rows = unique_rows(&findings);
        assert_eq!(rows.len(), 2);
        assert!(rows.len() <= findings.len());
        assert_eq!(rows[0][0], "b@example.com");
        assert_eq!(rows[1][1], "Adobe");
    }

    #[test]
    fn rows_differing_only_in_title_collapse() {
        let mut findings = Findings::new();
        let mut other = finding("a@example.com", "Adobe");
        other.title = "Adobe Systems".to_string();
        findings.push(finding("a@example.com", "Adobe"));
        findings.push(other);
        assert_eq!(unique_rows(&findings).len(), 1);
    }

    #[test]
    fn empty_report_still_has_headers() {
        let mut out = Vec::new();
        write_rows(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Email,Name,Type,Date,Has Passwords,URL or ID\n"
        );
    }

    #[test]
    fn export_creates_directory_and_reports_counts() {
        let dir = TempDir::new().unwrap();
        let target = OutputTarget {
            dir: dir.path().join("nested"),
            file_name: "out.csv".to_string(),
            open_after: Some(false),
        };

        let mut findings = Findings::new();
        findings.push(finding("a@example.com", "Adobe"));
        findings.push(finding("a@example.com", "Adobe"));

        let summary = export(&findings, &target).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(
            fs::read_to_string(target.path()).unwrap(),
            "Email,Name,Type,Date,Has Passwords,URL or ID\na@example.com,Adobe,Breach,2019-01-07,True,\n"
        );
    }
}
