use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const EMAIL_COLUMN: &str = "emails";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Could not open {}: {}", path.display(), source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no '{}' column", path.display(), EMAIL_COLUMN)]
    MissingColumn { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct EmailRow {
    emails: Option<String>,
}

/// Read the `emails` column of a CSV file, in file order.
pub fn load_emails<P: AsRef<Path>>(path: P) -> Result<Vec<String>, InputError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |source: csv::Error| InputError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers().map_err(parse_err)?;
    if !headers.iter().any(|h| h == EMAIL_COLUMN) {
        return Err(InputError::MissingColumn {
            path: path.to_path_buf(),
        });
    }

    let mut emails = Vec::new();
    for (index, result) in rdr.deserialize::<EmailRow>().enumerate() {
        let row = result.map_err(parse_err)?;
        match row.emails.filter(|e| !e.is_empty()) {
            Some(email) => emails.push(email),
            // +2: header line and 1-based numbering
            None => warn!(line = index + 2, "skipping row without an email"),
        }
    }

    if emails.is_empty() {
        warn!(path = %path.display(), "Unable to find any records");
    } else {
        info!(count = emails.len(), path = %path.display(), "loaded emails");
    }

    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("input.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_emails_in_order_and_ignores_other_columns() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "name,emails\nAlice, alice@example.com \nBob,bob@example.com\n",
        );
        assert_eq!(
            load_emails(&path).unwrap(),
            vec!["alice@example.com", "bob@example.com"]
        );
    }

    #[test]
    fn blank_cells_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "emails\na@example.com\n\"\"\nb@example.com\n");
        assert_eq!(load_emails(&path).unwrap().len(), 2);
    }

    #[test]
    fn header_only_file_yields_no_emails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "emails\n");
        assert!(load_emails(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_column_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "address\na@example.com\n");
        assert!(matches!(
            load_emails(&path),
            Err(InputError::MissingColumn { .. })
        ));
    }

    #[test]
    fn unreadable_path_fails_fast() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_emails(dir.path().join("absent.csv")),
            Err(InputError::Open { .. })
        ));
    }
}
