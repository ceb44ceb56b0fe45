use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{PassengerRecord, PassengerTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Columns the dashboard needs; everything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Sex", "Pclass", "Age", "Embarked", "Survived"];

/// Ages above this are recording errors in the source data and treated as
/// missing. Kept as a constant rather than inferred (the bound comes straight
/// from the original dataset's binning policy).
pub const AGE_MAX: f64 = 120.0;

/// Load failure. Fatal at startup: the source file is static and local, so
/// there is nothing to retry.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load the passenger table from a delimited file with a header row.
///
/// The schema is fixed: `Sex`, `Pclass`, `Age`, `Embarked`, `Survived` must
/// all be present (any other columns are ignored). A malformed value in a
/// nullable column (`Age`, `Embarked`) becomes a missing value; a malformed
/// value in a required column drops that row with a warning.
pub fn load_csv(path: &Path) -> Result<PassengerTable, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataLoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        match parse_row(&raw) {
            Some(rec) => records.push(rec),
            None => log::warn!("skipping row {row_no}: unparseable required field ({raw:?})"),
        }
    }

    Ok(PassengerTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// One CSV row as raw text, mapped by header name. Extra columns in the file
/// (Name, Ticket, Fare, ...) are silently dropped by serde.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Pclass")]
    pclass: String,
    #[serde(rename = "Age")]
    age: Option<String>,
    #[serde(rename = "Embarked")]
    embarked: Option<String>,
    #[serde(rename = "Survived")]
    survived: String,
}

/// Typed view of a raw row. `None` means a required field did not parse and
/// the row cannot participate in filtering or aggregation at all.
fn parse_row(raw: &RawRow) -> Option<PassengerRecord> {
    let sex = raw.sex.trim();
    if sex.is_empty() {
        return None;
    }

    let pclass: u8 = raw.pclass.trim().parse().ok().filter(|&c| c >= 1)?;

    let survived = match raw.survived.trim() {
        "0" => false,
        "1" => true,
        _ => return None,
    };

    Some(PassengerRecord {
        sex: sex.to_string(),
        pclass,
        age: raw.age.as_deref().and_then(parse_age),
        embarked: raw
            .embarked
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        survived,
    })
}

/// Lenient age parsing: anything non-numeric, negative, non-finite or beyond
/// [`AGE_MAX`] counts as missing rather than aborting the load.
fn parse_age(s: &str) -> Option<f64> {
    let age: f64 = s.trim().parse().ok()?;
    if age.is_finite() && (0.0..=AGE_MAX).contains(&age) {
        Some(age)
    } else {
        None
    }
}
