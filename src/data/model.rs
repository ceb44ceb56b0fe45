use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// PassengerRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single passenger (one row of the source CSV).
///
/// `age` and `embarked` are genuinely nullable in the Titanic data; every
/// other field is required and rows without them are dropped at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    /// Passenger sex, e.g. "male" / "female".
    pub sex: String,
    /// Cabin class: 1, 2 or 3.
    pub pclass: u8,
    /// Age in years; `None` when missing or unparseable.
    pub age: Option<f64>,
    /// Embarkation port code ("S", "C", "Q"); `None` when missing.
    pub embarked: Option<String>,
    /// Whether the passenger survived.
    pub survived: bool,
}

// ---------------------------------------------------------------------------
// SurvivalLabel – chart-facing label for the survived flag
// ---------------------------------------------------------------------------

/// Display label for the survival outcome, used as the series key in charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurvivalLabel {
    Died,
    Survived,
}

impl SurvivalLabel {
    /// Both labels in their fixed display order.
    pub const ALL: [SurvivalLabel; 2] = [SurvivalLabel::Died, SurvivalLabel::Survived];

    pub fn from_survived(survived: bool) -> Self {
        if survived {
            SurvivalLabel::Survived
        } else {
            SurvivalLabel::Died
        }
    }
}

impl fmt::Display for SurvivalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurvivalLabel::Died => write!(f, "Died"),
            SurvivalLabel::Survived => write!(f, "Survived"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domains – the filterable value sets observed in the table
// ---------------------------------------------------------------------------

/// Distinct values per filterable column, sorted. Computed once at load time;
/// the table never changes afterwards, so these are cached for the process
/// lifetime and drive the sidebar filter widgets.
#[derive(Debug, Clone, Default)]
pub struct Domains {
    pub sexes: Vec<String>,
    pub classes: Vec<u8>,
    /// Non-missing embarkation ports only; a missing port is never selectable.
    pub ports: Vec<String>,
}

// ---------------------------------------------------------------------------
// PassengerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with its pre-computed filter domains.
#[derive(Debug, Clone)]
pub struct PassengerTable {
    /// All passengers (rows), in source-file order.
    pub records: Vec<PassengerRecord>,
    /// Distinct Sex / Pclass / Embarked values present in `records`.
    pub domains: Domains,
}

impl PassengerTable {
    /// Build the table and derive its filter domains from the loaded rows.
    pub fn from_records(records: Vec<PassengerRecord>) -> Self {
        let mut sexes: BTreeSet<String> = BTreeSet::new();
        let mut classes: BTreeSet<u8> = BTreeSet::new();
        let mut ports: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            sexes.insert(rec.sex.clone());
            classes.insert(rec.pclass);
            if let Some(port) = &rec.embarked {
                ports.insert(port.clone());
            }
        }

        PassengerTable {
            records,
            domains: Domains {
                sexes: sexes.into_iter().collect(),
                classes: classes.into_iter().collect(),
                ports: ports.into_iter().collect(),
            },
        }
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sex: &str, pclass: u8, embarked: Option<&str>) -> PassengerRecord {
        PassengerRecord {
            sex: sex.to_string(),
            pclass,
            age: None,
            embarked: embarked.map(str::to_string),
            survived: false,
        }
    }

    #[test]
    fn domains_are_sorted_and_distinct() {
        let table = PassengerTable::from_records(vec![
            rec("male", 3, Some("S")),
            rec("female", 1, Some("C")),
            rec("male", 1, None),
            rec("female", 3, Some("S")),
        ]);
        assert_eq!(table.domains.sexes, vec!["female", "male"]);
        assert_eq!(table.domains.classes, vec![1, 3]);
        assert_eq!(table.domains.ports, vec!["C", "S"]);
    }

    #[test]
    fn missing_port_not_in_domain() {
        let table = PassengerTable::from_records(vec![rec("male", 2, None)]);
        assert!(table.domains.ports.is_empty());
    }
}
