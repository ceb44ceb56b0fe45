use std::collections::BTreeSet;

use super::model::{Domains, PassengerRecord, PassengerTable};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// The current selection across all three filter dimensions.
///
/// Each set is a subset of the corresponding domain observed in the loaded
/// table. An empty set along any dimension means nothing is selected there,
/// so the filtered result is empty. That is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub sexes: BTreeSet<String>,
    pub classes: BTreeSet<u8>,
    pub ports: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected: the dashboard's initial state.
    pub fn all(domains: &Domains) -> Self {
        FilterSelection {
            sexes: domains.sexes.iter().cloned().collect(),
            classes: domains.classes.iter().copied().collect(),
            ports: domains.ports.iter().cloned().collect(),
        }
    }
}

/// Return the rows passing all three set-membership filters, in source order.
///
/// A row passes when its sex and class are in the selected sets and its
/// embarkation port is present **and** selected. A missing port is never
/// selectable (it has no filter checkbox), so rows without one are always
/// excluded, matching how the filter domains are built.
///
/// The result is a fresh table: both the summary-metric and the chart
/// consumers read the same copy, and neither can alias the source rows.
pub fn apply(table: &PassengerTable, selection: &FilterSelection) -> Vec<PassengerRecord> {
    table
        .records
        .iter()
        .filter(|rec| {
            selection.sexes.contains(&rec.sex)
                && selection.classes.contains(&rec.pclass)
                && rec
                    .embarked
                    .as_ref()
                    .is_some_and(|port| selection.ports.contains(port))
        })
        .cloned()
        .collect()
}
