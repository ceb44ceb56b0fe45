use crate::color::ColorScheme;
use crate::data::filter::FilterSelection;
use crate::data::model::PassengerTable;
use crate::pipeline::{self, DashboardData};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `table` is immutable after load; everything the widgets mutate is the
/// selection and the two toggles, after which [`AppState::recompute`] re-runs
/// the pipeline and refreshes the cached [`DashboardData`].
pub struct AppState {
    /// Loaded passenger table (read-only for the process lifetime).
    pub table: PassengerTable,

    /// Current filter selections, one set per dimension.
    pub selection: FilterSelection,

    /// Map ages to the five fixed buckets on the heatmap axis.
    pub bucket_ages: bool,

    /// Active heatmap/series color scheme (cosmetic, no recompute needed).
    pub color_scheme: ColorScheme,

    /// Pipeline output for the current selection (cached between frames).
    pub dashboard: DashboardData,
}

impl AppState {
    /// Start with everything selected, bucketing on (the original default).
    pub fn new(table: PassengerTable) -> Self {
        let selection = FilterSelection::all(&table.domains);
        let bucket_ages = true;
        let dashboard = pipeline::run(&table, &selection, bucket_ages);
        Self {
            table,
            selection,
            bucket_ages,
            color_scheme: ColorScheme::Blues,
            dashboard,
        }
    }

    /// Re-run the pipeline after any filter or bucketing change.
    pub fn recompute(&mut self) {
        self.dashboard = pipeline::run(&self.table, &self.selection, self.bucket_ages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassengerRecord;

    fn table() -> PassengerTable {
        PassengerTable::from_records(vec![
            PassengerRecord {
                sex: "female".to_string(),
                pclass: 1,
                age: Some(30.0),
                embarked: Some("S".to_string()),
                survived: true,
            },
            PassengerRecord {
                sex: "male".to_string(),
                pclass: 3,
                age: Some(20.0),
                embarked: Some("C".to_string()),
                survived: false,
            },
        ])
    }

    #[test]
    fn starts_with_everything_selected_and_computed() {
        let state = AppState::new(table());
        assert_eq!(state.selection, FilterSelection::all(&state.table.domains));
        assert!(state.bucket_ages);
        assert_eq!(state.dashboard.summary.total, 2);
    }

    #[test]
    fn recompute_tracks_selection_changes() {
        let mut state = AppState::new(table());
        state.selection.sexes.remove("male");
        state.recompute();
        assert_eq!(state.dashboard.summary.total, 1);
        assert_eq!(state.dashboard.summary.rate_percent, 100.0);
    }
}
