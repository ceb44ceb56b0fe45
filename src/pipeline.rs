//! The dashboard pipeline: filter → aggregate → chart prep, as one pure
//! function. Re-run in full on every filter interaction; the loaded table is
//! never touched, and the filtered rows are computed once and shared by the
//! metric and chart consumers.

use crate::chart::{embarked_bar_series, histogram_series, EmbarkedBarSeries, HistogramSeries};
use crate::data::aggregate::{
    age_sex_heatmap, age_survival_histogram, embarked_survival_counts, grouped_survival_rate,
    survival_rate, GroupRate, HeatmapMatrix, HISTOGRAM_BINS,
};
use crate::data::filter::{apply, FilterSelection};
use crate::data::model::PassengerTable;

/// Headline metrics for the summary column.
#[derive(Debug, Clone, Default)]
pub struct SummaryMetrics {
    pub total: usize,
    pub survived: usize,
    /// Percent, rounded half-up to one decimal; 0 when nothing matches.
    pub rate_percent: f64,
    pub by_sex: Vec<GroupRate<String>>,
    pub by_class: Vec<GroupRate<u8>>,
}

/// Everything the presentation layer draws from, for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: SummaryMetrics,
    pub heatmap: HeatmapMatrix,
    pub age_histogram: Vec<HistogramSeries>,
    pub embarked_bars: EmbarkedBarSeries,
}

/// Run the full pipeline against the immutable loaded table.
///
/// Stateless: given the same table, selection and toggle, the output is
/// identical on every call. An empty filter result degrades to zeroed
/// metrics and empty charts, never an error.
pub fn run(table: &PassengerTable, selection: &FilterSelection, bucket_ages: bool) -> DashboardData {
    let rows = apply(table, selection);

    let overall = survival_rate(&rows);
    let summary = SummaryMetrics {
        total: overall.count,
        survived: overall.survived,
        rate_percent: overall.rate_percent,
        by_sex: grouped_survival_rate(&rows, |r| r.sex.clone()),
        by_class: grouped_survival_rate(&rows, |r| r.pclass),
    };

    DashboardData {
        summary,
        heatmap: age_sex_heatmap(&rows, bucket_ages),
        age_histogram: histogram_series(&age_survival_histogram(&rows, HISTOGRAM_BINS)),
        embarked_bars: embarked_bar_series(&embarked_survival_counts(&rows)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassengerRecord;

    fn rec(
        sex: &str,
        pclass: u8,
        age: Option<f64>,
        embarked: Option<&str>,
        survived: bool,
    ) -> PassengerRecord {
        PassengerRecord {
            sex: sex.to_string(),
            pclass,
            age,
            embarked: embarked.map(str::to_string),
            survived,
        }
    }

    fn four_row_table() -> PassengerTable {
        PassengerTable::from_records(vec![
            rec("female", 1, Some(30.0), Some("S"), true),
            rec("male", 3, Some(22.0), Some("S"), false),
            rec("female", 2, Some(8.0), Some("C"), true),
            rec("male", 1, Some(40.0), None, false),
        ])
    }

    #[test]
    fn end_to_end_female_first_and_second_class() {
        let table = four_row_table();
        let mut selection = FilterSelection::all(&table.domains);
        selection.sexes = ["female".to_string()].into();
        selection.classes = [1, 2].into();

        let data = run(&table, &selection, true);
        assert_eq!(data.summary.total, 2);
        assert_eq!(data.summary.survived, 2);
        assert_eq!(data.summary.rate_percent, 100.0);

        assert_eq!(data.summary.by_sex.len(), 1);
        assert_eq!(data.summary.by_sex[0].key, "female");
        assert_eq!(data.summary.by_sex[0].rate_percent, 100.0);
        assert_eq!(data.summary.by_class.len(), 2);

        // One S row and one C row survive the filter.
        assert_eq!(data.embarked_bars.ports, vec!["C", "S"]);
    }

    #[test]
    fn empty_selection_degrades_cleanly() {
        let table = four_row_table();
        let mut selection = FilterSelection::all(&table.domains);
        selection.sexes.clear();

        let data = run(&table, &selection, false);
        assert_eq!(data.summary.total, 0);
        assert_eq!(data.summary.rate_percent, 0.0);
        assert!(data.summary.by_sex.is_empty());
        assert!(data.heatmap.cells.is_empty());
        assert!(data.age_histogram.is_empty());
        assert!(data.embarked_bars.ports.is_empty());
    }

    #[test]
    fn same_selection_gives_identical_output() {
        let table = four_row_table();
        let selection = FilterSelection::all(&table.domains);
        let a = run(&table, &selection, true);
        let b = run(&table, &selection, true);
        assert_eq!(a.summary.total, b.summary.total);
        assert_eq!(a.heatmap, b.heatmap);
        assert_eq!(a.age_histogram, b.age_histogram);
        assert_eq!(a.embarked_bars, b.embarked_bars);
    }
}
