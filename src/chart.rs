//! Chart data preparation: reshape aggregation output into the exact forms
//! the chart widgets draw from. Pure selection/renaming, no statistics.

use crate::data::aggregate::BinnedAges;
use crate::data::model::SurvivalLabel;

// ---------------------------------------------------------------------------
// Age histogram – overlaid series
// ---------------------------------------------------------------------------

/// One overlaid histogram series (one survival outcome).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub label: SurvivalLabel,
    /// (bin center, count) per bin.
    pub bars: Vec<(f64, u64)>,
    pub bar_width: f64,
}

/// Turn binned age counts into one drawable series per survival label.
/// An empty histogram produces no series.
pub fn histogram_series(binned: &BinnedAges) -> Vec<HistogramSeries> {
    // Degenerate single-bin histograms still need a visible bar.
    let bar_width = if binned.bin_width > 0.0 {
        binned.bin_width
    } else {
        1.0
    };
    binned
        .counts
        .iter()
        .map(|(&label, counts)| HistogramSeries {
            label,
            bars: counts
                .iter()
                .enumerate()
                .map(|(i, &n)| (binned.start + (i as f64 + 0.5) * binned.bin_width, n))
                .collect(),
            bar_width,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Embarkation port – grouped bars
// ---------------------------------------------------------------------------

/// Grouped-bar data: one value per port for each survival label, aligned to
/// a shared port axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbarkedBarSeries {
    /// Port axis, sorted; only ports with at least one filtered row appear.
    pub ports: Vec<String>,
    /// (label, count per port). Labels with no rows at all are absent;
    /// within a present label, ports it lacks are zero-filled for alignment.
    pub groups: Vec<(SurvivalLabel, Vec<u64>)>,
}

/// Align per-(port, label) counts to a shared port axis for grouped bars.
pub fn embarked_bar_series(counts: &[(String, SurvivalLabel, u64)]) -> EmbarkedBarSeries {
    let mut ports: Vec<String> = counts.iter().map(|(p, _, _)| p.clone()).collect();
    ports.sort();
    ports.dedup();

    let groups = SurvivalLabel::ALL
        .iter()
        .filter(|&&label| counts.iter().any(|(_, l, _)| *l == label))
        .map(|&label| {
            let values = ports
                .iter()
                .map(|port| {
                    counts
                        .iter()
                        .find(|(p, l, _)| p == port && *l == label)
                        .map(|(_, _, n)| *n)
                        .unwrap_or(0)
                })
                .collect();
            (label, values)
        })
        .collect();

    EmbarkedBarSeries { ports, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::age_survival_histogram;
    use crate::data::model::PassengerRecord;

    fn rec(age: Option<f64>, survived: bool) -> PassengerRecord {
        PassengerRecord {
            sex: "female".to_string(),
            pclass: 1,
            age,
            embarked: Some("S".to_string()),
            survived,
        }
    }

    #[test]
    fn empty_input_produces_empty_structures() {
        assert!(histogram_series(&age_survival_histogram(&[], 30)).is_empty());
        assert_eq!(embarked_bar_series(&[]), EmbarkedBarSeries::default());
    }

    #[test]
    fn histogram_series_preserve_counts() {
        let rows = vec![rec(Some(4.0), true), rec(Some(70.0), false)];
        let series = histogram_series(&age_survival_histogram(&rows, 10));
        assert_eq!(series.len(), 2);
        for s in &series {
            let total: u64 = s.bars.iter().map(|(_, n)| n).sum();
            assert_eq!(total, 1);
            assert_eq!(s.bars.len(), 10);
        }
    }

    #[test]
    fn bar_series_zero_fill_aligns_to_port_axis() {
        let counts = vec![
            ("C".to_string(), SurvivalLabel::Survived, 2),
            ("S".to_string(), SurvivalLabel::Died, 3),
            ("S".to_string(), SurvivalLabel::Survived, 1),
        ];
        let series = embarked_bar_series(&counts);
        assert_eq!(series.ports, vec!["C", "S"]);
        assert_eq!(
            series.groups,
            vec![
                (SurvivalLabel::Died, vec![0, 3]),
                (SurvivalLabel::Survived, vec![2, 1]),
            ]
        );
    }
}
