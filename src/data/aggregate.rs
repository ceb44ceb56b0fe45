use std::collections::{BTreeMap, BTreeSet};

use super::loader::AGE_MAX;
use super::model::{PassengerRecord, SurvivalLabel};

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round half-up to one decimal place.
///
/// Applied exactly once, when a percentage is prepared for display. Upstream
/// values stay unrounded so consumers never accumulate rounding error.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Overall survival rate
// ---------------------------------------------------------------------------

/// Headline numbers for the metric cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalSummary {
    pub count: usize,
    pub survived: usize,
    /// Percent, rounded half-up to one decimal. Zero when `count` is zero.
    pub rate_percent: f64,
}

/// Overall survival rate of the given rows. An empty slice yields
/// `(0, 0, 0.0)`; the zero-guard keeps NaN out of the UI.
pub fn survival_rate(rows: &[PassengerRecord]) -> SurvivalSummary {
    let count = rows.len();
    let survived = rows.iter().filter(|r| r.survived).count();
    let rate_percent = if count > 0 {
        round1(100.0 * survived as f64 / count as f64)
    } else {
        0.0
    };
    SurvivalSummary {
        count,
        survived,
        rate_percent,
    }
}

// ---------------------------------------------------------------------------
// Grouped survival rate
// ---------------------------------------------------------------------------

/// Survival rate of one group of rows sharing a key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRate<K> {
    pub key: K,
    pub count: usize,
    /// Percent, rounded half-up to one decimal.
    pub rate_percent: f64,
}

/// Mean survival per distinct key, as a percentage, in sorted key order.
/// Groups appear only when at least one row maps to them, so no group ever
/// has a zero count and the per-group division is always defined.
pub fn grouped_survival_rate<K, F>(rows: &[PassengerRecord], key_fn: F) -> Vec<GroupRate<K>>
where
    K: Ord,
    F: Fn(&PassengerRecord) -> K,
{
    let mut groups: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for rec in rows {
        let entry = groups.entry(key_fn(rec)).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += rec.survived as usize;
    }
    groups
        .into_iter()
        .map(|(key, (count, survived))| GroupRate {
            key,
            count,
            rate_percent: round1(100.0 * survived as f64 / count as f64),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

/// The five fixed age intervals: [0,12], (12,18], (18,30], (30,50], (50,120].
/// Boundaries come from the original dashboard and are deliberately not
/// inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    Child,
    Teen,
    YoungAdult,
    MiddleAged,
    Senior,
}

impl AgeBucket {
    /// All buckets in axis order.
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::Teen,
        AgeBucket::YoungAdult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    /// Bucket for an age, or `None` outside [0, [`AGE_MAX`]].
    pub fn from_age(age: f64) -> Option<AgeBucket> {
        if !age.is_finite() || !(0.0..=AGE_MAX).contains(&age) {
            return None;
        }
        Some(match age {
            a if a <= 12.0 => AgeBucket::Child,
            a if a <= 18.0 => AgeBucket::Teen,
            a if a <= 30.0 => AgeBucket::YoungAdult,
            a if a <= 50.0 => AgeBucket::MiddleAged,
            _ => AgeBucket::Senior,
        })
    }

    /// Axis label, matching the original dashboard's bucket names.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Child => "0–12",
            AgeBucket::Teen => "13–18",
            AgeBucket::YoungAdult => "19–30",
            AgeBucket::MiddleAged => "31–50",
            AgeBucket::Senior => "51+",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|b| b == self).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Age × Sex heatmap
// ---------------------------------------------------------------------------

/// Maximum bins on the continuous (unbucketed) age axis.
pub const HEATMAP_MAX_BINS: usize = 20;

/// One heatmap cell: mean survival (unrounded fraction) plus how many rows
/// back it. Cells with no observations are absent from the matrix entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub mean_survived: f64,
    pub count: u64,
}

/// Survival-rate matrix over (age axis × sex). `cells[sex][age]` is `None`
/// when no filtered row lands in that cell, which the chart renders as an
/// empty cell rather than a zero rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapMatrix {
    /// Age-axis labels, in axis order.
    pub age_labels: Vec<String>,
    /// Sexes present in the filtered rows, sorted.
    pub sexes: Vec<String>,
    pub cells: Vec<Vec<Option<HeatmapCell>>>,
}

/// Build the age × sex survival heatmap.
///
/// With `bucketed` the age axis is the five fixed [`AgeBucket`]s in order;
/// otherwise it is up to [`HEATMAP_MAX_BINS`] equal-width bins spanning the
/// observed age range of the filtered rows. Rows with a missing age are left
/// out of the matrix (they still count toward the overall survival rate).
pub fn age_sex_heatmap(rows: &[PassengerRecord], bucketed: bool) -> HeatmapMatrix {
    let aged: Vec<(&PassengerRecord, f64)> = rows
        .iter()
        .filter_map(|r| r.age.map(|a| (r, a)))
        .collect();
    if aged.is_empty() {
        return HeatmapMatrix::default();
    }

    let sexes: Vec<String> = aged
        .iter()
        .map(|(r, _)| r.sex.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let (age_labels, bin_of): (Vec<String>, Box<dyn Fn(f64) -> Option<usize>>) = if bucketed {
        let labels = AgeBucket::ALL.iter().map(|b| b.label().to_string()).collect();
        (labels, Box::new(|a| AgeBucket::from_age(a).map(|b| b.index())))
    } else {
        let min = aged.iter().map(|(_, a)| *a).fold(f64::INFINITY, f64::min);
        let max = aged
            .iter()
            .map(|(_, a)| *a)
            .fold(f64::NEG_INFINITY, f64::max);
        let (edges, width) = equal_width_bins(min, max, HEATMAP_MAX_BINS);
        let n = edges.len();
        let labels = edges
            .iter()
            .map(|&lo| format!("{:.0}–{:.0}", lo, lo + width))
            .collect();
        (
            labels,
            Box::new(move |a| {
                let idx = if width > 0.0 {
                    ((a - min) / width) as usize
                } else {
                    0
                };
                Some(idx.min(n - 1))
            }),
        )
    };

    // (sum of survived, count) per cell, then divide once at the end.
    let mut sums = vec![vec![(0u64, 0u64); age_labels.len()]; sexes.len()];
    for (rec, age) in &aged {
        let Some(age_idx) = bin_of(*age) else {
            continue;
        };
        let sex_idx = sexes.iter().position(|s| s == &rec.sex).unwrap_or(0);
        let cell = &mut sums[sex_idx][age_idx];
        cell.0 += rec.survived as u64;
        cell.1 += 1;
    }

    let cells = sums
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(survived, count)| {
                    (count > 0).then(|| HeatmapCell {
                        mean_survived: survived as f64 / count as f64,
                        count,
                    })
                })
                .collect()
        })
        .collect();

    HeatmapMatrix {
        age_labels,
        sexes,
        cells,
    }
}

/// Equal-width bin starts over [min, max]. A degenerate range (all values
/// equal) collapses to a single bin of zero width.
fn equal_width_bins(min: f64, max: f64, nbins: usize) -> (Vec<f64>, f64) {
    if max <= min {
        return (vec![min], 0.0);
    }
    let width = (max - min) / nbins as f64;
    let edges = (0..nbins).map(|i| min + i as f64 * width).collect();
    (edges, width)
}

// ---------------------------------------------------------------------------
// Age histogram (by survival)
// ---------------------------------------------------------------------------

/// Bins on the age-distribution histogram, matching the original chart.
pub const HISTOGRAM_BINS: usize = 30;

/// Ages binned over their observed range, with one count vector per survival
/// label. Labels with no rows are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinnedAges {
    pub start: f64,
    pub bin_width: f64,
    pub counts: BTreeMap<SurvivalLabel, Vec<u64>>,
}

/// Histogram of ages split by survival outcome. Rows with a missing age are
/// excluded. Empty input produces an empty histogram.
pub fn age_survival_histogram(rows: &[PassengerRecord], nbins: usize) -> BinnedAges {
    let aged: Vec<(&PassengerRecord, f64)> = rows
        .iter()
        .filter_map(|r| r.age.map(|a| (r, a)))
        .collect();
    if aged.is_empty() || nbins == 0 {
        return BinnedAges::default();
    }

    let min = aged.iter().map(|(_, a)| *a).fold(f64::INFINITY, f64::min);
    let max = aged
        .iter()
        .map(|(_, a)| *a)
        .fold(f64::NEG_INFINITY, f64::max);
    let (edges, width) = equal_width_bins(min, max, nbins);
    let n = edges.len();

    let mut counts: BTreeMap<SurvivalLabel, Vec<u64>> = BTreeMap::new();
    for (rec, age) in &aged {
        let idx = if width > 0.0 {
            (((age - min) / width) as usize).min(n - 1)
        } else {
            0
        };
        counts
            .entry(SurvivalLabel::from_survived(rec.survived))
            .or_insert_with(|| vec![0; n])[idx] += 1;
    }

    BinnedAges {
        start: min,
        bin_width: width,
        counts,
    }
}

// ---------------------------------------------------------------------------
// Embarkation-port counts
// ---------------------------------------------------------------------------

/// Row counts per (port, survival label), ordered by port then label. Ports
/// with no filtered rows are simply absent, never zero-filled; rows with a
/// missing port never reach this point (the filter excludes them).
pub fn embarked_survival_counts(rows: &[PassengerRecord]) -> Vec<(String, SurvivalLabel, u64)> {
    let mut counts: BTreeMap<(String, SurvivalLabel), u64> = BTreeMap::new();
    for rec in rows {
        if let Some(port) = &rec.embarked {
            *counts
                .entry((port.clone(), SurvivalLabel::from_survived(rec.survived)))
                .or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((port, label), n)| (port, label, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sex: &str, age: Option<f64>, embarked: Option<&str>, survived: bool) -> PassengerRecord {
        PassengerRecord {
            sex: sex.to_string(),
            pclass: 1,
            age,
            embarked: embarked.map(str::to_string),
            survived,
        }
    }

    #[test]
    fn survival_rate_on_empty_table_is_all_zero() {
        let summary = survival_rate(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.survived, 0);
        assert_eq!(summary.rate_percent, 0.0);
        assert!(summary.rate_percent.is_finite());
    }

    #[test]
    fn survival_rate_rounds_to_one_decimal() {
        // 1 of 3 survived = 33.333…% → 33.3
        let rows = vec![
            rec("f", None, None, true),
            rec("f", None, None, false),
            rec("f", None, None, false),
        ];
        assert_eq!(survival_rate(&rows).rate_percent, 33.3);
    }

    #[test]
    fn group_counts_sum_to_total() {
        let rows = vec![
            rec("female", None, None, true),
            rec("male", None, None, false),
            rec("female", None, None, false),
            rec("male", None, None, true),
            rec("male", None, None, false),
        ];
        let groups = grouped_survival_rate(&rows, |r| r.sex.clone());
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, survival_rate(&rows).count);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "female");
        assert_eq!(groups[0].rate_percent, 50.0);
    }

    #[test]
    fn grouped_rate_on_empty_input_is_empty() {
        assert!(grouped_survival_rate(&[], |r| r.pclass).is_empty());
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(AgeBucket::from_age(0.0), Some(AgeBucket::Child));
        assert_eq!(AgeBucket::from_age(12.0), Some(AgeBucket::Child));
        assert_eq!(AgeBucket::from_age(12.0001), Some(AgeBucket::Teen));
        assert_eq!(AgeBucket::from_age(18.0), Some(AgeBucket::Teen));
        assert_eq!(AgeBucket::from_age(30.0), Some(AgeBucket::YoungAdult));
        assert_eq!(AgeBucket::from_age(50.0), Some(AgeBucket::MiddleAged));
        assert_eq!(AgeBucket::from_age(50.0001), Some(AgeBucket::Senior));
        assert_eq!(AgeBucket::from_age(120.0), Some(AgeBucket::Senior));
        assert_eq!(AgeBucket::from_age(120.5), None);
        assert_eq!(AgeBucket::from_age(-1.0), None);
    }

    #[test]
    fn heatmap_excludes_missing_ages_but_summary_keeps_them() {
        let rows = vec![
            rec("female", Some(10.0), None, true),
            rec("female", None, None, false),
        ];
        let matrix = age_sex_heatmap(&rows, true);
        let total: u64 = matrix
            .cells
            .iter()
            .flatten()
            .flatten()
            .map(|c| c.count)
            .sum();
        assert_eq!(total, 1);
        assert_eq!(survival_rate(&rows).count, 2);
    }

    #[test]
    fn bucketed_heatmap_places_cells_and_leaves_gaps() {
        let rows = vec![
            rec("female", Some(8.0), None, true),
            rec("female", Some(9.0), None, false),
            rec("male", Some(40.0), None, false),
        ];
        let matrix = age_sex_heatmap(&rows, true);
        assert_eq!(matrix.age_labels.len(), 5);
        assert_eq!(matrix.sexes, vec!["female", "male"]);

        let child = matrix.cells[0][0].expect("female 0–12 cell");
        assert_eq!(child.count, 2);
        assert_eq!(child.mean_survived, 0.5);
        // No male children: cell absent, not zero.
        assert!(matrix.cells[1][0].is_none());
        let middle = matrix.cells[1][3].expect("male 31–50 cell");
        assert_eq!(middle.count, 1);
        assert_eq!(middle.mean_survived, 0.0);
    }

    #[test]
    fn continuous_heatmap_spans_observed_range() {
        let rows = vec![
            rec("male", Some(0.0), None, false),
            rec("male", Some(40.0), None, true),
        ];
        let matrix = age_sex_heatmap(&rows, false);
        assert_eq!(matrix.age_labels.len(), HEATMAP_MAX_BINS);
        // Max lands in the last bin.
        assert!(matrix.cells[0][HEATMAP_MAX_BINS - 1].is_some());
        assert!(matrix.cells[0][0].is_some());
    }

    #[test]
    fn heatmap_of_empty_or_ageless_input_is_empty() {
        assert_eq!(age_sex_heatmap(&[], true), HeatmapMatrix::default());
        let rows = vec![rec("male", None, None, false)];
        assert_eq!(age_sex_heatmap(&rows, false), HeatmapMatrix::default());
    }

    #[test]
    fn histogram_counts_match_rows_with_ages() {
        let rows = vec![
            rec("f", Some(5.0), None, true),
            rec("f", Some(25.0), None, true),
            rec("m", Some(60.0), None, false),
            rec("m", None, None, false),
        ];
        let hist = age_survival_histogram(&rows, HISTOGRAM_BINS);
        let survived: u64 = hist.counts[&SurvivalLabel::Survived].iter().sum();
        let died: u64 = hist.counts[&SurvivalLabel::Died].iter().sum();
        assert_eq!(survived, 2);
        assert_eq!(died, 1);
        assert!(hist.bin_width > 0.0);
    }

    #[test]
    fn embarked_counts_total_per_port() {
        let rows = vec![
            rec("f", None, Some("S"), true),
            rec("m", None, Some("S"), false),
            rec("f", None, Some("S"), false),
            rec("f", None, Some("C"), true),
        ];
        let counts = embarked_survival_counts(&rows);
        assert_eq!(
            counts,
            vec![
                ("C".to_string(), SurvivalLabel::Survived, 1),
                ("S".to_string(), SurvivalLabel::Died, 2),
                ("S".to_string(), SurvivalLabel::Survived, 1),
            ]
        );
        let s_total: u64 = counts
            .iter()
            .filter(|(p, _, _)| p == "S")
            .map(|(_, _, n)| n)
            .sum();
        assert_eq!(s_total, 3);
    }

    #[test]
    fn round1_is_half_up() {
        assert_eq!(round1(33.35), 33.4);
        assert_eq!(round1(66.66666), 66.7);
        assert_eq!(round1(0.04), 0.0);
    }
}
