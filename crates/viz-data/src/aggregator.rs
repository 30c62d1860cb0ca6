//! Aggregates consumed by the three charts.
//!
//! Every function here is a pure transform of an already cleaned [`Series`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use viz_core::models::{CalendarMonth, Series};
use viz_core::stats::BoxStats;

// ── Line ──────────────────────────────────────────────────────────────────────

/// Ordered `(date, value)` pairs for direct plotting. No aggregation.
pub fn line_points(series: &Series) -> Vec<(NaiveDate, f64)> {
    series.iter().map(|r| (r.date, r.value)).collect()
}

// ── MeanAccumulator ───────────────────────────────────────────────────────────

/// Running sum and count for one (year, month) cell.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

// ── MonthlyMeanTable ──────────────────────────────────────────────────────────

/// Mean value per (year, month): one row per year present in the data,
/// twelve columns in calendar order.
///
/// A month without data is `None`, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyMeanTable {
    /// Years ascending; `rows[i]` belongs to `years[i]`.
    pub years: Vec<i32>,
    pub rows: Vec<[Option<f64>; 12]>,
}

impl MonthlyMeanTable {
    pub fn get(&self, year: i32, month: CalendarMonth) -> Option<f64> {
        let idx = self.years.binary_search(&year).ok()?;
        self.rows[idx][month.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Largest mean in the table, `None` when every cell is empty.
    pub fn max_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().flatten())
            .copied()
            .reduce(f64::max)
    }
}

/// Group by (year, calendar month) and average each group.
pub fn monthly_means(series: &Series) -> MonthlyMeanTable {
    // BTreeMap keeps years sorted.
    let mut by_year: BTreeMap<i32, [MeanAccumulator; 12]> = BTreeMap::new();

    for record in series {
        by_year.entry(record.year()).or_default()[record.month().index()].add(record.value);
    }

    let (years, rows) = by_year
        .into_iter()
        .map(|(year, cells)| (year, cells.map(|c| c.mean())))
        .unzip();

    MonthlyMeanTable { years, rows }
}

// ── Year / month labelling ────────────────────────────────────────────────────

/// A cleaned record tagged with the labels used by the distribution charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub year: i32,
    /// Displays as the three-letter abbreviation, e.g. `"Jan"`.
    pub month: CalendarMonth,
}

/// Tag every record with its year and calendar month.
pub fn label_records(series: &Series) -> Vec<LabeledRecord> {
    series
        .iter()
        .map(|r| LabeledRecord {
            date: r.date,
            value: r.value,
            year: r.year(),
            month: r.month(),
        })
        .collect()
}

// ── DistributionGroups ────────────────────────────────────────────────────────

/// Values belonging to one box of a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueGroup<L> {
    pub label: L,
    pub values: Vec<f64>,
}

impl<L> ValueGroup<L> {
    /// Five-number summary and outliers; `None` for an empty group.
    pub fn summary(&self) -> Option<BoxStats> {
        BoxStats::from_values(&self.values)
    }
}

/// Cleaned values grouped by year (trend) and by month (seasonality).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionGroups {
    /// One group per year present, ascending.
    pub by_year: Vec<ValueGroup<i32>>,
    /// Always twelve groups, January → December; months without data have
    /// no values.
    pub by_month: Vec<ValueGroup<CalendarMonth>>,
}

/// Split the labelled records into year and month groups.
pub fn distribution_groups(series: &Series) -> DistributionGroups {
    let labeled = label_records(series);

    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    let mut months: Vec<ValueGroup<CalendarMonth>> = CalendarMonth::ALL
        .iter()
        .map(|m| ValueGroup {
            label: *m,
            values: Vec::new(),
        })
        .collect();

    for record in &labeled {
        years.entry(record.year).or_default().push(record.value);
        months[record.month.index()].values.push(record.value);
    }

    DistributionGroups {
        by_year: years
            .into_iter()
            .map(|(label, values)| ValueGroup { label, values })
            .collect(),
        by_month: months,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use viz_core::models::Record;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Series {
        Series::from_records(points.iter().map(|(d, v)| Record::new(*d, *v)).collect()).unwrap()
    }

    // ── line_points ───────────────────────────────────────────────────────────

    #[test]
    fn test_line_points_is_identity() {
        let s = series(&[(d(2016, 5, 10), 2.0), (d(2016, 5, 9), 1.0)]);
        assert_eq!(
            line_points(&s),
            vec![(d(2016, 5, 9), 1.0), (d(2016, 5, 10), 2.0)]
        );
    }

    // ── monthly_means ─────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_mean_of_two_january_records() {
        let s = series(&[(d(2017, 1, 3), 100.0), (d(2017, 1, 20), 300.0)]);
        let table = monthly_means(&s);

        assert_eq!(table.get(2017, CalendarMonth::January), Some(200.0));
        assert_eq!(table.get(2017, CalendarMonth::February), None);
        assert_eq!(table.years, vec![2017]);
    }

    #[test]
    fn test_monthly_means_years_ascending_and_missing_cells_none() {
        let s = series(&[
            (d(2018, 3, 1), 30.0),
            (d(2016, 12, 31), 10.0),
            (d(2016, 5, 9), 20.0),
            (d(2016, 5, 10), 40.0),
        ]);
        let table = monthly_means(&s);

        assert_eq!(table.years, vec![2016, 2018]);
        assert_eq!(table.get(2016, CalendarMonth::May), Some(30.0));
        assert_eq!(table.get(2016, CalendarMonth::December), Some(10.0));
        assert_eq!(table.get(2018, CalendarMonth::March), Some(30.0));
        assert_eq!(table.get(2017, CalendarMonth::March), None);
        assert_eq!(table.rows[0].iter().filter(|c| c.is_some()).count(), 2);
        assert!(table.rows[0][0].is_none());
    }

    #[test]
    fn test_monthly_means_match_manual_mean() {
        let s = series(&[
            (d(2019, 7, 1), 1.0),
            (d(2019, 7, 2), 2.0),
            (d(2019, 7, 3), 4.0),
            (d(2019, 8, 1), 8.0),
        ]);
        let table = monthly_means(&s);
        let july = table.get(2019, CalendarMonth::July).unwrap();
        assert!((july - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(table.max_value(), Some(8.0));
    }

    #[test]
    fn test_monthly_means_empty() {
        let table = monthly_means(&Series::default());
        assert!(table.is_empty());
        assert_eq!(table.max_value(), None);
    }

    // ── label_records ─────────────────────────────────────────────────────────

    #[test]
    fn test_label_records() {
        let s = series(&[(d(2019, 9, 30), 4.0)]);
        let labeled = label_records(&s);
        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].year, 2019);
        assert_eq!(labeled[0].month, CalendarMonth::September);
        assert_eq!(labeled[0].month.to_string(), "Sep");
        assert_eq!(labeled[0].value, 4.0);
    }

    // ── distribution_groups ───────────────────────────────────────────────────

    #[test]
    fn test_distribution_groups_by_year_ascending() {
        let s = series(&[
            (d(2018, 1, 1), 5.0),
            (d(2016, 6, 1), 1.0),
            (d(2016, 7, 1), 2.0),
        ]);
        let groups = distribution_groups(&s);

        let labels: Vec<i32> = groups.by_year.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec![2016, 2018]);
        assert_eq!(groups.by_year[0].values, vec![1.0, 2.0]);
        assert_eq!(groups.by_year[1].values, vec![5.0]);
    }

    #[test]
    fn test_distribution_groups_by_month_calendar_order() {
        let s = series(&[
            (d(2016, 12, 1), 12.0),
            (d(2017, 4, 1), 4.0),
            (d(2017, 12, 1), 13.0),
        ]);
        let groups = distribution_groups(&s);

        assert_eq!(groups.by_month.len(), 12);
        let labels: Vec<&str> = groups.by_month.iter().map(|g| g.label.abbrev()).collect();
        assert_eq!(labels[0], "Jan");
        assert_eq!(labels[3], "Apr");
        assert_eq!(labels[11], "Dec");

        assert_eq!(groups.by_month[3].values, vec![4.0]);
        assert_eq!(groups.by_month[11].values, vec![12.0, 13.0]);
        assert!(groups.by_month[0].values.is_empty());
        assert!(groups.by_month[0].summary().is_none());
    }

    #[test]
    fn test_distribution_groups_follow_record_labels() {
        let s = series(&[
            (d(2016, 1, 31), 1.0),
            (d(2016, 2, 1), 2.0),
            (d(2017, 1, 15), 3.0),
            (d(2017, 2, 28), 4.0),
        ]);
        let labeled = label_records(&s);
        let groups = distribution_groups(&s);

        for (month, group) in CalendarMonth::ALL.iter().zip(&groups.by_month) {
            let expected: Vec<f64> = labeled
                .iter()
                .filter(|r| r.month == *month)
                .map(|r| r.value)
                .collect();
            assert_eq!(group.values, expected, "month {}", month);
        }
        assert_eq!(groups.by_month[0].values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_group_summary_uses_box_stats() {
        let s = series(&[
            (d(2017, 1, 1), 1.0),
            (d(2017, 1, 2), 2.0),
            (d(2017, 1, 3), 3.0),
            (d(2017, 1, 4), 4.0),
            (d(2017, 1, 5), 5.0),
            (d(2017, 1, 6), 100.0),
        ]);
        let groups = distribution_groups(&s);
        let stats = groups.by_year[0].summary().unwrap();
        assert_eq!(stats.count, 6);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(groups.by_month[0].summary().unwrap(), stats);
    }
}
