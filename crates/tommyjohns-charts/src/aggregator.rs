//! Aggregations that reshape the surgery table for each chart

use crate::SurgeryTable;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tommyjohns_common::LeagueLevel;
use tracing::{debug, instrument};

/// Trait for deriving one chart's data from the surgery table.
///
/// Implementations are pure: the same table always yields the same output.
pub trait DataAggregator {
    type Output;

    fn aggregate(&self, table: &SurgeryTable) -> Self::Output;
}

/// Surgery counts for one year, split by league level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub majors: u32,
    pub minors: u32,
}

impl YearCount {
    pub const fn total(&self) -> u32 {
        self.majors + self.minors
    }
}

/// Year → (majors, minors) counts, ascending by year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearTable {
    rows: Vec<YearCount>,
}

impl YearTable {
    pub fn rows(&self) -> &[YearCount] {
        &self.rows
    }

    pub fn get(&self, year: i32) -> Option<&YearCount> {
        self.rows
            .binary_search_by_key(&year, |row| row.year)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.iter().map(|row| row.year)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Counts surgeries per year for majors and minors, over the union of years.
#[derive(Debug, Default)]
pub struct YearAggregator;

impl YearAggregator {
    pub fn new() -> Self {
        Self
    }

    fn counts_by_year(table: &SurgeryTable, level: LeagueLevel) -> BTreeMap<i32, u32> {
        let mut counts = BTreeMap::new();
        for date in table.with_level(level).filter_map(|r| r.surgery_date) {
            *counts.entry(date.year()).or_insert(0) += 1;
        }
        counts
    }
}

impl DataAggregator for YearAggregator {
    type Output = YearTable;

    #[instrument(skip_all)]
    fn aggregate(&self, table: &SurgeryTable) -> YearTable {
        let majors = Self::counts_by_year(table, LeagueLevel::Majors);
        let minors = Self::counts_by_year(table, LeagueLevel::Minors);

        let mut joined: BTreeMap<i32, YearCount> = BTreeMap::new();
        for (&year, &count) in &majors {
            joined
                .entry(year)
                .or_insert(YearCount { year, majors: 0, minors: 0 })
                .majors = count;
        }
        for (&year, &count) in &minors {
            joined
                .entry(year)
                .or_insert(YearCount { year, majors: 0, minors: 0 })
                .minors = count;
        }

        let rows: Vec<YearCount> = joined.into_values().collect();
        debug!("Aggregated {} years", rows.len());
        YearTable { rows }
    }
}

/// Collects the ages of major leaguers, skipping rows without an age.
#[derive(Debug, Default)]
pub struct AgeAggregator;

impl AgeAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl DataAggregator for AgeAggregator {
    type Output = Vec<f64>;

    #[instrument(skip_all)]
    fn aggregate(&self, table: &SurgeryTable) -> Vec<f64> {
        let ages: Vec<f64> = table
            .with_level(LeagueLevel::Majors)
            .filter_map(|r| r.age)
            .collect();
        debug!("Aggregated {} ages", ages.len());
        ages
    }
}

/// One point of the recovery time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecoveryPoint {
    pub date: NaiveDate,
    pub months: f64,
}

/// Pairs each major leaguer's surgery date with their recovery time.
///
/// Rows missing either value are dropped; the series is sorted by date and
/// keeps CSV order among equal dates.
#[derive(Debug, Default)]
pub struct RecoveryTimeAggregator;

impl RecoveryTimeAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl DataAggregator for RecoveryTimeAggregator {
    type Output = Vec<RecoveryPoint>;

    #[instrument(skip_all)]
    fn aggregate(&self, table: &SurgeryTable) -> Vec<RecoveryPoint> {
        let mut points: Vec<RecoveryPoint> = table
            .with_level(LeagueLevel::Majors)
            .filter_map(|r| {
                Some(RecoveryPoint {
                    date: r.surgery_date?,
                    months: r.recovery_months?,
                })
            })
            .collect();
        points.sort_by_key(|p| p.date);
        debug!("Aggregated {} recovery points", points.len());
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tommyjohns_common::test_utils::{record, year_example_records};
    use tommyjohns_common::LeagueLevel::{Majors, Minors};

    #[test]
    fn test_year_table_example() {
        let table = SurgeryTable::from_records(year_example_records());
        let years = YearAggregator::new().aggregate(&table);

        assert_eq!(
            years.rows(),
            &[
                YearCount { year: 2010, majors: 1, minors: 1 },
                YearCount { year: 2011, majors: 1, minors: 0 },
            ]
        );
    }

    #[test]
    fn test_year_only_in_minors_is_kept() {
        let table = SurgeryTable::from_records(vec![
            record("1", Some((2005, 5, 1)), Majors, None, None),
            record("2", Some((2003, 2, 1)), Minors, None, None),
            record("3", Some((2003, 9, 1)), Minors, None, None),
        ]);
        let years = YearAggregator::new().aggregate(&table);

        assert_eq!(years.years().collect::<Vec<_>>(), vec![2003, 2005]);
        assert_eq!(years.get(2003), Some(&YearCount { year: 2003, majors: 0, minors: 2 }));
        assert_eq!(years.get(2005).map(YearCount::total), Some(1));
        assert_eq!(years.get(2004), None);
    }

    #[test]
    fn test_rows_without_date_not_counted() {
        let table = SurgeryTable::from_records(vec![
            record("1", None, Majors, Some(25.0), None),
            record("2", Some((2012, 1, 1)), Majors, Some(25.0), None),
        ]);
        let years = YearAggregator::new().aggregate(&table);
        assert_eq!(years.len(), 1);
        assert_eq!(years.rows()[0].majors, 1);
    }

    #[test]
    fn test_ages_only_majors_with_age() {
        let table = SurgeryTable::from_records(vec![
            record("1", None, Majors, Some(25.0), None),
            record("2", None, Minors, Some(19.0), None),
            record("3", None, Majors, None, None),
            record("4", None, Majors, Some(31.5), None),
        ]);
        assert_eq!(AgeAggregator::new().aggregate(&table), vec![25.0, 31.5]);
    }

    #[test]
    fn test_recovery_drops_incomplete_rows_and_sorts() {
        let table = SurgeryTable::from_records(vec![
            record("1", Some((2014, 6, 1)), Majors, None, Some(14.0)),
            record("2", None, Majors, None, Some(12.0)),
            record("3", Some((2011, 3, 1)), Majors, None, None),
            record("4", Some((2010, 3, 1)), Minors, None, Some(9.0)),
            record("5", Some((2012, 7, 4)), Majors, None, Some(16.5)),
        ]);
        let points = RecoveryTimeAggregator::new().aggregate(&table);

        assert_eq!(
            points,
            vec![
                RecoveryPoint { date: NaiveDate::from_ymd_opt(2012, 7, 4).unwrap(), months: 16.5 },
                RecoveryPoint { date: NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(), months: 14.0 },
            ]
        );
    }

    #[test]
    fn test_recovery_equal_dates_keep_csv_order() {
        let table = SurgeryTable::from_records(vec![
            record("1", Some((2014, 6, 1)), Majors, None, Some(20.0)),
            record("2", Some((2014, 6, 1)), Majors, None, Some(10.0)),
        ]);
        let months: Vec<f64> = RecoveryTimeAggregator::new()
            .aggregate(&table)
            .iter()
            .map(|p| p.months)
            .collect();
        assert_eq!(months, vec![20.0, 10.0]);
    }

    #[test]
    fn test_empty_table() {
        let table = SurgeryTable::default();
        assert!(YearAggregator::new().aggregate(&table).is_empty());
        assert!(AgeAggregator::new().aggregate(&table).is_empty());
        assert!(RecoveryTimeAggregator::new().aggregate(&table).is_empty());
    }
}
