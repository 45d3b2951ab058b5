//! Property tests for the aggregators.

use proptest::prelude::*;
use std::collections::BTreeSet;
use chrono::Datelike;
use tommyjohns_charts::{
    AgeAggregator, DataAggregator, HistogramBins, RecoveryTimeAggregator, SurgeryTable,
    YearAggregator,
};
use tommyjohns_common::test_utils::record;
use tommyjohns_common::{LeagueLevel, SurgeryRecord};

fn arb_record() -> impl Strategy<Value = SurgeryRecord> {
    (
        0u32..500,
        proptest::option::of((1990i32..2025, 1u32..=12, 1u32..=28)),
        any::<bool>(),
        proptest::option::of(17.0f64..45.0),
        proptest::option::of(1.0f64..36.0),
    )
        .prop_map(|(id, date, majors, age, recovery)| {
            let level = if majors { LeagueLevel::Majors } else { LeagueLevel::Minors };
            record(&id.to_string(), date, level, age, recovery)
        })
}

fn arb_table() -> impl Strategy<Value = SurgeryTable> {
    proptest::collection::vec(arb_record(), 0..60).prop_map(SurgeryTable::from_records)
}

proptest! {
    #[test]
    fn year_table_is_union_of_level_years(table in arb_table()) {
        let years = YearAggregator::new().aggregate(&table);

        let expected: BTreeSet<i32> = table
            .records()
            .iter()
            .filter_map(|r| r.surgery_date.map(|d| d.year()))
            .collect();
        let actual: Vec<i32> = years.years().collect();
        prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());

        for row in years.rows() {
            let count = |level| {
                table
                    .with_level(level)
                    .filter(|r| r.surgery_date.map(|d| d.year()) == Some(row.year))
                    .count() as u32
            };
            prop_assert_eq!(row.majors, count(LeagueLevel::Majors));
            prop_assert_eq!(row.minors, count(LeagueLevel::Minors));
        }
    }

    #[test]
    fn age_list_counts_majors_with_age(table in arb_table()) {
        let ages = AgeAggregator::new().aggregate(&table);
        let expected = table
            .records()
            .iter()
            .filter(|r| r.is_major_leaguer() && r.age.is_some())
            .count();
        prop_assert_eq!(ages.len(), expected);
    }

    #[test]
    fn recovery_series_keeps_pairs_in_date_order(table in arb_table()) {
        let points = RecoveryTimeAggregator::new().aggregate(&table);

        prop_assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        for point in &points {
            let paired = table.records().iter().any(|r| {
                r.is_major_leaguer()
                    && r.surgery_date == Some(point.date)
                    && r.recovery_months == Some(point.months)
            });
            prop_assert!(paired);
        }

        let complete = table
            .records()
            .iter()
            .filter(|r| r.is_major_leaguer() && r.surgery_date.is_some() && r.recovery_months.is_some())
            .count();
        prop_assert_eq!(points.len(), complete);
    }

    #[test]
    fn aggregation_is_deterministic(table in arb_table()) {
        prop_assert_eq!(
            YearAggregator::new().aggregate(&table),
            YearAggregator::new().aggregate(&table)
        );
        prop_assert_eq!(
            RecoveryTimeAggregator::new().aggregate(&table),
            RecoveryTimeAggregator::new().aggregate(&table)
        );
    }

    #[test]
    fn histogram_keeps_every_value(values in proptest::collection::vec(17.0f64..45.0, 1..200)) {
        let bins = HistogramBins::compute(&values, 25).unwrap();
        prop_assert_eq!(bins.len(), 25);
        prop_assert_eq!(bins.total() as usize, values.len());
    }
}
