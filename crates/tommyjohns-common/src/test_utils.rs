//! Test fixtures shared by the workspace's unit and integration tests.

use crate::{LeagueLevel, PlayerId, SurgeryRecord};
use chrono::NaiveDate;

/// Header row matching the default column configuration.
pub const SAMPLE_CSV_HEADER: &str =
    "mlbamid,Player,TJ Surgery Date,Team,Majors,Age,Recovery Time (months)";

/// A small dataset covering majors and minors, missing cells, and
/// several date layouts.
pub const SAMPLE_CSV: &str = "\
mlbamid,Player,TJ Surgery Date,Team,Majors,Age,Recovery Time (months)
425844,Zack Greinke,3/14/2010,KC,Y,26,13.2
519242,Chris Sale,6/2/2010,CHW,N,21,
605400,Aaron Nola,2011-08-20,PHI,Y,28,15.0
547943,Hyun-Jin Ryu,,LAD,Y,27,12.5
592789,Noah Syndergaard,4/25/2012,NYM,Y,,14.1
641154,Josh Hader,9/9/12,MIL,N,19,11.0
";

/// Build a surgery record without going through CSV parsing.
pub fn record(
    id: &str,
    date: Option<(i32, u32, u32)>,
    level: LeagueLevel,
    age: Option<f64>,
    recovery_months: Option<f64>,
) -> SurgeryRecord {
    SurgeryRecord {
        player_id: PlayerId::from(id),
        surgery_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        level,
        age,
        recovery_months,
    }
}

/// The three-row example from the year table documentation.
pub fn year_example_records() -> Vec<SurgeryRecord> {
    vec![
        record("1", Some((2010, 1, 1)), LeagueLevel::Majors, None, None),
        record("2", Some((2010, 1, 1)), LeagueLevel::Minors, None, None),
        record("3", Some((2011, 1, 1)), LeagueLevel::Majors, None, None),
    ]
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to a named temporary file with the given suffix.
#[cfg(feature = "tempfile")]
pub fn write_temp_file(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file
}
