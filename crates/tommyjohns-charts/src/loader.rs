//! Surgery CSV loading into an in-memory table keyed by player id.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tommyjohns_common::{
    parse_optional_f64, parse_surgery_date, LeagueLevel, PlayerId, Result, SurgeryRecord, TjError,
};
use tommyjohns_config::CsvColumns;
use tracing::{debug, info, instrument};

/// Read-only table of surgery records.
///
/// Rows keep their CSV order. The index maps each player id to the row it
/// last appeared on.
#[derive(Debug, Clone, Default)]
pub struct SurgeryTable {
    records: Vec<SurgeryRecord>,
    index: HashMap<PlayerId, usize>,
}

impl SurgeryTable {
    pub fn from_records(records: Vec<SurgeryRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(row, record)| (record.player_id.clone(), row))
            .collect();
        Self { records, index }
    }

    pub fn records(&self) -> &[SurgeryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a player's record by id.
    pub fn get(&self, id: &PlayerId) -> Option<&SurgeryRecord> {
        self.index.get(id).map(|&row| &self.records[row])
    }

    /// Rows whose league flag equals `level`.
    pub fn with_level(&self, level: LeagueLevel) -> impl Iterator<Item = &SurgeryRecord> {
        self.records.iter().filter(move |r| r.level == level)
    }
}

/// Positions of the configured columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnPositions {
    id: usize,
    surgery_date: usize,
    level: usize,
    age: usize,
    recovery_months: usize,
}

impl ColumnPositions {
    fn resolve(headers: &StringRecord, columns: &CsvColumns) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TjError::data(format!("missing column '{name}'")))
        };

        Ok(Self {
            id: find(&columns.id)?,
            surgery_date: find(&columns.surgery_date)?,
            level: find(&columns.level)?,
            age: find(&columns.age)?,
            recovery_months: find(&columns.recovery_months)?,
        })
    }
}

/// CSV loader for the surgery dataset.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    columns: CsvColumns,
}

impl CsvLoader {
    pub fn new(columns: CsvColumns) -> Self {
        Self { columns }
    }

    /// Load the table from a CSV file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<SurgeryTable> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = self.load_reader(file)?;
        info!("Loaded {} surgery records", table.len());
        Ok(table)
    }

    /// Load the table from any CSV byte stream.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<SurgeryTable> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let positions = ColumnPositions::resolve(&headers, &self.columns)?;

        let mut records = Vec::new();
        for (i, row) in csv_reader.records().enumerate() {
            let row = row?;
            // 1-based data row, header excluded
            let row_number = i + 1;
            records.push(
                parse_row(&row, positions, &self.columns)
                    .map_err(|e| with_row(e, row_number))?,
            );
        }

        debug!("Parsed {} CSV rows", records.len());
        Ok(SurgeryTable::from_records(records))
    }
}

fn parse_row(row: &StringRecord, at: ColumnPositions, columns: &CsvColumns) -> Result<SurgeryRecord> {
    let cell = |pos: usize| row.get(pos).unwrap_or("");

    let id = cell(at.id);
    if id.is_empty() {
        return Err(TjError::data(format!("empty {}", columns.id)));
    }

    Ok(SurgeryRecord {
        player_id: PlayerId::from(id),
        surgery_date: parse_surgery_date(cell(at.surgery_date))?,
        level: cell(at.level).parse()?,
        age: parse_optional_f64(cell(at.age), &columns.age)?,
        recovery_months: parse_optional_f64(cell(at.recovery_months), &columns.recovery_months)?,
    })
}

fn with_row(err: TjError, row: usize) -> TjError {
    match err {
        TjError::Data { message, .. } => TjError::data_at_row(message, row),
        other => other,
    }
}
