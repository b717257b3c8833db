//! Delimited facility files.
//!
//! Rows are read lazily and kept as text. Nothing is validated here: a row
//! with a non-numeric `lat` or a short column count comes through unchanged
//! and is dealt with by the normalizer.

use std::fs::File;
use std::io;
use std::path::Path;

use bangdeng_core::FacilityRecord;

use crate::error::SourceError;

/// Column header of facility files, in order.
pub const FACILITY_HEADER: [&str; 5] = ["name", "address", "lat", "lng", "type"];

/// One unvalidated row. Columns keep their header order, so a rewritten file
/// has the same shape as the one that was read (extra columns included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 0-based position among data rows (the header is not counted)
    pub index: usize,
    columns: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(index: usize, columns: Vec<(String, String)>) -> Self {
        Self { index, columns }
    }

    /// Build a row in the standard five-column layout.
    pub fn from_fields(index: usize, name: &str, address: &str, lat: &str, lng: &str, kind: &str) -> Self {
        let values = [name, address, lat, lng, kind];
        let columns = FACILITY_HEADER
            .iter()
            .zip(values)
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        Self { index, columns }
    }

    /// Value of a column, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .iter()
            .find(|(h, _)| h == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Replace a column value, appending the column if the row lacks it.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(h, _)| h == column) {
            Some((_, v)) => *v = value,
            None => self.columns.push((column.to_string(), value)),
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(h, _)| h.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, v)| v.as_str())
    }

    /// Human-readable location for log messages (1-based data row number).
    pub fn location(&self) -> String {
        format!("row {}", self.index + 1)
    }
}

/// Lazy, single-pass reader over a facility file.
pub struct RowReader<R: io::Read> {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<R>,
    next_index: usize,
}

impl<R: io::Read> RowReader<R> {
    /// Wrap any reader. The first line must be the header.
    pub fn from_reader(reader: R) -> Result<Self, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                // Spreadsheet exports often prefix a byte-order mark.
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        Ok(Self {
            headers,
            records: csv_reader.into_records(),
            next_index: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: io::Read> Iterator for RowReader<R> {
    type Item = Result<RawRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                self.next_index += 1;
                return Some(Err(e.into()));
            }
        };

        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();

        let row = RawRow::new(self.next_index, columns);
        self.next_index += 1;
        Some(Ok(row))
    }
}

/// Open a facility file for lazy reading.
pub fn read_rows(path: &Path) -> Result<RowReader<File>, SourceError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    log::debug!("Reading facility rows from {}", path.display());
    RowReader::from_reader(file)
}

/// Write normalized records in the standard five-column layout.
pub fn write_records(path: &Path, records: &[FacilityRecord]) -> Result<(), SourceError> {
    let file = File::create(path)?;
    write_records_to(file, records)
}

/// Write normalized records to any writer. Records read from a facility
/// file keep their original coordinate and type text.
pub fn write_records_to<W: io::Write>(writer: W, records: &[FacilityRecord]) -> Result<(), SourceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FACILITY_HEADER)?;
    for record in records {
        wtr.write_record(record.csv_fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write raw rows back out, using the first row's columns as the header.
/// Writes a bare standard header when there are no rows.
pub fn write_rows(path: &Path, rows: &[RawRow]) -> Result<(), SourceError> {
    let mut wtr = csv::Writer::from_path(path)?;
    match rows.first() {
        Some(first) => wtr.write_record(first.headers())?,
        None => wtr.write_record(FACILITY_HEADER)?,
    }
    for row in rows {
        wtr.write_record(row.values())?;
    }
    wtr.flush()?;
    Ok(())
}
