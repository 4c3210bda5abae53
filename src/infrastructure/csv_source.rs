//! CSV row source
//!
//! Parse boundary for tabular input: a header row naming the code and value
//! columns, then one record per mesh cell. Cell contents are validated here
//! once, so the core only ever sees `Option<String>` / `Option<f64>`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::config::CsvSettings;
use crate::domain::DataRow;
use crate::infrastructure::traits::RowSource;
use crate::infrastructure::{InfraError, InfraResult};

/// Reads [`DataRow`]s from CSV data.
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    origin: PathBuf,
    code_column: String,
    value_column: String,
}

impl CsvRowSource<BufReader<File>> {
    /// Open a CSV file.
    pub fn open(path: &Path, settings: &CsvSettings) -> InfraResult<Self> {
        let file = File::open(path)
            .map_err(|e| InfraError::io(format!("open {}", path.display()), e))?;
        Ok(Self::from_reader(BufReader::new(file), path, settings))
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Read CSV data from any reader; `origin` names it in errors.
    pub fn from_reader(reader: R, origin: impl Into<PathBuf>, settings: &CsvSettings) -> Self {
        // delimiter is checked to be ASCII by Settings::validate
        let delimiter = u8::try_from(settings.delimiter).unwrap_or(b',');
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        Self {
            reader,
            origin: origin.into(),
            code_column: settings.code_column.clone(),
            value_column: settings.value_column.clone(),
        }
    }

    fn column_index(&self, headers: &StringRecord, name: &str) -> Option<usize> {
        let idx = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name);
        if idx.is_none() {
            warn!(
                "column {:?} not found in {} (headers: {:?})",
                name,
                self.origin.display(),
                headers.iter().collect::<Vec<_>>()
            );
        }
        idx
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn read_rows(&mut self) -> InfraResult<Vec<DataRow>> {
        let headers = self
            .reader
            .headers()
            .map_err(|e| InfraError::csv(&self.origin, e))?
            .clone();
        let code_idx = self.column_index(&headers, &self.code_column);
        let value_idx = self.column_index(&headers, &self.value_column);

        let mut rows = Vec::new();
        for (line, result) in self.reader.records().enumerate() {
            let record = result.map_err(|e| InfraError::csv(&self.origin, e))?;

            let code = code_idx.and_then(|i| parse_code(record.get(i)));
            let value = value_idx.and_then(|i| {
                let cell = record.get(i);
                let value = parse_value(cell);
                if value.is_none() && cell.is_some_and(|c| !c.trim().is_empty()) {
                    debug!("record {}: non-numeric value {:?}", line + 1, cell);
                }
                value
            });

            rows.push(DataRow { code, value });
        }

        info!("read {} rows from {}", rows.len(), self.origin.display());
        Ok(rows)
    }
}

/// Trimmed code cell; empty cells are absent.
fn parse_code(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Finite numeric value; empty or non-numeric cells are absent.
fn parse_value(cell: Option<&str>) -> Option<f64> {
    cell.map(str::trim)
        .filter(|c| !c.is_empty())
        .and_then(|c| c.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
