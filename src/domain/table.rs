//! Row-oriented CSV model with header-name tolerance.
//!
//! Every cell is kept as the raw text it was read with, under its original
//! header, so serialization reproduces untouched input exactly. The OHLC
//! fields are looked up case-insensitively at the point of use; the stored
//! header casing is never rewritten.

use crate::domain::error::RepairError;

/// One row of a ticker's historical series: ordered (header, value) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    fields: Vec<(String, String)>,
}

impl PriceRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Case-insensitive cell lookup. Returns the raw text, untouched.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Lenient numeric read: a missing or malformed cell counts as zero.
    pub fn number(&self, name: &str) -> f64 {
        self.get(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0)
    }

    /// Case-insensitive cell write. The matched header keeps its original
    /// casing; when no header matches, the cell is appended under `name`
    /// verbatim (the canonical-name fallback).
    pub fn set(&mut self, name: &str, value: String) {
        match self
            .fields
            .iter_mut()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
        {
            Some((_, cell)) => *cell = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Cell values in original column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered sequence of records plus the header they were read under.
/// Owned by a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<PriceRecord>,
}

impl RecordSet {
    /// Split the text into a header line and one record per non-empty line,
    /// keyed by header position. Ragged rows are kept, not rejected; a row
    /// longer than the header keeps its extra cells under an empty header.
    pub fn parse(text: &str) -> Self {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map(|h| h.iter().map(String::from).collect())
            .unwrap_or_default();

        let mut records = Vec::new();
        for result in rdr.records() {
            let Ok(record) = result else { continue };
            if record.iter().all(str::is_empty) {
                continue;
            }
            let fields = record
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    (
                        headers.get(i).cloned().unwrap_or_default(),
                        value.to_string(),
                    )
                })
                .collect();
            records.push(PriceRecord::new(fields));
        }

        Self { headers, records }
    }

    /// Re-emit the header line and one line per record, columns in original
    /// order. Untouched cells come back byte-identical; corrected cells carry
    /// whatever text was assigned to them. Ragged rows keep their own width.
    /// Output always ends with a line terminator, even when the input lacked
    /// one.
    pub fn serialize(&self) -> Result<String, RepairError> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        wtr.write_record(&self.headers).map_err(csv_err)?;
        for record in &self.records {
            wtr.write_record(record.values()).map_err(csv_err)?;
        }
        let bytes = wtr.into_inner().map_err(|e| RepairError::Csv {
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| RepairError::Csv {
            reason: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn csv_err(e: csv::Error) -> RepairError {
    RepairError::Csv {
        reason: e.to_string(),
    }
}
