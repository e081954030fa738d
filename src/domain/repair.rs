//! Zero-OHL anomaly detection and correction.
//!
//! The anomaly is a partial-write pattern seen in ingested price files:
//! Open, High and Low all recorded as zero while Close carries a real price.
//! The fix copies the close cell into the three zeroed cells and leaves
//! everything else byte-identical.

use crate::domain::table::RecordSet;

const OPEN: &str = "Open";
const HIGH: &str = "High";
const LOW: &str = "Low";
const CLOSE: &str = "Close";

/// Result of one repair pass over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    pub scanned: usize,
    pub corrected: usize,
}

/// Correct every record where open, high and low are all zero while close is
/// positive. Values are resolved case-insensitively against the record's own
/// headers, falling back to the canonical OHLC names when none match.
///
/// A corrected record has open = high = low = close, so a second pass over
/// the same set makes zero corrections.
pub fn repair(set: &mut RecordSet) -> RepairReport {
    let scanned = set.records.len();
    let mut corrected = 0;

    for record in &mut set.records {
        let close = record.number(CLOSE);
        if record.number(OPEN) == 0.0
            && record.number(HIGH) == 0.0
            && record.number(LOW) == 0.0
            && close > 0.0
        {
            // close > 0 implies the cell exists and parsed; copy its raw text
            // so the corrected cells carry the same rendering.
            if let Some(value) = record.get(CLOSE).map(str::to_owned) {
                record.set(OPEN, value.clone());
                record.set(HIGH, value.clone());
                record.set(LOW, value);
                corrected += 1;
            }
        }
    }

    RepairReport { scanned, corrected }
}
