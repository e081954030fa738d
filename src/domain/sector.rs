//! Sector taxonomy lookup built from the master mapping file.

/// Mapping from sector name to the tickers filed under it.
///
/// Built once per run and read-only afterwards. Sector order follows the
/// master file, and [`SectorIndex::resolve`] scans in that order, so a ticker
/// that appears under two sectors resolves to whichever sector the file lists
/// first. Tickers are stored uppercased.
#[derive(Debug, Clone, Default)]
pub struct SectorIndex {
    sectors: Vec<(String, Vec<String>)>,
}

impl SectorIndex {
    /// Parse the master mapping text: column 0 is the sector name, column 1
    /// the ticker symbol. Row 0 is always treated as a header and skipped by
    /// position, never by name. Rows with fewer than two populated columns
    /// are skipped; both fields are trimmed.
    pub fn build(master_text: &str) -> Self {
        let mut index = SectorIndex::default();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(master_text.as_bytes());

        for (row, result) in rdr.records().enumerate() {
            if row == 0 {
                continue;
            }
            let Ok(record) = result else { continue };
            let sector = record.get(0).map(str::trim).unwrap_or("");
            let ticker = record.get(1).map(str::trim).unwrap_or("");
            if sector.is_empty() || ticker.is_empty() {
                continue;
            }
            index.insert(sector, &ticker.to_uppercase());
        }

        index
    }

    /// An index with no sectors, used when the master source is unreachable.
    /// The failure then surfaces at resolution time with the ticker named,
    /// instead of aborting the whole run at construction.
    pub fn empty() -> Self {
        Self::default()
    }

    fn insert(&mut self, sector: &str, ticker: &str) {
        match self.sectors.iter_mut().find(|(name, _)| name == sector) {
            Some((_, tickers)) => {
                if !tickers.iter().any(|t| t == ticker) {
                    tickers.push(ticker.to_string());
                }
            }
            None => self
                .sectors
                .push((sector.to_string(), vec![ticker.to_string()])),
        }
    }

    /// First sector, in master-file order, whose ticker set contains the
    /// symbol. The input is uppercased before the scan.
    pub fn resolve(&self, ticker: &str) -> Option<&str> {
        let ticker = ticker.trim().to_uppercase();
        self.sectors
            .iter()
            .find(|(_, tickers)| tickers.iter().any(|t| *t == ticker))
            .map(|(name, _)| name.as_str())
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}
