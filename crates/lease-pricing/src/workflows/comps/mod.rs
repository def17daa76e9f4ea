//! Market comp survey import from spreadsheet exports.

mod parser;

use crate::workflows::pricing::MarketComp;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CompImportError {
    #[error("failed to read comp survey: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid comp survey CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("comp survey is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Reads comp surveys with `Property`, `Weight`, optional `Quality Score`,
/// and one price column per unit type.
pub struct MarketCompImporter;

impl MarketCompImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MarketComp>, CompImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MarketComp>, CompImportError> {
        let comps = parser::parse_comps(reader)?;
        debug!(comps = comps.len(), "imported market comps");
        Ok(comps)
    }
}
