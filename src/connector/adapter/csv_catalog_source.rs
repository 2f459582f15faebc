use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::application::CatalogSource;
use crate::domain::{CardRecord, Catalog, DomainError};

pub const CARD_NAME_COLUMN: &str = "card_name";
pub const PERKS_SUMMARY_COLUMN: &str = "perks_summary";

/// Loads the catalog from a CSV file with `card_name` and `perks_summary`
/// columns. Other columns are ignored; row order is kept.
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV from any reader. `origin` names the source in error messages.
    pub fn parse<R: Read>(reader: R, origin: &str) -> Result<Catalog, DomainError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| DomainError::configuration(format!("{origin}: cannot read header: {e}")))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };
        let (Some(name_idx), Some(perks_idx)) =
            (column(CARD_NAME_COLUMN), column(PERKS_SUMMARY_COLUMN))
        else {
            return Err(DomainError::configuration(format!(
                "{origin}: CSV must contain '{CARD_NAME_COLUMN}' and '{PERKS_SUMMARY_COLUMN}' columns"
            )));
        };

        let mut cards = Vec::new();
        let mut seen = HashSet::new();
        for (i, result) in rdr.records().enumerate() {
            // Header is line 1.
            let line = i + 2;
            let record = result.map_err(|e| {
                DomainError::configuration(format!("{origin}: line {line}: {e}"))
            })?;

            let name = record.get(name_idx).unwrap_or_default();
            if name.is_empty() {
                return Err(DomainError::configuration(format!(
                    "{origin}: line {line}: empty {CARD_NAME_COLUMN}"
                )));
            }
            if !seen.insert(name.to_lowercase()) {
                warn!("{origin}: duplicate card name '{name}' on line {line}");
            }

            let perks = record.get(perks_idx).unwrap_or_default();
            cards.push(CardRecord::new(name, perks));
        }

        debug!("Parsed {} cards from {}", cards.len(), origin);
        Ok(Catalog::new(cards))
    }
}

impl CatalogSource for CsvCatalogSource {
    fn load(&self) -> Result<Catalog, DomainError> {
        let origin = self.describe();
        let file = File::open(&self.path).map_err(|e| {
            DomainError::configuration(format!("{origin} could not be opened: {e}"))
        })?;
        let catalog = Self::parse(file, &origin)?;
        info!("Loaded {} cards from {}", catalog.len(), origin);
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
