//! Reading records and options from disk

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;
use tree_store::{StoreOptions, TreeItem, Validation};

/// Read a JSON array of records
pub fn load_records(path: &Path) -> Result<Vec<TreeItem>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    parse_records(&text).with_context(|| format!("Failed to parse records in {}", path.display()))
}

/// Parse a JSON array of `{ "id", "parent", "type" }` records
pub fn parse_records(text: &str) -> Result<Vec<TreeItem>> {
    let records: Vec<TreeItem> = serde_json::from_str(text)?;
    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Read options from `path` if given, then apply the `--strict` override
pub fn load_options(path: Option<&Path>, strict: bool) -> Result<StoreOptions> {
    let mut options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            parse_options(&text)
                .with_context(|| format!("Failed to parse config in {}", path.display()))?
        }
        None => StoreOptions::default(),
    };

    if strict {
        options = options.validation(Validation::Strict);
    }
    debug!("using {:?}", options);
    Ok(options)
}

pub fn parse_options(text: &str) -> Result<StoreOptions> {
    Ok(serde_json::from_str(text)?)
}
