//! Loader for the legacy raw datasets.
//!
//! Raw datasets ship either as a script that assigns one global array
//! (`var spells = [ ... ];`) or as a plain JSON array. Script bodies must be
//! JSON-compatible; object keys are quoted in every dataset we ingest.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use tome_model::type_name;

use crate::error::{IngestError, Result};

const DECLARATION_PATTERN: &str = r"(?m)^\s*(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=";
const ARRAY_PATTERN: &str = r"=\s*(\[[\s\S]*\])\s*;?\s*$";

/// A raw dataset read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyDataset {
    /// Name of the declared global, `None` for JSON files.
    pub global: Option<String>,
    /// The raw records, always an array.
    pub records: Value,
}

impl LegacyDataset {
    pub fn len(&self) -> usize {
        self.records.as_array().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load a raw dataset file.
pub fn load_legacy(path: &Path) -> Result<LegacyDataset> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let dataset = if is_json {
        LegacyDataset {
            global: None,
            records: parse_array(&text, path)?,
        }
    } else {
        parse_script(&text, path)?
    };
    debug!(
        path = %path.display(),
        global = dataset.global.as_deref().unwrap_or("-"),
        records = dataset.len(),
        "loaded legacy dataset"
    );
    Ok(dataset)
}

/// Extract the single global array declared by a legacy script.
pub fn parse_script(text: &str, path: &Path) -> Result<LegacyDataset> {
    let declarations = compile(DECLARATION_PATTERN, path)?;
    let names: Vec<&str> = declarations
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    let [global] = names.as_slice() else {
        return Err(IngestError::GlobalCount {
            path: path.to_path_buf(),
            count: names.len(),
        });
    };

    let array = compile(ARRAY_PATTERN, path)?;
    let body = array
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| IngestError::LegacyParse {
            path: path.to_path_buf(),
            reason: format!("global '{global}' is not assigned an array literal"),
        })?;

    Ok(LegacyDataset {
        global: Some((*global).to_string()),
        records: parse_array(body.as_str(), path)?,
    })
}

fn parse_array(text: &str, path: &Path) -> Result<Value> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if value.is_array() {
        Ok(value)
    } else {
        Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
            found: type_name(&value),
        })
    }
}

fn compile(pattern: &str, path: &Path) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| IngestError::LegacyParse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
