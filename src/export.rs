use std::path::PathBuf;

use chrono::Utc;
use directories::BaseDirs;
use serde_json::{Map, Value};

use crate::roster::Entry;

#[derive(Debug)]
pub enum ExportError {
    NoHomeDir,
    Serialize(String),
    Io(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NoHomeDir => {
                write!(f, "Could not determine the home directory")
            }
            ExportError::Serialize(message) => {
                write!(f, "Failed to serialize roster: {message}")
            }
            ExportError::Io(err) => write!(f, "Failed to write export file: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Entries as a JSON array of `{state, city}` objects, in roster order.
pub fn entries_json(entries: &[Entry]) -> Value {
    let items: Vec<Value> = entries
        .iter()
        .map(|entry| {
            let mut object = Map::new();
            object.insert("state".to_string(), Value::String(entry.state.clone()));
            object.insert("city".to_string(), Value::String(entry.city.clone()));
            Value::Object(object)
        })
        .collect();
    Value::Array(items)
}

/// The full export document: an `exported_at` RFC 3339 timestamp plus the
/// entries array.
pub fn roster_document(entries: &[Entry]) -> Value {
    let mut document = Map::new();
    document.insert(
        "exported_at".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    document.insert("entries".to_string(), entries_json(entries));
    Value::Object(document)
}

fn default_export_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ExportError::NoHomeDir)?;
    let filename = format!("gazetteer-roster-{}.json", Utc::now().timestamp_millis());
    Ok(base_dirs.home_dir().join(filename))
}

/// Writes the roster as pretty-printed JSON to a timestamped file in the
/// home directory and returns the path.
pub fn write_roster(entries: &[Entry]) -> Result<PathBuf> {
    let path = default_export_path()?;
    let document = roster_document(entries);
    let contents = serde_json::to_string_pretty(&document)
        .map_err(|err| ExportError::Serialize(err.to_string()))?;
    std::fs::write(&path, contents).map_err(ExportError::Io)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "roster exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_json_keeps_roster_order() {
        let entries = vec![
            Entry::new("Texas", "Houston"),
            Entry::new("Nevada", ""),
            Entry::new("Texas", "Dallas"),
        ];
        let value = entries_json(&entries);
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["state"], "Texas");
        assert_eq!(items[0]["city"], "Houston");
        assert_eq!(items[1]["city"], "");
        assert_eq!(items[2]["city"], "Dallas");
    }

    #[test]
    fn document_carries_a_timestamp_and_the_entries() {
        let entries = vec![Entry::new("Illinois", "Chicago")];
        let document = roster_document(&entries);
        assert!(document["exported_at"].is_string());
        assert_eq!(document["entries"].as_array().unwrap().len(), 1);
    }
}
