use std::fs;
use std::path::Path;

use crate::io::desk_io::{CONFIG_FILE, DeskError, atomic_write};
use crate::model::config::DeskConfig;

/// Read desk.toml as both the typed config and an editable document, so
/// edits keep the user's comments and layout.
pub fn read_config(data_dir: &Path) -> Result<(DeskConfig, toml_edit::DocumentMut), DeskError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| DeskError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: DeskConfig = toml::from_str(&config_text)?;
    // Typed parse succeeded, so the document parse can only fail on exotic input
    let doc: toml_edit::DocumentMut = config_text.parse().map_err(|e: toml_edit::TomlError| {
        DeskError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    Ok((config, doc))
}

pub fn write_config(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), DeskError> {
    let config_path = data_dir.join(CONFIG_FILE);
    atomic_write(&config_path, doc.to_string().as_bytes()).map_err(|e| DeskError::WriteError {
        path: config_path,
        source: e,
    })
}

/// Append a department to `[desk] departments`. Returns false when a
/// department with the same name (case-insensitive) already exists.
pub fn add_department(doc: &mut toml_edit::DocumentMut, name: &str) -> bool {
    let name = name.trim();
    if !doc.contains_key("desk") {
        doc["desk"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let desk = &mut doc["desk"];
    if desk.get("departments").and_then(|d| d.as_array()).is_none() {
        desk["departments"] = toml_edit::value(toml_edit::Array::new());
    }
    let Some(list) = desk["departments"].as_array_mut() else {
        return false;
    };
    let exists = list
        .iter()
        .filter_map(|v| v.as_str())
        .any(|d| d.eq_ignore_ascii_case(name));
    if exists {
        return false;
    }
    list.push(name);
    true
}

/// Remove a department by name (case-insensitive). Returns whether one was removed.
pub fn remove_department(doc: &mut toml_edit::DocumentMut, name: &str) -> bool {
    let Some(list) = doc
        .get_mut("desk")
        .and_then(|d| d.get_mut("departments"))
        .and_then(|d| d.as_array_mut())
    else {
        return false;
    };
    let before = list.len();
    list.retain(|v| !v.as_str().is_some_and(|d| d.eq_ignore_ascii_case(name.trim())));
    list.len() != before
}
