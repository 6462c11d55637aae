use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::config::DeskConfig;
use crate::model::desk::{DESK_DIR, Desk};
use crate::model::inventory::InventoryItem;
use crate::model::ticket::Ticket;

pub const CONFIG_FILE: &str = "desk.toml";
pub const INVENTORY_FILE: &str = "inventory.json";
pub const TICKETS_FILE: &str = "tickets.json";

/// Error type for desk I/O operations
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("not a helpdesk: no helpdesk/desk.toml found")]
    NotADesk,
    #[error("helpdesk/ already exists in {0} (use --force to reinitialize)")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse desk.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not parse {path}: {source}")]
    DataParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize data: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] crate::io::lock::LockError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// On-disk shape of inventory.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryFile {
    pub next_id: u32,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl Default for InventoryFile {
    fn default() -> Self {
        InventoryFile {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

/// On-disk shape of tickets.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsFile {
    pub next_id: u32,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl Default for TicketsFile {
    fn default() -> Self {
        TicketsFile {
            next_id: 1,
            tickets: Vec::new(),
        }
    }
}

/// Walk up from `start` looking for a directory containing `helpdesk/desk.toml`.
pub fn discover_desk(start: &Path) -> Result<PathBuf, DeskError> {
    let mut current = start.to_path_buf();
    loop {
        let data_dir = current.join(DESK_DIR);
        if data_dir.is_dir() && data_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(DeskError::NotADesk);
        }
    }
}

/// Load the desk configuration rooted at `root`.
pub fn load_desk(root: &Path) -> Result<Desk, DeskError> {
    let data_dir = root.join(DESK_DIR);
    if !data_dir.is_dir() {
        return Err(DeskError::NotADesk);
    }

    let config_path = data_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| DeskError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: DeskConfig = toml::from_str(&config_text)?;

    Ok(Desk {
        root: root.to_path_buf(),
        data_dir,
        config,
    })
}

/// Read inventory.json. A missing file is an empty inventory.
pub fn load_inventory(data_dir: &Path) -> Result<InventoryFile, DeskError> {
    read_json_or_default(&data_dir.join(INVENTORY_FILE))
}

/// Read tickets.json. A missing file is an empty ticket list.
pub fn load_tickets(data_dir: &Path) -> Result<TicketsFile, DeskError> {
    read_json_or_default(&data_dir.join(TICKETS_FILE))
}

pub fn save_inventory(data_dir: &Path, file: &InventoryFile) -> Result<(), DeskError> {
    write_json(&data_dir.join(INVENTORY_FILE), file)
}

pub fn save_tickets(data_dir: &Path, file: &TicketsFile) -> Result<(), DeskError> {
    write_json(&data_dir.join(TICKETS_FILE), file)
}

fn read_json_or_default<T>(path: &Path) -> Result<T, DeskError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let text = fs::read_to_string(path).map_err(|e| DeskError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|e| DeskError::DataParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DeskError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| DeskError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write via a temp file in the same directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
