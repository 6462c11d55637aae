use std::path::PathBuf;

use super::config::DeskConfig;

/// Name of the data directory that marks a desk root
pub const DESK_DIR: &str = "helpdesk";

/// A located helpdesk on disk
#[derive(Debug, Clone)]
pub struct Desk {
    /// Directory containing `helpdesk/`
    pub root: PathBuf,
    /// Path to the `helpdesk/` directory
    pub data_dir: PathBuf,
    /// Parsed desk.toml
    pub config: DeskConfig,
}
