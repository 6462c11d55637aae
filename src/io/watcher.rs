use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::desk_io::{CONFIG_FILE, INVENTORY_FILE, TICKETS_FILE};

/// A data or config file inside `helpdesk/` changed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskChange {
    pub paths: Vec<PathBuf>,
}

/// Watches the `helpdesk/` directory for writes made by other processes.
pub struct DeskWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<DeskChange>,
}

impl DeskWatcher {
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                let paths: Vec<PathBuf> = event.paths.into_iter().filter(|p| is_watched(p)).collect();
                if !paths.is_empty() {
                    let _ = tx.send(DeskChange { paths });
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(DeskWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending changes without blocking.
    pub fn poll(&self) -> Vec<DeskChange> {
        self.rx.try_iter().collect()
    }
}

/// Only the data files and desk.toml matter; temp files, the lock, the log
/// and .state.json are ignored.
fn is_watched(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(INVENTORY_FILE) | Some(TICKETS_FILE) | Some(CONFIG_FILE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_and_config_are_watched() {
        assert!(is_watched(Path::new("/d/helpdesk/inventory.json")));
        assert!(is_watched(Path::new("/d/helpdesk/tickets.json")));
        assert!(is_watched(Path::new("/d/helpdesk/desk.toml")));
        assert!(!is_watched(Path::new("/d/helpdesk/.lock")));
        assert!(!is_watched(Path::new("/d/helpdesk/.state.json")));
        assert!(!is_watched(Path::new("/d/helpdesk/helpdesk.log")));
        assert!(!is_watched(Path::new("/d/helpdesk/.tmpA1b2C3")));
    }
}
