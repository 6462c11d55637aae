pub mod config_io;
pub mod desk_io;
pub mod lock;
pub mod logging;
pub mod state;
pub mod watcher;
