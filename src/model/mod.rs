pub mod config;
pub mod desk;
pub mod inventory;
pub mod ticket;

pub use config::*;
pub use desk::*;
pub use inventory::*;
pub use ticket::*;
