//! View state for the two admin screens, independent of any terminal.
//!
//! Each view owns its transient state (dialogs, drafts, selection, search)
//! and talks to records only through a [`DataContext`](crate::store::DataContext)
//! and a [`Notifier`](notice::Notifier).

pub mod confirm;
pub mod inventory;
pub mod notice;
pub mod tickets;
