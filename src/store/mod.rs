//! The data context: the single owner of inventory and ticket records.
//!
//! Views never mutate records directly. They call a [`DataContext`]
//! and branch on the returned `Result`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::io::desk_io::DeskError;
use crate::model::{
    InventoryFields, InventoryItem, ItemId, NewTicket, Ticket, TicketId, TicketStatus,
};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("inventory item {0} not found")]
    ItemNotFound(ItemId),
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),
    #[error("serial number {0} is already registered")]
    DuplicateSerial(String),
    #[error("required field is blank: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Persist(#[from] DeskError),
}

/// Source of truth for records plus the mutation API.
///
/// Reads return records in insertion order.
pub trait DataContext {
    fn inventory(&self) -> Vec<&InventoryItem>;
    fn inventory_item(&self, id: ItemId) -> Option<&InventoryItem>;
    fn tickets(&self) -> Vec<&Ticket>;
    fn ticket(&self, id: TicketId) -> Option<&Ticket>;

    fn add_inventory_item(&mut self, fields: InventoryFields) -> Result<ItemId, DataError>;
    /// Replace all six editable fields of an existing item
    fn update_inventory_item(&mut self, id: ItemId, fields: InventoryFields)
    -> Result<(), DataError>;
    fn delete_inventory_item(&mut self, id: ItemId) -> Result<InventoryItem, DataError>;

    fn add_ticket(&mut self, ticket: NewTicket) -> Result<TicketId, DataError>;
    fn set_ticket_status(&mut self, id: TicketId, status: TicketStatus) -> Result<(), DataError>;
    fn delete_ticket(&mut self, id: TicketId) -> Result<Ticket, DataError>;
}
