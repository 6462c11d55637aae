use chrono::Utc;
use indexmap::IndexMap;

use super::{DataContext, DataError};
use crate::io::desk_io::{InventoryFile, TicketsFile};
use crate::model::{
    InventoryFields, InventoryItem, ItemId, NewTicket, Ticket, TicketId, TicketStatus,
};

/// In-memory data context. Records keep insertion order; removal shifts
/// later records up rather than swapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    inventory: IndexMap<ItemId, InventoryItem>,
    tickets: IndexMap<TicketId, Ticket>,
    next_item_id: u32,
    next_ticket_id: u32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            inventory: IndexMap::new(),
            tickets: IndexMap::new(),
            next_item_id: 1,
            next_ticket_id: 1,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the on-disk shapes. `next_id` never goes backwards past
    /// an id already in use.
    pub fn from_files(inventory: InventoryFile, tickets: TicketsFile) -> Self {
        let max_item = inventory.items.iter().map(|i| i.id.0).max().unwrap_or(0);
        let max_ticket = tickets.tickets.iter().map(|t| t.id.0).max().unwrap_or(0);
        MemoryStore {
            next_item_id: inventory.next_id.max(max_item + 1),
            next_ticket_id: tickets.next_id.max(max_ticket + 1),
            inventory: inventory.items.into_iter().map(|i| (i.id, i)).collect(),
            tickets: tickets.tickets.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn inventory_file(&self) -> InventoryFile {
        InventoryFile {
            next_id: self.next_item_id,
            items: self.inventory.values().cloned().collect(),
        }
    }

    pub fn tickets_file(&self) -> TicketsFile {
        TicketsFile {
            next_id: self.next_ticket_id,
            tickets: self.tickets.values().cloned().collect(),
        }
    }

    fn check_required(fields: &InventoryFields) -> Result<(), DataError> {
        match fields.missing_required().first() {
            Some(field) => Err(DataError::MissingField(*field)),
            None => Ok(()),
        }
    }

    fn check_serial(&self, serial: &str, except: Option<ItemId>) -> Result<(), DataError> {
        let serial = serial.trim();
        let taken = self
            .inventory
            .values()
            .filter(|item| Some(item.id) != except)
            .any(|item| item.serial_number.eq_ignore_ascii_case(serial));
        if taken {
            Err(DataError::DuplicateSerial(serial.to_string()))
        } else {
            Ok(())
        }
    }
}

impl DataContext for MemoryStore {
    fn inventory(&self) -> Vec<&InventoryItem> {
        self.inventory.values().collect()
    }

    fn inventory_item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.inventory.get(&id)
    }

    fn tickets(&self) -> Vec<&Ticket> {
        self.tickets.values().collect()
    }

    fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.get(&id)
    }

    fn add_inventory_item(&mut self, fields: InventoryFields) -> Result<ItemId, DataError> {
        Self::check_required(&fields)?;
        self.check_serial(&fields.serial_number, None)?;
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        self.inventory.insert(id, InventoryItem::from_fields(id, fields));
        Ok(id)
    }

    fn update_inventory_item(
        &mut self,
        id: ItemId,
        fields: InventoryFields,
    ) -> Result<(), DataError> {
        if !self.inventory.contains_key(&id) {
            return Err(DataError::ItemNotFound(id));
        }
        Self::check_required(&fields)?;
        self.check_serial(&fields.serial_number, Some(id))?;
        if let Some(item) = self.inventory.get_mut(&id) {
            item.apply(fields);
        }
        Ok(())
    }

    fn delete_inventory_item(&mut self, id: ItemId) -> Result<InventoryItem, DataError> {
        self.inventory
            .shift_remove(&id)
            .ok_or(DataError::ItemNotFound(id))
    }

    fn add_ticket(&mut self, ticket: NewTicket) -> Result<TicketId, DataError> {
        if ticket.title.trim().is_empty() {
            return Err(DataError::MissingField("title"));
        }
        let id = TicketId(self.next_ticket_id);
        self.next_ticket_id += 1;
        self.tickets.insert(id, ticket.into_ticket(id, Utc::now()));
        Ok(id)
    }

    fn set_ticket_status(&mut self, id: TicketId, status: TicketStatus) -> Result<(), DataError> {
        let ticket = self
            .tickets
            .get_mut(&id)
            .ok_or(DataError::TicketNotFound(id))?;
        ticket.status = status;
        Ok(())
    }

    fn delete_ticket(&mut self, id: TicketId) -> Result<Ticket, DataError> {
        self.tickets
            .shift_remove(&id)
            .ok_or(DataError::TicketNotFound(id))
    }
}
