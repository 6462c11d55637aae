use std::path::{Path, PathBuf};

use super::{DataContext, DataError, MemoryStore};
use crate::io::desk_io::{self, DeskError};
use crate::io::lock::DeskLock;
use crate::model::{
    InventoryFields, InventoryItem, ItemId, NewTicket, Ticket, TicketId, TicketStatus,
};

/// Which data file a mutation touched
#[derive(Debug, Clone, Copy)]
enum Collection {
    Inventory,
    Tickets,
}

/// A [`MemoryStore`] backed by the JSON files in `helpdesk/`.
///
/// Every mutation takes the desk lock, re-reads the data files and runs
/// against that fresh copy. The copy is written to disk before it becomes
/// the live state, so a failed write leaves memory and disk agreeing and
/// ids stay unique across processes.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
    mem: MemoryStore,
}

impl FileStore {
    pub fn open(data_dir: &Path) -> Result<Self, DeskError> {
        let mem = Self::read(data_dir)?;
        tracing::debug!(
            items = mem.inventory().len(),
            tickets = mem.tickets().len(),
            "desk data loaded"
        );
        Ok(FileStore {
            data_dir: data_dir.to_path_buf(),
            mem,
        })
    }

    fn read(data_dir: &Path) -> Result<MemoryStore, DeskError> {
        let inventory = desk_io::load_inventory(data_dir)?;
        let tickets = desk_io::load_tickets(data_dir)?;
        Ok(MemoryStore::from_files(inventory, tickets))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Re-read the data files. Returns true when the contents differ from
    /// what was held (i.e. another process wrote them).
    pub fn reload(&mut self) -> Result<bool, DeskError> {
        let fresh = Self::read(&self.data_dir)?;
        if fresh == self.mem {
            return Ok(false);
        }
        self.mem = fresh;
        tracing::info!("desk data reloaded after external change");
        Ok(true)
    }

    fn commit<T>(
        &mut self,
        collection: Collection,
        op: impl FnOnce(&mut MemoryStore) -> Result<T, DataError>,
    ) -> Result<T, DataError> {
        let _lock = DeskLock::acquire_default(&self.data_dir).map_err(DeskError::from)?;
        let mut scratch = Self::read(&self.data_dir)?;
        let out = op(&mut scratch)?;

        match collection {
            Collection::Inventory => {
                desk_io::save_inventory(&self.data_dir, &scratch.inventory_file())?
            }
            Collection::Tickets => desk_io::save_tickets(&self.data_dir, &scratch.tickets_file())?,
        }
        self.mem = scratch;
        Ok(out)
    }
}

impl DataContext for FileStore {
    fn inventory(&self) -> Vec<&InventoryItem> {
        self.mem.inventory()
    }

    fn inventory_item(&self, id: ItemId) -> Option<&InventoryItem> {
        self.mem.inventory_item(id)
    }

    fn tickets(&self) -> Vec<&Ticket> {
        self.mem.tickets()
    }

    fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.mem.ticket(id)
    }

    fn add_inventory_item(&mut self, fields: InventoryFields) -> Result<ItemId, DataError> {
        let id = self.commit(Collection::Inventory, |m| m.add_inventory_item(fields))?;
        tracing::info!(%id, "inventory item added");
        Ok(id)
    }

    fn update_inventory_item(
        &mut self,
        id: ItemId,
        fields: InventoryFields,
    ) -> Result<(), DataError> {
        self.commit(Collection::Inventory, |m| m.update_inventory_item(id, fields))?;
        tracing::info!(%id, "inventory item updated");
        Ok(())
    }

    fn delete_inventory_item(&mut self, id: ItemId) -> Result<InventoryItem, DataError> {
        let item = self.commit(Collection::Inventory, |m| m.delete_inventory_item(id))?;
        tracing::info!(%id, serial = %item.serial_number, "inventory item deleted");
        Ok(item)
    }

    fn add_ticket(&mut self, ticket: NewTicket) -> Result<TicketId, DataError> {
        let id = self.commit(Collection::Tickets, |m| m.add_ticket(ticket))?;
        tracing::info!(%id, "ticket created");
        Ok(id)
    }

    fn set_ticket_status(&mut self, id: TicketId, status: TicketStatus) -> Result<(), DataError> {
        self.commit(Collection::Tickets, |m| m.set_ticket_status(id, status))?;
        tracing::info!(%id, %status, "ticket status changed");
        Ok(())
    }

    fn delete_ticket(&mut self, id: TicketId) -> Result<Ticket, DataError> {
        let ticket = self.commit(Collection::Tickets, |m| m.delete_ticket(id))?;
        tracing::info!(%id, "ticket deleted");
        Ok(ticket)
    }
}
