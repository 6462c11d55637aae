use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the data context to an inventory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of technology asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryType {
    Hardware,
    Software,
    Periferico,
}

impl InventoryType {
    pub const ALL: [InventoryType; 3] = [
        InventoryType::Hardware,
        InventoryType::Software,
        InventoryType::Periferico,
    ];

    /// Stored/serialized name
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryType::Hardware => "Hardware",
            InventoryType::Software => "Software",
            InventoryType::Periferico => "Periferico",
        }
    }

    /// Human label (with the accent the stored name drops)
    pub fn label(self) -> &'static str {
        match self {
            InventoryType::Hardware => "Hardware",
            InventoryType::Software => "Software",
            InventoryType::Periferico => "Periférico",
        }
    }

    /// Single-cell glyph shown next to the type in the table
    pub fn icon(self) -> char {
        match self {
            InventoryType::Hardware => '\u{2699}',   // ⚙
            InventoryType::Software => '\u{25A3}',   // ▣
            InventoryType::Periferico => '\u{2301}', // ⌁
        }
    }

    /// Parse a type name, case-insensitive. Accepts the accented spelling.
    pub fn parse(s: &str) -> Option<InventoryType> {
        match s.trim().to_lowercase().as_str() {
            "hardware" => Some(InventoryType::Hardware),
            "software" => Some(InventoryType::Software),
            "periferico" | "periférico" => Some(InventoryType::Periferico),
            _ => None,
        }
    }
}

/// Lifecycle state of an inventory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryStatus {
    Activo,
    Mantenimiento,
    Desincorporado,
}

impl InventoryStatus {
    pub const ALL: [InventoryStatus; 3] = [
        InventoryStatus::Activo,
        InventoryStatus::Mantenimiento,
        InventoryStatus::Desincorporado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InventoryStatus::Activo => "Activo",
            InventoryStatus::Mantenimiento => "Mantenimiento",
            InventoryStatus::Desincorporado => "Desincorporado",
        }
    }

    pub fn parse(s: &str) -> Option<InventoryStatus> {
        match s.trim().to_lowercase().as_str() {
            "activo" => Some(InventoryStatus::Activo),
            "mantenimiento" => Some(InventoryStatus::Mantenimiento),
            "desincorporado" => Some(InventoryStatus::Desincorporado),
            _ => None,
        }
    }
}

/// Visual severity of a stock count.
///
/// `stock < 2` is critical, `stock < 5` is low, anything else is normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Normal,
    Low,
    Critical,
}

impl StockLevel {
    pub fn of(stock: u32) -> StockLevel {
        if stock < 2 {
            StockLevel::Critical
        } else if stock < 5 {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }
}

/// A technology asset tracked by the desk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: InventoryType,
    pub serial_number: String,
    pub status: InventoryStatus,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InventoryItem {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// Copy the six editable fields out into a form draft
    pub fn fields(&self) -> InventoryFields {
        InventoryFields {
            name: self.name.clone(),
            item_type: self.item_type,
            serial_number: self.serial_number.clone(),
            status: self.status,
            stock: self.stock,
            description: self.description.clone().unwrap_or_default(),
        }
    }

    /// Full replace of the editable fields
    pub fn apply(&mut self, fields: InventoryFields) {
        self.name = fields.name.trim().to_string();
        self.item_type = fields.item_type;
        self.serial_number = fields.serial_number.trim().to_string();
        self.status = fields.status;
        self.stock = fields.stock.max(1);
        self.description = normalize_description(&fields.description);
    }

    pub(crate) fn from_fields(id: ItemId, fields: InventoryFields) -> Self {
        let mut item = InventoryItem {
            id,
            name: String::new(),
            item_type: InventoryType::Hardware,
            serial_number: String::new(),
            status: InventoryStatus::Activo,
            stock: 1,
            description: None,
        };
        item.apply(fields);
        item
    }
}

/// The editable fields of an inventory record, as held by the form dialog.
///
/// `Default` is the blank draft a create dialog starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFields {
    pub name: String,
    pub item_type: InventoryType,
    pub serial_number: String,
    pub status: InventoryStatus,
    pub stock: u32,
    pub description: String,
}

impl Default for InventoryFields {
    fn default() -> Self {
        InventoryFields {
            name: String::new(),
            item_type: InventoryType::Hardware,
            serial_number: String::new(),
            status: InventoryStatus::Activo,
            stock: 1,
            description: String::new(),
        }
    }
}

impl InventoryFields {
    /// Names of required fields that are blank after trimming
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.serial_number.trim().is_empty() {
            missing.push("serial_number");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// Parse the stock input box. Anything unparseable, zero or negative becomes 1.
pub fn parse_stock(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn normalize_description(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
