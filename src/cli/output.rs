use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{InventoryItem, InventoryStatus, InventoryType, Ticket, TicketStatus};
use crate::util::unicode::{fit_to_width, one_line, truncate_to_width};
use crate::views::tickets::{Partition, TicketTab};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: InventoryType,
    pub serial_number: String,
    pub status: InventoryStatus,
    pub stock: u32,
    pub stock_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct TicketJson {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TicketCountsJson {
    pub all: usize,
    pub open: usize,
    pub progress: usize,
    pub resolved: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub desk: String,
    pub inventory: InventoryStatsJson,
    pub tickets: TicketCountsJson,
}

#[derive(Serialize)]
pub struct InventoryStatsJson {
    pub items: usize,
    pub units: u64,
    pub low_stock: usize,
    pub critical_stock: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &InventoryItem) -> ItemJson {
    ItemJson {
        id: item.id.0,
        name: item.name.clone(),
        item_type: item.item_type,
        serial_number: item.serial_number.clone(),
        status: item.status,
        stock: item.stock,
        stock_level: stock_level_str(item),
        description: item.description.clone(),
    }
}

pub fn ticket_to_json(ticket: &Ticket) -> TicketJson {
    TicketJson {
        id: ticket.id.0,
        title: ticket.title.clone(),
        description: ticket.description.clone(),
        status: ticket.status,
        department_name: ticket.department_name.clone(),
        created_at: ticket.created_at,
    }
}

pub fn counts_to_json(partition: &Partition) -> TicketCountsJson {
    TicketCountsJson {
        all: partition.count(TicketTab::All),
        open: partition.count(TicketTab::Open),
        progress: partition.count(TicketTab::Progress),
        resolved: partition.count(TicketTab::Resolved),
    }
}

fn stock_level_str(item: &InventoryItem) -> &'static str {
    use crate::model::StockLevel;
    match item.stock_level() {
        StockLevel::Normal => "normal",
        StockLevel::Low => "low",
        StockLevel::Critical => "critical",
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const NAME_W: usize = 28;
const TYPE_W: usize = 12;
const SERIAL_W: usize = 14;
const STATUS_W: usize = 14;

/// Format the inventory as an aligned table
pub fn format_inventory_table(items: &[&InventoryItem]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{:>4}  {}  {}  {}  {:>5}  {}",
        "ID",
        fit_to_width("Nombre", NAME_W),
        fit_to_width("Tipo", TYPE_W),
        fit_to_width("Serial", SERIAL_W),
        "Stock",
        "Estado",
    ));
    for item in items {
        lines.push(format_item_line(item));
    }
    lines
}

/// One inventory row. A low-stock marker follows the count.
pub fn format_item_line(item: &InventoryItem) -> String {
    use crate::model::StockLevel;
    let marker = match item.stock_level() {
        StockLevel::Critical => "!!",
        StockLevel::Low => "! ",
        StockLevel::Normal => "  ",
    };
    let kind = format!("{} {}", item.item_type.icon(), item.item_type.label());
    format!(
        "{:>4}  {}  {}  {}  {:>3}{}  {}",
        item.id.0,
        fit_to_width(&item.name, NAME_W),
        fit_to_width(&kind, TYPE_W),
        fit_to_width(&item.serial_number, SERIAL_W),
        item.stock,
        marker,
        fit_to_width(item.status.as_str(), STATUS_W).trim_end(),
    )
}

/// One ticket as `#id [status] title (department)`
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let dept = ticket
        .department_name
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    format!(
        "#{:<4} [{}] {}{}",
        ticket.id.0,
        ticket.status,
        truncate_to_width(&one_line(&ticket.title), 60),
        dept
    )
}

/// Tab-style count line, e.g. `Todos (3)  Abiertos (1)  ...`
pub fn format_ticket_counts(partition: &Partition) -> String {
    TicketTab::ALL
        .iter()
        .map(|tab| tab.label(partition.count(*tab)))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn parse_item_type(s: &str) -> Result<InventoryType, String> {
    InventoryType::parse(s).ok_or_else(|| {
        format!(
            "unknown type '{}' (expected: hardware, software, periferico)",
            s
        )
    })
}

pub fn parse_item_status(s: &str) -> Result<InventoryStatus, String> {
    InventoryStatus::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected: activo, mantenimiento, desincorporado)",
            s
        )
    })
}

pub fn parse_ticket_status(s: &str) -> Result<TicketStatus, String> {
    TicketStatus::parse(s).ok_or_else(|| {
        format!(
            "unknown status '{}' (expected: abierto, en-progreso, resuelto)",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryFields, ItemId, NewTicket, TicketId};

    fn item(stock: u32) -> InventoryItem {
        InventoryItem::from_fields(
            ItemId(7),
            InventoryFields {
                name: "Mouse".into(),
                item_type: InventoryType::Periferico,
                serial_number: "MS-01".into(),
                stock,
                ..Default::default()
            },
        )
    }

    #[test]
    fn item_line_marks_stock_level() {
        assert!(format_item_line(&item(1)).contains("  1!!"));
        assert!(format_item_line(&item(3)).contains("  3! "));
        assert!(format_item_line(&item(9)).contains("  9  "));
        assert!(format_item_line(&item(9)).ends_with("Activo"));
    }

    #[test]
    fn item_json_uses_wire_names() {
        let json = serde_json::to_value(item_to_json(&item(2))).unwrap();
        assert_eq!(json["type"], "Periferico");
        assert_eq!(json["stock_level"], "low");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn ticket_line_includes_department() {
        let t = NewTicket {
            title: "Printer jam".into(),
            department_name: Some("Sales".into()),
            ..Default::default()
        }
        .into_ticket(TicketId(3), Utc::now());
        insta::assert_snapshot!(format_ticket_line(&t), @"#3    [Abierto] Printer jam (Sales)");
    }

    #[test]
    fn counts_line() {
        let open = NewTicket {
            title: "VPN".into(),
            ..Default::default()
        }
        .into_ticket(TicketId(1), Utc::now());
        let mut done = open.clone();
        done.id = TicketId(2);
        done.status = TicketStatus::Resuelto;
        let p = crate::views::tickets::partition(
            &[&open, &done],
            "",
            crate::views::tickets::StatusFilter::All,
        );
        insta::assert_snapshot!(
            format_ticket_counts(&p),
            @"Todos (2)  Abiertos (1)  Progreso (0)  Resueltos (1)"
        );
        assert_eq!(counts_to_json(&p).resolved, 1);
    }

    #[test]
    fn parse_errors_list_choices() {
        assert!(parse_item_type("laptop").unwrap_err().contains("periferico"));
        assert_eq!(parse_ticket_status("resuelto"), Ok(TicketStatus::Resuelto));
        assert!(parse_item_status("roto").is_err());
    }
}
