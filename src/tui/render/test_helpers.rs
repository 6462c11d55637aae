use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::config::{DeskConfig, DeskInfo, UiConfig};
use crate::model::desk::{DESK_DIR, Desk};
use crate::model::{InventoryFields, InventoryStatus, InventoryType, NewTicket, TicketStatus};
use crate::store::{DataContext, FileStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app (tab bar, content, popups, status row).
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _area| {
        crate::tui::render::render(frame, app);
    })
}

/// An App over a fresh temp desk with no records. Keep the TempDir alive.
pub fn empty_app() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join(DESK_DIR);
    std::fs::create_dir_all(&data_dir).unwrap();
    let desk = Desk {
        root: dir.path().to_path_buf(),
        data_dir: data_dir.clone(),
        config: DeskConfig {
            desk: DeskInfo {
                name: "Soporte TI".into(),
                departments: vec!["Ventas".into(), "Finanzas".into()],
            },
            ui: UiConfig::default(),
        },
    };
    let store = FileStore::open(&data_dir).unwrap();
    (dir, App::new(desk, store))
}

pub fn item(name: &str, serial: &str, stock: u32) -> InventoryFields {
    InventoryFields {
        name: name.into(),
        item_type: InventoryType::Hardware,
        serial_number: serial.into(),
        status: InventoryStatus::Activo,
        stock,
        description: String::new(),
    }
}

pub fn ticket(title: &str, department: Option<&str>, status: TicketStatus) -> NewTicket {
    NewTicket {
        title: title.into(),
        description: String::new(),
        department_name: department.map(str::to_string),
        status,
    }
}

/// Two items and three tickets, one per status.
pub fn app_with_data() -> (TempDir, App) {
    let (dir, mut app) = empty_app();
    let mut laptop = item("Laptop Dell", "SN-001", 1);
    laptop.description = "Equipo de\ncontabilidad".into();
    app.store.add_inventory_item(laptop).unwrap();
    let mut mouse = item("Mouse", "SN-002", 12);
    mouse.item_type = InventoryType::Periferico;
    mouse.status = InventoryStatus::Mantenimiento;
    app.store.add_inventory_item(mouse).unwrap();

    app.store
        .add_ticket(ticket("Printer jam", Some("Ventas"), TicketStatus::Abierto))
        .unwrap();
    app.store
        .add_ticket(ticket("VPN caida", Some("Finanzas"), TicketStatus::EnProgreso))
        .unwrap();
    app.store
        .add_ticket(ticket("Cambiar toner", None, TicketStatus::Resuelto))
        .unwrap();
    (dir, app)
}
