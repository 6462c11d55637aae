mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::desk_io::{self, DeskError};
use crate::io::{config_io, logging};
use crate::model::desk::Desk;
use crate::model::{ItemId, StockLevel, TicketId, parse_stock};
use crate::store::{DataContext, DataError, FileStore};
use crate::views::inventory::{self as inventory_view, InventoryView, SubmitOutcome};
use crate::views::notice::NoticeLog;
use crate::views::tickets::{self as tickets_view, StatusFilter, TicketTab, TicketsView};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let dir_override = resolve_dir(cli.desk_dir.as_deref())?;

    let dir = dir_override.as_deref();

    match cli.command {
        None => Err("no subcommand given (try `hd --help`)".into()),
        Some(cmd) => match cmd {
            // Init runs before any desk exists
            Commands::Init(args) => cmd_init(args, cli.desk_dir.as_deref()),

            Commands::Inventory(args) => cmd_inventory(args, &open_desk(dir)?, json),
            Commands::Tickets(args) => cmd_tickets(args, &open_desk(dir)?, json),
            Commands::Departments(args) => cmd_departments(args, &open_desk(dir)?, json),
            Commands::Stats => cmd_stats(&open_desk(dir)?, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_dir(dir: Option<&str>) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    match dir {
        Some(d) => {
            let abs = std::fs::canonicalize(d)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?;
            Ok(Some(abs))
        }
        None => Ok(None),
    }
}

/// Discover and load the desk, then start file logging inside it.
fn open_desk(dir_override: Option<&Path>) -> Result<Desk, DeskError> {
    let start = match dir_override {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(DeskError::IoError)?,
    };
    let root = desk_io::discover_desk(&start)?;
    let desk = desk_io::load_desk(&root)?;
    logging::init(&desk.data_dir);
    Ok(desk)
}

/// Fail with every error the action raised; otherwise echo its last notice
fn finish(log: &NoticeLog, json: bool) -> CmdResult {
    let errors: Vec<&str> = log.errors().map(|n| n.message.as_str()).collect();
    if !errors.is_empty() {
        return Err(errors.join("\n").into());
    }
    match log.last() {
        Some(n) if !json => {
            println!("{}", n.message);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn confirm_prompt(question: &str) -> Result<bool, std::io::Error> {
    eprint!("{} [y/n] ", question);
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

fn cmd_inventory(args: InventoryCmd, desk: &Desk, json: bool) -> CmdResult {
    let mut store = FileStore::open(&desk.data_dir)?;
    match args.action {
        InventoryAction::List => {
            let items = store.inventory();
            if json {
                let out: Vec<ItemJson> = items.iter().map(|i| item_to_json(i)).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", inventory_view::summary(items.len()));
                if !items.is_empty() {
                    println!();
                    for line in format_inventory_table(&items) {
                        println!("{}", line);
                    }
                }
            }
            Ok(())
        }
        InventoryAction::Add(a) => {
            let mut view = InventoryView::new();
            view.open_create();
            if let Some(dialog) = view.dialog_mut() {
                let draft = &mut dialog.draft;
                draft.name = a.name;
                draft.serial_number = a.serial;
                if let Some(t) = a.item_type.as_deref() {
                    draft.item_type = parse_item_type(t)?;
                }
                if let Some(s) = a.status.as_deref() {
                    draft.status = parse_item_status(s)?;
                }
                if let Some(stock) = a.stock.as_deref() {
                    draft.stock = parse_stock(stock);
                }
                draft.description = a.description.unwrap_or_default();
            }
            let mut log = NoticeLog::new();
            let outcome = view.submit(&mut store, &mut log);
            finish(&log, json)?;
            match outcome {
                SubmitOutcome::Created(id) if json => print_item_json(&store, id),
                SubmitOutcome::Created(id) => {
                    println!("  id: {}", id);
                    Ok(())
                }
                _ => Ok(()),
            }
        }
        InventoryAction::Edit(a) => {
            let id = ItemId(a.id);
            let item = store
                .inventory_item(id)
                .cloned()
                .ok_or(DataError::ItemNotFound(id))?;
            let mut view = InventoryView::new();
            view.open_edit(&item);
            if let Some(dialog) = view.dialog_mut() {
                let draft = &mut dialog.draft;
                if let Some(name) = a.name {
                    draft.name = name;
                }
                if let Some(serial) = a.serial {
                    draft.serial_number = serial;
                }
                if let Some(t) = a.item_type.as_deref() {
                    draft.item_type = parse_item_type(t)?;
                }
                if let Some(s) = a.status.as_deref() {
                    draft.status = parse_item_status(s)?;
                }
                if let Some(stock) = a.stock.as_deref() {
                    draft.stock = parse_stock(stock);
                }
                if let Some(desc) = a.description {
                    draft.description = desc;
                }
            }
            let mut log = NoticeLog::new();
            view.submit(&mut store, &mut log);
            finish(&log, json)?;
            if json {
                return print_item_json(&store, id);
            }
            Ok(())
        }
        InventoryAction::Rm(a) => {
            let id = ItemId(a.id);
            let item = store
                .inventory_item(id)
                .cloned()
                .ok_or(DataError::ItemNotFound(id))?;
            let question = format!(
                "¿Eliminar activo? El activo \"{}\" será eliminado permanentemente.",
                item.name
            );
            if !a.yes && !confirm_prompt(&question)? {
                println!("cancelled");
                return Ok(());
            }
            let mut view = InventoryView::new();
            let mut log = NoticeLog::new();
            view.request_delete(&item);
            view.confirm_delete(&mut store, &mut log);
            finish(&log, json)
        }
    }
}

fn print_item_json(store: &FileStore, id: ItemId) -> CmdResult {
    let item = store
        .inventory_item(id)
        .ok_or(DataError::ItemNotFound(id))?;
    println!("{}", serde_json::to_string_pretty(&item_to_json(item))?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

fn cmd_tickets(args: TicketsCmd, desk: &Desk, json: bool) -> CmdResult {
    let mut store = FileStore::open(&desk.data_dir)?;
    match args.action {
        TicketsAction::List(a) => {
            let mut view = TicketsView::new();
            if let Some(search) = a.search {
                view.search = search;
            }
            if let Some(s) = a.status.as_deref() {
                view.filter = StatusFilter::Only(parse_ticket_status(s)?);
            }
            let partition = view.partition(&store);
            let tickets = partition.tab(TicketTab::All);
            if json {
                let out: Vec<TicketJson> = tickets.iter().map(|t| ticket_to_json(t)).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", format_ticket_counts(&partition));
                println!();
                if tickets.is_empty() {
                    println!("{}", tickets_view::MSG_EMPTY);
                }
                for ticket in tickets {
                    println!("{}", format_ticket_line(ticket));
                }
            }
            Ok(())
        }
        TicketsAction::Add(a) => {
            if let Some(dept) = a.department.as_deref()
                && !desk
                    .config
                    .desk
                    .departments
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(dept.trim()))
            {
                eprintln!("note: department '{}' is not listed in desk.toml", dept);
            }
            let mut view = TicketsView::new();
            view.open_create(&desk.config.desk.departments);
            if let Some(form) = view.form_mut() {
                form.draft.title = a.title;
                form.draft.description = a.description;
                form.draft.department_name = a.department;
                if let Some(s) = a.status.as_deref() {
                    form.draft.status = parse_ticket_status(s)?;
                }
            }
            let mut log = NoticeLog::new();
            let created = view.submit_create(&mut store, &mut log);
            finish(&log, json)?;
            match created {
                Some(id) if json => print_ticket_json(&store, id),
                Some(id) => {
                    println!("  id: {}", id);
                    Ok(())
                }
                None => Ok(()),
            }
        }
        TicketsAction::Status(a) => {
            let id = TicketId(a.id);
            match a.status.as_deref() {
                Some(s) => {
                    let status = parse_ticket_status(s)?;
                    store.set_ticket_status(id, status)?;
                    if !json {
                        println!("#{} → {}", id, status);
                    }
                }
                None => {
                    let mut view = TicketsView::new();
                    let mut log = NoticeLog::new();
                    view.advance_status(id, &mut store, &mut log);
                    finish(&log, json)?;
                }
            }
            if json {
                return print_ticket_json(&store, id);
            }
            Ok(())
        }
        TicketsAction::Rm(a) => {
            let id = TicketId(a.id);
            let ticket = store
                .ticket(id)
                .cloned()
                .ok_or(DataError::TicketNotFound(id))?;
            let question = format!(
                "¿Eliminar ticket? El ticket \"{}\" será eliminado permanentemente.",
                ticket.title
            );
            if !a.yes && !confirm_prompt(&question)? {
                println!("cancelled");
                return Ok(());
            }
            let mut view = TicketsView::new();
            let mut log = NoticeLog::new();
            view.request_delete(&ticket);
            view.confirm_delete(&mut store, &mut log);
            finish(&log, json)
        }
    }
}

fn print_ticket_json(store: &FileStore, id: TicketId) -> CmdResult {
    let ticket = store.ticket(id).ok_or(DataError::TicketNotFound(id))?;
    println!("{}", serde_json::to_string_pretty(&ticket_to_json(ticket))?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

fn cmd_departments(args: DepartmentsCmd, desk: &Desk, json: bool) -> CmdResult {
    match args.action.unwrap_or(DepartmentsAction::List) {
        DepartmentsAction::List => {
            let departments = &desk.config.desk.departments;
            if json {
                println!("{}", serde_json::to_string_pretty(departments)?);
            } else {
                for dept in departments {
                    println!("{}", dept);
                }
            }
            Ok(())
        }
        DepartmentsAction::Add(a) => {
            let name = a.name.trim();
            if name.is_empty() {
                return Err("department name cannot be empty".into());
            }
            let (_, mut doc) = config_io::read_config(&desk.data_dir)?;
            if !config_io::add_department(&mut doc, name) {
                return Err(format!("department '{}' already exists", name).into());
            }
            config_io::write_config(&desk.data_dir, &doc)?;
            tracing::info!(department = name, "department added");
            println!("added department: {}", name);
            Ok(())
        }
        DepartmentsAction::Rm(a) => {
            let (_, mut doc) = config_io::read_config(&desk.data_dir)?;
            if !config_io::remove_department(&mut doc, &a.name) {
                return Err(format!("department not found: {}", a.name).into());
            }
            config_io::write_config(&desk.data_dir, &doc)?;
            tracing::info!(department = %a.name, "department removed");
            println!("removed department: {}", a.name.trim());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

fn cmd_stats(desk: &Desk, json: bool) -> CmdResult {
    let store = FileStore::open(&desk.data_dir)?;
    let items = store.inventory();
    let inventory = InventoryStatsJson {
        items: items.len(),
        units: items.iter().map(|i| u64::from(i.stock)).sum(),
        low_stock: items
            .iter()
            .filter(|i| i.stock_level() == StockLevel::Low)
            .count(),
        critical_stock: items
            .iter()
            .filter(|i| i.stock_level() == StockLevel::Critical)
            .count(),
    };
    let partition = tickets_view::partition(&store.tickets(), "", StatusFilter::All);

    if json {
        let out = StatsJson {
            desk: desk.config.desk.name.clone(),
            inventory,
            tickets: counts_to_json(&partition),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("== {} ==", desk.config.desk.name);
        println!();
        println!("{}", inventory_view::summary(inventory.items));
        println!("  unidades:       {}", inventory.units);
        println!("  stock bajo:     {}", inventory.low_stock);
        println!("  stock crítico:  {}", inventory.critical_stock);
        println!();
        println!("{}", format_ticket_counts(&partition));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::notice::Notifier;

    #[test]
    fn finish_reports_every_error() {
        let mut log = NoticeLog::new();
        log.error("Complete los campos requeridos");
        log.success("Activo registrado exitosamente");
        log.error("serial duplicado");

        let err = finish(&log, true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Complete los campos requeridos\nserial duplicado"
        );
    }

    #[test]
    fn finish_succeeds_without_errors() {
        let mut log = NoticeLog::new();
        log.success("Ticket creado exitosamente");
        assert!(finish(&log, true).is_ok());
        assert!(finish(&NoticeLog::new(), false).is_ok());
    }
}
