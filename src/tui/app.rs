use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::desk_io::{self, CONFIG_FILE};
use crate::io::logging;
use crate::io::watcher::{DeskChange, DeskWatcher};
use crate::model::desk::Desk;
use crate::store::{DataContext, FileStore};
use crate::views::inventory::InventoryView;
use crate::views::notice::{Notifier, Toast};
use crate::views::tickets::{TicketTab, TicketsView};

use super::input;
use super::render;
use super::theme::Theme;

pub const MSG_RELOADED: &str = "Datos recargados";

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Inventory,
    Tickets,
}

/// Current interaction mode, derived from view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the ticket search box
    Search,
    /// A create/edit form is open
    Form,
    /// A delete confirmation is open
    Confirm,
    /// The read-only ticket detail is open
    Detail,
}

/// Main application state
pub struct App {
    pub desk: Desk,
    pub store: FileStore,
    pub view: View,
    pub should_quit: bool,
    pub theme: Theme,
    pub inventory: InventoryView,
    pub tickets: TicketsView,
    pub toast: Toast,
    /// Search box has focus
    pub searching: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Cards per row in the ticket grid, set by the last render
    pub ticket_columns: usize,
}

impl App {
    pub fn new(desk: Desk, store: FileStore) -> Self {
        let theme = Theme::from_config(&desk.config.ui);
        App {
            desk,
            store,
            view: View::Inventory,
            should_quit: false,
            theme,
            inventory: InventoryView::new(),
            tickets: TicketsView::new(),
            toast: Toast::default(),
            searching: false,
            show_help: false,
            ticket_columns: 1,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.view {
            View::Inventory => {
                if self.inventory.delete.is_pending() {
                    Mode::Confirm
                } else if self.inventory.is_dialog_open() {
                    Mode::Form
                } else {
                    Mode::Navigate
                }
            }
            View::Tickets => {
                if self.tickets.delete.is_pending() {
                    Mode::Confirm
                } else if self.tickets.form().is_some() {
                    Mode::Form
                } else if self.tickets.selected_id().is_some() {
                    Mode::Detail
                } else if self.searching {
                    Mode::Search
                } else {
                    Mode::Navigate
                }
            }
        }
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Inventory => View::Tickets,
            View::Tickets => View::Inventory,
        };
        self.searching = false;
    }

    /// React to writes made by another process
    pub fn apply_external_change(&mut self, changes: &[DeskChange]) {
        let config_changed = changes
            .iter()
            .flat_map(|c| &c.paths)
            .any(|p| p.file_name().is_some_and(|n| n == CONFIG_FILE));
        let mut reloaded = false;

        if config_changed {
            match desk_io::load_desk(&self.desk.root) {
                Ok(desk) => {
                    self.theme = Theme::from_config(&desk.config.ui);
                    self.desk = desk;
                    reloaded = true;
                }
                Err(e) => tracing::warn!(error = %e, "desk.toml reload failed"),
            }
        }

        match self.store.reload() {
            Ok(changed) => reloaded |= changed,
            Err(e) => {
                tracing::warn!(error = %e, "data reload failed");
                self.toast.error(&e.to_string());
                return;
            }
        }

        if reloaded {
            self.inventory.clamp_cursor(self.store.inventory().len());
            let visible = self.tickets.visible(&self.store).len();
            self.tickets.clamp_cursor(visible);
            self.toast.success(MSG_RELOADED);
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.desk.data_dir) else {
        return;
    };

    if ui_state.view == "tickets" {
        app.view = View::Tickets;
    }
    app.inventory.cursor = ui_state.inventory_cursor;
    app.inventory.clamp_cursor(app.store.inventory().len());
    if let Some(tab) = TicketTab::parse(&ui_state.ticket_tab) {
        app.tickets.set_tab(tab);
    }
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let view = match app.view {
        View::Inventory => "inventory",
        View::Tickets => "tickets",
    };
    let ui_state = UiState {
        view: view.to_string(),
        inventory_cursor: app.inventory.cursor,
        ticket_tab: app.tickets.tab.as_str().to_string(),
    };

    if let Err(e) = write_ui_state(&app.desk.data_dir, &ui_state) {
        tracing::debug!(error = %e, "could not save ui state");
    }
}

/// Run the TUI application
pub fn run(desk_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match desk_dir {
        Some(d) => std::fs::canonicalize(d)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?,
        None => std::env::current_dir()?,
    };
    let root = desk_io::discover_desk(&start)?;
    let desk = desk_io::load_desk(&root)?;
    logging::init(&desk.data_dir);
    let store = FileStore::open(&desk.data_dir)?;
    tracing::info!(desk = %desk.config.desk.name, "tui started");

    let watcher = start_watcher(&desk.data_dir);
    let mut app = App::new(desk, store);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("tui stopped");

    result
}

fn start_watcher(data_dir: &Path) -> Option<DeskWatcher> {
    match DeskWatcher::start(data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable; external changes won't show");
            None
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DeskWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if let Some(w) = watcher {
            let changes = w.poll();
            if !changes.is_empty() {
                app.apply_external_change(&changes);
            }
        }

        app.toast.expire(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::desk_io::INVENTORY_FILE;
    use crate::tui::render::test_helpers::*;

    fn change(app: &App, file: &str) -> Vec<DeskChange> {
        vec![DeskChange {
            paths: vec![app.desk.data_dir.join(file)],
        }]
    }

    #[test]
    fn mode_follows_view_state() {
        let (_dir, mut app) = app_with_data();
        assert_eq!(app.mode(), Mode::Navigate);
        app.inventory.open_create();
        assert_eq!(app.mode(), Mode::Form);
        app.inventory.cancel();

        app.switch_view();
        app.searching = true;
        assert_eq!(app.mode(), Mode::Search);
        let t = app.tickets.current(&app.store).cloned().unwrap();
        app.tickets.open_detail(&t);
        assert_eq!(app.mode(), Mode::Detail);
        app.tickets.request_delete(&t);
        assert_eq!(app.mode(), Mode::Confirm);

        // Leaving the tickets view drops search focus
        app.switch_view();
        assert!(!app.searching);
    }

    #[test]
    fn ui_state_round_trips() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        app.inventory.cursor = 1;
        app.tickets.set_tab(TicketTab::Progress);
        save_ui_state(&app);

        let store = FileStore::open(&app.desk.data_dir).unwrap();
        let mut fresh = App::new(app.desk.clone(), store);
        restore_ui_state(&mut fresh);
        assert_eq!(fresh.view, View::Tickets);
        assert_eq!(fresh.inventory.cursor, 1);
        assert_eq!(fresh.tickets.tab, TicketTab::Progress);
    }

    #[test]
    fn restored_cursor_is_clamped() {
        let (_dir, mut app) = empty_app();
        app.inventory.cursor = 7;
        save_ui_state(&app);
        restore_ui_state(&mut app);
        assert_eq!(app.inventory.cursor, 0);
    }

    #[test]
    fn external_write_reloads_and_notifies() {
        let (_dir, mut app) = app_with_data();
        app.inventory.cursor = 1;

        let mut other = FileStore::open(&app.desk.data_dir).unwrap();
        let id = other.inventory()[1].id;
        other.delete_inventory_item(id).unwrap();

        let changes = change(&app, INVENTORY_FILE);
        app.apply_external_change(&changes);
        assert_eq!(app.store.inventory().len(), 1);
        assert_eq!(app.inventory.cursor, 0);
        assert_eq!(app.toast.current().unwrap().message, MSG_RELOADED);
    }

    #[test]
    fn own_write_is_not_reported() {
        let (_dir, mut app) = app_with_data();
        let changes = change(&app, INVENTORY_FILE);
        app.apply_external_change(&changes);
        assert!(app.toast.current().is_none());
    }

    #[test]
    fn config_change_reloads_departments() {
        let (_dir, mut app) = empty_app();
        std::fs::write(
            app.desk.data_dir.join(CONFIG_FILE),
            "[desk]\nname = \"Mesa Central\"\ndepartments = [\"Compras\"]\n",
        )
        .unwrap();
        let changes = change(&app, CONFIG_FILE);
        app.apply_external_change(&changes);
        assert_eq!(app.desk.config.desk.name, "Mesa Central");
        assert_eq!(app.desk.config.desk.departments, vec!["Compras"]);
        assert_eq!(app.toast.current().unwrap().message, MSG_RELOADED);
    }
}
