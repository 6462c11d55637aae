use crossterm::event::{KeyCode, KeyEvent};

use crate::store::DataContext;
use crate::tui::app::{App, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.switch_view();
            return;
        }
        _ => {}
    }

    match app.view {
        View::Inventory => handle_inventory(app, key),
        View::Tickets => handle_tickets(app, key),
    }
}

fn handle_inventory(app: &mut App, key: KeyEvent) {
    let len = app.store.inventory().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.inventory.move_cursor(1, len),
        KeyCode::Char('k') | KeyCode::Up => app.inventory.move_cursor(-1, len),
        KeyCode::Char('g') | KeyCode::Home => app.inventory.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.inventory.cursor = len.saturating_sub(1),
        KeyCode::Char('a') | KeyCode::Char('n') => app.inventory.open_create(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(item) = app.inventory.selected(&app.store).cloned() {
                app.inventory.open_edit(&item);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(item) = app.inventory.selected(&app.store).cloned() {
                app.inventory.request_delete(&item);
            }
        }
        _ => {}
    }
}

fn handle_tickets(app: &mut App, key: KeyEvent) {
    let len = app.tickets.visible(&app.store).len();
    let columns = app.ticket_columns;
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.tickets.move_cursor(-1, 0, columns, len),
        KeyCode::Char('l') | KeyCode::Right => app.tickets.move_cursor(1, 0, columns, len),
        KeyCode::Char('k') | KeyCode::Up => app.tickets.move_cursor(0, -1, columns, len),
        KeyCode::Char('j') | KeyCode::Down => app.tickets.move_cursor(0, 1, columns, len),
        KeyCode::Char(']') => app.tickets.set_tab(app.tickets.tab.next()),
        KeyCode::Char('[') => app.tickets.set_tab(app.tickets.tab.prev()),
        KeyCode::Char('f') => app.tickets.cycle_filter(),
        KeyCode::Char('/') => app.searching = true,
        KeyCode::Char('n') | KeyCode::Char('a') => {
            let departments = app.desk.config.desk.departments.clone();
            app.tickets.open_create(&departments);
        }
        KeyCode::Enter => {
            if let Some(ticket) = app.tickets.current(&app.store).cloned() {
                app.tickets.open_detail(&ticket);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(ticket) = app.tickets.current(&app.store).cloned() {
                app.tickets.request_delete(&ticket);
            }
        }
        KeyCode::Char('s') => {
            if let Some(id) = app.tickets.current(&app.store).map(|t| t.id) {
                app.tickets.advance_status(id, &mut app.store, &mut app.toast);
            }
        }
        KeyCode::Esc => {
            if !app.tickets.search.is_empty() {
                app.tickets.clear_search();
            }
        }
        _ => {}
    }
}

/// Read-only ticket detail: advance status, delete, or close
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    let Some(id) = app.tickets.selected(&app.store).map(|t| t.id) else {
        // Deleted underneath us (e.g. by another process)
        app.tickets.close_detail();
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.tickets.close_detail(),
        KeyCode::Char('s') => {
            app.tickets.advance_status(id, &mut app.store, &mut app.toast);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(ticket) = app.store.ticket(id).cloned() {
                app.tickets.request_delete(&ticket);
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}
