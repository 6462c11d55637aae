mod confirm;
mod form;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use form::handle_form;
use navigate::{handle_detail, handle_navigate};
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.mode() {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Detail => handle_detail(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TicketStatus;
    use crate::store::DataContext;
    use crate::tui::app::View;
    use crate::tui::render::test_helpers::*;
    use crate::views::inventory::{MSG_CREATED, MSG_DELETED, MSG_REQUIRED, MSG_UPDATED};
    use crate::views::tickets;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn toast(app: &App) -> String {
        app.toast
            .current()
            .map(|n| n.message.clone())
            .unwrap_or_default()
    }

    #[test]
    fn quit_and_view_switch() {
        let (_dir, mut app) = empty_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Tickets);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Inventory);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let (_dir, mut app) = empty_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn create_item_through_form() {
        let (_dir, mut app) = empty_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode(), Mode::Form);

        type_str(&mut app, "Laptop");
        press(&mut app, KeyCode::Tab); // Tipo
        press(&mut app, KeyCode::Right); // Software
        press(&mut app, KeyCode::Tab); // Estado
        press(&mut app, KeyCode::Tab); // Serial
        type_str(&mut app, "SN-9");
        press(&mut app, KeyCode::Tab); // Cantidad
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode(), Mode::Navigate);
        assert_eq!(toast(&app), MSG_CREATED);
        let items = app.store.inventory();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Laptop");
        assert_eq!(items[0].serial_number, "SN-9");
        assert_eq!(items[0].stock, 3);
        assert_eq!(items[0].item_type.as_str(), "Software");
    }

    #[test]
    fn blank_required_field_keeps_form_open() {
        let (_dir, mut app) = empty_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Sin serial");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Form);
        assert_eq!(toast(&app), MSG_REQUIRED);
        assert_eq!(app.inventory.dialog().unwrap().draft.name, "Sin serial");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Navigate);
        assert!(app.store.inventory().is_empty());
    }

    #[test]
    fn edit_selected_item() {
        let (_dir, mut app) = app_with_data();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, " USB");
        press(&mut app, KeyCode::Enter);
        assert_eq!(toast(&app), MSG_UPDATED);
        assert_eq!(app.store.inventory()[1].name, "Mouse USB");
    }

    #[test]
    fn delete_item_needs_confirmation() {
        let (_dir, mut app) = app_with_data();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), Mode::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.inventory().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode(), Mode::Navigate);
        assert_eq!(toast(&app), MSG_DELETED);
        assert_eq!(app.store.inventory().len(), 1);
        assert_eq!(app.store.inventory()[0].name, "Mouse");
    }

    #[test]
    fn live_search_and_escape() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode(), Mode::Search);
        type_str(&mut app, "vpn");
        assert_eq!(app.tickets.visible(&app.store).len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Navigate);
        assert_eq!(app.tickets.search, "vpn");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.tickets.search, "");
        assert_eq!(app.tickets.visible(&app.store).len(), 3);
    }

    #[test]
    fn filter_and_tabs() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.tickets.visible(&app.store).len(), 1);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.tickets.tab, tickets::TicketTab::Open);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.tickets.tab, tickets::TicketTab::Resolved);
    }

    #[test]
    fn detail_open_advance_close() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), Mode::Detail);
        press(&mut app, KeyCode::Char('s'));
        let first = app.store.tickets()[0];
        assert_eq!(first.status, TicketStatus::EnProgreso);
        assert_eq!(toast(&app), "Estado actualizado: En Progreso");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Navigate);
        assert!(app.tickets.selected_id().is_none());
    }

    #[test]
    fn delete_from_grid_does_not_select() {
        let (_dir, mut app) = app_with_data();
        app.view = View::Tickets;
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), Mode::Confirm);
        assert!(app.tickets.selected_id().is_none());
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(toast(&app), tickets::MSG_DELETED);
        let titles: Vec<&str> = app
            .store
            .tickets()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Printer jam", "Cambiar toner"]);
    }

    #[test]
    fn create_ticket_with_department() {
        let (_dir, mut app) = empty_app();
        app.view = View::Tickets;
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode(), Mode::Form);
        press(&mut app, KeyCode::Enter);
        assert_eq!(toast(&app), tickets::MSG_TITLE_REQUIRED);

        type_str(&mut app, "Sin red");
        press(&mut app, KeyCode::BackTab); // Departamento
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(toast(&app), tickets::MSG_CREATED);
        let created = app.store.tickets()[0];
        assert_eq!(created.title, "Sin red");
        assert_eq!(created.department_name.as_deref(), Some("Ventas"));
        assert_eq!(created.status, TicketStatus::Abierto);
    }
}
