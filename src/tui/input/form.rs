use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, View};
use crate::views::tickets::TicketField;

/// Keys for whichever create/edit dialog is open on the current view
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match app.view {
        View::Inventory => handle_item_form(app, key),
        View::Tickets => handle_ticket_form(app, key),
    }
}

fn handle_item_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.inventory.cancel();
            return;
        }
        KeyCode::Enter => {
            app.inventory.submit(&mut app.store, &mut app.toast);
            return;
        }
        _ => {}
    }

    let Some(dialog) = app.inventory.dialog_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
        KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
        KeyCode::Left if dialog.focus.is_choice() => dialog.cycle(false),
        KeyCode::Right if dialog.focus.is_choice() => dialog.cycle(true),
        KeyCode::Backspace => dialog.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dialog.insert_char(c)
        }
        _ => {}
    }
}

fn handle_ticket_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.tickets.cancel_create();
            return;
        }
        KeyCode::Enter => {
            if app
                .tickets
                .submit_create(&mut app.store, &mut app.toast)
                .is_some()
            {
                let len = app.tickets.visible(&app.store).len();
                app.tickets.clamp_cursor(len);
            }
            return;
        }
        _ => {}
    }

    let Some(form) = app.tickets.form_mut() else {
        return;
    };
    let on_department = form.focus == TicketField::Department;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Left if on_department => form.cycle_department(false),
        KeyCode::Right if on_department => form.cycle_department(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.insert_char(c),
        _ => {}
    }
}
