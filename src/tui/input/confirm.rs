use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, View};

/// y confirms the pending delete; n or Esc dismisses it
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match app.view {
            View::Inventory => {
                app.inventory.confirm_delete(&mut app.store, &mut app.toast);
            }
            View::Tickets => {
                app.tickets.confirm_delete(&mut app.store, &mut app.toast);
            }
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => match app.view {
            View::Inventory => app.inventory.cancel_delete(),
            View::Tickets => app.tickets.cancel_delete(),
        },
        _ => {}
    }
}
