use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Live ticket search: every keystroke re-filters the board
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel search: drop the pattern entirely
        (_, KeyCode::Esc) => {
            app.tickets.clear_search();
            app.searching = false;
        }

        // Keep the pattern, return to the board
        (_, KeyCode::Enter) => {
            app.searching = false;
        }

        (_, KeyCode::Backspace) => {
            if app.tickets.search.is_empty() {
                app.searching = false;
            } else {
                app.tickets.pop_search();
            }
        }

        // Ctrl+U clears the line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.tickets.clear_search();
        }

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.tickets.push_search(c);
        }

        _ => {}
    }
}
