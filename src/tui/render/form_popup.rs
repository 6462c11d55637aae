use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, one_line, truncate_to_width};
use crate::views::inventory::FormField;

use super::centered_rect_fixed;

const POPUP_W: u16 = 56;

/// Render the inventory create/edit dialog
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = app.inventory.dialog() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("\u{25A4} {}", dialog.title()),
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for field in FormField::ALL {
        push_field(
            &mut lines,
            theme,
            field.label(),
            &dialog.value(field),
            field.is_choice(),
            dialog.focus == field,
            inner_w,
        );
    }

    lines.push(Line::from(""));
    lines.push(footer(theme, dialog.submit_label()));

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg))
        .padding(ratatui::widgets::Padding::horizontal(1));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// Label row plus value row for one form field. Text fields show a cursor
/// when focused; choice fields show ◂ value ▸.
pub(super) fn push_field<'a>(
    lines: &mut Vec<Line<'a>>,
    theme: &Theme,
    label: &'a str,
    value: &str,
    is_choice: bool,
    focused: bool,
    inner_w: usize,
) {
    let bg = theme.background;
    let label_style = if focused {
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };
    lines.push(Line::from(Span::styled(label, label_style)));

    let value_bg = if focused { theme.selection_bg } else { bg };
    let value_style = Style::default().fg(theme.text_bright).bg(value_bg);
    let mut spans: Vec<Span> = Vec::new();
    if is_choice {
        let arrow = Style::default()
            .fg(if focused { theme.highlight } else { theme.dim })
            .bg(value_bg);
        spans.push(Span::styled("\u{25C2} ", arrow));
        spans.push(Span::styled(value.to_string(), value_style));
        spans.push(Span::styled(" \u{25B8}", arrow));
    } else {
        // Show the tail of long input so the cursor stays visible
        let text = one_line(value);
        let budget = inner_w.saturating_sub(2);
        let shown = if display_width(&text) > budget {
            tail_to_width(&text, budget)
        } else {
            text
        };
        spans.push(Span::styled(shown, value_style));
        if focused {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(theme.highlight).bg(value_bg),
            ));
        }
    }
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if focused && used < inner_w {
        spans.push(Span::styled(
            " ".repeat(inner_w - used),
            Style::default().bg(value_bg),
        ));
    }
    lines.push(Line::from(spans));
}

/// Right-aligned "Esc Cancelar  Enter <submit>" hint
pub(super) fn footer<'a>(theme: &Theme, submit: &'a str) -> Line<'a> {
    let bg = theme.background;
    let key = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc = Style::default().fg(theme.text).bg(bg);
    Line::from(vec![
        Span::styled("Esc", key),
        Span::styled(" Cancelar   ", desc),
        Span::styled("Enter", key),
        Span::styled(format!(" {}", submit), desc),
    ])
    .right_aligned()
}

/// Keep the last `max_cells` cells of `s`, prefixed with `…`
fn tail_to_width(s: &str, max_cells: usize) -> String {
    let reversed: String = s.chars().rev().collect();
    let cut = truncate_to_width(&reversed, max_cells);
    let body: String = cut.trim_end_matches('\u{2026}').chars().rev().collect();
    format!("\u{2026}{}", body)
}
