use regex::{Regex, RegexBuilder};

use super::confirm::ConfirmFlow;
use super::notice::Notifier;
use crate::model::{NewTicket, Ticket, TicketId, TicketStatus};
use crate::store::DataContext;
use crate::util::unicode::pop_grapheme;

pub const MSG_CREATED: &str = "Ticket creado exitosamente";
pub const MSG_DELETED: &str = "Ticket eliminado exitosamente";
pub const MSG_TITLE_REQUIRED: &str = "Complete los campos requeridos";
pub const MSG_EMPTY: &str = "No se encontraron tickets";

/// Status dropdown: everything, or a single workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    const CYCLE: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(TicketStatus::Abierto),
        StatusFilter::Only(TicketStatus::EnProgreso),
        StatusFilter::Only(TicketStatus::Resuelto),
    ];

    pub fn next(self) -> StatusFilter {
        let i = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "Todos",
            StatusFilter::Only(TicketStatus::Abierto) => "Abiertos",
            StatusFilter::Only(TicketStatus::EnProgreso) => "En Progreso",
            StatusFilter::Only(TicketStatus::Resuelto) => "Resueltos",
        }
    }

    pub fn admits(self, status: TicketStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => s == status,
        }
    }
}

/// Substring match on title, description or department, ignoring case,
/// combined with the status filter. An empty search matches everything.
pub fn matches(ticket: &Ticket, search: &str, filter: StatusFilter) -> bool {
    let needle = search.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);
    let text_match = hit(&ticket.title)
        || hit(&ticket.description)
        || ticket.department_name.as_deref().is_some_and(hit);
    text_match && filter.admits(ticket.status)
}

/// Case-insensitive literal pattern for highlighting search hits
pub fn search_regex(search: &str) -> Option<Regex> {
    if search.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(search))
        .case_insensitive(true)
        .build()
        .ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketTab {
    #[default]
    All,
    Open,
    Progress,
    Resolved,
}

impl TicketTab {
    pub const ALL: [TicketTab; 4] = [
        TicketTab::All,
        TicketTab::Open,
        TicketTab::Progress,
        TicketTab::Resolved,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> TicketTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> TicketTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            TicketTab::All => "Todos",
            TicketTab::Open => "Abiertos",
            TicketTab::Progress => "Progreso",
            TicketTab::Resolved => "Resueltos",
        }
    }

    pub fn label(self, count: usize) -> String {
        format!("{} ({})", self.title(), count)
    }

    /// Key used in `.state.json`
    pub fn as_str(self) -> &'static str {
        match self {
            TicketTab::All => "all",
            TicketTab::Open => "open",
            TicketTab::Progress => "progress",
            TicketTab::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<TicketTab> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Filtered tickets split by status. Built fresh for every frame.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub all: Vec<&'a Ticket>,
    pub open: Vec<&'a Ticket>,
    pub progress: Vec<&'a Ticket>,
    pub resolved: Vec<&'a Ticket>,
}

impl<'a> Partition<'a> {
    pub fn tab(&self, tab: TicketTab) -> &[&'a Ticket] {
        match tab {
            TicketTab::All => &self.all,
            TicketTab::Open => &self.open,
            TicketTab::Progress => &self.progress,
            TicketTab::Resolved => &self.resolved,
        }
    }

    pub fn count(&self, tab: TicketTab) -> usize {
        self.tab(tab).len()
    }
}

pub fn partition<'a>(tickets: &[&'a Ticket], search: &str, filter: StatusFilter) -> Partition<'a> {
    let mut out = Partition::default();
    for ticket in tickets.iter().copied() {
        if !matches(ticket, search, filter) {
            continue;
        }
        out.all.push(ticket);
        match ticket.status {
            TicketStatus::Abierto => out.open.push(ticket),
            TicketStatus::EnProgreso => out.progress.push(ticket),
            TicketStatus::Resuelto => out.resolved.push(ticket),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Title,
    Description,
    Department,
}

impl TicketField {
    pub const ALL: [TicketField; 3] = [
        TicketField::Title,
        TicketField::Description,
        TicketField::Department,
    ];

    pub fn next(self) -> TicketField {
        match self {
            TicketField::Title => TicketField::Description,
            TicketField::Description => TicketField::Department,
            TicketField::Department => TicketField::Title,
        }
    }

    pub fn prev(self) -> TicketField {
        match self {
            TicketField::Title => TicketField::Department,
            TicketField::Description => TicketField::Title,
            TicketField::Department => TicketField::Description,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketField::Title => "Título *",
            TicketField::Description => "Descripción",
            TicketField::Department => "Departamento",
        }
    }
}

/// The ticket-creation dialog
#[derive(Debug, Clone)]
pub struct TicketForm {
    pub draft: NewTicket,
    pub focus: TicketField,
    departments: Vec<String>,
    /// 0 is "no department", n is `departments[n - 1]`
    department_choice: usize,
}

impl TicketForm {
    pub fn new(departments: Vec<String>) -> Self {
        TicketForm {
            draft: NewTicket::default(),
            focus: TicketField::Title,
            departments,
            department_choice: 0,
        }
    }

    pub fn department_label(&self) -> &str {
        self.draft.department_name.as_deref().unwrap_or("Sin departamento")
    }

    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            TicketField::Title => self.draft.title.push(c),
            TicketField::Description => self.draft.description.push(c),
            TicketField::Department => {
                if c == ' ' {
                    self.cycle_department(true);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        let buf = match self.focus {
            TicketField::Title => &mut self.draft.title,
            TicketField::Description => &mut self.draft.description,
            TicketField::Department => return,
        };
        pop_grapheme(buf);
    }

    pub fn cycle_department(&mut self, forward: bool) {
        let n = self.departments.len() + 1;
        self.department_choice = if forward {
            (self.department_choice + 1) % n
        } else {
            (self.department_choice + n - 1) % n
        };
        self.draft.department_name = match self.department_choice {
            0 => None,
            i => self.departments.get(i - 1).cloned(),
        };
    }
}

/// State of the tickets screen
#[derive(Debug, Clone, Default)]
pub struct TicketsView {
    pub search: String,
    pub filter: StatusFilter,
    pub tab: TicketTab,
    /// Index into the active tab's cards
    pub cursor: usize,
    selected: Option<TicketId>,
    form: Option<TicketForm>,
    pub delete: ConfirmFlow<Ticket>,
}

impl TicketsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn partition<'a>(&self, ctx: &'a dyn DataContext) -> Partition<'a> {
        partition(&ctx.tickets(), &self.search, self.filter)
    }

    /// Cards on the active tab
    pub fn visible<'a>(&self, ctx: &'a dyn DataContext) -> Vec<&'a Ticket> {
        self.partition(ctx).tab(self.tab).to_vec()
    }

    /// The card under the cursor
    pub fn current<'a>(&self, ctx: &'a dyn DataContext) -> Option<&'a Ticket> {
        self.visible(ctx).get(self.cursor).copied()
    }

    pub fn set_tab(&mut self, tab: TicketTab) {
        self.tab = tab;
        self.cursor = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.cursor = 0;
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.cursor = 0;
    }

    pub fn pop_search(&mut self) {
        pop_grapheme(&mut self.search);
        self.cursor = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.cursor = 0;
    }

    /// Move across a grid of `columns` cards per row
    pub fn move_cursor(&mut self, dx: isize, dy: isize, columns: usize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let columns = columns.max(1) as isize;
        let next = self.cursor as isize + dx + dy * columns;
        if (0..len as isize).contains(&next) {
            self.cursor = next as usize;
        } else if dy != 0 {
            self.cursor = next.clamp(0, len as isize - 1) as usize;
        }
    }

    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    // Detail dialog

    pub fn open_detail(&mut self, ticket: &Ticket) {
        self.selected = Some(ticket.id);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// The ticket shown in the detail dialog, if it still exists
    pub fn selected<'a>(&self, ctx: &'a dyn DataContext) -> Option<&'a Ticket> {
        self.selected.and_then(|id| ctx.ticket(id))
    }

    pub fn selected_id(&self) -> Option<TicketId> {
        self.selected
    }

    // Creation dialog

    pub fn form(&self) -> Option<&TicketForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TicketForm> {
        self.form.as_mut()
    }

    pub fn open_create(&mut self, departments: &[String]) {
        self.form = Some(TicketForm::new(departments.to_vec()));
    }

    pub fn cancel_create(&mut self) {
        self.form = None;
    }

    /// Create the drafted ticket. Returns the new id on success.
    pub fn submit_create(
        &mut self,
        ctx: &mut dyn DataContext,
        notifier: &mut dyn Notifier,
    ) -> Option<TicketId> {
        let form = self.form.as_ref()?;
        if form.draft.title.trim().is_empty() {
            notifier.error(MSG_TITLE_REQUIRED);
            return None;
        }
        match ctx.add_ticket(form.draft.clone()) {
            Ok(id) => {
                notifier.success(MSG_CREATED);
                self.form = None;
                Some(id)
            }
            Err(e) => {
                notifier.error(&e.to_string());
                None
            }
        }
    }

    // Deletion

    /// Arm deletion. Leaves the selection alone.
    pub fn request_delete(&mut self, ticket: &Ticket) {
        self.delete.request(ticket.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn confirm_delete(
        &mut self,
        ctx: &mut dyn DataContext,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let removed = self
            .delete
            .confirm(|ticket| ctx.delete_ticket(ticket.id))
            .map(|result| match result {
                Ok(ticket) => {
                    if self.selected == Some(ticket.id) {
                        self.selected = None;
                    }
                    notifier.success(MSG_DELETED);
                    true
                }
                Err(e) => {
                    notifier.error(&e.to_string());
                    false
                }
            })
            .unwrap_or(false);
        let len = self.visible(ctx).len();
        self.clamp_cursor(len);
        removed
    }

    /// Move a ticket one step along Abierto, En Progreso, Resuelto
    pub fn advance_status(
        &mut self,
        id: TicketId,
        ctx: &mut dyn DataContext,
        notifier: &mut dyn Notifier,
    ) -> Option<TicketStatus> {
        let Some(current) = ctx.ticket(id).map(|t| t.status) else {
            notifier.error(&crate::store::DataError::TicketNotFound(id).to_string());
            return None;
        };
        let next = current.next();
        match ctx.set_ticket_status(id, next) {
            Ok(()) => {
                notifier.success(&format!("Estado actualizado: {}", next));
                let len = self.visible(ctx).len();
                self.clamp_cursor(len);
                Some(next)
            }
            Err(e) => {
                notifier.error(&e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::notice::{NoticeLevel, NoticeLog};
    use crate::views::testing::{Call, RecordingContext};

    fn new_ticket(title: &str, desc: &str, dept: Option<&str>) -> NewTicket {
        NewTicket {
            title: title.into(),
            description: desc.into(),
            department_name: dept.map(String::from),
            ..Default::default()
        }
    }

    /// Three tickets, one per status
    fn seeded() -> RecordingContext {
        let mut ctx = RecordingContext::new();
        ctx.inner
            .add_ticket(new_ticket("Printer jam", "Tray 2", Some("Sales")))
            .unwrap();
        let b = ctx
            .inner
            .add_ticket(new_ticket("VPN caída", "No conecta desde casa", Some("Finanzas")))
            .unwrap();
        let c = ctx
            .inner
            .add_ticket(new_ticket("Teclado roto", "Tecla Enter", None))
            .unwrap();
        ctx.inner.set_ticket_status(b, TicketStatus::EnProgreso).unwrap();
        ctx.inner.set_ticket_status(c, TicketStatus::Resuelto).unwrap();
        ctx
    }

    #[test]
    fn search_matches_department_case_insensitively() {
        let ctx = seeded();
        let tickets = ctx.tickets();
        let printer = tickets[0];
        assert!(matches(printer, "sales", StatusFilter::All));
        assert!(matches(printer, "PRINTER", StatusFilter::All));
        assert!(matches(printer, "tray", StatusFilter::All));
        assert!(!matches(printer, "vpn", StatusFilter::All));
        assert!(!matches(printer, "sales", StatusFilter::Only(TicketStatus::Resuelto)));
    }

    #[test]
    fn missing_department_never_matches_on_department() {
        let ctx = seeded();
        let keyboard = ctx.tickets()[2];
        assert!(!matches(keyboard, "sales", StatusFilter::All));
        assert!(matches(keyboard, "", StatusFilter::All));
    }

    #[test]
    fn partition_counts_add_up() {
        let ctx = seeded();
        for search in ["", "a", "sales", "zzz"] {
            for filter in StatusFilter::CYCLE {
                let p = partition(&ctx.tickets(), search, filter);
                assert_eq!(
                    p.count(TicketTab::Open)
                        + p.count(TicketTab::Progress)
                        + p.count(TicketTab::Resolved),
                    p.count(TicketTab::All)
                );
            }
        }
        let p = partition(&ctx.tickets(), "", StatusFilter::All);
        assert_eq!(TicketTab::All.label(p.count(TicketTab::All)), "Todos (3)");
        assert_eq!(TicketTab::Progress.label(p.count(TicketTab::Progress)), "Progreso (1)");
    }

    #[test]
    fn status_filter_narrows_every_tab() {
        let ctx = seeded();
        let p = partition(
            &ctx.tickets(),
            "",
            StatusFilter::Only(TicketStatus::EnProgreso),
        );
        assert_eq!(p.count(TicketTab::All), 1);
        assert_eq!(p.count(TicketTab::Open), 0);
        assert_eq!(p.all[0].title, "VPN caída");
    }

    #[test]
    fn filter_cycle_and_labels() {
        let mut f = StatusFilter::All;
        let mut labels = Vec::new();
        for _ in 0..4 {
            labels.push(f.label());
            f = f.next();
        }
        assert_eq!(labels, vec!["Todos", "Abiertos", "En Progreso", "Resueltos"]);
        assert_eq!(f, StatusFilter::All);
    }

    #[test]
    fn tab_state_keys_round_trip() {
        for tab in TicketTab::ALL {
            assert_eq!(TicketTab::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(TicketTab::parse("closed"), None);
        assert_eq!(TicketTab::Resolved.next(), TicketTab::All);
        assert_eq!(TicketTab::All.prev(), TicketTab::Resolved);
    }

    #[test]
    fn search_regex_escapes_input() {
        let re = search_regex("a.b").unwrap();
        assert!(re.is_match("A.B"));
        assert!(!re.is_match("axb"));
        assert!(search_regex("").is_none());
    }

    #[test]
    fn create_with_blank_title_keeps_dialog() {
        let mut ctx = RecordingContext::new();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        view.open_create(&[]);
        view.form_mut().unwrap().draft.title = "   ".into();

        assert_eq!(view.submit_create(&mut ctx, &mut log), None);
        assert!(ctx.calls.is_empty());
        assert!(view.form().is_some());
        assert_eq!(log.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn create_closes_dialog_and_notifies() {
        let mut ctx = RecordingContext::new();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        view.open_create(&["Ventas".to_string(), "Finanzas".to_string()]);
        {
            let form = view.form_mut().unwrap();
            for c in "Monitor parpadea".chars() {
                form.insert_char(c);
            }
            form.focus = TicketField::Department;
            form.cycle_department(true);
            form.cycle_department(true);
            assert_eq!(form.department_label(), "Finanzas");
        }

        let id = view.submit_create(&mut ctx, &mut log).unwrap();
        assert_eq!(ctx.calls, vec![Call::AddTicket("Monitor parpadea".into())]);
        assert!(view.form().is_none());
        assert_eq!(log.last().unwrap().message, MSG_CREATED);
        let ticket = ctx.ticket(id).unwrap();
        assert_eq!(ticket.status, TicketStatus::Abierto);
        assert_eq!(ticket.department_name.as_deref(), Some("Finanzas"));
    }

    #[test]
    fn department_cycle_wraps_to_none() {
        let mut form = TicketForm::new(vec!["Ventas".into()]);
        form.cycle_department(false);
        assert_eq!(form.draft.department_name.as_deref(), Some("Ventas"));
        form.cycle_department(true);
        assert_eq!(form.draft.department_name, None);
        assert_eq!(form.department_label(), "Sin departamento");
    }

    #[test]
    fn delete_does_not_select() {
        let mut ctx = seeded();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        let target = ctx.tickets()[1].clone();

        view.request_delete(&target);
        assert_eq!(view.selected_id(), None);
        assert!(view.confirm_delete(&mut ctx, &mut log));
        assert_eq!(ctx.calls, vec![Call::DeleteTicket(target.id)]);
        assert_eq!(log.last().unwrap().message, MSG_DELETED);
        assert_eq!(ctx.tickets().len(), 2);
    }

    #[test]
    fn cancel_delete_calls_nothing() {
        let mut ctx = seeded();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        let target = ctx.tickets()[0].clone();

        view.request_delete(&target);
        view.cancel_delete();
        assert!(!view.confirm_delete(&mut ctx, &mut log));
        assert!(ctx.calls.is_empty());
        assert!(!view.delete.is_pending());
    }

    #[test]
    fn deleting_the_open_ticket_closes_detail() {
        let mut ctx = seeded();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        let target = ctx.tickets()[0].clone();

        view.open_detail(&target);
        view.request_delete(&target);
        view.confirm_delete(&mut ctx, &mut log);
        assert_eq!(view.selected_id(), None);
    }

    #[test]
    fn detail_open_and_close() {
        let ctx = seeded();
        let mut view = TicketsView::new();
        let target = ctx.tickets()[2];
        view.open_detail(target);
        assert_eq!(view.selected(&ctx).unwrap().title, "Teclado roto");
        view.close_detail();
        assert!(view.selected(&ctx).is_none());
    }

    #[test]
    fn advance_status_walks_the_workflow() {
        let mut ctx = seeded();
        let mut log = NoticeLog::new();
        let mut view = TicketsView::new();
        let id = ctx.tickets()[2].id;

        assert_eq!(
            view.advance_status(id, &mut ctx, &mut log),
            Some(TicketStatus::Abierto)
        );
        assert_eq!(ctx.calls, vec![Call::SetStatus(id, TicketStatus::Abierto)]);
        assert_eq!(log.last().unwrap().message, "Estado actualizado: Abierto");

        assert_eq!(view.advance_status(TicketId(99), &mut ctx, &mut log), None);
        assert_eq!(log.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn grid_cursor_moves_by_rows() {
        let mut view = TicketsView::new();
        view.move_cursor(0, 1, 3, 7);
        assert_eq!(view.cursor, 3);
        view.move_cursor(1, 0, 3, 7);
        assert_eq!(view.cursor, 4);
        view.move_cursor(0, 1, 3, 7);
        assert_eq!(view.cursor, 6);
        view.move_cursor(1, 0, 3, 7);
        assert_eq!(view.cursor, 6);
        view.move_cursor(0, -5, 3, 7);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn search_edits_reset_cursor() {
        let mut view = TicketsView::new();
        view.cursor = 2;
        view.push_search('í');
        assert_eq!(view.cursor, 0);
        view.pop_search();
        assert_eq!(view.search, "");
    }
}
