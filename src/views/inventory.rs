use super::confirm::ConfirmFlow;
use super::notice::Notifier;
use crate::model::{
    InventoryFields, InventoryItem, InventoryStatus, InventoryType, ItemId, parse_stock,
};
use crate::store::DataContext;
use crate::util::unicode::pop_grapheme;

pub const MSG_REQUIRED: &str = "Complete los campos requeridos";
pub const MSG_CREATED: &str = "Activo registrado exitosamente";
pub const MSG_UPDATED: &str = "Activo actualizado exitosamente";
pub const MSG_DELETED: &str = "Activo eliminado exitosamente";

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Type,
    Status,
    Serial,
    Stock,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Type,
        FormField::Status,
        FormField::Serial,
        FormField::Stock,
        FormField::Description,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nombre del activo *",
            FormField::Type => "Tipo",
            FormField::Status => "Estado",
            FormField::Serial => "Serial *",
            FormField::Stock => "Cantidad",
            FormField::Description => "Descripción",
        }
    }

    /// Choice fields cycle through a fixed set instead of taking text
    pub fn is_choice(self) -> bool {
        matches!(self, FormField::Type | FormField::Status)
    }
}

/// What the open form will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Update(InventoryItem),
}

/// The open create/edit dialog
#[derive(Debug, Clone)]
pub struct FormDialog {
    pub target: FormTarget,
    pub draft: InventoryFields,
    pub focus: FormField,
    /// Raw text of the stock box; `draft.stock` is its parsed value
    pub stock_input: String,
}

impl FormDialog {
    fn new(target: FormTarget, draft: InventoryFields) -> Self {
        FormDialog {
            stock_input: draft.stock.to_string(),
            target,
            draft,
            focus: FormField::Name,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            FormTarget::Create => "Registrar Nuevo Activo",
            FormTarget::Update(_) => "Editar Activo",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.target {
            FormTarget::Create => "Registrar",
            FormTarget::Update(_) => "Guardar Cambios",
        }
    }

    /// Text shown for a field
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.draft.name.clone(),
            FormField::Type => self.draft.item_type.label().to_string(),
            FormField::Status => self.draft.status.as_str().to_string(),
            FormField::Serial => self.draft.serial_number.clone(),
            FormField::Stock => self.stock_input.clone(),
            FormField::Description => self.draft.description.clone(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type a character into the focused text field
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Name => self.draft.name.push(c),
            FormField::Serial => self.draft.serial_number.push(c),
            FormField::Description => self.draft.description.push(c),
            FormField::Stock => {
                if c.is_ascii_digit() || (c == '-' && self.stock_input.is_empty()) {
                    self.stock_input.push(c);
                    self.draft.stock = parse_stock(&self.stock_input);
                }
            }
            FormField::Type | FormField::Status => {
                if c == ' ' {
                    self.cycle(true);
                }
            }
        }
    }

    /// Delete the last grapheme of the focused text field
    pub fn backspace(&mut self) {
        let buf = match self.focus {
            FormField::Name => &mut self.draft.name,
            FormField::Serial => &mut self.draft.serial_number,
            FormField::Description => &mut self.draft.description,
            FormField::Stock => &mut self.stock_input,
            FormField::Type | FormField::Status => return,
        };
        pop_grapheme(buf);
        if self.focus == FormField::Stock {
            self.draft.stock = parse_stock(&self.stock_input);
        }
    }

    /// Step a choice field forward or backward
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Type => {
                self.draft.item_type = step(&InventoryType::ALL, self.draft.item_type, forward)
            }
            FormField::Status => {
                self.draft.status = step(&InventoryStatus::ALL, self.draft.status, forward)
            }
            _ => {}
        }
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let i = all.iter().position(|v| *v == current).unwrap_or(0);
    let n = all.len();
    if forward {
        all[(i + 1) % n]
    } else {
        all[(i + n - 1) % n]
    }
}

/// Result of pressing submit on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No dialog was open
    NotOpen,
    /// Required fields blank; nothing called, dialog still open
    Invalid,
    Created(ItemId),
    Updated(ItemId),
    /// The data context refused the change; dialog still open
    Rejected,
}

/// State of the inventory screen
#[derive(Debug, Clone, Default)]
pub struct InventoryView {
    /// Highlighted table row
    pub cursor: usize,
    dialog: Option<FormDialog>,
    pub delete: ConfirmFlow<InventoryItem>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> Option<&FormDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut FormDialog> {
        self.dialog.as_mut()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Open a blank create form
    pub fn open_create(&mut self) {
        self.dialog = Some(FormDialog::new(FormTarget::Create, InventoryFields::default()));
    }

    /// Open the form pre-filled from `item`
    pub fn open_edit(&mut self, item: &InventoryItem) {
        self.dialog = Some(FormDialog::new(
            FormTarget::Update(item.clone()),
            item.fields(),
        ));
    }

    /// Close the form, discarding the draft
    pub fn cancel(&mut self) {
        self.dialog = None;
    }

    pub fn submit(
        &mut self,
        ctx: &mut dyn DataContext,
        notifier: &mut dyn Notifier,
    ) -> SubmitOutcome {
        let Some(dialog) = &self.dialog else {
            return SubmitOutcome::NotOpen;
        };

        if !dialog.draft.is_valid() {
            notifier.error(MSG_REQUIRED);
            return SubmitOutcome::Invalid;
        }

        let draft = dialog.draft.clone();
        let result = match &dialog.target {
            FormTarget::Update(item) => {
                let id = item.id;
                ctx.update_inventory_item(id, draft)
                    .map(|()| (SubmitOutcome::Updated(id), MSG_UPDATED))
            }
            FormTarget::Create => ctx
                .add_inventory_item(draft)
                .map(|id| (SubmitOutcome::Created(id), MSG_CREATED)),
        };

        match result {
            Ok((outcome, message)) => {
                notifier.success(message);
                self.dialog = None;
                outcome
            }
            Err(e) => {
                notifier.error(&e.to_string());
                SubmitOutcome::Rejected
            }
        }
    }

    pub fn request_delete(&mut self, item: &InventoryItem) {
        self.delete.request(item.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Delete the pending item. Returns whether a record was removed.
    pub fn confirm_delete(
        &mut self,
        ctx: &mut dyn DataContext,
        notifier: &mut dyn Notifier,
    ) -> bool {
        let removed = self
            .delete
            .confirm(|item| ctx.delete_inventory_item(item.id))
            .map(|result| match result {
                Ok(_) => {
                    notifier.success(MSG_DELETED);
                    true
                }
                Err(e) => {
                    notifier.error(&e.to_string());
                    false
                }
            })
            .unwrap_or(false);
        self.clamp_cursor(ctx.inventory().len());
        removed
    }

    /// The record under the cursor
    pub fn selected<'a>(&self, ctx: &'a dyn DataContext) -> Option<&'a InventoryItem> {
        ctx.inventory().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

/// Header line under the screen title
pub fn summary(count: usize) -> String {
    format!("{} activos registrados", count)
}
