//! Create/edit modal state

use lumiere_api::{EntityId, ResourceKind};
use serde_json::Value;

use crate::forms::{Editable, FieldSpec, FormFields, ValidationError, validate};
use crate::notify::Notifier;
use crate::source::CollectionSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(EntityId),
}

/// Result of asking the modal to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRequest {
    Closed,
    /// Fields were edited; the user must confirm discarding them
    NeedsConfirmation,
}

/// Result of submitting the modal
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the mutation; the list should refetch
    Saved(Value),
    /// Client-side validation failed, nothing was sent
    Invalid(ValidationError),
    /// The request was sent and failed; the form keeps its values
    Failed(String),
}

/// A form for creating or editing one entity
#[derive(Debug, Clone)]
pub struct MutationModal {
    kind: ResourceKind,
    mode: ModalMode,
    specs: &'static [FieldSpec],
    check: fn(&FormFields) -> Result<Value, ValidationError>,
    initial: FormFields,
    fields: FormFields,
    focus: usize,
    confirming_close: bool,
    error: Option<ValidationError>,
}

impl MutationModal {
    /// An empty form for a new `R`
    pub fn create<R: Editable>() -> Self {
        Self::new::<R>(ModalMode::Create, FormFields::blank(R::FIELDS))
    }

    /// A form pre-populated with `entity`'s current values
    pub fn edit<R: Editable>(entity: &R) -> Self {
        let current = entity.form_values();
        let mut values = FormFields::blank(R::FIELDS);
        for spec in R::FIELDS {
            values.set(spec.name, current.get(spec.name));
        }
        Self::new::<R>(ModalMode::Edit(entity.id().clone()), values)
    }

    fn new<R: Editable>(mode: ModalMode, initial: FormFields) -> Self {
        Self {
            kind: R::KIND,
            mode,
            specs: R::FIELDS,
            check: validate::<R>,
            fields: initial.clone(),
            initial,
            focus: 0,
            confirming_close: false,
            error: None,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn mode(&self) -> &ModalMode {
        &self.mode
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&FieldSpec> {
        self.specs.get(self.focus)
    }

    /// Last validation failure, cleared on the next edit
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_confirming_close(&self) -> bool {
        self.confirming_close
    }

    pub fn title(&self) -> String {
        match &self.mode {
            ModalMode::Create => format!("New {}", self.kind.label()),
            ModalMode::Edit(id) => format!("Edit {} #{id}", self.kind.label()),
        }
    }

    pub fn focus_next(&mut self) {
        if !self.specs.is_empty() {
            self.focus = (self.focus + 1) % self.specs.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.specs.is_empty() {
            self.focus = (self.focus + self.specs.len() - 1) % self.specs.len();
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(spec) = self.focused() {
            let name = spec.name;
            self.fields.get_mut(name).push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(spec) = self.focused() {
            let name = spec.name;
            self.fields.get_mut(name).pop();
            self.error = None;
        }
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.set(name, value);
        self.error = None;
    }

    /// Whether any field differs from what the modal opened with
    pub fn is_dirty(&self) -> bool {
        self.fields != self.initial
    }

    /// Close unless there are unsaved edits
    pub fn request_close(&mut self) -> CloseRequest {
        if self.is_dirty() {
            self.confirming_close = true;
            CloseRequest::NeedsConfirmation
        } else {
            CloseRequest::Closed
        }
    }

    /// Keep editing after a close was requested
    pub fn cancel_close(&mut self) {
        self.confirming_close = false;
    }

    /// Throw the edits away; the owner drops the modal on `Closed`
    pub fn confirm_discard(&mut self) -> CloseRequest {
        self.confirming_close = false;
        self.fields = self.initial.clone();
        CloseRequest::Closed
    }

    /// Validate and send the form.
    ///
    /// Invalid forms never reach the backend. On success a
    /// "<Label> created/updated successfully" notification is emitted; on
    /// failure the server's message is reported and the fields are kept.
    pub async fn submit(
        &mut self,
        source: &dyn CollectionSource,
        notifier: &Notifier,
    ) -> SubmitOutcome {
        let payload = match (self.check)(&self.fields) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("{} form rejected: {e}", self.kind.label());
                notifier.error(e.to_string());
                self.error = Some(e.clone());
                return SubmitOutcome::Invalid(e);
            }
        };

        let (result, verb) = match &self.mode {
            ModalMode::Create => (source.create(self.kind, payload).await, "created"),
            ModalMode::Edit(id) => (source.update(self.kind, id, payload).await, "updated"),
        };

        match result {
            Ok(value) => {
                notifier.success(format!("{} {verb} successfully", self.kind.sentence_label()));
                self.initial = self.fields.clone();
                SubmitOutcome::Saved(value)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("saving {} failed: {e}", self.kind.label());
                notifier.error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_api::catalog::Brand;

    fn brand() -> Brand {
        Brand {
            id: EntityId::Number(3),
            name: "Acme".into(),
            description: "Gentle basics".into(),
            origin: Some("Korea".into()),
            is_deleted: false,
        }
    }

    #[test]
    fn test_edit_prepopulates_fields() {
        let modal = MutationModal::edit(&brand());
        assert_eq!(modal.fields().get("name"), "Acme");
        assert_eq!(modal.fields().get("origin"), "Korea");
        assert_eq!(modal.title(), "Edit brand #3");
        assert!(!modal.is_dirty());
    }

    #[test]
    fn test_dirty_modal_asks_before_closing() {
        let mut modal = MutationModal::create::<Brand>();
        assert_eq!(modal.request_close(), CloseRequest::Closed);

        modal.input_char('A');
        assert!(modal.is_dirty());
        assert_eq!(modal.request_close(), CloseRequest::NeedsConfirmation);
        assert!(modal.is_confirming_close());

        modal.cancel_close();
        assert!(!modal.is_confirming_close());
        assert_eq!(modal.fields().get("name"), "A");
    }

    #[test]
    fn test_typing_back_to_original_is_clean() {
        let mut modal = MutationModal::edit(&brand());
        modal.input_char('x');
        modal.backspace();
        assert!(!modal.is_dirty());
    }

    #[test]
    fn test_focus_wraps() {
        let mut modal = MutationModal::create::<Brand>();
        modal.focus_prev();
        assert_eq!(modal.focused().map(|s| s.name), Some("origin"));
        modal.focus_next();
        assert_eq!(modal.focused().map(|s| s.name), Some("name"));
    }
    #[test]
    fn test_untouched_expired_voucher_is_not_reactivated() {
        use lumiere_api::commerce::{Voucher, VoucherStatus};

        let voucher = Voucher {
            id: EntityId::Number(11),
            code: "SUMMER".into(),
            description: String::new(),
            discount_percent: 15,
            max_discount: Some(100_000),
            points_required: 500,
            quantity: 3,
            status: VoucherStatus::Expired,
            expires_on: None,
            is_deleted: false,
        };
        let modal = MutationModal::edit(&voucher);
        assert!(!modal.is_dirty());
        let payload = validate::<Voucher>(modal.fields()).unwrap();
        assert_eq!(payload["status"], "Expired");
    }
}
