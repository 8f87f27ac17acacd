//! Draft state shared by the product and checkout forms.
//!
//! A [`Form`] owns one session's values, touched flags and derived errors.
//! Every mutation re-runs the validator over the whole draft; whether an
//! error is shown depends on the field being touched or a submit attempt.

pub mod checkout;
pub mod event;
pub mod product;
pub mod state;

pub use event::FormEvent;

use crate::core::FieldId;
use crate::core::value::{Value, Values};
use crate::validation::{self, Schema, ValidationErrors};
use state::{ErrorVisibility, ValidationState};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Validating,
    Invalid,
    Valid,
    Submitting,
    Done,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("form session is closed")]
    Closed,
}

impl SubmitError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Closed => None,
        }
    }
}

/// What the rendering layer needs for one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldView<'a> {
    pub id: &'a FieldId,
    pub value: &'a Value,
    pub touched: bool,
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Form {
    schema: Schema,
    values: Values,
    touched: HashSet<FieldId>,
    validation: ValidationState,
    submit_attempted: bool,
    phase: FormPhase,
}

impl Form {
    pub fn new(schema: Schema) -> Self {
        let values = schema.empty_values();
        let mut form = Self {
            schema,
            values,
            touched: HashSet::new(),
            validation: ValidationState::default(),
            submit_attempted: false,
            phase: FormPhase::Editing,
        };
        form.revalidate();
        form
    }

    /// Pre-populated draft. Values for fields the schema does not declare
    /// are dropped.
    pub fn with_values(schema: Schema, values: Values) -> Self {
        let mut form = Self::new(schema);
        for (id, value) in values {
            if let Some(slot) = form.values.get_mut(id.as_str()) {
                *slot = value;
            }
        }
        form.revalidate();
        form
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == FormPhase::Done
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn field(&self, id: &str) -> Option<FieldView<'_>> {
        let (id, value) = self.values.get_key_value(id)?;
        Some(FieldView {
            id,
            value,
            touched: self.touched.contains(id.as_str()),
            error: self.validation.visible_error(id.as_str()),
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> {
        self.values.iter().map(|(id, value)| FieldView {
            id,
            value,
            touched: self.touched.contains(id.as_str()),
            error: self.validation.visible_error(id.as_str()),
        })
    }

    /// Errors currently shown, as `(field, message)` pairs in schema order.
    pub fn visible_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.schema.field_ids().filter_map(|id| {
            self.validation
                .visible_error(id.as_str())
                .map(|error| (id.as_str(), error))
        })
    }

    pub fn change(&mut self, id: &str, value: impl Into<Value>) -> Vec<FormEvent> {
        if self.is_closed() {
            tracing::warn!(field = id, "change ignored on closed form");
            return vec![];
        }
        let Some((_, key, slot)) = self.values.get_full_mut(id) else {
            tracing::warn!(field = id, "change ignored for unknown field");
            return vec![];
        };

        let value = value.into();
        let mut events = Vec::new();
        if *slot != value {
            events.push(FormEvent::InputChanged {
                id: key.clone(),
                value: value.to_text(),
            });
            *slot = value;
        }

        events.extend(self.revalidate());
        events
    }

    pub fn blur(&mut self, id: &str) -> Vec<FormEvent> {
        if self.is_closed() {
            return vec![];
        }
        let Some(key) = self
            .schema
            .field_ids()
            .find(|key| key.as_str() == id)
            .cloned()
        else {
            tracing::warn!(field = id, "blur ignored for unknown field");
            return vec![];
        };

        if !self.touched.insert(key.clone()) {
            return vec![];
        }
        self.validation.set_visibility(id, ErrorVisibility::Inline);
        vec![FormEvent::Touched { id: key }]
    }

    /// Validates the whole draft with every error revealed. On failure the
    /// form goes back to editing.
    pub fn begin_submit(&mut self) -> Result<&Values, SubmitError> {
        if self.is_closed() {
            return Err(SubmitError::Closed);
        }

        self.phase = FormPhase::Validating;
        self.submit_attempted = true;
        self.touched.extend(self.schema.field_ids().cloned());
        self.revalidate();

        let report = validation::validate(&self.schema, &self.values);
        if let Err(errors) = report.into_result() {
            self.phase = FormPhase::Invalid;
            tracing::debug!(invalid = errors.len(), "submit rejected");
            self.phase = FormPhase::Editing;
            return Err(errors.into());
        }

        self.phase = FormPhase::Valid;
        Ok(&self.values)
    }

    pub(crate) fn mark_submitting(&mut self) {
        self.phase = FormPhase::Submitting;
    }

    /// Ends the session after a successful submit and discards the draft.
    pub fn complete(&mut self) {
        self.discard();
    }

    pub fn cancel(&mut self) {
        tracing::debug!("form cancelled");
        self.discard();
    }

    fn discard(&mut self) {
        self.values = self.schema.empty_values();
        self.touched.clear();
        self.validation.clear();
        self.submit_attempted = false;
        self.phase = FormPhase::Done;
    }

    fn revalidate(&mut self) -> Vec<FormEvent> {
        let report = validation::validate(&self.schema, &self.values);
        let mut events = Vec::new();

        for id in self.schema.field_ids() {
            match report.error(id.as_str()) {
                Some(error) => {
                    let shown = self.submit_attempted || self.touched.contains(id.as_str());
                    let visibility = if shown {
                        ErrorVisibility::Inline
                    } else {
                        ErrorVisibility::Hidden
                    };
                    if !self.validation.has_error(id.as_str()) {
                        events.push(FormEvent::ErrorScheduled { id: id.clone() });
                    }
                    self.validation.set_error(id.clone(), error, visibility);
                }
                None => {
                    if self.validation.clear_error(id.as_str()) {
                        events.push(FormEvent::ErrorCancelled { id: id.clone() });
                    }
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::{Form, FormEvent, FormPhase, SubmitError};
    use crate::core::FieldId;
    use crate::core::value::Value;
    use crate::validation::schemas::{self, PRICE, TITLE};

    #[test]
    fn errors_stay_hidden_until_blur() {
        let mut form = Form::new(schemas::product());
        form.change(TITLE, "A");

        let view = form.field(TITLE).expect("title field");
        assert_eq!(view.value, &Value::text("A"));
        assert!(!view.touched);
        assert_eq!(view.error, None);
        assert!(!form.is_valid());

        form.blur(TITLE);
        let view = form.field(TITLE).expect("title field");
        assert!(view.touched);
        assert_eq!(view.error, Some("Title must be at least two characters"));
    }

    #[test]
    fn change_emits_input_and_error_events() {
        let mut form = Form::new(schemas::product());
        let events = form.change(TITLE, "Lamp");
        assert_eq!(
            events,
            vec![
                FormEvent::InputChanged {
                    id: FieldId::from(TITLE),
                    value: "Lamp".to_string()
                },
                FormEvent::ErrorCancelled {
                    id: FieldId::from(TITLE)
                },
            ]
        );

        let events = form.change(TITLE, "L");
        assert!(events.contains(&FormEvent::ErrorScheduled {
            id: FieldId::from(TITLE)
        }));

        assert!(form.change(TITLE, "L").is_empty());
    }

    #[test]
    fn blur_marks_touched_once() {
        let mut form = Form::new(schemas::product());
        assert_eq!(
            form.blur(PRICE),
            vec![FormEvent::Touched {
                id: FieldId::from(PRICE)
            }]
        );
        assert!(form.blur(PRICE).is_empty());
        assert!(form.blur("missing").is_empty());
    }

    #[test]
    fn failed_submit_reveals_every_error_and_returns_to_editing() {
        let mut form = Form::new(schemas::product());
        let err = form.begin_submit().expect_err("empty form is invalid");
        let errors = err.validation_errors().expect("validation errors");
        assert_eq!(errors.message(TITLE), Some("Title required"));

        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.submit_attempted());
        assert!(form.fields().all(|view| view.touched));
        let shown: Vec<&str> = form.visible_errors().map(|(id, _)| id).collect();
        assert_eq!(shown, vec![TITLE, schemas::IMAGE, PRICE, schemas::DESCRIPTION]);
        assert_eq!(form.field(PRICE).and_then(|v| v.error), Some("Price required"));

        form.change(PRICE, "0");
        assert_eq!(
            form.field(PRICE).and_then(|v| v.error),
            Some("Price must be greater than 0")
        );
    }

    #[test]
    fn visible_errors_follow_schema_order() {
        let mut form = Form::new(schemas::product());
        form.blur(schemas::DESCRIPTION);
        form.blur(PRICE);
        form.blur(TITLE);

        let shown: Vec<(&str, &str)> = form.visible_errors().collect();
        assert_eq!(
            shown,
            vec![
                (TITLE, "Title required"),
                (PRICE, "Price required"),
                (schemas::DESCRIPTION, "Description required"),
            ]
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = Form::new(schemas::product());
        assert!(form.change("colour", "red").is_empty());
        assert!(form.value("colour").is_none());
    }

    #[test]
    fn closed_form_rejects_submit() {
        let mut form = Form::new(schemas::checkout());
        form.change(schemas::CITY, "Lund");
        form.cancel();
        assert_eq!(form.phase(), FormPhase::Done);
        assert_eq!(form.value(schemas::CITY), Some(&Value::None));
        assert!(matches!(form.begin_submit(), Err(SubmitError::Closed)));
        assert!(form.change(schemas::CITY, "Lund").is_empty());
    }
}
