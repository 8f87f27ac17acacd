//! Admin form for creating and editing catalog products.

use super::{FieldView, Form, FormEvent, FormPhase, SubmitError};
use crate::core::value::Value;
use crate::navigation::{self, Navigator};
use crate::store::{Product, RecordStore, Upserted};
use crate::validation::schemas;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

pub struct ProductForm {
    form: Form,
    /// Id of the record being edited; `None` creates a new record.
    editing: Option<String>,
    images: Vec<String>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl ProductForm {
    pub fn add() -> Self {
        Self {
            form: Form::new(schemas::product()),
            editing: None,
            images: Vec::new(),
            on_complete: None,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            form: Form::with_values(schemas::product(), product.to_values()),
            editing: Some(product.id.clone()),
            images: product.images.clone(),
            on_complete: None,
        }
    }

    /// Opens the form for `mode`. Editing an id the store does not hold
    /// falls back to an empty draft that creates a new record.
    pub fn open(mode: &FormMode, store: &impl RecordStore) -> Self {
        match mode {
            FormMode::Add => Self::add(),
            FormMode::Edit { id } => match store.get(id) {
                Some(product) => Self::edit(product),
                None => {
                    tracing::warn!(id = %id, "product not found, opening empty form");
                    Self::add()
                }
            },
        }
    }

    /// Runs once after a successful save, before navigation.
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> FormMode {
        match &self.editing {
            Some(id) => FormMode::Edit { id: id.clone() },
            None => FormMode::Add,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn phase(&self) -> FormPhase {
        self.form.phase()
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn field(&self, id: &str) -> Option<FieldView<'_>> {
        self.form.field(id)
    }

    pub fn change(&mut self, id: &str, value: impl Into<Value>) -> Vec<FormEvent> {
        self.form.change(id, value)
    }

    pub fn blur(&mut self, id: &str) -> Vec<FormEvent> {
        self.form.blur(id)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn set_images(&mut self, images: Vec<String>) {
        self.images = images;
    }

    pub fn cancel(&mut self) {
        self.on_complete = None;
        self.form.cancel();
    }

    /// Validates the draft and, when it passes, writes the product to
    /// `store` and navigates to the admin page. An invalid draft leaves the
    /// store and navigation untouched.
    pub fn submit(
        &mut self,
        store: &mut impl RecordStore,
        navigator: &mut impl Navigator,
    ) -> Result<Product, SubmitError> {
        let values = self.form.begin_submit()?;
        let id = match &self.editing {
            Some(id) => id.clone(),
            None => store.generate_id(),
        };
        let product = Product::from_values(id, values, self.images.clone());

        self.form.mark_submitting();
        match store.upsert(product.clone()) {
            Upserted::Inserted => tracing::info!(id = %product.id, "product created"),
            Upserted::Replaced(index) => {
                tracing::info!(id = %product.id, index, "product updated")
            }
        }

        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        navigator.go_to(navigation::ADMIN);
        self.form.complete();
        Ok(product)
    }
}
