//! Shipping details form shown at checkout. A valid submit hands the
//! details to the confirmation step; nothing is written to the catalog.

use super::{FieldView, Form, FormEvent, FormPhase, SubmitError};
use crate::core::value::{Value, Values};
use crate::navigation::{self, Navigator};
use crate::validation::schemas::{
    self, ADDRESS, CITY, EMAIL, FIRST_NAME, LAST_NAME, PHONE, POSTAL_CODE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    /// As typed, so leading zeros survive.
    pub postal_code: String,
    pub phone: String,
    pub email: String,
}

impl ShippingRecord {
    fn from_values(values: &Values) -> Self {
        let text = |field: &str| values.get(field).map(Value::to_text).unwrap_or_default();
        Self {
            first_name: text(FIRST_NAME),
            last_name: text(LAST_NAME),
            address: text(ADDRESS),
            city: text(CITY),
            postal_code: text(POSTAL_CODE),
            phone: text(PHONE),
            email: text(EMAIL),
        }
    }
}

/// Downstream step that receives validated shipping details.
pub trait Confirmation {
    fn confirm(&mut self, shipping: ShippingRecord);
}

impl<F> Confirmation for F
where
    F: FnMut(ShippingRecord),
{
    fn confirm(&mut self, shipping: ShippingRecord) {
        self(shipping)
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutForm {
    form: Form,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(schemas::checkout()),
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

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    pub fn submit(
        &mut self,
        confirmation: &mut impl Confirmation,
        navigator: &mut impl Navigator,
    ) -> Result<ShippingRecord, SubmitError> {
        let values = self.form.begin_submit()?;
        let shipping = ShippingRecord::from_values(values);

        self.form.mark_submitting();
        tracing::info!("shipping details confirmed");
        confirmation.confirm(shipping.clone());
        navigator.go_to(navigation::CONFIRM);
        self.form.complete();
        Ok(shipping)
    }
}
