pub mod core;
pub mod form;
pub mod navigation;
pub mod store;
pub mod validation;

pub use core::FieldId;
pub use core::value::{Value, Values};
pub use form::checkout::{CheckoutForm, Confirmation, ShippingRecord};
pub use form::product::{FormMode, ProductForm};
pub use form::{FieldView, Form, FormEvent, FormPhase, SubmitError};
pub use navigation::{History, Navigator};
pub use store::{Product, ProductStore, RecordStore, Upserted};
pub use validation::{FieldValidationError, Schema, ValidationErrors, ValidationReport, validate};
