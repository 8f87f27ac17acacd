use crate::core::FieldId;
use crate::core::value::{Value, Values};
use crate::validation::schemas::{DESCRIPTION, IMAGE, PIECES, PRICE, TITLE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces: Option<u32>,
    pub description: String,
}

impl Product {
    /// Draft values for editing this product. The id and extra images are
    /// not part of the draft.
    pub fn to_values(&self) -> Values {
        let mut values = Values::new();
        values.insert(FieldId::from(TITLE), Value::text(&self.title));
        values.insert(FieldId::from(IMAGE), Value::text(&self.image));
        values.insert(FieldId::from(PRICE), Value::Number(self.price));
        values.insert(
            FieldId::from(PIECES),
            self.pieces
                .map(|pieces| Value::Number(f64::from(pieces)))
                .unwrap_or_default(),
        );
        values.insert(FieldId::from(DESCRIPTION), Value::text(&self.description));
        values
    }

    /// Builds a product from draft values that already passed the product
    /// schema.
    pub fn from_values(id: String, values: &Values, images: Vec<String>) -> Self {
        let text = |field: &str| values.get(field).map(Value::to_text).unwrap_or_default();
        let number = |field: &str| values.get(field).and_then(Value::as_number);

        Self {
            id,
            title: text(TITLE),
            image: text(IMAGE),
            images,
            price: number(PRICE).unwrap_or_default(),
            pieces: number(PIECES).and_then(whole_u32),
            description: text(DESCRIPTION),
        }
    }
}

/// `None` unless `value` is a whole number that fits in a `u32`.
fn whole_u32(value: f64) -> Option<u32> {
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return None;
    }
    u32::try_from(value as i64).ok()
}
