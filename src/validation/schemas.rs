//! Built-in schemas for the admin product form and the checkout form.

use super::{FieldSchema, Schema};

pub const TITLE: &str = "title";
pub const IMAGE: &str = "image";
pub const PRICE: &str = "price";
pub const PIECES: &str = "pieces";
pub const DESCRIPTION: &str = "description";

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const ADDRESS: &str = "address";
pub const CITY: &str = "city";
pub const POSTAL_CODE: &str = "postalCode";
pub const PHONE: &str = "phone";
pub const EMAIL: &str = "email";

pub fn product() -> Schema {
    Schema::new()
        .field(
            TITLE,
            FieldSchema::text()
                .required("Title required")
                .min_length(2, "Title must be at least two characters"),
        )
        .field(
            IMAGE,
            FieldSchema::text()
                .required("Image required")
                .url("Image must be a valid URL"),
        )
        .field(
            PRICE,
            FieldSchema::number()
                .type_error("Price must be a number")
                .required("Price required")
                .min(1.0, "Price must be greater than 0"),
        )
        .field(
            PIECES,
            FieldSchema::number()
                .type_error("Pieces must be a number")
                .positive("Pieces must be a positive number")
                .integer("Pieces must be an integer")
                .max(f64::from(u32::MAX), "Pieces must be at most 4294967295"),
        )
        .field(
            DESCRIPTION,
            FieldSchema::text()
                .required("Description required")
                .min_length(4, "Description must be at least four characters"),
        )
}

pub fn checkout() -> Schema {
    Schema::new()
        .field(
            FIRST_NAME,
            FieldSchema::text()
                .required("First name required")
                .min_length(2, "Name must be at least two characters"),
        )
        .field(
            LAST_NAME,
            FieldSchema::text()
                .required("Last name required")
                .min_length(2, "Name must be at least two characters"),
        )
        .field(
            ADDRESS,
            FieldSchema::text()
                .required("Address required")
                .min_length(2, "Please enter a valid address"),
        )
        .field(
            CITY,
            FieldSchema::text()
                .required("City required")
                .min_length(2, "Please enter a valid city"),
        )
        // The lower bounds apply to the numeric reading, not the digit count.
        .field(
            POSTAL_CODE,
            FieldSchema::number()
                .type_error("Postal code must be a number")
                .required("Postal code required")
                .min(4.0, "Please enter a valid postal code"),
        )
        .field(
            PHONE,
            FieldSchema::number()
                .type_error("The value must be a number")
                .required("Phone number required")
                .integer("The value must be a number")
                .min(6.0, "Please enter a valid phone number"),
        )
        .field(
            EMAIL,
            FieldSchema::text()
                .required("Email required")
                .email("email must be a valid email")
                .min_length(4, "Please enter a valid email"),
        )
}
