//! Modal form state for creating and editing labs and rooms.
//!
//! Forms keep raw text exactly as typed and only check what an input
//! element would: required fields and a numeric capacity. Anything else is
//! the backend's call. They know nothing about the network or the session.

pub mod lab_form;
pub mod room_form;

use thiserror::Error;

pub use lab_form::{LabForm, LabModal, LabSubmission};
pub use room_form::{RoomForm, RoomModal, RoomSubmission};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("capacity must be a positive whole number, got '{0}'")]
    InvalidCapacity(String),

    #[error("the form is not open")]
    NotOpen,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn parse_capacity(value: &str) -> Result<u32, FormError> {
    let trimmed = required(value, "capacity")?;
    match trimmed.parse::<u32>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(FormError::InvalidCapacity(trimmed)),
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
