//! Webhook messages.
//!
//! This module provides:
//! - The field accumulator ([`Fields`]), its edit handle ([`FieldsMut`]) and
//!   well-known field names ([`field`])
//! - The message itself, with validation and delivery ([`Message`])
//! - Error types ([`MessageError`], [`UsageError`], [`Error`])
//!
//! # Validation
//!
//! `url` and `text` must be present, non-null and non-empty. They are
//! checked in that order when the message is built and again on every
//! [`Message::send`].
//!
//! # Delivery
//!
//! A send is a single `POST` of the fields as a JSON object, with no retry.
//! Any 2xx or 3xx status is a success.

mod builder;
mod error;
mod fields;


pub use builder::Message;
pub use error::{Error, MessageError, UsageError};
pub use fields::{Fields, FieldsMut, REQUIRED_FIELDS, field};
