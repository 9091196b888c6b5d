//! # Yatube Shared
//!
//! Serializable request and response types: the render contexts returned by
//! the page handlers, form state, and error bodies.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
