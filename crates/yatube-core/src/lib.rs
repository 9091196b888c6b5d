//! # Yatube Core
//!
//! The domain layer of Yatube: users, groups and posts, the post form,
//! pagination and the edit guard.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;

pub use error::DomainError;
