//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;

pub use credential::PasswordDigest;
pub use email::{Email, EmailError};
pub use id::*;
