//! Corner Shop Core - Shared types library.
//!
//! This crate provides common types used across the Corner Shop components:
//! - `storefront` - Account service (registration, login, health)
//! - `cart` - Client-side cart state and rendering
//! - `cli` - Command-line tools for migrations and cart sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account IDs, emails, and password digests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
