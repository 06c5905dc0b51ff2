//! Corner Shop Cart - client-side shopping cart.
//!
//! The cart lives for one page view. A [`CartManager`] owns the ordered list of
//! line items, applies one [`CartCommand`] at a time, and after every mutation
//! re-renders the list view and mirrors the full sequence into a durable
//! [`CartStore`] under [`CART_STORAGE_KEY`].
//!
//! # Example
//!
//! ```
//! use corner_shop_cart::{CartCommand, CartManager, MemoryStore};
//!
//! let mut cart = CartManager::initialize(MemoryStore::default());
//! cart.dispatch(CartCommand::add("Widget", "19.99"));
//! cart.dispatch(CartCommand::add("Gadget", "5"));
//! assert_eq!(cart.view().total, "$24.99");
//! assert_eq!(cart.view().count, "(2)");
//!
//! cart.dispatch(CartCommand::Remove { index: 0 });
//! assert_eq!(cart.view().total, "$5.00");
//! assert_eq!(cart.view().count, "(1)");
//! ```
//!
//! # Persistence
//!
//! [`CartManager::initialize`] erases whatever snapshot a previous page view
//! left behind and never reads it back. The snapshot is write-only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod command;
pub mod item;
pub mod manager;
pub mod render;
pub mod store;

pub use command::{CartCommand, CommandParseError};
pub use item::{LineItem, PriceError, parse_price};
pub use manager::CartManager;
pub use render::{CartRow, CartView};
pub use store::{CART_STORAGE_KEY, CartStore, FileStore, MemoryStore, StoreError};
