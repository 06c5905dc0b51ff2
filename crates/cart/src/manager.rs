//! Cart state owner and command dispatcher.

use crate::command::CartCommand;
use crate::item::{LineItem, parse_price};
use crate::render::{self, CartView};
use crate::store::{CART_STORAGE_KEY, CartStore, StoreError};

/// Owns the cart for one page view.
///
/// Every mutation runs to completion and is followed by exactly one render,
/// which refreshes [`CartManager::view`] and writes the whole sequence to the
/// store.
#[derive(Debug)]
pub struct CartManager<S> {
    items: Vec<LineItem>,
    store: S,
    view: CartView,
}

impl<S: CartStore> CartManager<S> {
    /// Start a page view.
    ///
    /// The snapshot left in `store` by an earlier page view is erased, not
    /// restored: the cart always starts empty. The initial render then stores
    /// an empty sequence.
    pub fn initialize(mut store: S) -> Self {
        if let Err(e) = store.remove_item(CART_STORAGE_KEY) {
            tracing::error!(error = %e, "failed to clear stored cart");
        }

        let mut manager = Self {
            items: Vec::new(),
            store,
            view: CartView::default(),
        };
        manager.render();
        manager
    }

    /// Apply one user action.
    pub fn dispatch(&mut self, command: CartCommand) {
        match command {
            CartCommand::Add { name, price } => {
                self.add_item(name, price.as_deref());
            }
            CartCommand::Remove { index } => self.remove_item(index),
        }
    }

    /// Append an item if `raw_price` parses.
    ///
    /// A missing or malformed price is logged and the call does nothing.
    /// Returns whether the item was added.
    pub fn add_item(&mut self, name: impl Into<String>, raw_price: Option<&str>) -> bool {
        let name = name.into();
        tracing::debug!(name = %name, raw_price = ?raw_price, "add to cart");

        match parse_price(raw_price) {
            Ok(price) => {
                self.items.push(LineItem { name, price });
                self.render();
                true
            }
            Err(e) => {
                tracing::error!(name = %name, error = %e, "invalid price, item not added");
                false
            }
        }
    }

    /// Remove the item at `index`.
    ///
    /// An index past the end removes nothing; the cart is still re-rendered.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        } else {
            tracing::warn!(index, len = self.items.len(), "remove index out of range");
        }
        self.render();
    }

    /// Current items in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The view produced by the latest render.
    #[must_use]
    pub const fn view(&self) -> &CartView {
        &self.view
    }

    /// The durable store the cart mirrors into.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the manager and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn render(&mut self) {
        self.view = render::render(&self.items);
        if let Err(e) = self.persist() {
            tracing::error!(error = %e, "failed to save cart");
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&self.items)?;
        self.store.set_item(CART_STORAGE_KEY, &snapshot)
    }
}
