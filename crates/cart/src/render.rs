//! Cart list view.

use askama::Template;

use crate::item::LineItem;

/// One rendered row of the cart list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Position of the item in the full cart sequence. Rows for skipped items
    /// are missing, so this is not always the row's own position.
    pub index: usize,
    /// Product name.
    pub name: String,
    /// Formatted unit price, e.g. `$19.99`.
    pub price: String,
}

/// Everything the cart widget displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Rows for items with a valid price, in cart order.
    pub rows: Vec<CartRow>,
    /// Sum of the valid prices, e.g. `$24.99`.
    pub total: String,
    /// Item count badge, e.g. `(2)`. Counts every item in the sequence.
    pub count: String,
    /// `<li>` fragment for the list element.
    pub items_html: String,
}

impl Default for CartView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: format_price(0.0),
            count: format_count(0),
            items_html: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "cart_items.html")]
struct CartItemsTemplate<'a> {
    rows: &'a [CartRow],
}

/// Format an amount as a dollar price with two decimals.
///
/// Amounts exactly halfway between two cents round away from zero, so
/// `4.625` shows as `$4.63`. Amounts that only look halfway in decimal, like
/// `1.005` (stored just below), round to the nearest cent as stored.
#[must_use]
pub fn format_price(amount: f64) -> String {
    let amount = if is_half_cent(amount) {
        amount + 0.001_f64.copysign(amount)
    } else {
        amount
    };
    format!("${amount:.2}")
}

/// Whether `amount` sits exactly on a half cent. `{:.2}` breaks those ties
/// to even. Such values are odd multiples of 1/8, which scale exactly.
fn is_half_cent(amount: f64) -> bool {
    (amount * 8.0).fract() == 0.0 && (amount * 4.0).fract() != 0.0
}

fn format_count(count: usize) -> String {
    format!("({count})")
}

/// Build the view for the current cart sequence.
///
/// Items whose price is not a finite number are logged and left out of the
/// rows and the total, but still counted.
#[must_use]
pub fn render(items: &[LineItem]) -> CartView {
    let mut rows = Vec::with_capacity(items.len());
    let mut total = 0.0;

    for (index, item) in items.iter().enumerate() {
        if !item.has_valid_price() {
            tracing::error!(index, name = %item.name, price = item.price, "invalid price in cart");
            continue;
        }
        total += item.price;
        rows.push(CartRow {
            index,
            name: item.name.clone(),
            price: format_price(item.price),
        });
    }

    let items_html = CartItemsTemplate { rows: &rows }
        .render()
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to render cart items");
            String::new()
        });

    CartView {
        rows,
        total: format_price(total),
        count: format_count(items.len()),
        items_html,
    }
}
