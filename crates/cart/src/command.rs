//! User actions on the cart.
//!
//! Each click in the cart widget maps to one [`CartCommand`]. Commands also
//! have a one-line text form so a session can be replayed from a script:
//!
//! ```text
//! add Widget 19.99
//! add Blue Gadget 5
//! add Mystery
//! remove 0
//! ```
//!
//! For `add`, the last word is the raw price and everything before it is the
//! name. With a single word after `add`, that word is the name and the price
//! is absent, so `add Mystery` is rejected when applied.

use std::str::FromStr;

use thiserror::Error;

/// A discrete action applied to a [`crate::CartManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Append an item. The price is the raw attribute text; it is parsed when
    /// the command is applied.
    Add {
        /// Product name.
        name: String,
        /// Raw price text, `None` when the attribute is absent.
        price: Option<String>,
    },
    /// Remove the item at a position in the current sequence.
    Remove {
        /// Position as rendered in the row's `data-index`.
        index: usize,
    },
}

impl CartCommand {
    /// Shorthand for an `Add` command with a price attribute present.
    #[must_use]
    pub fn add(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self::Add {
            name: name.into(),
            price: Some(price.into()),
        }
    }
}

/// Errors from parsing the text form of a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    /// The line holds no command.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `add` without a product name.
    #[error("add requires a product name")]
    MissingName,

    /// `remove` without a usable index.
    #[error("remove requires a non-negative index, got {0:?}")]
    InvalidIndex(String),
}

impl FromStr for CartCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        match verb.to_ascii_lowercase().as_str() {
            "add" => match args.split_last() {
                None => Err(CommandParseError::MissingName),
                Some((only, [])) => Ok(Self::Add {
                    name: (*only).to_owned(),
                    price: None,
                }),
                Some((price, name)) => Ok(Self::Add {
                    name: name.join(" "),
                    price: Some((*price).to_owned()),
                }),
            },
            "remove" => {
                let raw = args.first().copied().unwrap_or_default();
                raw.parse()
                    .map(|index| Self::Remove { index })
                    .map_err(|_| CommandParseError::InvalidIndex(raw.to_owned()))
            }
            other => Err(CommandParseError::UnknownCommand(other.to_owned())),
        }
    }
}
