//! Scripted cart sessions.
//!
//! Each line of the script is one cart command:
//!
//! ```text
//! # comments and blank lines are skipped
//! add Widget 19.99
//! add Gadget 5
//! remove 0
//! ```
//!
//! The session behaves like one page view: the snapshot in the store
//! directory is cleared first, then rewritten after every command.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use corner_shop_cart::{CartCommand, CartManager, CartView, FileStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartSessionError {
    #[error("Failed to read script: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// Replay a script against a file-backed cart and print the final view.
///
/// Lines that are not valid commands are logged and skipped.
pub fn replay(store: PathBuf, script: Option<&Path>, html: bool) -> Result<(), CartSessionError> {
    let source = match script {
        Some(path) => fs::read_to_string(path).map_err(CartSessionError::Read)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CartSessionError::Read)?;
            buf
        }
    };

    tracing::info!(store = %store.display(), "Starting cart session");
    let mut manager = CartManager::initialize(FileStore::new(store));
    apply_script(&mut manager, &source);

    let mut out = io::stdout().lock();
    write_view(&mut out, manager.view(), html).map_err(CartSessionError::Write)
}

fn apply_script(manager: &mut CartManager<FileStore>, source: &str) {
    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<CartCommand>() {
            Ok(command) => manager.dispatch(command),
            Err(e) => tracing::warn!(line = number + 1, error = %e, "Skipping invalid command"),
        }
    }
}

fn write_view(out: &mut impl Write, view: &CartView, html: bool) -> io::Result<()> {
    if html {
        writeln!(out, "{}", view.items_html.trim())?;
    } else {
        for row in &view.rows {
            writeln!(out, "[{}] {} - {}", row.index, row.name, row.price)?;
        }
    }
    writeln!(out, "Total: {} {}", view.total, view.count)
}
