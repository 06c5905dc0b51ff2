//! CLI subcommands.

pub mod cart;
pub mod migrate;
