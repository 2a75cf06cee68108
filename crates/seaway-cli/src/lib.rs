//! Seaway CLI library.
//!
//! Terminal styling and output formatting shared by the `seaway` binary's
//! subcommands.

pub mod output;
pub mod terminal;
