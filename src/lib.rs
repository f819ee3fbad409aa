//! Turns a vendor product spreadsheet into a normalized CSV ready for the
//! `distributor_products` table.
//!
//! The work happens in [`pipeline::run`]: the sheet is loaded, its Portuguese
//! headers are mapped onto the target vocabulary, every cell is coerced to a
//! number, text or date, rows without a `code` are dropped and the rest is
//! written out as CSV.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::ImportConfig;
pub use error::{ImportError, Result};
pub use pipeline::{run, ImportReport};
