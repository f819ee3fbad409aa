use log::info;

use super::model::Table;
use super::normalize::to_text;
use crate::error::{ImportError, Result};

/// Row counts around the identifier filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub before: usize,
    pub after: usize,
}

/// Drop every row whose `identifier` is empty, in place.
///
/// The identifier is text-coerced first, so whitespace-only values count as
/// empty. Surviving rows keep their relative order.
pub fn retain_identified(table: &mut Table, identifier: &str) -> Result<FilterCounts> {
    let idx = table
        .column_index(identifier)
        .ok_or_else(|| ImportError::MissingColumn(identifier.to_string()))?;

    let before = table.len();
    for row in &mut table.rows {
        row[idx] = to_text(&row[idx]);
    }
    table.rows.retain(|row| !row[idx].is_absent());
    let after = table.len();

    info!("{after} of {before} rows have a '{identifier}'");
    Ok(FilterCounts { before, after })
}
