use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::model::{CellValue, Table};
use super::schema::{ColumnKind, TargetSchema};

// ---------------------------------------------------------------------------
// Number formats
// ---------------------------------------------------------------------------

/// Locale policy for numeric text.
///
/// `canonicalize` receives a trimmed, non-empty string and must return it in
/// dot-decimal form without grouping separators.
pub trait NumberFormat {
    fn canonicalize(&self, raw: &str) -> String;
}

/// Built-in number formats, selectable from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberLocale {
    /// `1.234,56`: dots group thousands, the comma is the decimal separator.
    #[default]
    DecimalComma,
    /// `1,234.56`: commas group thousands, the dot is the decimal separator.
    DecimalPoint,
}

impl NumberFormat for NumberLocale {
    fn canonicalize(&self, raw: &str) -> String {
        match self {
            NumberLocale::DecimalComma => raw.replace('.', "").replace(',', "."),
            NumberLocale::DecimalPoint => raw.replace(',', ""),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell coercions
// ---------------------------------------------------------------------------

/// Coerce a cell to a decimal number, or `Absent` when it is empty or does not parse.
pub fn to_decimal(value: &CellValue, format: &dyn NumberFormat) -> CellValue {
    match value {
        CellValue::Number(_) => value.clone(),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return CellValue::Absent;
            }
            parse_decimal(&format.canonicalize(trimmed))
                .map(CellValue::Number)
                .unwrap_or(CellValue::Absent)
        }
        CellValue::Date(_) | CellValue::Absent => CellValue::Absent,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Coerce a cell to trimmed text, or `Absent` when nothing is left.
pub fn to_text(value: &CellValue) -> CellValue {
    if value.is_absent() {
        return CellValue::Absent;
    }
    let rendered = value.to_string();
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        CellValue::Absent
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

/// Year-first forms, only for strings opening with a four-digit year.
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Two-digit years come first: `%Y` would happily read `26` as year 26.
const DAY_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];
/// `%B` matches full and abbreviated English month names, in any case.
const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y",
    "%d %B %Y", "%d-%B-%Y", "%d/%B/%Y", "%d-%B-%y", "%B %d, %Y", "%B %d %Y",
];

/// Coerce a cell to a date, reading ambiguous `DD/MM` as day first.
pub fn parse_date(value: &CellValue) -> CellValue {
    match value {
        CellValue::Date(_) => value.clone(),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return CellValue::Absent;
            }
            parse_date_text(trimmed)
                .map(CellValue::Date)
                .unwrap_or(CellValue::Absent)
        }
        CellValue::Number(_) | CellValue::Absent => CellValue::Absent,
    }
}

/// Parse a trimmed date string; `None` when no supported form matches.
pub fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    let datetime = |formats: &[&str]| {
        formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    };
    let date = |formats: &[&str]| {
        formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    };

    // `%Y` accepts short years, so `05-03-26` must never reach the ISO forms.
    let year_first = s.len() > 4 && s.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    if year_first {
        datetime(ISO_DATETIME_FORMATS).or_else(|| date(ISO_DATE_FORMATS))
    } else {
        datetime(DAY_FIRST_DATETIME_FORMATS).or_else(|| date(DAY_FIRST_DATE_FORMATS))
    }
}

// ---------------------------------------------------------------------------
// Table normalization
// ---------------------------------------------------------------------------

/// Cells that held a value but came out `Absent`.
///
/// Blank text is not counted; it was already missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionStats {
    pub nulled_numeric: usize,
    pub nulled_dates: usize,
}

impl CoercionStats {
    pub fn total(&self) -> usize {
        self.nulled_numeric + self.nulled_dates
    }
}

fn was_nulled(before: &CellValue, after: &CellValue) -> bool {
    after.is_absent()
        && !before.is_absent()
        && before.as_text().map_or(true, |s| !s.trim().is_empty())
}

/// Apply each column's coercion to every cell of `table`, in place.
pub fn normalize(
    table: &mut Table,
    schema: &TargetSchema,
    format: &dyn NumberFormat,
) -> CoercionStats {
    let kinds: Vec<ColumnKind> = table.columns.iter().map(|c| schema.kind_of(c)).collect();
    let mut stats = CoercionStats::default();

    for row in &mut table.rows {
        for (cell, kind) in row.iter_mut().zip(&kinds) {
            let coerced = match kind {
                ColumnKind::Numeric => to_decimal(cell, format),
                ColumnKind::Date => parse_date(cell),
                ColumnKind::Text => to_text(cell),
            };
            if was_nulled(cell, &coerced) {
                match kind {
                    ColumnKind::Numeric => stats.nulled_numeric += 1,
                    ColumnKind::Date => stats.nulled_dates += 1,
                    ColumnKind::Text => {}
                }
            }
            *cell = coerced;
        }
    }

    info!("normalized {} rows x {} columns", table.len(), kinds.len());
    if stats.total() > 0 {
        warn!(
            "{} numeric and {} date cells could not be parsed and were left empty",
            stats.nulled_numeric, stats.nulled_dates
        );
    }
    stats
}
