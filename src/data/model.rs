use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Output form of [`CellValue::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as read from a vendor export.
///
/// Loaders produce whatever variant the source format carries; the normalizer
/// then guarantees each column holds only its declared variant or `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CellValue {
    Number(Decimal),
    Text(String),
    Date(NaiveDateTime),
    #[default]
    Absent,
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way it lands in the output CSV: numbers in plain
/// dot-decimal form without trailing zeros, dates as `YYYY-MM-DD HH:MM:SS`,
/// `Absent` as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(d) => write!(f, "{}", d.normalize()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Date(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
            CellValue::Absent => Ok(()),
        }
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        CellValue::Number(d)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

// ---------------------------------------------------------------------------
// Table – the whole sheet held in memory
// ---------------------------------------------------------------------------

/// One data row; cells line up with [`Table::columns`].
pub type Row = Vec<CellValue>;

/// Ordered column names plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table, padding short rows with `Absent` and truncating long ones
    /// so every row has exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Absent);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn display_matches_csv_rendering() {
        let price = CellValue::Number(Decimal::from_str("10.50").unwrap());
        assert_eq!(price.to_string(), "10.5");
        assert_eq!(CellValue::Number(Decimal::from(42)).to_string(), "42");
        assert_eq!(CellValue::Absent.to_string(), "");

        let dt = NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::Date(dt).to_string(), "2026-03-05 00:00:00");
    }

    #[test]
    fn new_pads_and_truncates_rows() {
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
        );
        assert_eq!(table.rows[0], vec![CellValue::from("1"), CellValue::Absent]);
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.cell(1, "b"), Some(&CellValue::from("2")));
        assert_eq!(table.cell(0, "missing"), None);
    }
}
