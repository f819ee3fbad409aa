use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::model::{CellValue, Row, Table};
use super::normalize::parse_date_text;
use crate::error::{ImportError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the first sheet of a spreadsheet.  Dispatch by extension.
///
/// Supported formats:
/// * `.xls` / `.xlsx` / `.xlsm` / `.xlsb` / `.ods` – vendor workbook export
/// * `.csv` – a sheet already saved as comma-separated text
///
/// The first row becomes [`Table::columns`]; every following row is kept in
/// file order.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };

    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<Table> {
    let load_error = |source: calamine::Error| ImportError::Load {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(load_error)?;
    if let Some(name) = workbook.sheet_names().first() {
        debug!("reading worksheet '{name}'");
    }
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::EmptySheet(path.to_path_buf()))?
        .map_err(load_error)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ImportError::EmptySheet(path.to_path_buf()))?;
    let columns = header
        .iter()
        .map(|cell| workbook_cell(cell).to_string())
        .collect();

    let mut unreadable = 0;
    let data: Vec<Row> = rows
        .map(|row| workbook_row(row, &mut unreadable))
        .collect();
    if unreadable > 0 {
        warn!("{unreadable} numeric or date cells could not be represented and were left empty");
    }

    Ok(Table::new(columns, data))
}

/// Convert one sheet row, counting cells that carried a value but map to `Absent`.
fn workbook_row(row: &[Data], unreadable: &mut usize) -> Row {
    row.iter()
        .map(|cell| {
            let value = workbook_cell(cell);
            if value.is_absent() && matches!(cell, Data::Float(_) | Data::DateTime(_)) {
                *unreadable += 1;
            }
            value
        })
        .collect()
}

/// Map a workbook cell onto [`CellValue`].
fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(Decimal::from(*i)),
        Data::Float(f) => Decimal::from_f64(*f)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Absent),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::Date)
            .unwrap_or(CellValue::Absent),
        Data::DateTimeIso(s) => parse_date_text(s.trim())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Absent,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with the vendor's labels; every non-empty field stays raw text.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(ImportError::EmptySheet(path.to_path_buf()));
    }

    let mut data = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Absent
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        data.push(row);
    }

    Ok(Table::new(columns, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{write_blank_workbook, write_vendor_workbook, VENDOR_HEADERS};
    use chrono::NaiveDate;
    use std::fs;

    fn midnight(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn workbook_header_and_rows_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        write_vendor_workbook(&path).unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, VENDOR_HEADERS);
        assert_eq!(table.len(), 3);

        assert_eq!(table.rows[0][0], CellValue::Number(Decimal::from(1)));
        assert_eq!(table.rows[0][1], CellValue::from("ABC-1"));
        assert_eq!(table.rows[0][3], CellValue::from("10,50"));
        assert_eq!(table.rows[0][4], midnight(2026, 3, 5));
        assert_eq!(
            table.rows[0][5],
            CellValue::Number(Decimal::from(7_891_234_567_890_i64))
        );

        assert_eq!(table.rows[1][1], CellValue::from("  "));
        assert_eq!(table.rows[1][3], CellValue::Number(Decimal::from(20)));
        assert_eq!(table.rows[1][4], CellValue::Absent);
        assert_eq!(table.rows[1][5], CellValue::Absent);

        assert_eq!(table.rows[2][0], CellValue::Number(Decimal::from(3)));
        assert_eq!(table.rows[2][2], CellValue::Absent);
        assert_eq!(table.rows[2][4], midnight(2027, 1, 31));
        assert_eq!(table.rows[2][6], CellValue::Absent);
    }

    #[test]
    fn blank_worksheet_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vazio.xlsx");
        write_blank_workbook(&path).unwrap();
        assert!(matches!(load_file(&path), Err(ImportError::EmptySheet(_))));
    }

    #[test]
    fn unrepresentable_floats_are_counted() {
        let mut unreadable = 0;
        let row = workbook_row(
            &[
                Data::Float(1e30),
                Data::Float(2.5),
                Data::Empty,
                Data::String("".into()),
            ],
            &mut unreadable,
        );
        assert_eq!(row[0], CellValue::Absent);
        assert_eq!(row[1], CellValue::Number(Decimal::new(25, 1)));
        assert_eq!(unreadable, 1);
    }

    #[test]
    fn csv_rows_keep_order_and_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.csv");
        fs::write(&path, "Código,Preço\n ABC-1 ,\"10,50\"\n,20\nABC-3\n").unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["Código", "Preço"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0][0], CellValue::from(" ABC-1 "));
        assert_eq!(table.rows[0][1], CellValue::from("10,50"));
        assert_eq!(table.rows[1][0], CellValue::Absent);
        assert_eq!(table.rows[2][1], CellValue::Absent);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("missing.csv")).is_err());
        assert!(matches!(
            load_file(&dir.path().join("missing.xls")),
            Err(ImportError::Load { .. })
        ));
    }

    #[test]
    fn garbage_workbook_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("produtos.xlsx");
        fs::write(&path, "not a zip archive").unwrap();
        assert!(matches!(load_file(&path), Err(ImportError::Load { .. })));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("produtos.txt")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn empty_csv_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(load_file(&path), Err(ImportError::EmptySheet(_))));
    }

    #[test]
    fn workbook_cells_map_to_cell_values() {
        assert_eq!(
            workbook_cell(&Data::Float(10.5)),
            CellValue::Number(Decimal::new(105, 1))
        );
        assert_eq!(workbook_cell(&Data::Int(7)), CellValue::Number(Decimal::from(7)));
        assert_eq!(workbook_cell(&Data::Float(f64::NAN)), CellValue::Absent);
        assert_eq!(workbook_cell(&Data::Bool(true)), CellValue::from("True"));
        assert_eq!(workbook_cell(&Data::Empty), CellValue::Absent);
        assert_eq!(
            workbook_cell(&Data::DateTimeIso("2026-03-05".into())),
            CellValue::Date(
                NaiveDate::from_ymd_opt(2026, 3, 5)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
    }
}
