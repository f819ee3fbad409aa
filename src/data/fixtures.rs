//! Workbook builders shared by the loader and pipeline tests.

use std::path::Path;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

/// Header row of [`write_vendor_workbook`].
pub const VENDOR_HEADERS: &[&str] = &[
    "ID",
    "Código",
    "Descrição",
    "Preço",
    "Data Validade",
    "GTIN/EAN",
    "Coluna extra",
];

/// Three product rows the way the vendor exports them:
///
/// | ID | Código  | Descrição | Preço   | Data Validade | GTIN/EAN      | Coluna extra |
/// |----|---------|-----------|---------|---------------|---------------|--------------|
/// | 1  | ABC-1   | Whey 900g | "10,50" | 05/03/2026    | 7891234567890 | x            |
/// | 2  | "  "    | Creatina  | 20      |               |               | y            |
/// | 3  | ABC-3   |           | "N/D"   | 31/01/2027    |               |              |
pub fn write_vendor_workbook(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();

    for (col, header) in VENDOR_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    sheet.write_number(1, 0, 1)?;
    sheet.write_string(1, 1, "ABC-1")?;
    sheet.write_string(1, 2, "Whey 900g")?;
    sheet.write_string(1, 3, "10,50")?;
    sheet.write_datetime_with_format(1, 4, &ExcelDateTime::from_ymd(2026, 3, 5)?, &date_format)?;
    sheet.write_number(1, 5, 7_891_234_567_890.0)?;
    sheet.write_string(1, 6, "x")?;

    sheet.write_number(2, 0, 2)?;
    sheet.write_string(2, 1, "  ")?;
    sheet.write_string(2, 2, "Creatina")?;
    sheet.write_number(2, 3, 20)?;
    sheet.write_string(2, 6, "y")?;

    sheet.write_number(3, 0, 3)?;
    sheet.write_string(3, 1, "ABC-3")?;
    sheet.write_string(3, 3, "N/D")?;
    sheet.write_datetime_with_format(3, 4, &ExcelDateTime::from_ymd(2027, 1, 31)?, &date_format)?;

    workbook.save(path)
}

/// A workbook whose only sheet has no cells at all.
pub fn write_blank_workbook(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(path)
}
