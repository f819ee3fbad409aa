use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use super::model::Table;
use crate::error::{ImportError, Result};

/// Serialize `table` as CSV into any writer.
///
/// Comma-delimited, `\n`-terminated, fields quoted only when they contain a
/// comma, a quote or a line break. Cells render through
/// [`CellValue`](super::model::CellValue)'s `Display`.
pub fn write_csv<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `table` to `path`, replacing any existing file.
///
/// Rows go to a temporary file next to `path` that is renamed into place
/// only once everything is flushed; a failed run leaves no partial CSV.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| ImportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    write_csv(table, &mut tmp)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    set_readable(&tmp).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Temp files are created owner-only; give the output the usual `0644`.
#[cfg(unix)]
fn set_readable(tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
