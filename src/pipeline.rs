use std::fmt;
use std::path::PathBuf;

use log::info;

use crate::config::ImportConfig;
use crate::data::filter::{retain_identified, FilterCounts};
use crate::data::loader::load_file;
use crate::data::mapper::map_columns;
use crate::data::model::Table;
use crate::data::normalize::{normalize, CoercionStats, NumberFormat};
use crate::data::schema::{TargetSchema, DESTINATION_TABLE};
use crate::data::writer::write_csv_file;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub counts: FilterCounts,
    pub coercion: CoercionStats,
    pub output_path: PathBuf,
}

/// The console summary printed at the end of a run.
impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows in file: {}", self.counts.before)?;
        writeln!(f, "Rows with code: {}", self.counts.after)?;
        writeln!(f, "CSV saved to: {}", self.output_path.display())?;
        write!(f, "Next step: import CSV into {DESTINATION_TABLE}")
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Map, normalize and filter an already loaded sheet.
pub fn process(
    table: Table,
    schema: &TargetSchema,
    format: &dyn NumberFormat,
) -> Result<(Table, FilterCounts, CoercionStats)> {
    let mut table = map_columns(table, &schema.mapping);
    let coercion = normalize(&mut table, schema, format);
    let counts = retain_identified(&mut table, &schema.identifier_column)?;
    Ok((table, counts, coercion))
}

/// Load → map → normalize → filter → write, aborting on the first fatal error.
pub fn run(config: &ImportConfig) -> Result<ImportReport> {
    info!(
        "importing {} → {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let source = load_file(&config.input_path)?;
    let (table, counts, coercion) = process(source, &config.schema, &config.number_format)?;
    write_csv_file(&table, &config.output_path)?;

    Ok(ImportReport {
        counts,
        coercion,
        output_path: config.output_path.clone(),
    })
}
