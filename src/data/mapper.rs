use log::{debug, info};

use super::model::{Row, Table};
use super::schema::ColumnMapping;

/// Rename source headers to target names and drop everything unmapped.
///
/// Output columns follow the mapping's order, restricted to those present in
/// `table`. A source label appearing twice is taken from its first column.
/// Row order is untouched.
pub fn map_columns(table: Table, mapping: &ColumnMapping) -> Table {
    // (source column index, target name) in mapping order
    let selected: Vec<(usize, String)> = mapping
        .entries()
        .filter_map(|(source, target)| {
            table
                .column_index(source)
                .map(|idx| (idx, target.to_string()))
        })
        .collect();

    for header in &table.columns {
        if mapping.target_for(header).is_none() {
            debug!("dropping unmapped column '{header}'");
        }
    }
    info!(
        "mapped {} of {} source columns ({} mapping entries)",
        selected.len(),
        table.columns.len(),
        mapping.len()
    );

    let columns = selected.iter().map(|(_, name)| name.clone()).collect();
    let rows = table
        .rows
        .into_iter()
        .map(|mut row| {
            selected
                .iter()
                .map(|(idx, _)| row.get_mut(*idx).map(std::mem::take).unwrap_or_default())
                .collect::<Row>()
        })
        .collect();

    Table { columns, rows }
}
