/// Data layer: cell model, column vocabulary, and the four pipeline stages.
///
/// Architecture:
/// ```text
///  .xls / .xlsx / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse first sheet → Table (vendor headers)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  mapper   │  rename via ColumnMapping, drop unmapped
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  to_decimal / to_text / parse_date per column
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  drop rows without a code
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Table → CSV
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;
