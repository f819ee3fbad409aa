use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::data::normalize::NumberLocale;
use crate::data::schema::TargetSchema;
use crate::error::{ImportError, Result};

pub const DEFAULT_INPUT_PATH: &str = "produtos.xls";
pub const DEFAULT_OUTPUT_PATH: &str = "distributor_products_import.csv";

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "distributor_import.json";

/// Everything one import run needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub number_format: NumberLocale,
    pub schema: TargetSchema,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            number_format: NumberLocale::default(),
            schema: TargetSchema::distributor(),
        }
    }
}

/// On-disk shape of [`CONFIG_FILE`]. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    number_format: Option<NumberLocale>,
}

impl ImportConfig {
    /// Defaults, overridden by `path` when that file exists.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            ImportError::Config(format!("failed to parse '{}': {e}", path.display()))
        })?;

        info!("using overrides from {}", path.display());
        Ok(Self::default().with_overrides(file))
    }

    fn with_overrides(mut self, file: ConfigFile) -> Self {
        if let Some(input) = file.input_path {
            self.input_path = input;
        }
        if let Some(output) = file.output_path {
            self.output_path = output;
        }
        if let Some(format) = file.number_format {
            self.number_format = format;
        }
        self
    }
}
