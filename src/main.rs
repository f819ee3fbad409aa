use std::path::Path;

use anyhow::{Context, Result};
use distributor_import::config::{ImportConfig, CONFIG_FILE};
use distributor_import::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = ImportConfig::load(Path::new(CONFIG_FILE))?;
    let report = pipeline::run(&config).with_context(|| {
        format!(
            "import of {} into {} failed",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    println!("{report}");
    Ok(())
}
