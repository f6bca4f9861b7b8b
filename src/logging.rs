use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use env_logger::{Env, Target};

const LOG_FILE: &str = "agenda-tui.log";

/// Send `log` records to a file in the data directory; the terminal belongs
/// to the UI. `filter` uses `RUST_LOG` syntax and overrides the environment.
pub fn init(data_dir: &Path, filter: Option<&str>) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .wrap_err_with(|| format!("creating data directory {}", data_dir.display()))?;

    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("installing logger")?;

    Ok(path)
}
