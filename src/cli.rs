use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = "Month calendar and agenda in the terminal")]
pub struct Cli {
    /// Path to the configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Directory holding saved events and preferences
    #[clap(long)]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `agenda_tui=trace`
    #[clap(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from(["agenda-tui", "--data-dir", "/tmp/a", "--log-level", "debug"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/a")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.config.is_none());
    }
}
