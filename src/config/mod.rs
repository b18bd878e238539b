pub mod toml_config;

pub use toml_config::TableConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-table")]
#[command(about = "Search, sort, page and export a small in-memory table")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file to import; replaces the built-in dataset
    #[arg(long)]
    pub import: Option<String>,

    /// Case-insensitive search across every field
    #[arg(long, default_value = "")]
    pub search: String,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Columns whose visibility should be flipped (saved between runs)
    #[arg(long = "toggle", value_delimiter = ',')]
    pub toggle_columns: Vec<String>,

    /// Write the visible columns of the dataset to the export file
    #[arg(long)]
    pub export: bool,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Overrides storage.state_path from the config file
    #[arg(long)]
    pub state_path: Option<String>,

    /// Print the view as JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 設定並套用命令列覆蓋
    pub fn table_config(&self) -> crate::utils::error::Result<TableConfig> {
        let mut config = match &self.config {
            Some(path) => TableConfig::from_file(path)?,
            None => TableConfig::default(),
        };

        if let Some(state_path) = &self.state_path {
            config.storage.state_path = Some(state_path.clone());
        }

        Ok(config)
    }
}
