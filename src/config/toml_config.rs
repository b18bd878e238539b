use crate::core::columns::DEFAULT_COLUMNS_KEY;
use crate::core::csv_io::{CsvOptions, DEFAULT_EXPORT_FILENAME, DEFAULT_REQUIRED_FIELD};
use crate::core::engine::EngineOptions;
use crate::core::paginate::DEFAULT_PAGE_SIZE;
use crate::core::{ImportPolicy, SortConfig, SortDirection};
use crate::utils::error::{Result, TableError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STATE_PATH: &str = "./.small-table/state.json";
pub const DEFAULT_SORT_KEY: &str = "name";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSection {
    pub page_size: Option<usize>,
    pub default_sort: Option<String>,
    pub default_direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSection {
    pub required_field: Option<String>,
    pub infer_integers: Option<bool>,
    pub on_import: Option<ImportPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSection {
    pub filename: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub state_path: Option<String>,
    pub columns_key: Option<String>,
}

impl TableConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TableError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TableError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STATE_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn page_size(&self) -> usize {
        self.table.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn default_sort(&self) -> SortConfig {
        SortConfig {
            key: self
                .table
                .default_sort
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT_KEY.to_string()),
            direction: self
                .table
                .default_direction
                .unwrap_or(SortDirection::Ascending),
        }
    }

    pub fn required_field(&self) -> &str {
        self.import
            .required_field
            .as_deref()
            .unwrap_or(DEFAULT_REQUIRED_FIELD)
    }

    pub fn import_policy(&self) -> ImportPolicy {
        self.import.on_import.unwrap_or_default()
    }

    pub fn export_filename(&self) -> &str {
        self.export
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_EXPORT_FILENAME)
    }

    pub fn delimiter(&self) -> Result<u8> {
        match &self.export.delimiter {
            Some(d) => validation::validate_delimiter("export.delimiter", d),
            None => Ok(b','),
        }
    }

    pub fn state_path(&self) -> &str {
        self.storage
            .state_path
            .as_deref()
            .unwrap_or(DEFAULT_STATE_PATH)
    }

    pub fn columns_key(&self) -> &str {
        self.storage
            .columns_key
            .as_deref()
            .unwrap_or(DEFAULT_COLUMNS_KEY)
    }

    /// 轉換成引擎使用的設定；會先驗證
    pub fn engine_options(&self) -> Result<EngineOptions> {
        self.validate()?;

        Ok(EngineOptions {
            page_size: self.page_size(),
            default_sort: self.default_sort(),
            csv: CsvOptions {
                delimiter: self.delimiter()?,
                infer_integers: self.import.infer_integers.unwrap_or(true),
                required_field: self.required_field().to_string(),
            },
            import_policy: self.import_policy(),
            columns_key: self.columns_key().to_string(),
            export_filename: self.export_filename().to_string(),
        })
    }
}

impl Validate for TableConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("table.page_size", self.page_size(), 1)?;
        if let Some(key) = &self.table.default_sort {
            validation::validate_non_empty_string("table.default_sort", key)?;
        }
        validation::validate_non_empty_string("import.required_field", self.required_field())?;
        validation::validate_path("export.filename", self.export_filename())?;
        self.delimiter()?;
        validation::validate_path("storage.state_path", self.state_path())?;
        validation::validate_non_empty_string("storage.columns_key", self.columns_key())?;
        Ok(())
    }
}
