use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid CSV format: {message}")]
    InvalidFormat { message: String },

    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Key-value store error: {message}")]
    StoreError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl TableError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        TableError::InvalidFormat {
            message: message.into(),
        }
    }

    /// 引擎在這些錯誤之後仍可繼續使用
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            TableError::ConfigValidationError { .. } | TableError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TableError::InvalidFormat { .. } => "Invalid CSV Format".to_string(),
            TableError::UnknownColumn { name } => format!("Column '{}' does not exist", name),
            TableError::CsvError(e) => format!("Could not read the CSV data: {}", e),
            TableError::IoError(e) => format!("File access failed: {}", e),
            TableError::SerializationError(e) => format!("Saved settings are unreadable: {}", e),
            TableError::StoreError { message } => format!("Could not save settings: {}", message),
            TableError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            TableError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TableError::InvalidFormat { .. } => {
                "Make sure the first line is a header row and the first record has a 'name' value"
            }
            TableError::UnknownColumn { .. } => "Check the column name against the table header",
            TableError::CsvError(_) => "Check the file for unbalanced quotes or a wrong delimiter",
            TableError::IoError(_) => "Check that the file exists and is readable",
            TableError::SerializationError(_) => "Delete the saved state file to reset column settings",
            TableError::StoreError { .. } => "Check write permissions of the state directory",
            TableError::ConfigValidationError { .. } | TableError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
