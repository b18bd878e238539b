pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{JsonFileStore, LocalStorage, MemoryStore};
pub use crate::config::TableConfig;
pub use crate::core::engine::{EngineOptions, TableEngine};
pub use crate::domain::model::{
    ColumnDescriptor, FieldValue, ImportPolicy, Record, SortConfig, SortDirection, View,
};
pub use crate::domain::ports::{KeyValueStore, Storage};
pub use crate::utils::error::{Result, TableError};
