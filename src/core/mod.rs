pub mod columns;
pub mod csv_io;
pub mod dataset;
pub mod engine;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use crate::domain::model::{
    ColumnDescriptor, FieldValue, ImportPolicy, Page, Record, SortConfig, SortDirection, View,
};
pub use crate::domain::ports::{KeyValueStore, Storage};
pub use crate::utils::error::Result;
