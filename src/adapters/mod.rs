// Adapters layer: concrete implementations of the domain ports (key-value store, file storage).

pub mod kv_store;
pub mod storage;

pub use kv_store::{JsonFileStore, MemoryStore};
pub use storage::LocalStorage;
