//! Persisted application state: a localStorage-style key/value file and the store built on it.

pub mod local_storage;
pub mod store;

pub use local_storage::LocalStorage;
pub use store::{StateKeys, StateStore};
