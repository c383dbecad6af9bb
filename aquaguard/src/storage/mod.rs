//! Storage module
//!
//! Provides key-value storage for small persisted values (the logged-in user).

pub mod kv_store;

pub use kv_store::KvStore;
