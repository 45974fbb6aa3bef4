//! Word search (workspace facade crate).
//!
//! Re-exports the member crates under short names so applications and
//! integration tests can write `word_search::{core,engine,adapter,storage,types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub mod config;

pub use word_search_adapter as adapter;
pub use word_search_core as core;
pub use word_search_engine as engine;
pub use word_search_storage as storage;
pub use word_search_types as types;

pub use config::AppConfig;
