//! Persistence adapters.

mod file_token_cache;

pub use file_token_cache::FileTokenCache;
