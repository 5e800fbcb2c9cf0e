//! HTTP adapters: live menu fetch and the offline snapshot fallback.

pub mod menu_client;
pub mod offline_cache;

pub use menu_client::HttpMenuSource;
pub use offline_cache::CachedMenuSource;
