pub mod http_response_cache;
pub mod types;

// Re-export cache types
pub use types::*;
// Re-export HTTP response cache functions
pub use http_response_cache::*;

use tracing::info;

/// Snapshot of cache occupancy for debugging output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub http_responses: usize,
    pub capacity: usize,
}

/// Returns current cache occupancy
pub async fn get_cache_stats() -> CacheStats {
    CacheStats {
        http_responses: get_http_response_cache_size().await,
        capacity: get_http_response_cache_capacity().await,
    }
}

/// Clears every cache held by the process
pub async fn clear_all_caches() {
    clear_http_response_cache().await;
    info!("All caches cleared");
}
