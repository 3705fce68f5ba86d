use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::LazyLock;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::types::CachedHttpResponse;
use crate::constants::cache_ttl;

// LRU cache structure for HTTP responses with TTL support
pub static HTTP_RESPONSE_CACHE: LazyLock<RwLock<LruCache<String, CachedHttpResponse>>> =
    LazyLock::new(|| {
        RwLock::new(LruCache::new(
            NonZeroUsize::new(cache_ttl::HTTP_RESPONSE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
        ))
    });

/// Caches HTTP response data with TTL. A TTL of zero stores nothing.
#[instrument(skip(url, data), fields(url = %url))]
pub async fn cache_http_response(url: String, data: String, ttl_seconds: u64) {
    if ttl_seconds == cache_ttl::NO_STORE {
        debug!("Skipping cache for no-store response: url={}", url);
        return;
    }

    debug!(
        "Caching HTTP response: url={}, data_size={}, ttl={}s",
        url,
        data.len(),
        ttl_seconds
    );

    let cached_data = CachedHttpResponse::new(data, ttl_seconds);
    let mut cache = HTTP_RESPONSE_CACHE.write().await;
    cache.put(url, cached_data);
}

/// Retrieves cached HTTP response if it's not expired
#[instrument(skip(url), fields(url = %url))]
pub async fn get_cached_http_response(url: &str) -> Option<String> {
    let mut cache = HTTP_RESPONSE_CACHE.write().await;

    if let Some(cached_entry) = cache.get(url) {
        if !cached_entry.is_expired() {
            debug!(
                "Cache hit for HTTP response: url={}, data_size={}, age={:?}",
                url,
                cached_entry.data.len(),
                cached_entry.cached_at.elapsed()
            );
            return Some(cached_entry.data.clone());
        }

        warn!(
            "Removing expired HTTP response cache entry: url={}, age={:?}, ttl={:?}",
            url,
            cached_entry.cached_at.elapsed(),
            cached_entry.get_ttl()
        );
        cache.pop(url);
    } else {
        debug!("Cache miss for HTTP response: url={}", url);
    }

    None
}

/// Gets the current HTTP response cache size for monitoring purposes
pub async fn get_http_response_cache_size() -> usize {
    HTTP_RESPONSE_CACHE.read().await.len()
}

/// Gets the HTTP response cache capacity for monitoring purposes
pub async fn get_http_response_cache_capacity() -> usize {
    HTTP_RESPONSE_CACHE.read().await.cap().get()
}

/// Clears all HTTP response cache entries
pub async fn clear_http_response_cache() {
    HTTP_RESPONSE_CACHE.write().await.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_cache_roundtrip() {
        clear_http_response_cache().await;

        let url = "https://api.example.com/current.json".to_string();
        cache_http_response(url.clone(), "{\"MRData\":{}}".to_string(), 60).await;

        assert_eq!(
            get_cached_http_response(&url).await.as_deref(),
            Some("{\"MRData\":{}}")
        );
        assert_eq!(get_http_response_cache_size().await, 1);

        clear_http_response_cache().await;
        assert!(get_cached_http_response(&url).await.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_no_store_is_not_cached() {
        clear_http_response_cache().await;

        let url = "https://api.example.com/intervals".to_string();
        cache_http_response(url.clone(), "[]".to_string(), cache_ttl::NO_STORE).await;

        assert!(get_cached_http_response(&url).await.is_none());
        assert_eq!(get_http_response_cache_size().await, 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_expired_entry_is_evicted_on_read() {
        clear_http_response_cache().await;

        let url = "https://api.example.com/old.json".to_string();
        {
            let mut entry = CachedHttpResponse::new("{}".to_string(), 1);
            entry.cached_at = std::time::Instant::now() - std::time::Duration::from_secs(10);
            HTTP_RESPONSE_CACHE.write().await.put(url.clone(), entry);
        }

        assert!(get_cached_http_response(&url).await.is_none());
        assert_eq!(get_http_response_cache_size().await, 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_capacity_matches_constant() {
        assert_eq!(
            get_http_response_cache_capacity().await,
            cache_ttl::HTTP_RESPONSE_CAPACITY
        );
    }
}
