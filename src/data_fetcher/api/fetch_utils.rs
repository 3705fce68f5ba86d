//! Generic HTTP fetching with caching, a single retry and status-aware errors

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::retry;
use crate::data_fetcher::cache::{cache_http_response, get_cached_http_response};
use crate::error::AppError;

/// Fetches `url` and parses the body as JSON.
///
/// This function:
/// - Checks the HTTP response cache first
/// - Retries once after a backoff on timeouts, connection failures, 429 and 5xx
/// - Respects Retry-After headers (capped) for the retry delay
/// - Caches successful responses for `ttl_seconds` (0 stores nothing)
/// - Maps HTTP status codes and bad bodies onto specific `AppError`s
pub async fn fetch_json(client: &Client, url: &str, ttl_seconds: u64) -> Result<Value, AppError> {
    fetch_json_checked(client, url, ttl_seconds, |_, _| Ok(())).await
}

/// Shape check run on a freshly parsed body before it is cached.
pub type PayloadCheck = fn(&Value, &str) -> Result<(), AppError>;

/// Like [`fetch_json`], but a body is only cached once `check` accepts it.
/// A rejected body is returned as the check's error and the next call goes
/// back to the network.
#[instrument(skip(client, check))]
pub async fn fetch_json_checked(
    client: &Client,
    url: &str,
    ttl_seconds: u64,
    check: PayloadCheck,
) -> Result<Value, AppError> {
    info!("Fetching data from URL: {url}");

    if let Some(cached_response) = get_cached_http_response(url).await {
        debug!("Using cached HTTP response for URL: {url}");
        match serde_json::from_str::<Value>(&cached_response) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => {
                warn!("Failed to parse cached response for URL {}: {}", url, e);
            }
        }
    }

    let mut attempt = 0u32;
    let backoff = Duration::from_millis(retry::BACKOFF_MS);
    let response = loop {
        match client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                if (status.as_u16() == 429 || status.is_server_error())
                    && attempt < retry::MAX_RETRIES
                {
                    let retry_after = resp
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(|secs| Duration::from_secs(secs.min(retry::MAX_RETRY_AFTER_SECONDS)));
                    let wait = retry_after.unwrap_or(backoff);
                    warn!(
                        "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        wait,
                        attempt + 1,
                        retry::MAX_RETRIES
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    continue;
                }
                break resp;
            }
            Err(e) => {
                if (e.is_timeout() || e.is_connect()) && attempt < retry::MAX_RETRIES {
                    warn!(
                        "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        url,
                        backoff,
                        attempt + 1,
                        retry::MAX_RETRIES
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                    continue;
                }
                error!("Request failed for URL {}: {}", url, e);
                return if e.is_timeout() {
                    Err(AppError::network_timeout(url))
                } else if e.is_connect() {
                    Err(AppError::network_connection(url, e.to_string()))
                } else {
                    Err(AppError::ApiFetch(e))
                };
            }
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        error!("HTTP {} - {} (URL: {})", status_code, reason, url);

        return Err(match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    if response_text.trim().is_empty() {
        return Err(AppError::api_no_data("Response body is empty", url));
    }

    match serde_json::from_str::<Value>(&response_text) {
        Ok(parsed) => {
            if let Err(e) = check(&parsed, url) {
                warn!("Not caching response with unexpected shape from {url}: {e}");
                return Err(e);
            }
            cache_http_response(url.to_string(), response_text, ttl_seconds).await;
            Ok(parsed)
        }
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );
            Err(AppError::api_malformed_json(e.to_string(), url))
        }
    }
}
