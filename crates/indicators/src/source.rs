//! World Bank country and indicator lookups with response memoisation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures_util::future::try_join_all;
use serde_json::Value;

use crate::cache::{TimedCache, DEFAULT_MAX_AGE};
use crate::error::{IndicatorError, Result};
use crate::fetch::DataFetcher;
use crate::indicator::Indicator;

pub const WORLD_BANK_API_BASE_URL: &str = "https://api.worldbank.org/v2";

const QUERY: &str = "format=json&per_page=100";

/// Fetches World Bank data pages through a [`DataFetcher`] and memoises them
/// per resource URL. Stale pages are dropped whenever a new one is stored.
///
/// The API answers with a two-element array `[metadata, page]`; only the
/// page is kept.
pub struct IndicatorSource<F> {
    fetcher: F,
    base_url: String,
    max_age: Duration,
    cache: Mutex<TimedCache<Value>>,
}

impl<F: DataFetcher> IndicatorSource<F> {
    pub fn new(fetcher: F) -> Self {
        IndicatorSource {
            fetcher,
            base_url: WORLD_BANK_API_BASE_URL.to_string(),
            max_age: DEFAULT_MAX_AGE,
            cache: Mutex::new(TimedCache::new()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn country_url(&self, iso_code: &str) -> String {
        format!("{}/country/{}", self.base_url, iso_code)
    }

    pub fn indicator_url(&self, iso_code: &str, indicator: Indicator) -> String {
        format!(
            "{}/country/{}/indicator/{}",
            self.base_url,
            iso_code,
            indicator.code()
        )
    }

    /// Country metadata page.
    pub async fn country(&self, iso_code: &str) -> Result<Value> {
        self.fetch_with_cache(self.country_url(iso_code)).await
    }

    /// Observation page for one indicator.
    pub async fn indicator(&self, iso_code: &str, indicator: Indicator) -> Result<Value> {
        self.fetch_with_cache(self.indicator_url(iso_code, indicator))
            .await
    }

    /// Every catalog indicator for a country, requested concurrently. Fails
    /// if any single request fails.
    pub async fn all_indicators(&self, iso_code: &str) -> Result<BTreeMap<Indicator, Value>> {
        let requests = Indicator::all().map(move |indicator| async move {
            self.indicator(iso_code, indicator)
                .await
                .map(|page| (indicator, page))
        });
        let pages = try_join_all(requests).await?;
        Ok(pages.into_iter().collect())
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, TimedCache<Value>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_with_cache(&self, url: String) -> Result<Value> {
        if let Some(page) = self.cache().get(&url, self.max_age).cloned() {
            tracing::trace!(%url, "cache hit");
            return Ok(page);
        }

        let request = format!("{url}?{QUERY}");
        tracing::debug!(url = %request, "fetching");
        let bytes = self.fetcher.fetch(&request).await.inspect_err(|e| {
            tracing::warn!("request failed: {e}");
        })?;

        let page = data_page(&url, &bytes)?;
        let mut cache = self.cache();
        let evicted = cache.evict_stale(self.max_age, Instant::now());
        if evicted > 0 {
            tracing::trace!(evicted, "dropped stale pages");
        }
        cache.put(url, page.clone());
        Ok(page)
    }
}

fn data_page(url: &str, bytes: &[u8]) -> Result<Value> {
    let shape_error = |reason: String| IndicatorError::UnexpectedShape {
        url: url.to_string(),
        reason,
    };

    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(mut parts) if parts.len() >= 2 => Ok(parts.swap_remove(1)),
        // Errors come back as a lone `[{"message": [{"value": ...}]}]`
        Value::Array(parts) => Err(shape_error(
            parts
                .first()
                .and_then(|meta| meta.pointer("/message/0/value"))
                .and_then(Value::as_str)
                .unwrap_or("missing data page")
                .to_string(),
        )),
        _ => Err(shape_error("expected a JSON array".to_string())),
    }
}

/// Most recent non-null observation in an indicator page as `(date, value)`.
/// Pages list observations newest first.
pub fn latest_observation(page: &Value) -> Option<(String, f64)> {
    page.as_array()?.iter().find_map(|row| {
        let value = row.get("value")?.as_f64()?;
        let date = row.get("date").and_then(Value::as_str).unwrap_or_default();
        Some((date.to_string(), value))
    })
}
