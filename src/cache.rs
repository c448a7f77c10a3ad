//! In-memory memo of computed quotes.
//!
//! Quotes are a pure function of the trip, the issue date and the catalog
//! snapshot loaded at startup, so they can be cached by input hash.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;

use crate::quote::Quote;

#[derive(Clone)]
pub struct QuoteCache {
    quotes: Cache<String, Arc<Quote>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl QuoteCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        QuoteCache {
            quotes: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn get(&self, input_hash: &str) -> Option<Arc<Quote>> {
        let found = self.quotes.get(input_hash).await;
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub async fn insert(&self, quote: Quote) -> Arc<Quote> {
        let quote = Arc::new(quote);
        self.quotes
            .insert(quote.input_hash.clone(), Arc::clone(&quote))
            .await;
        quote
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.quotes.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        QuoteCache::new(10_000, Duration::from_secs(3600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{PricingCatalog, QuoteCalculator, TripDetails};

    fn sample_quote() -> Quote {
        let catalog = PricingCatalog::sri_lanka();
        let trip = TripDetails {
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 10),
            days: 3,
            destinations: vec!["kandy".to_string()],
            vehicle: Some("sedan".to_string()),
            accommodation_tier: Some("budget".to_string()),
            ..Default::default()
        };
        QuoteCalculator::new(&catalog).calculate(&trip).unwrap()
    }

    #[tokio::test]
    async fn test_hit_and_miss_counts() {
        let cache = QuoteCache::default();
        let quote = sample_quote();
        let key = quote.input_hash.clone();

        assert!(cache.get(&key).await.is_none());
        cache.insert(quote.clone()).await;
        let cached = cache.get(&key).await.unwrap();
        assert_eq!(*cached, quote);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
