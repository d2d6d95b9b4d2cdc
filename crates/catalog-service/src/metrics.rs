//! Prometheus metrics for cache behavior and delete cascades.

use metrics::{counter, describe_counter};

/// Metric names for the catalog service layer.
pub mod names {
    /// Reads served from the cache.
    pub const CACHE_HITS_TOTAL: &str = "catalog_cache_hits_total";
    /// Reads that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "catalog_cache_misses_total";
    /// Collection keys rewritten after a write.
    pub const CACHE_REFRESHES_TOTAL: &str = "catalog_cache_refreshes_total";
    /// Manufacturer references removed while deleting products.
    pub const CASCADE_PULLS_TOTAL: &str = "catalog_cascade_pulls_total";
    /// Product deletes that failed after references were already removed.
    pub const PARTIAL_CASCADE_FAILURES_TOTAL: &str = "catalog_partial_cascade_failures_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_HITS_TOTAL,
        "Total number of reads served from the cache"
    );
    describe_counter!(
        names::CACHE_MISSES_TOTAL,
        "Total number of reads loaded from the store"
    );
    describe_counter!(
        names::CACHE_REFRESHES_TOTAL,
        "Total number of collection cache refreshes after writes"
    );
    describe_counter!(
        names::CASCADE_PULLS_TOTAL,
        "Total number of manufacturer references removed by product deletes"
    );
    describe_counter!(
        names::PARTIAL_CASCADE_FAILURES_TOTAL,
        "Total number of product deletes that failed after the reference cascade"
    );
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit for a key space such as `products`.
    pub fn hit(key_space: &'static str) {
        counter!(names::CACHE_HITS_TOTAL, "key_space" => key_space).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(key_space: &'static str) {
        counter!(names::CACHE_MISSES_TOTAL, "key_space" => key_space).increment(1);
    }

    /// Record a collection refresh.
    pub fn refresh(key_space: &'static str) {
        counter!(names::CACHE_REFRESHES_TOTAL, "key_space" => key_space).increment(1);
    }
}

/// Delete cascade metrics recorder.
#[derive(Clone)]
pub struct CascadeMetrics;

impl CascadeMetrics {
    /// Record the number of manufacturers whose reference was removed.
    pub fn references_pulled(count: usize) {
        counter!(names::CASCADE_PULLS_TOTAL).increment(count as u64);
    }

    /// Record a delete that left the references removed but the product in place.
    pub fn partial_failure() {
        counter!(names::PARTIAL_CASCADE_FAILURES_TOTAL).increment(1);
    }
}
