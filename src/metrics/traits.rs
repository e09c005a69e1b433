//! # Metrics Traits
//!
//! ```text
//!   Recording (inside the cache)          Consumption (outside the cache)
//!   ┌─────────────────────────────┐       ┌──────────────────────────────┐
//!   │ CoreMetricsRecorder  (&mut) │       │ MetricsSnapshotProvider<S>   │
//!   │  get hit/miss, put, evict   │       │ (bench/test)                 │
//!   ├─────────────────────────────┤       ├──────────────────────────────┤
//!   │ LruMetricsReadRecorder (&)  │       │ MetricsExporter<S>           │
//!   │  peek, peek_lru, rank scans │       │ (production monitoring)      │
//!   └─────────────────────────────┘       └──────────────────────────────┘
//! ```
//!
//! Recorders only write counters, providers only read them, exporters only
//! publish them.

/// Counters every mutating cache operation feeds.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_put_call(&mut self);
    fn record_put_new(&mut self);
    fn record_put_update(&mut self);
    fn record_evicted_entry(&mut self);
}

/// Counters for read-only LRU operations, recorded through `&self`.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_hit(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring sink.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
