//! Hit/miss/eviction counters for cache instrumentation (feature `metrics`).
//!
//! Recording, snapshotting and exporting are separate concerns:
//!
//! - [`metrics_impl::LruMetrics`] holds the live counters inside a cache and
//!   is written through the recorder traits in [`traits`].
//! - [`snapshot::LruMetricsSnapshot`] is a plain copy of the counters taken
//!   at one point in time, via
//!   [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).
//! - [`exporter::PrometheusTextExporter`] publishes snapshots.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
