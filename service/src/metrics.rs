//! Prometheus metrics for the poll service.
//!
//! [`ServiceMetrics`] owns a dedicated [`Registry`] that the `/metrics` route
//! encodes into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, Encoder, Histogram, HistogramOpts, IntCounter,
    IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct ServiceMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Votes appended to the ledger.
    pub votes_accepted: IntCounter,
    /// Ballots refused, labelled by `reason`.
    pub votes_rejected: IntCounterVec,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Fetch plus aggregation time of one `all_votes` call, in milliseconds.
    pub aggregation_duration_ms: Histogram,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let votes_accepted = register_int_counter_with_registry!(
            Opts::new("gauss_votes_accepted_total", "Total votes appended to the ledger"),
            registry
        )
        .expect("failed to register votes_accepted counter");

        let votes_rejected = register_int_counter_vec_with_registry!(
            Opts::new("gauss_votes_rejected_total", "Total ballots rejected"),
            &["reason"],
            registry
        )
        .expect("failed to register votes_rejected counter");

        let aggregation_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "gauss_aggregation_duration_ms",
                "Time to fetch and aggregate the vote ledger, in milliseconds"
            )
            .buckets(vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0]),
            registry
        )
        .expect("failed to register aggregation_duration_ms histogram");

        Self {
            registry,
            votes_accepted,
            votes_rejected,
            aggregation_duration_ms,
        }
    }

    /// Encode every metric in the text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
