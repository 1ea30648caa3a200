//! Prometheus metrics for the gate.
//!
//! [`GateMetrics`] owns a dedicated [`Registry`] holding the dispatcher's
//! counters and gauges mirroring the capability cache. Cache gauges are
//! refreshed from [`CacheStats`] each time the registry is encoded.

use std::sync::Arc;

use atk_capabilities::CacheStats;
use atk_dispatch::DispatchMetrics;
use prometheus::{Encoder, IntGauge, Opts, Registry, TextEncoder};

use crate::GateError;

pub struct GateMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,
    /// Counters updated by the dispatcher.
    pub dispatch: Arc<DispatchMetrics>,

    // ── Capability cache gauges ─────────────────────────────────────────
    pub cache_size: IntGauge,
    pub cache_hits: IntGauge,
    pub cache_misses: IntGauge,
    pub cache_evictions: IntGauge,
}

impl GateMetrics {
    pub fn new() -> Result<Self, GateError> {
        let registry = Registry::new();
        let dispatch = Arc::new(DispatchMetrics::register(&registry)?);

        let gauge = |name: &str, help: &str| -> Result<IntGauge, prometheus::Error> {
            let g = IntGauge::with_opts(Opts::new(name, help))?;
            registry.register(Box::new(g.clone()))?;
            Ok(g)
        };
        let cache_size = gauge(
            "atk_capability_cache_entries",
            "Entries currently held by the capability cache",
        )?;
        let cache_hits = gauge(
            "atk_capability_cache_hits",
            "Capability lookups answered from cache",
        )?;
        let cache_misses = gauge(
            "atk_capability_cache_misses",
            "Capability lookups that required a probe",
        )?;
        let cache_evictions = gauge(
            "atk_capability_cache_evictions",
            "Capability entries evicted after expiry",
        )?;

        Ok(Self {
            registry,
            dispatch,
            cache_size,
            cache_hits,
            cache_misses,
            cache_evictions,
        })
    }

    /// Copy cache counters into the gauges.
    pub fn observe_cache(&self, stats: CacheStats) {
        self.cache_size.set(stats.size as i64);
        self.cache_hits.set(stats.hits as i64);
        self.cache_misses.set(stats.misses as i64);
        self.cache_evictions.set(stats.evictions as i64);
    }

    /// Encode the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, GateError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| GateError::Task(format!("metrics not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_gauges_follow_stats() {
        let metrics = GateMetrics::new().unwrap();
        metrics.observe_cache(CacheStats {
            size: 3,
            hits: 10,
            misses: 4,
            evictions: 1,
        });
        let text = metrics.encode().unwrap();
        assert!(text.contains("atk_capability_cache_entries 3"));
        assert!(text.contains("atk_capability_cache_hits 10"));
    }

    #[test]
    fn dispatch_counters_are_exported() {
        let metrics = GateMetrics::new().unwrap();
        metrics.dispatch.challenges_requested.inc();
        let text = metrics.encode().unwrap();
        assert!(text.contains("atk_challenges_requested_total 1"));
    }
}
