//! ATK verification gate: the composition root.
//!
//! The gate owns every shared component explicitly:
//! - the [`InterfaceCache`] (one per gate, never a process-wide global)
//! - the [`MutationDispatcher`] wired to the challenge exchange, the
//!   transaction service and the capability guard
//! - the batch pre-check
//! - the background sweeper that purges expired capability entries
//! - Prometheus metrics for all of the above
//!
//! [`InterfaceCache`]: atk_capabilities::InterfaceCache
//! [`MutationDispatcher`]: atk_dispatch::MutationDispatcher

pub mod config;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod shutdown;

pub use atk_utils::{init_logging, LogFormat};
pub use config::GateConfig;
pub use error::GateError;
pub use gate::{Gate, GateServices};
pub use metrics::GateMetrics;
pub use shutdown::ShutdownController;
