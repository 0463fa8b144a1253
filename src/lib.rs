//! Heimdall - metrics registry and instance lifecycle for a
//! mobility-management element
//!
//! This crate owns the fixed catalogue of metrics an MME-like element
//! exports, materialises each definition into live series in an injected
//! [`MetricsBackend`], and gives application code a narrow surface to report
//! state changes: peer eNBs connecting and disconnecting, plus the global
//! session and UE gauges.
//!
//! Storage, aggregation, and exposition all live behind the backend trait.
//! The shipped [`RecorderBackend`] forwards to the `metrics` facade, so the
//! host process chooses the exporter by installing a recorder.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use heimdall::{GlobalMetric, MetricsRegistry, RecorderBackend};
//!
//! fn main() -> heimdall::Result<()> {
//!     let mut registry = MetricsRegistry::new(Arc::new(RecorderBackend::new()));
//!     registry.init_all()?;
//!
//!     // A peer eNB connected; failures here are diagnostic only and must
//!     // not disturb the accept path, so the result may be dropped.
//!     let _ = registry.peer_connected("192.0.2.1");
//!     registry.global_inc(GlobalMetric::MmeSession)?;
//!
//!     registry.finalize_all();
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod catalog;
pub mod error;
pub mod registry;

// Re-export main types at crate root
pub use backend::{InstanceHandle, MetricsBackend, RecorderBackend, SpecHandle};
pub use catalog::{GlobalMetric, LocalMetric, MetricDefinition, MetricType};
pub use error::{MetricsError, Result};
pub use registry::MetricsRegistry;
