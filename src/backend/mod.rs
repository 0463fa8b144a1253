//! Backend boundary.
//!
//! The registry never stores or aggregates metric data itself; everything is
//! forwarded to a [`MetricsBackend`] — the export engine injected at
//! construction. The backend owns series identity: when a mutation carries a
//! label value (say a peer's IP address), this layer just passes the value
//! through and the backend decides whether that means a new series.
//!
//! Handles are opaque, `Copy`, and only meaningful to the backend that issued
//! them. The shipped implementation is [`RecorderBackend`]; tests substitute
//! their own mocks.

mod recorder;

pub use recorder::RecorderBackend;

use crate::catalog::MetricDefinition;
use crate::error::Result;

/// Opaque reference to a registered metric specification.
///
/// One per [`MetricDefinition`], issued at init, valid for the process
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecHandle(pub u64);

/// Opaque reference to one live, mutable metric series bound to a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// The export engine this layer delegates all storage and exposition to.
///
/// Implementations must be internally thread-safe: mutation calls may arrive
/// from any request-handling context. No method is expected to block; all
/// calls are bounded-time handle lookups and forwards.
pub trait MetricsBackend: Send + Sync {
    /// Prepare backend state. Called once, before any `create_spec`.
    fn context_init(&self);

    /// Tear backend state down. Called once, after all instances are freed.
    fn context_final(&self);

    /// Register one metric specification.
    ///
    /// Fails if the backend cannot accept the definition, e.g. the name is
    /// already registered. That failure is fatal to initialisation; the
    /// caller does not retry.
    fn create_spec(&self, def: &MetricDefinition) -> Result<SpecHandle>;

    /// Create one live instance bound to `spec`.
    ///
    /// `label_values` matches the spec's label-name arity for fully-bound
    /// series, or is empty for the base series of a label-keyed metric —
    /// per-entity values are supplied later through [`set_with_label`].
    ///
    /// [`set_with_label`]: MetricsBackend::set_with_label
    fn create_instance(&self, spec: SpecHandle, label_values: &[&str]) -> InstanceHandle;

    /// Add 1 to the instance's base series.
    fn increment(&self, inst: InstanceHandle);

    /// Subtract 1 from the instance's base series.
    fn decrement(&self, inst: InstanceHandle);

    /// Set the series selected by `label_value` (under the spec's label key)
    /// to `value`, creating the series if this value was never seen.
    fn set_with_label(&self, inst: InstanceHandle, label_value: &str, value: i64);

    /// Release an instance. Further use of the handle is undefined.
    fn free_instance(&self, inst: InstanceHandle);
}
