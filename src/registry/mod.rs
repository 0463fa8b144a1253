//! Process-scoped metrics registry.
//!
//! [`MetricsRegistry`] walks the compiled-in catalogue, registers every
//! definition with the backend, materialises the live instances, and exposes
//! the mutation surface call sites use to report state changes. It replaces
//! the file-scope handle arrays of older elements with one object owning an
//! explicit `init_all` / `finalize_all` lifecycle and an injected backend.
//!
//! # Lifecycle
//!
//! `init_all` runs once, single-threaded, before any mutation call is
//! reachable; `finalize_all` runs after the last one. Calling `init_all`
//! twice is not guarded and leaks duplicate backend handles — that is the
//! caller's responsibility, in keeping with how little this layer does.
//!
//! # Concurrency
//!
//! The registry holds no lock. Lifecycle methods take `&mut self`; mutation
//! methods take `&self` and only read the handle tables populated at init.
//! Thread safety of the handles themselves is the backend's business.

use std::sync::Arc;

use tracing::{debug, error};

use crate::backend::{InstanceHandle, MetricsBackend, SpecHandle};
use crate::catalog::{
    global_definitions, local_definitions, GlobalMetric, LocalMetric, MetricDefinition,
};
use crate::error::{MetricsError, Result};

/// Owner of every spec and instance handle in the process.
pub struct MetricsRegistry {
    backend: Arc<dyn MetricsBackend>,
    global_specs: Vec<SpecHandle>,
    local_specs: Vec<SpecHandle>,
    // Option is the null sentinel: release() clears each slot after freeing
    // it, so a second release finds nothing to free.
    global_instances: Vec<Option<InstanceHandle>>,
    local_instances: Vec<Option<InstanceHandle>>,
}

impl MetricsRegistry {
    /// Create an empty registry around a backend. No backend calls are made
    /// until [`init_all`](Self::init_all).
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self {
            backend,
            global_specs: Vec::new(),
            local_specs: Vec::new(),
            global_instances: Vec::new(),
            local_instances: Vec::new(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Register every catalogue definition and create all live instances.
    ///
    /// Runs in dependency order: backend context, global and local specs,
    /// then instances. Any backend rejection (e.g. a duplicate metric name)
    /// aborts initialisation and propagates; after an error no instance
    /// exists and every mutation call fails its precondition check, so no
    /// partially-initialised state is observable.
    pub fn init_all(&mut self) -> Result<()> {
        self.backend.context_init();

        self.global_specs = self.register_specs(global_definitions())?;
        self.local_specs = self.register_specs(local_definitions())?;

        // Global: one zero-label instance per spec, eagerly.
        self.global_instances = self
            .global_specs
            .iter()
            .map(|spec| Some(self.backend.create_instance(*spec, &[])))
            .collect();

        // Local: one shared instance per definition; per-peer series are
        // carved out of it at mutation time via the label value.
        self.local_instances = self
            .local_specs
            .iter()
            .map(|spec| Some(self.backend.create_instance(*spec, &[])))
            .collect();

        debug!(
            global = self.global_instances.len(),
            local = self.local_instances.len(),
            "metrics registry initialised"
        );
        Ok(())
    }

    /// Free every instance and finalise the backend context.
    ///
    /// Safe to call repeatedly: freed slots are nulled out, and a second
    /// pass over nulled slots is a no-op.
    pub fn finalize_all(&mut self) {
        Self::release(self.backend.as_ref(), &mut self.global_instances);
        Self::release(self.backend.as_ref(), &mut self.local_instances);
        self.backend.context_final();
        debug!("metrics registry finalised");
    }

    /// Ask the backend for one spec handle per definition, in catalogue
    /// order, so the i-th handle always belongs to the i-th definition.
    fn register_specs(&self, defs: &'static [MetricDefinition]) -> Result<Vec<SpecHandle>> {
        defs.iter().map(|def| self.backend.create_spec(def)).collect()
    }

    /// Free each live handle and null its slot.
    fn release(backend: &dyn MetricsBackend, slots: &mut [Option<InstanceHandle>]) {
        for slot in slots {
            if let Some(inst) = slot.take() {
                backend.free_instance(inst);
            }
        }
    }

    // ========================================================================
    // Mutation surface
    // ========================================================================

    /// Record that the eNB at `addr` has connected.
    ///
    /// Two backend writes: the base `enb` series (running total of connected
    /// eNBs) is incremented, and the series labelled with `addr` is set to 1.
    /// The pair is not atomic; under concurrent calls the total and the
    /// per-peer flags may transiently disagree, which is accepted for
    /// telemetry. The total moves on every call, the labelled write is
    /// idempotent — callers must pair connect/disconnect 1:1 or the total
    /// drifts.
    ///
    /// Errors here are diagnostic only; connection handling must proceed
    /// regardless of the result.
    pub fn peer_connected(&self, addr: &str) -> Result<()> {
        let inst = self.local_instance_for(LocalMetric::Enb, addr)?;
        self.backend.increment(inst);
        self.backend.set_with_label(inst, addr, 1);
        Ok(())
    }

    /// Record that the eNB at `addr` has disconnected. Mirror of
    /// [`peer_connected`](Self::peer_connected): total decremented, labelled
    /// series set to 0.
    pub fn peer_disconnected(&self, addr: &str) -> Result<()> {
        let inst = self.local_instance_for(LocalMetric::Enb, addr)?;
        self.backend.decrement(inst);
        self.backend.set_with_label(inst, addr, 0);
        Ok(())
    }

    /// Add 1 to a global metric.
    pub fn global_inc(&self, metric: GlobalMetric) -> Result<()> {
        self.backend.increment(self.global_handle(metric)?);
        Ok(())
    }

    /// Subtract 1 from a global metric.
    pub fn global_dec(&self, metric: GlobalMetric) -> Result<()> {
        self.backend.decrement(self.global_handle(metric)?);
        Ok(())
    }

    // ========================================================================
    // Preconditions & inspection
    // ========================================================================

    /// Validate the per-peer mutation preconditions: a live instance and a
    /// non-empty peer address. Violations are logged and returned without
    /// touching the backend.
    fn local_instance_for(&self, metric: LocalMetric, addr: &str) -> Result<InstanceHandle> {
        if addr.is_empty() {
            error!(
                metric = metric.def().name,
                "cannot update peer metrics: empty peer address"
            );
            return Err(MetricsError::EmptyPeerAddress);
        }
        self.local_instance(metric).ok_or_else(|| {
            error!(
                metric = metric.def().name,
                "cannot update peer metrics: instance not initialised"
            );
            MetricsError::MissingInstance(metric.def().name)
        })
    }

    fn global_handle(&self, metric: GlobalMetric) -> Result<InstanceHandle> {
        self.global_instance(metric).ok_or_else(|| {
            error!(
                metric = metric.def().name,
                "cannot update metric: instance not initialised"
            );
            MetricsError::MissingInstance(metric.def().name)
        })
    }

    /// Spec handle for a global metric, if registered.
    pub fn global_spec(&self, metric: GlobalMetric) -> Option<SpecHandle> {
        self.global_specs.get(metric.index()).copied()
    }

    /// Spec handle for a local metric, if registered.
    pub fn local_spec(&self, metric: LocalMetric) -> Option<SpecHandle> {
        self.local_specs.get(metric.index()).copied()
    }

    /// Live instance handle for a global metric, if any.
    pub fn global_instance(&self, metric: GlobalMetric) -> Option<InstanceHandle> {
        self.global_instances.get(metric.index()).copied().flatten()
    }

    /// Live instance handle for a local metric, if any.
    pub fn local_instance(&self, metric: LocalMetric) -> Option<InstanceHandle> {
        self.local_instances.get(metric.index()).copied().flatten()
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("global_specs", &self.global_specs.len())
            .field("local_specs", &self.local_specs.len())
            .field(
                "live_global_instances",
                &self.global_instances.iter().flatten().count(),
            )
            .field(
                "live_local_instances",
                &self.local_instances.iter().flatten().count(),
            )
            .finish()
    }
}
