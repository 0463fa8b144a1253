//! Backend forwarding to the `metrics` facade.
//!
//! [`RecorderBackend`] translates handle operations into `metrics` crate
//! calls, so whatever recorder the host process installs (a Prometheus
//! exporter, statsd, the debugging recorder in tests) receives the data.
//! Without a recorder installed every emission is a no-op, per the facade's
//! contract.
//!
//! The backend keeps the only mutable state in this crate: two handle tables
//! mapping ids back to the definitions and base labels they were created
//! with. Tables are written during init/shutdown and read on the mutation
//! path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::catalog::{MetricDefinition, MetricType};
use crate::error::{MetricsError, Result};

use super::{InstanceHandle, MetricsBackend, SpecHandle};

#[derive(Debug)]
struct InstanceEntry {
    spec: SpecHandle,
    /// Base label pairs this instance was created with (label names come
    /// from the spec, values from `create_instance`).
    labels: Vec<(&'static str, String)>,
}

/// [`MetricsBackend`] implementation backed by the `metrics` facade.
#[derive(Debug, Default)]
pub struct RecorderBackend {
    next_id: AtomicU64,
    specs: RwLock<HashMap<u64, MetricDefinition>>,
    instances: RwLock<HashMap<u64, InstanceEntry>>,
}

impl RecorderBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Emit an absolute value for a series.
    fn emit_set(def: &MetricDefinition, labels: &[(&'static str, String)], value: i64) {
        match def.metric_type {
            MetricType::Gauge => metrics::gauge!(def.name, labels).set(value as f64),
            // Counters are monotonic in the facade; an absolute write is the
            // closest translation of a seeded value.
            MetricType::Counter => {
                metrics::counter!(def.name, labels).absolute(value.max(0) as u64)
            }
        }
    }
}

impl MetricsBackend for RecorderBackend {
    fn context_init(&self) {
        debug!("metrics backend context initialised");
    }

    fn context_final(&self) {
        self.instances
            .write()
            .expect("instance table lock poisoned")
            .clear();
        self.specs.write().expect("spec table lock poisoned").clear();
        debug!("metrics backend context finalised");
    }

    fn create_spec(&self, def: &MetricDefinition) -> Result<SpecHandle> {
        let mut specs = self.specs.write().expect("spec table lock poisoned");
        if specs.values().any(|known| known.name == def.name) {
            return Err(MetricsError::Registration {
                name: def.name,
                reason: "a spec with this name is already registered".to_string(),
            });
        }
        match def.metric_type {
            MetricType::Gauge => metrics::describe_gauge!(def.name, def.description),
            MetricType::Counter => metrics::describe_counter!(def.name, def.description),
        }
        let id = self.next_id();
        specs.insert(id, *def);
        Ok(SpecHandle(id))
    }

    fn create_instance(&self, spec: SpecHandle, label_values: &[&str]) -> InstanceHandle {
        let specs = self.specs.read().expect("spec table lock poisoned");
        let def = match specs.get(&spec.0) {
            Some(def) => *def,
            None => {
                warn!(handle = spec.0, "instance requested for unknown spec");
                return InstanceHandle(self.next_id());
            }
        };
        drop(specs);

        let labels: Vec<(&'static str, String)> = def
            .label_names
            .iter()
            .zip(label_values)
            .map(|(name, value)| (*name, (*value).to_string()))
            .collect();
        Self::emit_set(&def, &labels, def.initial_value);

        let id = self.next_id();
        self.instances
            .write()
            .expect("instance table lock poisoned")
            .insert(id, InstanceEntry { spec, labels });
        InstanceHandle(id)
    }

    fn increment(&self, inst: InstanceHandle) {
        let instances = self.instances.read().expect("instance table lock poisoned");
        let specs = self.specs.read().expect("spec table lock poisoned");
        let Some(entry) = instances.get(&inst.0) else {
            warn!(handle = inst.0, "increment on unknown instance");
            return;
        };
        let Some(def) = specs.get(&entry.spec.0) else {
            return;
        };
        match def.metric_type {
            MetricType::Gauge => metrics::gauge!(def.name, entry.labels.as_slice()).increment(1.0),
            MetricType::Counter => metrics::counter!(def.name, entry.labels.as_slice()).increment(1),
        }
    }

    fn decrement(&self, inst: InstanceHandle) {
        let instances = self.instances.read().expect("instance table lock poisoned");
        let specs = self.specs.read().expect("spec table lock poisoned");
        let Some(entry) = instances.get(&inst.0) else {
            warn!(handle = inst.0, "decrement on unknown instance");
            return;
        };
        let Some(def) = specs.get(&entry.spec.0) else {
            return;
        };
        match def.metric_type {
            MetricType::Gauge => metrics::gauge!(def.name, entry.labels.as_slice()).decrement(1.0),
            MetricType::Counter => {
                warn!(metric = def.name, "decrement is not defined for counters")
            }
        }
    }

    fn set_with_label(&self, inst: InstanceHandle, label_value: &str, value: i64) {
        let instances = self.instances.read().expect("instance table lock poisoned");
        let specs = self.specs.read().expect("spec table lock poisoned");
        let Some(entry) = instances.get(&inst.0) else {
            warn!(handle = inst.0, "labelled write on unknown instance");
            return;
        };
        let Some(def) = specs.get(&entry.spec.0) else {
            return;
        };
        let Some(key) = def.label_names.first() else {
            warn!(metric = def.name, "labelled write on a label-less metric");
            return;
        };
        let mut labels = entry.labels.clone();
        labels.push((*key, label_value.to_string()));
        Self::emit_set(def, &labels, value);
    }

    fn free_instance(&self, inst: InstanceHandle) {
        self.instances
            .write()
            .expect("instance table lock poisoned")
            .remove(&inst.0);
    }
}
