//! Compile-time metric catalogue.
//!
//! Every metric this element exports is declared here once, as an immutable
//! [`MetricDefinition`], grouped by scope:
//!
//! - **Global** — one series per process, no per-entity label
//!   (e.g. `enb_ue`, the number of UEs currently attached via any eNB).
//! - **Local** — per-entity state reported through a label *value* at
//!   mutation time (e.g. `enb{connected="10.0.0.5"}`), layered over a single
//!   shared instance.
//!
//! Call sites never refer to metrics by raw position; they use the closed
//! [`GlobalMetric`] / [`LocalMetric`] enums, which index the `const` tables
//! below. Adding a metric means adding an enum variant, a table entry at the
//! same position, and nothing else.

/// Kind of backing series a definition materialises into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// Value that can move both ways (`set`/`increment`/`decrement`).
    Gauge,
    /// Monotonically increasing value.
    Counter,
}

/// Immutable declaration of one metric: what it is called, what it measures,
/// and what label schema its series carry. Declared `const`, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    pub metric_type: MetricType,
    /// Unique within its scope.
    pub name: &'static str,
    pub description: &'static str,
    /// Value a freshly created instance starts at.
    pub initial_value: i64,
    /// Ordered label schema; empty for label-less metrics.
    pub label_names: &'static [&'static str],
}

/// Process-wide metrics, one instance each, allocated eagerly at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalMetric {
    /// Number of UEs connected to eNodeBs.
    EnbUe,
    /// Active MME sessions.
    MmeSession,
}

static GLOBAL_DEFS: [MetricDefinition; 2] = [
    MetricDefinition {
        metric_type: MetricType::Gauge,
        name: "enb_ue",
        description: "Number of UEs connected to eNodeBs",
        initial_value: 0,
        label_names: &[],
    },
    MetricDefinition {
        metric_type: MetricType::Gauge,
        name: "mme_session",
        description: "MME Sessions",
        initial_value: 0,
        label_names: &[],
    },
];

impl GlobalMetric {
    /// All variants, in catalogue (and therefore handle-table) order.
    pub const ALL: [GlobalMetric; 2] = [GlobalMetric::EnbUe, GlobalMetric::MmeSession];

    /// The definition backing this key.
    pub fn def(self) -> &'static MetricDefinition {
        &GLOBAL_DEFS[self as usize]
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Per-entity metrics: a single shared instance whose series fan out by
/// label value at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalMetric {
    /// Connectivity state of each eNB that has contacted this MME, keyed by
    /// the eNB's IP address.
    Enb,
}

static LOCAL_DEFS: [MetricDefinition; 1] = [MetricDefinition {
    metric_type: MetricType::Gauge,
    name: "enb",
    description: "Status and IP address of eNBs that have connected to this MME",
    initial_value: 0,
    label_names: &["connected"],
}];

impl LocalMetric {
    /// All variants, in catalogue order.
    pub const ALL: [LocalMetric; 1] = [LocalMetric::Enb];

    /// The definition backing this key.
    pub fn def(self) -> &'static MetricDefinition {
        &LOCAL_DEFS[self as usize]
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// The full catalogue for a scope, in registration order.
pub fn global_definitions() -> &'static [MetricDefinition] {
    &GLOBAL_DEFS
}

/// See [`global_definitions`].
pub fn local_definitions() -> &'static [MetricDefinition] {
    &LOCAL_DEFS
}
