//! Heimdall error types

/// Heimdall error types
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The backend refused to create a spec (e.g. a name collision with a
    /// metric it already knows). Fatal at init time; startup should abort.
    #[error("backend rejected metric spec '{name}': {reason}")]
    Registration { name: &'static str, reason: String },

    /// A mutation was attempted before the metric's instance was created.
    ///
    /// Non-fatal: the call is a no-op apart from this signal, and the
    /// caller's primary flow should continue.
    #[error("metric instance '{0}' has not been initialised")]
    MissingInstance(&'static str),

    /// A per-peer mutation was attempted with an empty peer address.
    #[error("peer address must not be empty")]
    EmptyPeerAddress,
}

/// Result type alias for Heimdall operations
pub type Result<T> = std::result::Result<T, MetricsError>;
