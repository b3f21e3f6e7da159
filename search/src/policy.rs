//! Search policy types.

/// Default expansion cap. Large enough for every shipped domain; callers
/// bounding work should set their own.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 10_000_000;

/// Per-call search configuration.
///
/// The expansion cap is a deterministic work budget, not a timeout: the same
/// problem and policy always stop at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on expansions. Reaching it before a goal is
    /// [`crate::SearchError::ResourceExhausted`].
    pub max_expansions: u64,
    /// What, if anything, to record for external inspection.
    pub trace: TraceMode,
}

impl SearchPolicy {
    /// Default policy with a custom expansion cap.
    #[must_use]
    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self {
            max_expansions,
            ..Self::default()
        }
    }

    /// Same policy with tracing switched to `trace`.
    #[must_use]
    pub fn traced(self, trace: TraceMode) -> Self {
        Self { trace, ..self }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            trace: TraceMode::Disabled,
        }
    }
}

/// Trace capture configuration, selected once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    /// No trace. The expansion loop does no trace bookkeeping.
    #[default]
    Disabled,
    /// Record expansion order plus the final parent/cost maps.
    Expansions,
    /// As `Expansions`, plus up to `max_edges` generated edges.
    ExpansionsAndEdges { max_edges: usize },
}

impl TraceMode {
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Edge capture cap, if edges are recorded at all.
    #[must_use]
    pub fn edge_cap(self) -> Option<usize> {
        match self {
            Self::ExpansionsAndEdges { max_edges } => Some(max_edges),
            _ => None,
        }
    }
}
