//! Resolution errors.
//!
//! Not-found is never an error here: it comes back as `Ok(None)` or an
//! empty sequence. `ResolverError` is reserved for invariant violations,
//! which abort the enclosing resolution rather than guess.

use apx_graph::ExprId;
use thiserror::Error;

pub type ResolverResult<T> = Result<T, ResolverError>;

#[derive(Debug, Error)]
pub enum ResolverError {
    /// Two overload candidates scored the same minimal rank for one call
    /// site. Valid source cannot do this; the graph is malformed.
    #[error(
        "multiple methods resolve to rank {rank}: {existing} and {candidate}"
    )]
    RankCollision {
        rank: u32,
        existing: String,
        candidate: String,
    },

    /// More than one body-bearing accessor for a property at one hierarchy
    /// level. The language disallows duplicate accessor definitions.
    #[error("duplicate property accessor {defining_type}#{property}")]
    DuplicateAccessor {
        defining_type: String,
        property: String,
    },

    /// An expression shape reached the dispatcher's exhaustive case
    /// analysis without matching any call shape.
    #[error("expression {0:?} has no call shape")]
    UnexpectedExpression(ExprId),

    /// Target matching was invoked with a file-level target.
    #[error("targeted_methods requires method-level targets (file {file_name})")]
    MethodLevelTargetRequired { file_name: String },
}
