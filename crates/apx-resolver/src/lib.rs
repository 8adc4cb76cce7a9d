//! Call-resolution engine for the apx analyzer.
//!
//! Given an expression node from the program graph, this crate determines
//! which method declaration it invokes, accounting for inheritance,
//! static/instance dispatch, overload ranking against approximate argument
//! types, synthetic property accessors and default/explicit constructors.
//! It also answers the inverse query: which call sites plausibly invoke a
//! given method, confirmed by walking a reverse execution path.
//!
//! Modules:
//! - `hierarchy` - single-step superclass walking
//! - `rank` - overload specificity ranking
//! - `invocation` - the hierarchy-walking resolution loop and its
//!   constructor/property/super/this entry points
//! - `dispatch` - expression-shape dispatch to the right resolver
//! - `callers` - two-phase caller gathering and confirmation
//! - `targets` - user-specified analysis-target matching
//!
//! Everything here is a pure function of (graph, inputs, environment);
//! concurrent resolution from multiple path-exploration workers needs no
//! locking.

pub mod callers;
pub mod dispatch;
pub mod error;
pub mod hierarchy;
pub mod invocation;
pub mod rank;
pub mod targets;

pub use callers::{find_confirmed_callers, potential_callers};
pub use dispatch::{approximate_value, resolve_call_paths, resolve_invoked_method};
pub use error::{ResolverError, ResolverResult};
pub use hierarchy::superclass_of;
pub use invocation::{
    AccessorKind, disambiguate, explicit_constructors, indeterminate_invocation_scope,
    no_arg_constructor, resolve_call, resolve_constructor, resolve_property_accessor,
    resolve_super_call, resolve_this_call,
};
pub use rank::{MatchRank, rank, receiver_type_matches};
pub use targets::{AnalysisTarget, targeted_methods};
