//! Symbol-environment model for the apx analyzer.
//!
//! The resolver consumes, but does not own, a best-effort picture of
//! runtime state produced by abstract interpretation:
//! - `value` - the `ApproxValue` variant type
//! - `scope` - class scopes, `SymbolEnvironment`, `MethodInvocationScope`
//! - `path` - execution paths and the walker/provider seams
//! - `messaging` - the diagnostics sink for non-fatal notices

pub mod messaging;
pub mod path;
pub mod scope;
pub mod value;

pub use messaging::{CollectingSink, DiagnosticsSink, EventKey, RecordedEvent};
pub use path::{ExecutionPath, PathConfig, PathProvider, PathVisitor, PathWalker};
pub use scope::{ClassScope, MapEnvironment, MethodInvocationScope, ScopeKind, SymbolEnvironment};
pub use value::ApproxValue;
