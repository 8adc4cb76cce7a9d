//! Program graph for the apx analyzer.
//!
//! This crate holds the read-only, indexed store of declarations and
//! expression nodes that the resolver queries:
//! - `decl` - type/method/parameter declarations and id newtypes
//! - `expr` - the closed set of call-shaped expression nodes
//! - `query` - `ProgramGraph`, `MethodFilter` and `GraphBuilder`
//! - `stdlib` - canonical names for aliased standard-library types
//!
//! The graph is immutable once built; every query is deterministic and safe
//! for concurrent reads.

pub mod decl;
pub mod expr;
pub mod query;
pub mod stdlib;

pub use decl::{
    CONSTRUCTOR_CANONICAL_NAME, ExprId, MethodDeclaration, MethodId, PROPERTY_METHOD_PREFIX,
    Parameter, TypeDeclaration, TypeId, accessor_method_name, names_match,
};
pub use expr::{
    Argument, ConstructorCallExpr, ExprKind, ExpressionNode, MethodCallExpr, NewObjectExpr,
    RefTag, VariableRefExpr, real_arity,
};
pub use query::{GraphBuilder, MethodFilter, ProgramGraph};
