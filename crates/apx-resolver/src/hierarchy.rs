//! Single-step superclass walking.
//!
//! Resolution walks the hierarchy one class at a time instead of querying
//! the whole inheritance chain and unioning methods; collapsing matches
//! across levels would invent collisions that don't exist in source.
//! The step is a pure function and the caller's loop is the only state.

use apx_graph::ProgramGraph;

/// Superclass of `type_name`, if the declaration exists and names one.
/// Interfaces are not traversed.
pub fn superclass_of<'g>(graph: &'g ProgramGraph, type_name: &str) -> Option<&'g str> {
    let id = graph.find_type(type_name)?;
    graph.type_decl(id).superclass.as_deref()
}
