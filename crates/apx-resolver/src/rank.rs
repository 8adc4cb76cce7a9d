//! Overload specificity ranking.
//!
//! `rank` scores one candidate method against one call site under the
//! current approximate type environment. Lower is more specific; `None` is
//! the "does not match at all" sentinel and is excluded from ordering.
//!
//! Per-parameter ranks, summed across parameters:
//!
//! | rank | meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | argument type equals the parameter type              |
//! | 1    | argument type is a strict subclass of the parameter  |
//! | 2    | implicit standard conversion (numeric widening, Id)  |
//! | 3    | argument type indeterminate, compatible with anything|
//!
//! Two candidates summing to the same minimal rank for one call site is a
//! compile error in valid source, so callers treat it as fatal.
//!
//! Pure functions throughout: no graph mutation, safe to call concurrently.

use apx_graph::{Argument, ExprKind, MethodDeclaration, ProgramGraph, names_match};
use apx_symbols::{ApproxValue, SymbolEnvironment};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::hierarchy::superclass_of;

/// Specificity score of one overload candidate against one call site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchRank(pub u32);

const EXACT: u32 = 0;
const SUBCLASS: u32 = 1;
const CONVERSION: u32 = 2;
const INDETERMINATE: u32 = 3;

/// Implicit conversions the language applies between standard types.
const CONVERSIONS: &[(&str, &str)] = &[
    ("integer", "long"),
    ("integer", "double"),
    ("integer", "decimal"),
    ("long", "double"),
    ("long", "decimal"),
    ("double", "decimal"),
    ("string", "id"),
    ("id", "string"),
];

/// Rank `candidate` against the call site's argument list, or `None` if
/// any parameter is incompatible.
///
/// Precondition: the candidate's arity equals the call site's real arity;
/// pre-filtering is the caller's job (see `disambiguate`, which warns and
/// skips mismatches).
pub fn rank(
    graph: &ProgramGraph,
    candidate: &MethodDeclaration,
    arguments: &[Argument],
    env: &dyn SymbolEnvironment,
) -> Option<MatchRank> {
    let argument_types: SmallVec<[Option<String>; 8]> = arguments
        .iter()
        .filter_map(|a| match a {
            Argument::Expr(id) => Some(argument_type(graph, *id, env)),
            Argument::Placeholder => None,
        })
        .collect();

    if argument_types.len() != candidate.arity() {
        tracing::warn!(
            method = %candidate.qualified_name(),
            call_arity = argument_types.len(),
            "rank called with mismatching arity"
        );
        return None;
    }

    let mut total = 0u32;
    for (parameter, argument_type) in candidate.params.iter().zip(argument_types.iter()) {
        total += parameter_rank(graph, &parameter.type_name, argument_type.as_deref())?;
    }
    Some(MatchRank(total))
}

fn parameter_rank(
    graph: &ProgramGraph,
    parameter_type: &str,
    argument_type: Option<&str>,
) -> Option<u32> {
    let Some(argument_type) = argument_type else {
        return Some(INDETERMINATE);
    };
    if names_match(parameter_type, argument_type) {
        return Some(EXACT);
    }
    if is_subclass_of(graph, argument_type, parameter_type) {
        return Some(SUBCLASS);
    }
    let from = argument_type.to_ascii_lowercase();
    let to = parameter_type.to_ascii_lowercase();
    if CONVERSIONS.iter().any(|(f, t)| *f == from && *t == to) {
        return Some(CONVERSION);
    }
    None
}

/// Whether `descendant` strictly derives from `ancestor`. Tolerates a
/// malformed cyclic hierarchy by refusing to revisit a type.
fn is_subclass_of(graph: &ProgramGraph, descendant: &str, ancestor: &str) -> bool {
    let mut seen = FxHashSet::default();
    let mut current = superclass_of(graph, descendant);
    while let Some(type_name) = current {
        if names_match(type_name, ancestor) {
            return true;
        }
        if !seen.insert(type_name.to_ascii_lowercase()) {
            return false;
        }
        current = superclass_of(graph, type_name);
    }
    false
}

/// Approximate type of one argument expression, resolved through the
/// symbol environment. `None` means indeterminate.
fn argument_type(
    graph: &ProgramGraph,
    arg: apx_graph::ExprId,
    env: &dyn SymbolEnvironment,
) -> Option<String> {
    let node = graph.expr(arg);
    let value = match &node.kind {
        ExprKind::Literal { type_name } => return Some(type_name.clone()),
        ExprKind::NewObject(new_object) => return Some(new_object.type_name.clone()),
        ExprKind::VariableRef(var) => {
            if var.is_this_reference {
                env.instance_value_of(&var.name)
            } else {
                env.value_of(&var.name)
            }
        }
        ExprKind::MethodCall(_) | ExprKind::SuperCall(_) | ExprKind::ThisCall(_) => {
            env.returned_value(node.id)
        }
        _ => None,
    };
    value.and_then(|v| v.defining_type().map(str::to_string))
}

/// Whether an approximate receiver value is an acceptable `this` for
/// `method`: its runtime type is the method's defining type or derives
/// from it. An untyped receiver never matches; confirmation stays strict.
pub fn receiver_type_matches(
    graph: &ProgramGraph,
    method: &MethodDeclaration,
    receiver: &ApproxValue,
) -> bool {
    match receiver.defining_type() {
        Some(type_name) => {
            names_match(type_name, &method.defining_type)
                || is_subclass_of(graph, type_name, &method.defining_type)
        }
        None => false,
    }
}
