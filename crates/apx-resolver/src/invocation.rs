//! The hierarchy-walking invocation resolver.
//!
//! `resolve_call` iterates up the hierarchy one class at a time instead of
//! querying the whole inheritance chain and gathering all methods at once;
//! unioning across levels would require collapsing collisions that don't
//! exist in source. Private methods of superclasses are not excluded and
//! access validity is assumed; this is an analyzer, not a compiler.

use std::collections::BTreeMap;

use apx_graph::{
    Argument, CONSTRUCTOR_CANONICAL_NAME, ExprKind, ExpressionNode, MethodFilter, MethodId,
    ProgramGraph, accessor_method_name, names_match, real_arity,
};
use apx_symbols::{ApproxValue, MethodInvocationScope, SymbolEnvironment};
use rustc_hash::FxHashSet;

use crate::error::{ResolverError, ResolverResult};
use crate::hierarchy::superclass_of;
use crate::rank::{self, MatchRank};

/// Pick the unique best-ranked candidate for a call site.
///
/// Candidates whose arity disagrees with the call site are a caller error:
/// logged and skipped, never fatal. Two candidates tying at the same rank
/// is fatal; valid source cannot produce that, so the graph is malformed.
pub fn disambiguate(
    graph: &ProgramGraph,
    candidates: &[MethodId],
    arguments: &[Argument],
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let call_arity = real_arity(arguments);
    let mut matched: BTreeMap<MatchRank, MethodId> = BTreeMap::new();
    for &candidate in candidates {
        let method = graph.method(candidate);
        if method.arity() != call_arity {
            tracing::warn!(
                method = %method.qualified_name(),
                call_arity,
                "disambiguate was passed a candidate with mismatching arity"
            );
            continue;
        }
        if let Some(match_rank) = rank::rank(graph, method, arguments, env) {
            if let Some(&existing) = matched.get(&match_rank) {
                return Err(ResolverError::RankCollision {
                    rank: match_rank.0,
                    existing: graph.method(existing).qualified_name(),
                    candidate: method.qualified_name(),
                });
            }
            matched.insert(match_rank, candidate);
        }
    }

    Ok(matched.first_key_value().map(|(_, &id)| id))
}

/// Resolve a method call against `defining_type`, walking the hierarchy.
///
/// Stops at the first level where a candidate ranks; a level whose
/// candidates all fail to rank is treated as no match at that level and
/// the walk continues. If the chain ends unresolved and `defining_type`
/// could be an alias for an inner class of the call's enclosing class,
/// resolution retries once against the qualified name.
pub fn resolve_call(
    graph: &ProgramGraph,
    defining_type: &str,
    call: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    let ExprKind::MethodCall(method_call) = &call.kind else {
        return Err(ResolverError::UnexpectedExpression(call.id));
    };
    let arity = real_arity(&method_call.arguments);

    let mut seen = FxHashSet::default();
    let mut current = Some(defining_type.to_string());
    while let Some(type_name) = current {
        if !seen.insert(type_name.to_ascii_lowercase()) {
            break; // malformed cyclic hierarchy; degrade to not-found
        }
        let methods = graph.find_methods(&MethodFilter::named(
            &type_name,
            &method_call.method_name,
            arity,
        ));
        if !methods.is_empty() {
            if let Some(invoked) = disambiguate(graph, &methods, &method_call.arguments, env)? {
                return Ok(Some(invoked));
            }
        }
        current = superclass_of(graph, &type_name).map(str::to_string);
    }

    // Matches an outer class calling an inner class through a bare alias.
    if let Some(full_type) = graph.more_specific_class_name(&call.defining_type, defining_type) {
        if !names_match(&full_type, defining_type) {
            return resolve_call(graph, &full_type, call, env);
        }
    }

    Ok(None)
}

/// Resolve a `new T(...)` expression to a constructor of `T`.
///
/// The type name may be a bare alias for an inner class of the enclosing
/// class; that reading wins when it exists. Zero-argument calls also match
/// the compiler-synthesized default constructor.
pub fn resolve_constructor(
    graph: &ProgramGraph,
    new_object: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    let ExprKind::NewObject(new_expr) = &new_object.kind else {
        return Err(ResolverError::UnexpectedExpression(new_object.id));
    };

    let class_name = graph
        .more_specific_class_name(&new_object.defining_type, &new_expr.type_name)
        .or_else(|| {
            graph
                .find_type(&new_expr.type_name)
                .map(|id| graph.type_decl(id).name.clone())
        });
    let Some(class_name) = class_name else {
        return Ok(None);
    };

    let methods = graph.find_methods(&MethodFilter {
        defining_type: Some(&class_name),
        name: Some(CONSTRUCTOR_CANONICAL_NAME),
        arity: Some(real_arity(&new_expr.arguments)),
        is_constructor: Some(true),
        ..MethodFilter::default()
    });
    disambiguate(graph, &methods, &new_expr.arguments, env)
}

/// The zero-argument constructor of `class_name`, user-defined or the
/// compiler-provided default.
pub fn no_arg_constructor(graph: &ProgramGraph, class_name: &str) -> Option<MethodId> {
    graph
        .find_methods(&MethodFilter {
            defining_type: Some(class_name),
            name: Some(CONSTRUCTOR_CANONICAL_NAME),
            arity: Some(0),
            is_constructor: Some(true),
            ..MethodFilter::default()
        })
        .first()
        .copied()
}

/// Constructors explicitly declared in code, identified by their body.
pub fn explicit_constructors(graph: &ProgramGraph, class_name: &str) -> Vec<MethodId> {
    graph.find_methods(&MethodFilter {
        defining_type: Some(class_name),
        name: Some(CONSTRUCTOR_CANONICAL_NAME),
        is_constructor: Some(true),
        has_body: Some(true),
        ..MethodFilter::default()
    })
}

/// Resolve a `super(...)` call. The walk starts at the immediate
/// superclass of the calling type; a type without a superclass resolves
/// nothing.
pub fn resolve_super_call(
    graph: &ProgramGraph,
    call: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    let ExprKind::SuperCall(super_call) = &call.kind else {
        return Err(ResolverError::UnexpectedExpression(call.id));
    };
    let arity = real_arity(&super_call.arguments);

    let mut seen = FxHashSet::default();
    let mut current = superclass_of(graph, &call.defining_type).map(str::to_string);
    while let Some(type_name) = current {
        if !seen.insert(type_name.to_ascii_lowercase()) {
            break;
        }
        let methods = graph.find_methods(&MethodFilter {
            defining_type: Some(&type_name),
            name: Some(CONSTRUCTOR_CANONICAL_NAME),
            arity: Some(arity),
            is_constructor: Some(true),
            ..MethodFilter::default()
        });
        if !methods.is_empty() {
            if let Some(invoked) = disambiguate(graph, &methods, &super_call.arguments, env)? {
                return Ok(Some(invoked));
            }
        }
        current = superclass_of(graph, &type_name).map(str::to_string);
    }

    Ok(None)
}

/// Resolve a `this(...)` call. Constructors are not inherited, so only the
/// calling type itself is searched.
pub fn resolve_this_call(
    graph: &ProgramGraph,
    call: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    let ExprKind::ThisCall(this_call) = &call.kind else {
        return Err(ResolverError::UnexpectedExpression(call.id));
    };

    let methods = graph.find_methods(&MethodFilter {
        defining_type: Some(&call.defining_type),
        name: Some(CONSTRUCTOR_CANONICAL_NAME),
        arity: Some(real_arity(&this_call.arguments)),
        is_constructor: Some(true),
        ..MethodFilter::default()
    });
    disambiguate(graph, &methods, &this_call.arguments, env)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Find the method backing a property accessor.
///
/// Only body-bearing methods qualify; `get; set;` stubs are compiler
/// syntax, not invocable code. At most one accessor per level can exist in
/// valid source, so two is fatal.
pub fn resolve_property_accessor(
    graph: &ProgramGraph,
    defining_type: &str,
    property: &str,
    kind: AccessorKind,
) -> ResolverResult<Option<MethodId>> {
    let method_name = accessor_method_name(property);
    let arity = match kind {
        AccessorKind::Getter => 0,
        AccessorKind::Setter => 1,
    };

    let mut seen = FxHashSet::default();
    let mut current = Some(defining_type.to_string());
    while let Some(type_name) = current {
        if !seen.insert(type_name.to_ascii_lowercase()) {
            break;
        }
        let methods = graph.find_methods(&MethodFilter {
            defining_type: Some(&type_name),
            name: Some(&method_name),
            arity: Some(arity),
            has_body: Some(true),
            ..MethodFilter::default()
        });
        match methods.len() {
            0 => current = superclass_of(graph, &type_name).map(str::to_string),
            1 => return Ok(Some(methods[0])),
            _ => {
                return Err(ResolverError::DuplicateAccessor {
                    defining_type: type_name,
                    property: property.to_string(),
                });
            }
        }
    }

    Ok(None)
}

/// Entry state for analysis that starts from within a method without a
/// known call site: every parameter binds to an indeterminate value of its
/// declared type.
pub fn indeterminate_invocation_scope(
    graph: &ProgramGraph,
    method: MethodId,
) -> MethodInvocationScope {
    let mut scope = MethodInvocationScope::new();
    for parameter in &graph.method(method).params {
        let value = ApproxValue::Indeterminate {
            declared_type: Some(parameter.type_name.clone()),
        };
        scope.set(parameter.clone(), value);
    }
    scope
}
