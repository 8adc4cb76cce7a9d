//! Expression-shape dispatch.
//!
//! `resolve_invoked_method` is the forward-analysis entry point: it looks
//! at an arbitrary call-shaped expression, recovers the receiver's
//! approximate value, and hands off to the right resolver. The match over
//! `ExprKind` is exhaustive, so an unhandled call shape fails to compile
//! here instead of surfacing as a runtime fatal.
//!
//! Many expressions legitimately resolve to nothing (platform built-ins,
//! literals of collection/query shape); that is a normal outcome, not an
//! error, and `resolve_call_paths` returns an empty path sequence for it.

use apx_graph::{
    ExprKind, ExpressionNode, MethodCallExpr, MethodId, ProgramGraph, VariableRefExpr,
    names_match, stdlib,
};
use apx_symbols::{ApproxValue, ClassScope, ExecutionPath, PathProvider, SymbolEnvironment};

use crate::error::{ResolverError, ResolverResult};
use crate::invocation::{
    AccessorKind, resolve_call, resolve_constructor, resolve_property_accessor,
    resolve_super_call, resolve_this_call,
};

/// Recover the approximate runtime value an expression evaluates on.
///
/// Lookup order: the standard-library `Schema` receiver special case, the
/// receiver's symbolic name in the instance scope (for `this.` references)
/// or the local scope, the returned value of an already-walked chained
/// call, and finally the collection behind an array invocation like
/// `myList[0].toString()`.
pub fn approximate_value(
    graph: &ProgramGraph,
    expr: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> Option<ApproxValue> {
    if let ExprKind::ArrayLoad { array } = &expr.kind {
        return approximate_value(graph, graph.expr(*array), env);
    }

    let symbolic_name = match &expr.kind {
        ExprKind::MethodCall(call) => call.symbolic_name(),
        ExprKind::VariableRef(var) => Some(var.name.as_str()),
        _ => None,
    };

    let mut value = None;
    if let Some(name) = symbolic_name {
        if stdlib::is_system_schema(name) {
            value = Some(ApproxValue::Standard {
                type_name: stdlib::SYSTEM_SCHEMA.to_string(),
            });
        } else if matches!(&expr.kind, ExprKind::VariableRef(v) if v.is_this_reference) {
            value = env.instance_value_of(name);
        } else {
            value = env.value_of(name);
        }
    }

    if value.is_none() && expr.is_invocable() {
        // Chained method call such as MySingleton.getInstance().getName()
        value = env.returned_value(expr.id);
    }

    if value.is_none() {
        if let ExprKind::MethodCall(call) = &expr.kind {
            if let Some(array) = call.array_invocation {
                value = approximate_value(graph, graph.expr(array), env);
            }
        }
    }

    value
}

/// Determine which method declaration `expr` invokes, or `None` when the
/// expression has no resolvable method (not an error).
pub fn resolve_invoked_method(
    graph: &ProgramGraph,
    expr: &ExpressionNode,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    let value = approximate_value(graph, expr, env);

    match &expr.kind {
        ExprKind::VariableRef(var) => {
            resolve_variable_reference(graph, expr, var, value.as_ref(), env)
        }
        ExprKind::MethodCall(call) => {
            resolve_method_call(graph, expr, call, value.as_ref(), env)
        }
        ExprKind::NewObject(_) => resolve_constructor(graph, expr, env),
        ExprKind::SuperCall(_) => resolve_super_call(graph, expr, env),
        ExprKind::ThisCall(_) => resolve_this_call(graph, expr, env),
        // Handled by the analysis without a method path.
        ExprKind::ArrayLoad { .. }
        | ExprKind::CollectionLiteral { .. }
        | ExprKind::QueryLiteral => Ok(None),
        ExprKind::Literal { .. } => Err(ResolverError::UnexpectedExpression(expr.id)),
    }
}

/// A variable reference standing alone may be a synthetic-property access
/// with a method body behind it, e.g. `String aString { get { return 'x'; } }`.
fn resolve_variable_reference(
    graph: &ProgramGraph,
    expr: &ExpressionNode,
    var: &VariableRefExpr,
    value: Option<&ApproxValue>,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    // The property lives on the receiver instance when we know it, else on
    // the enclosing instance, else on the reference's own class statics.
    let scope = match value {
        Some(ApproxValue::ClassInstance { type_name }) => {
            Some(ClassScope::instance(type_name.clone()))
        }
        _ => env
            .instance_scope()
            .or_else(|| env.static_scope(&expr.defining_type)),
    };
    let Some(scope) = scope else {
        return Ok(None);
    };

    let kind = if var.tag.is_store() {
        AccessorKind::Setter
    } else {
        AccessorKind::Getter
    };
    resolve_property_accessor(graph, &scope.class_name, &var.name, kind)
}

fn resolve_method_call(
    graph: &ProgramGraph,
    expr: &ExpressionNode,
    call: &MethodCallExpr,
    value: Option<&ApproxValue>,
    env: &dyn SymbolEnvironment,
) -> ResolverResult<Option<MethodId>> {
    if let Some(value) = value {
        if let Some(type_name) = value.defining_type() {
            return match value {
                // Only resolve instance methods on values that are actually
                // instances; a static class scope is not a receiver.
                ApproxValue::ClassInstance { .. }
                | ApproxValue::Standard { .. }
                | ApproxValue::Loop { .. } => resolve_call(graph, type_name, expr, env),
                ApproxValue::Indeterminate { .. } => {
                    tracing::trace!(
                        expr = ?expr.id,
                        type_name,
                        "ignoring call on a type which isn't available in source"
                    );
                    Ok(None)
                }
            };
        }
    }

    // A chained call whose upstream could not be resolved cannot resolve
    // either.
    if !call.is_first_in_chain() {
        return Ok(None);
    }

    // Not tied to an instance: an implicit call within the current class,
    // or a static call qualified by a type name.
    let full_method_name = call.full_method_name();
    let target_type = if names_match(&full_method_name, &call.method_name) {
        expr.defining_type.clone()
    } else {
        call.chained_names.join(".")
    };

    // The qualifier could be an aliased reference to an inner class, so
    // check that first.
    if let Some(inner_type) = graph.more_specific_class_name(&expr.defining_type, &target_type) {
        if let Some(invoked) = resolve_call(graph, &inner_type, expr, env)? {
            return Ok(Some(invoked));
        }
    }

    // No inner class matched; check outer classes under the canonical name.
    resolve_call(graph, &stdlib::canonical_name(&target_type), expr, env)
}

/// Resolve `expr` and return the forward execution paths through the
/// invoked method. Expressions with no followable method body yield an
/// empty sequence.
pub fn resolve_call_paths(
    graph: &ProgramGraph,
    expr: &ExpressionNode,
    env: &dyn SymbolEnvironment,
    paths: &dyn PathProvider,
) -> ResolverResult<Vec<ExecutionPath>> {
    match resolve_invoked_method(graph, expr, env)? {
        Some(invoked) => {
            tracing::trace!(
                expr = ?expr.id,
                method = %graph.method(invoked).qualified_name(),
                "finding forward path"
            );
            Ok(paths.forward_paths(invoked, false))
        }
        None => Ok(Vec::new()),
    }
}
