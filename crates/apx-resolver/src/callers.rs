//! Inverse resolution: which call sites invoke a given method.
//!
//! Two phases. Phase 1 gathers syntactically plausible call sites; for
//! instance methods the bare-name match deliberately over-approximates,
//! because the receiver's type isn't knowable structurally. Phase 2 prunes
//! the false positives: each candidate gets one reverse execution path,
//! walked with a visitor that checks receiver type and argument ranks at
//! the exact call-site node. One path per candidate suffices; at least one
//! is guaranteed to exist for any reachable call site.

use apx_graph::{ExprId, ExprKind, MethodId, ProgramGraph, names_match, real_arity};
use apx_symbols::{PathConfig, PathProvider, PathVisitor, PathWalker, SymbolEnvironment};

use crate::rank::{self, receiver_type_matches};

/// Call-site expressions that could potentially invoke `method`, matched
/// structurally by name and real-argument arity.
pub fn potential_callers(graph: &ProgramGraph, method: MethodId) -> Vec<ExprId> {
    let target = graph.method(method);
    let qualified_name = target.qualified_name();

    graph
        .method_call_sites()
        .filter(|site| {
            let ExprKind::MethodCall(call) = &site.kind else {
                return false;
            };
            let full_method_name = call.full_method_name();
            let name_matches = if target.is_static {
                // Explicitly qualified `Type.method(...)`, or an implicit
                // call from within the same class.
                names_match(&full_method_name, &qualified_name)
                    || (names_match(&site.defining_type, &target.defining_type)
                        && names_match(&full_method_name, &target.name))
            } else {
                // An implicit call from within the same class, or a call on
                // some receiver. The receiver-qualified match is not
                // guaranteed to be an invocation because of inheritance and
                // typing; phase 2 confirms it.
                names_match(&full_method_name, &target.name)
                    || names_match(&call.method_name, &target.name)
            };
            name_matches && real_arity(&call.arguments) == target.arity()
        })
        .map(|site| site.id)
        .collect()
}

/// Call sites confirmed to invoke `method` by walking one reverse path per
/// structural candidate.
pub fn find_confirmed_callers(
    graph: &ProgramGraph,
    method: MethodId,
    provider: &dyn PathProvider,
    walker: &dyn PathWalker,
) -> Vec<ExprId> {
    potential_callers(graph, method)
        .into_iter()
        .filter(|&call_site| confirms_call(graph, method, call_site, provider, walker))
        .collect()
}

fn confirms_call(
    graph: &ProgramGraph,
    method: MethodId,
    call_site: ExprId,
    provider: &dyn PathProvider,
    walker: &dyn PathWalker,
) -> bool {
    let config = PathConfig::default();
    let paths = provider.reverse_paths(call_site, &config);
    let Some(path) = paths.first() else {
        // The provider contract guarantees a path for any reachable call
        // site; an unreachable one cannot be a caller.
        tracing::warn!(?call_site, "no reverse path for call site");
        return false;
    };

    let mut visitor = CallConfirmationVisitor::new(graph, method, call_site);
    walker.walk(graph, path, &mut visitor);
    visitor.confirmed
}

/// No-op pass-through everywhere except the target call-site node, where
/// it checks the receiver's runtime type (instance methods only) and that
/// the argument types rank as a match.
struct CallConfirmationVisitor<'g> {
    graph: &'g ProgramGraph,
    method: MethodId,
    call_site: ExprId,
    /// Symbolic receiver name at the call site; `None` for static targets.
    receiver_name: Option<String>,
    confirmed: bool,
}

impl<'g> CallConfirmationVisitor<'g> {
    fn new(graph: &'g ProgramGraph, method: MethodId, call_site: ExprId) -> Self {
        let receiver_name = if graph.method(method).is_static {
            None
        } else {
            match &graph.expr(call_site).kind {
                ExprKind::MethodCall(call) => call.symbolic_name().map(str::to_string),
                _ => None,
            }
        };
        Self {
            graph,
            method,
            call_site,
            receiver_name,
            confirmed: false,
        }
    }
}

impl PathVisitor for CallConfirmationVisitor<'_> {
    fn visit(&mut self, node: &apx_graph::ExpressionNode, env: &dyn SymbolEnvironment) -> bool {
        if node.id != self.call_site {
            return true;
        }
        let ExprKind::MethodCall(call) = &node.kind else {
            return true;
        };
        let method = self.graph.method(self.method);

        if let Some(receiver_name) = &self.receiver_name {
            let receiver_matches = env
                .value_of(receiver_name)
                .map(|value| receiver_type_matches(self.graph, method, &value))
                .unwrap_or(false);
            if !receiver_matches {
                // An instance call on a receiver of the wrong type.
                return true;
            }
        }
        if rank::rank(self.graph, method, &call.arguments, env).is_none() {
            return true;
        }

        self.confirmed = true;
        true
    }
}
