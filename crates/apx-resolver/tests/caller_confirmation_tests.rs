//! Inverse resolution: structural caller gathering and path-walk
//! confirmation.

use apx_graph::{
    Argument, ExprId, ExprKind, GraphBuilder, MethodCallExpr, MethodDeclaration, MethodId,
    Parameter, ProgramGraph, TypeDeclaration,
};
use apx_resolver::{find_confirmed_callers, potential_callers};
use apx_symbols::{
    ApproxValue, ExecutionPath, MapEnvironment, PathConfig, PathProvider, PathVisitor, PathWalker,
};

fn class(name: &str) -> TypeDeclaration {
    TypeDeclaration {
        name: name.to_string(),
        superclass: None,
        file_name: format!("{name}.cls"),
    }
}

fn method(defining_type: &str, name: &str, param_types: &[&str]) -> MethodDeclaration {
    MethodDeclaration {
        defining_type: defining_type.to_string(),
        name: name.to_string(),
        file_name: format!("{defining_type}.cls"),
        params: param_types
            .iter()
            .enumerate()
            .map(|(i, t)| Parameter::new(format!("p{i}"), *t))
            .collect(),
        is_static: false,
        is_constructor: false,
        has_body: true,
    }
}

fn static_method(defining_type: &str, name: &str, param_types: &[&str]) -> MethodDeclaration {
    let mut declared = method(defining_type, name, param_types);
    declared.is_static = true;
    declared
}

fn call_expr(
    builder: &mut GraphBuilder,
    enclosing: &str,
    chained: &[&str],
    name: &str,
    arguments: Vec<Argument>,
) -> ExprId {
    builder.add_expr(
        enclosing,
        ExprKind::MethodCall(MethodCallExpr {
            chained_names: chained.iter().map(|s| s.to_string()).collect(),
            method_name: name.to_string(),
            arguments,
            preceding_call: None,
            array_invocation: None,
        }),
    )
}

fn literal_arg(builder: &mut GraphBuilder, enclosing: &str, type_name: &str) -> Argument {
    Argument::Expr(builder.add_expr(
        enclosing,
        ExprKind::Literal {
            type_name: type_name.to_string(),
        },
    ))
}

/// One reverse path per call site, ending at the site itself.
struct SiteOnlyPaths;

impl PathProvider for SiteOnlyPaths {
    fn forward_paths(&self, _method: MethodId, _collapse_entry_state: bool) -> Vec<ExecutionPath> {
        Vec::new()
    }

    fn reverse_paths(&self, call_site: ExprId, _config: &PathConfig) -> Vec<ExecutionPath> {
        vec![ExecutionPath::new(vec![call_site])]
    }
}

/// A provider with no path for anything; models unreachable call sites.
struct NoPaths;

impl PathProvider for NoPaths {
    fn forward_paths(&self, _method: MethodId, _collapse_entry_state: bool) -> Vec<ExecutionPath> {
        Vec::new()
    }

    fn reverse_paths(&self, _call_site: ExprId, _config: &PathConfig) -> Vec<ExecutionPath> {
        Vec::new()
    }
}

/// Replays a path against one fixed environment.
struct FixedEnvWalker {
    env: MapEnvironment,
}

impl PathWalker for FixedEnvWalker {
    fn walk(&self, graph: &ProgramGraph, path: &ExecutionPath, visitor: &mut dyn PathVisitor) {
        for &node in &path.nodes {
            if !visitor.visit(graph.expr(node), &self.env) {
                break;
            }
        }
    }
}

#[test]
fn confirmation_prunes_receivers_of_the_wrong_type() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("T"));
    builder.add_type(class("U"));
    let target = builder.add_method(method("T", "m", &["String"]));
    builder.add_method(method("U", "m", &["String"]));
    let arg_x = literal_arg(&mut builder, "Caller", "String");
    let on_u = call_expr(&mut builder, "Caller", &["x"], "m", vec![arg_x]);
    let arg_y = literal_arg(&mut builder, "Caller", "String");
    let on_t = call_expr(&mut builder, "Caller", &["y"], "m", vec![arg_y]);
    let graph = builder.build();

    // Structurally both sites could invoke T.m; the receiver type is not
    // knowable without walking.
    let mut potential = potential_callers(&graph, target);
    potential.sort();
    assert_eq!(potential, vec![on_u, on_t]);

    let mut env = MapEnvironment::new();
    env.bind(
        "x",
        ApproxValue::ClassInstance {
            type_name: "U".to_string(),
        },
    );
    env.bind(
        "y",
        ApproxValue::ClassInstance {
            type_name: "T".to_string(),
        },
    );
    let walker = FixedEnvWalker { env };

    let confirmed = find_confirmed_callers(&graph, target, &SiteOnlyPaths, &walker);
    assert_eq!(confirmed, vec![on_t]);
}

#[test]
fn static_targets_gather_qualified_and_same_class_bare_calls() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Util"));
    builder.add_type(class("Elsewhere"));
    let target = builder.add_method(static_method("Util", "run", &[]));
    let qualified = call_expr(&mut builder, "Elsewhere", &["Util"], "run", Vec::new());
    let bare_same_class = call_expr(&mut builder, "Util", &[], "run", Vec::new());
    // A bare call in an unrelated class is not a candidate for a static
    // target.
    call_expr(&mut builder, "Elsewhere", &[], "run", Vec::new());
    let graph = builder.build();

    let mut potential = potential_callers(&graph, target);
    potential.sort();
    assert_eq!(potential, vec![qualified, bare_same_class]);
}

#[test]
fn gathering_counts_real_arguments_only() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("T"));
    let target = builder.add_method(method("T", "m", &["String"]));
    let arg = literal_arg(&mut builder, "Caller", "String");
    let padded = call_expr(
        &mut builder,
        "Caller",
        &["x"],
        "m",
        vec![Argument::Placeholder, arg],
    );
    let a = literal_arg(&mut builder, "Caller", "String");
    let b = literal_arg(&mut builder, "Caller", "String");
    call_expr(&mut builder, "Caller", &["x"], "m", vec![a, b]);
    let graph = builder.build();

    assert_eq!(potential_callers(&graph, target), vec![padded]);
}

#[test]
fn unrankable_arguments_leave_a_candidate_unconfirmed() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("T"));
    let target = builder.add_method(method("T", "m", &["Integer"]));
    let arg = literal_arg(&mut builder, "Caller", "String");
    let site = call_expr(&mut builder, "Caller", &["x"], "m", vec![arg]);
    let graph = builder.build();

    assert_eq!(potential_callers(&graph, target), vec![site]);

    let mut env = MapEnvironment::new();
    env.bind(
        "x",
        ApproxValue::ClassInstance {
            type_name: "T".to_string(),
        },
    );
    let walker = FixedEnvWalker { env };

    assert!(find_confirmed_callers(&graph, target, &SiteOnlyPaths, &walker).is_empty());
}

#[test]
fn sites_without_a_reverse_path_are_never_callers() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("T"));
    let target = builder.add_method(method("T", "m", &[]));
    let site = call_expr(&mut builder, "Caller", &["x"], "m", Vec::new());
    let graph = builder.build();

    assert_eq!(potential_callers(&graph, target), vec![site]);

    let walker = FixedEnvWalker {
        env: MapEnvironment::new(),
    };
    assert!(find_confirmed_callers(&graph, target, &NoPaths, &walker).is_empty());
}

#[test]
fn an_unbound_receiver_is_not_confirmed() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("T"));
    let target = builder.add_method(method("T", "m", &[]));
    call_expr(&mut builder, "Caller", &["ghost"], "m", Vec::new());
    let graph = builder.build();

    let walker = FixedEnvWalker {
        env: MapEnvironment::new(),
    };
    assert!(find_confirmed_callers(&graph, target, &SiteOnlyPaths, &walker).is_empty());
}
