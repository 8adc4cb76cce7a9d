//! Query-layer behavior: filtering, case-insensitivity, default
//! constructor synthesis and inner-class name resolution.

use apx_graph::{
    Argument, CONSTRUCTOR_CANONICAL_NAME, ExprKind, GraphBuilder, MethodCallExpr,
    MethodDeclaration, MethodFilter, Parameter, TypeDeclaration, real_arity, stdlib,
};

fn class(name: &str, superclass: Option<&str>) -> TypeDeclaration {
    TypeDeclaration {
        name: name.to_string(),
        superclass: superclass.map(str::to_string),
        file_name: format!("{}.cls", name.split('.').next().unwrap_or(name)),
    }
}

fn method(defining_type: &str, name: &str, param_types: &[&str]) -> MethodDeclaration {
    MethodDeclaration {
        defining_type: defining_type.to_string(),
        name: name.to_string(),
        file_name: format!("{}.cls", defining_type.split('.').next().unwrap_or(defining_type)),
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

#[test]
fn find_methods_filters_by_name_and_arity() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Foo", None));
    let wanted = builder.add_method(method("Foo", "doIt", &["String"]));
    builder.add_method(method("Foo", "doIt", &["String", "Integer"]));
    builder.add_method(method("Foo", "other", &["String"]));
    let graph = builder.build();

    let found = graph.find_methods(&MethodFilter::named("Foo", "doIt", 1));
    assert_eq!(found, vec![wanted]);
}

#[test]
fn name_and_type_lookups_are_case_insensitive() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("MyClass", None));
    let id = builder.add_method(method("MyClass", "DoWork", &[]));
    let graph = builder.build();

    assert!(graph.find_type("myclass").is_some());
    assert!(graph.find_type("MYCLASS").is_some());
    assert_eq!(
        graph.find_methods(&MethodFilter::named("MYCLASS", "dowork", 0)),
        vec![id]
    );
}

#[test]
fn classes_without_constructors_get_a_bodiless_default() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Plain", None));
    let graph = builder.build();

    let constructors = graph.find_methods(&MethodFilter {
        defining_type: Some("Plain"),
        name: Some(CONSTRUCTOR_CANONICAL_NAME),
        is_constructor: Some(true),
        ..MethodFilter::default()
    });
    assert_eq!(constructors.len(), 1);
    let default_constructor = graph.method(constructors[0]);
    assert_eq!(default_constructor.arity(), 0);
    assert!(!default_constructor.has_body);
}

#[test]
fn declared_constructors_suppress_the_default() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Configured", None));
    let mut ctor = method("Configured", CONSTRUCTOR_CANONICAL_NAME, &["String", "Integer"]);
    ctor.is_constructor = true;
    builder.add_method(ctor);
    let graph = builder.build();

    let constructors = graph.find_methods(&MethodFilter {
        defining_type: Some("Configured"),
        name: Some(CONSTRUCTOR_CANONICAL_NAME),
        is_constructor: Some(true),
        ..MethodFilter::default()
    });
    assert_eq!(constructors.len(), 1);
    assert_eq!(graph.method(constructors[0]).arity(), 2);
}

#[test]
fn has_body_filter_separates_stubs_from_real_methods() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Props", None));
    let mut stub = method("Props", "__sfdc_name", &[]);
    stub.has_body = false;
    builder.add_method(stub);
    let real = builder.add_method(method("Props", "__sfdc_value", &[]));
    let graph = builder.build();

    let with_body = graph.find_methods(&MethodFilter {
        defining_type: Some("Props"),
        has_body: Some(true),
        ..MethodFilter::default()
    });
    assert_eq!(with_body, vec![real]);
}

#[test]
fn more_specific_class_name_resolves_inner_aliases() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Outer", None));
    builder.add_type(class("Outer.Inner", None));
    builder.add_type(class("Outer.Other", None));
    let graph = builder.build();

    // Bare alias referenced from the outer class.
    assert_eq!(
        graph.more_specific_class_name("Outer", "Inner").as_deref(),
        Some("Outer.Inner")
    );
    // And from a sibling inner class.
    assert_eq!(
        graph.more_specific_class_name("Outer.Other", "inner").as_deref(),
        Some("Outer.Inner")
    );
    assert_eq!(graph.more_specific_class_name("Outer", "Missing"), None);
}

#[test]
fn real_arity_excludes_placeholder_slots() {
    let mut builder = GraphBuilder::new();
    builder.add_type(class("Foo", None));
    let arg = builder.add_expr(
        "Foo",
        ExprKind::Literal {
            type_name: "String".to_string(),
        },
    );
    let graph = builder.build();
    let _ = graph;

    let arguments = [Argument::Placeholder, Argument::Expr(arg), Argument::Placeholder];
    assert_eq!(real_arity(&arguments), 1);
}

#[test]
fn full_method_name_joins_the_chain() {
    let call = MethodCallExpr {
        chained_names: vec!["MySingleton".to_string()],
        method_name: "getInstance".to_string(),
        arguments: Vec::new(),
        preceding_call: None,
        array_invocation: None,
    };
    assert_eq!(call.full_method_name(), "MySingleton.getInstance");
    assert_eq!(call.symbolic_name(), Some("MySingleton"));

    let bare = MethodCallExpr {
        chained_names: Vec::new(),
        method_name: "helper".to_string(),
        arguments: Vec::new(),
        preceding_call: None,
        array_invocation: None,
    };
    assert_eq!(bare.full_method_name(), "helper");
    assert_eq!(bare.symbolic_name(), None);
}

#[test]
fn stdlib_aliases_normalize_to_canonical_names() {
    assert_eq!(stdlib::canonical_name("Schema"), "System.Schema");
    assert_eq!(stdlib::canonical_name("system.schema"), "System.Schema");
    assert_eq!(stdlib::canonical_name("MyClass"), "MyClass");
    assert!(stdlib::is_system_schema("schema"));
    assert!(!stdlib::is_system_schema("Database"));
}
