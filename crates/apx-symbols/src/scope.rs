//! Class scopes and the symbol-environment seam.

use std::collections::BTreeMap;

use apx_graph::{ExprId, Parameter};
use rustc_hash::FxHashMap;

use crate::value::ApproxValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Instance,
    Static,
}

/// The scope of one class, either an instance's state or the class's
/// static state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassScope {
    pub class_name: String,
    pub kind: ScopeKind,
}

impl ClassScope {
    pub fn instance(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            kind: ScopeKind::Instance,
        }
    }

    pub fn statics(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            kind: ScopeKind::Static,
        }
    }
}

/// Read-only view of the approximate runtime state at one program point.
///
/// Implemented by the path-walking engine; the resolver only consumes it.
/// Lookups distinguish the local/static scope chain (`value_of`) from the
/// enclosing instance's fields (`instance_value_of`).
pub trait SymbolEnvironment {
    /// Value bound to `name` in the current scope chain.
    fn value_of(&self, name: &str) -> Option<ApproxValue>;

    /// Value of the enclosing instance's field `name` (`this.name`).
    fn instance_value_of(&self, name: &str) -> Option<ApproxValue>;

    /// Value returned by an already-walked invocable expression, for
    /// chained calls like `MySingleton.getInstance().getName()`.
    fn returned_value(&self, invocable: ExprId) -> Option<ApproxValue>;

    /// Closest enclosing class-instance scope, if the current code runs on
    /// an instance.
    fn instance_scope(&self) -> Option<ClassScope>;

    /// The static scope of `type_name`, if that class is known.
    fn static_scope(&self, type_name: &str) -> Option<ClassScope>;
}

/// Map-backed environment. The path-walking engine maintains one of these
/// per visited node; tests build them directly.
#[derive(Default)]
pub struct MapEnvironment {
    values: FxHashMap<String, ApproxValue>,
    instance_values: FxHashMap<String, ApproxValue>,
    returned: FxHashMap<ExprId, ApproxValue>,
    instance_scope: Option<ClassScope>,
    static_types: Vec<String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: ApproxValue) -> &mut Self {
        self.values.insert(name.into().to_ascii_lowercase(), value);
        self
    }

    pub fn bind_instance_field(&mut self, name: impl Into<String>, value: ApproxValue) -> &mut Self {
        self.instance_values
            .insert(name.into().to_ascii_lowercase(), value);
        self
    }

    pub fn bind_returned(&mut self, invocable: ExprId, value: ApproxValue) -> &mut Self {
        self.returned.insert(invocable, value);
        self
    }

    pub fn set_instance_scope(&mut self, scope: ClassScope) -> &mut Self {
        self.instance_scope = Some(scope);
        self
    }

    pub fn register_static_type(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.static_types.push(type_name.into());
        self
    }
}

impl SymbolEnvironment for MapEnvironment {
    fn value_of(&self, name: &str) -> Option<ApproxValue> {
        self.values.get(&name.to_ascii_lowercase()).cloned()
    }

    fn instance_value_of(&self, name: &str) -> Option<ApproxValue> {
        self.instance_values.get(&name.to_ascii_lowercase()).cloned()
    }

    fn returned_value(&self, invocable: ExprId) -> Option<ApproxValue> {
        self.returned.get(&invocable).cloned()
    }

    fn instance_scope(&self) -> Option<ClassScope> {
        self.instance_scope.clone()
    }

    fn static_scope(&self, type_name: &str) -> Option<ClassScope> {
        self.static_types
            .iter()
            .find(|t| t.eq_ignore_ascii_case(type_name))
            .map(|t| ClassScope::statics(t.clone()))
    }
}

/// The values a method was (or may have been) invoked with, keyed by
/// parameter name. Iteration order is deterministic.
#[derive(Default)]
pub struct MethodInvocationScope {
    values: BTreeMap<String, (Parameter, ApproxValue)>,
}

impl MethodInvocationScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, parameter: Parameter, value: ApproxValue) {
        self.values
            .insert(parameter.name.to_ascii_lowercase(), (parameter, value));
    }

    pub fn get(&self, name: &str) -> Option<&(Parameter, ApproxValue)> {
        self.values.get(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Parameter, ApproxValue)> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
