//! The indexed program graph and its query surface.
//!
//! All queries are read-only and deterministic for a fixed graph: results
//! come back in declaration order. Name and type matching is
//! case-insensitive throughout, because Apex identifiers are.

use rustc_hash::FxHashMap;

use crate::decl::{
    CONSTRUCTOR_CANONICAL_NAME, ExprId, MethodDeclaration, MethodId, TypeDeclaration, TypeId,
    fold, names_match,
};
use crate::expr::{ExprKind, ExpressionNode};

/// Structural predicate over method declarations. Unset fields match
/// everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodFilter<'a> {
    pub defining_type: Option<&'a str>,
    pub name: Option<&'a str>,
    pub arity: Option<usize>,
    pub is_static: Option<bool>,
    pub is_constructor: Option<bool>,
    pub has_body: Option<bool>,
}

impl<'a> MethodFilter<'a> {
    /// The common name+arity lookup within one type.
    pub fn named(defining_type: &'a str, name: &'a str, arity: usize) -> Self {
        Self {
            defining_type: Some(defining_type),
            name: Some(name),
            arity: Some(arity),
            ..Self::default()
        }
    }

    fn matches(&self, method: &MethodDeclaration) -> bool {
        if let Some(defining_type) = self.defining_type {
            if !names_match(defining_type, &method.defining_type) {
                return false;
            }
        }
        if let Some(name) = self.name {
            if !names_match(name, &method.name) {
                return false;
            }
        }
        if let Some(arity) = self.arity {
            if method.arity() != arity {
                return false;
            }
        }
        if let Some(is_static) = self.is_static {
            if method.is_static != is_static {
                return false;
            }
        }
        if let Some(is_constructor) = self.is_constructor {
            if method.is_constructor != is_constructor {
                return false;
            }
        }
        if let Some(has_body) = self.has_body {
            if method.has_body != has_body {
                return false;
            }
        }
        true
    }
}

/// Immutable, indexed store of declarations and expression nodes.
pub struct ProgramGraph {
    types: Vec<TypeDeclaration>,
    methods: Vec<MethodDeclaration>,
    exprs: Vec<ExpressionNode>,
    type_index: FxHashMap<String, TypeId>,
    methods_by_type: FxHashMap<String, Vec<MethodId>>,
}

impl ProgramGraph {
    pub fn type_decl(&self, id: TypeId) -> &TypeDeclaration {
        &self.types[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodDeclaration {
        &self.methods[id.0 as usize]
    }

    pub fn expr(&self, id: ExprId) -> &ExpressionNode {
        &self.exprs[id.0 as usize]
    }

    /// Case-insensitive type lookup.
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.type_index.get(&fold(name)).copied()
    }

    /// All methods matching `filter`, in declaration order.
    pub fn find_methods(&self, filter: &MethodFilter<'_>) -> Vec<MethodId> {
        match filter.defining_type {
            Some(defining_type) => self
                .methods_by_type
                .get(&fold(defining_type))
                .into_iter()
                .flatten()
                .copied()
                .filter(|&id| filter.matches(&self.methods[id.0 as usize]))
                .collect(),
            None => (0..self.methods.len() as u32)
                .map(MethodId)
                .filter(|&id| filter.matches(&self.methods[id.0 as usize]))
                .collect(),
        }
    }

    pub fn expressions(&self) -> impl Iterator<Item = &ExpressionNode> {
        self.exprs.iter()
    }

    /// All method-call expression nodes, the structural query surface used
    /// when gathering potential callers.
    pub fn method_call_sites(&self) -> impl Iterator<Item = &ExpressionNode> {
        self.exprs
            .iter()
            .filter(|e| matches!(e.kind, ExprKind::MethodCall(_)))
    }

    /// Inner-class resolution: a bare name referenced inside `Outer` (or
    /// inside one of `Outer`'s inner classes) may be an alias for
    /// `Outer.Inner`. Returns the qualified name when such a type exists
    /// and is genuinely more specific than `referenced`.
    pub fn more_specific_class_name(
        &self,
        expr_defining_type: &str,
        referenced: &str,
    ) -> Option<String> {
        let outer = expr_defining_type
            .split('.')
            .next()
            .filter(|outer| !outer.is_empty())?;
        let qualified = format!("{outer}.{referenced}");
        if names_match(&qualified, referenced) {
            return None;
        }
        self.find_type(&qualified)
            .map(|id| self.type_decl(id).name.clone())
    }
}

/// Construction API for the graph. Building is the only mutation the graph
/// ever sees; everything downstream gets `&ProgramGraph`.
pub struct GraphBuilder {
    types: Vec<TypeDeclaration>,
    methods: Vec<MethodDeclaration>,
    exprs: Vec<ExpressionNode>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            methods: Vec::new(),
            exprs: Vec::new(),
        }
    }

    pub fn add_type(&mut self, decl: TypeDeclaration) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(decl);
        id
    }

    pub fn add_method(&mut self, method: MethodDeclaration) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(method);
        id
    }

    pub fn add_expr(&mut self, defining_type: impl Into<String>, kind: ExprKind) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(ExpressionNode {
            id,
            defining_type: defining_type.into(),
            kind,
        });
        id
    }

    /// Finalize: synthesize compiler-default constructors and build the
    /// name indexes.
    pub fn build(mut self) -> ProgramGraph {
        // Every class with no declared constructor gets the compiler's
        // default zero-arg constructor. It has no body, which is how
        // explicit-constructor queries exclude it.
        for type_decl in &self.types {
            let has_constructor = self.methods.iter().any(|m| {
                m.is_constructor && names_match(&m.defining_type, &type_decl.name)
            });
            if !has_constructor {
                self.methods.push(MethodDeclaration {
                    defining_type: type_decl.name.clone(),
                    name: CONSTRUCTOR_CANONICAL_NAME.to_string(),
                    file_name: type_decl.file_name.clone(),
                    params: Vec::new(),
                    is_static: false,
                    is_constructor: true,
                    has_body: false,
                });
            }
        }

        let mut type_index = FxHashMap::default();
        for (i, type_decl) in self.types.iter().enumerate() {
            type_index.insert(fold(&type_decl.name), TypeId(i as u32));
        }
        let mut methods_by_type: FxHashMap<String, Vec<MethodId>> = FxHashMap::default();
        for (i, method) in self.methods.iter().enumerate() {
            methods_by_type
                .entry(fold(&method.defining_type))
                .or_default()
                .push(MethodId(i as u32));
        }

        ProgramGraph {
            types: self.types,
            methods: self.methods,
            exprs: self.exprs,
            type_index,
            methods_by_type,
        }
    }
}
