//! Declarations stored in the program graph.
//!
//! Types, methods and parameters are immutable once the graph is built.
//! Methods are identified by their `MethodId`; resolution never merges or
//! mutates declarations across hierarchy levels.

/// Index of a type declaration in the graph arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Index of a method declaration in the graph arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

/// Index of an expression node in the graph arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

/// Reserved method name that represents "this type's constructor".
pub const CONSTRUCTOR_CANONICAL_NAME: &str = "<init>";

/// Prefix for the synthetic methods that back property accessors.
/// A property `name` has getter/setter methods named `__sfdc_name`.
pub const PROPERTY_METHOD_PREFIX: &str = "__sfdc_";

/// Synthetic method name for the accessors of `property`.
pub fn accessor_method_name(property: &str) -> String {
    format!("{PROPERTY_METHOD_PREFIX}{property}")
}

/// Apex identifiers are case-insensitive; every name comparison in the
/// graph and resolver goes through this.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Case-folded key used by the graph indexes.
pub(crate) fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// A class declaration. Inner classes are stored under their qualified name
/// (`Outer.Inner`).
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub name: String,
    pub superclass: Option<String>,
    pub file_name: String,
}

/// A method parameter: a name plus a resolvable declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A method declaration.
///
/// `has_body` distinguishes user-written methods (a block statement child in
/// the source AST) from compiler-synthesized ones: default constructors and
/// bodiless `get; set;` accessor stubs have no body.
#[derive(Clone, Debug)]
pub struct MethodDeclaration {
    pub defining_type: String,
    pub name: String,
    pub file_name: String,
    pub params: Vec<Parameter>,
    pub is_static: bool,
    pub is_constructor: bool,
    pub has_body: bool,
}

impl MethodDeclaration {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `DefiningType.name`, the fully qualified call name.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.defining_type, self.name)
    }
}
