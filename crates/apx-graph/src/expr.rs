//! Call-shaped expression nodes.
//!
//! `ExprKind` is a closed tagged union over every expression shape the
//! resolver can be handed; the dispatcher matches it exhaustively, so an
//! unhandled shape is a compile error here rather than a runtime fallback.
//! Expressions belong to an enclosing method body and are immutable once
//! the graph is built.

use crate::decl::ExprId;

/// Load/store tag on a variable reference.
///
/// Untagged references (a bare property name with no qualifier) carry no
/// tag in the source AST; store-ness is inferred from whether the reference
/// is the left-hand side of an assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefTag {
    Load,
    Store,
    Untagged { assignment_lhs: bool },
}

impl RefTag {
    pub fn is_store(self) -> bool {
        matches!(self, RefTag::Store | RefTag::Untagged { assignment_lhs: true })
    }
}

/// One argument slot of a call.
///
/// `Placeholder` models the empty-reference child slots the parser emits
/// for receiver positions; they are excluded when counting "real" arity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    Expr(ExprId),
    Placeholder,
}

/// Number of real (non-placeholder) arguments.
pub fn real_arity(arguments: &[Argument]) -> usize {
    arguments
        .iter()
        .filter(|a| matches!(a, Argument::Expr(_)))
        .count()
}

/// A method call, possibly part of a chain like `a.b().c()`.
#[derive(Clone, Debug)]
pub struct MethodCallExpr {
    /// Qualifier names preceding the method name, e.g. `["MySingleton"]`
    /// for `MySingleton.getInstance()`. Empty for a bare call.
    pub chained_names: Vec<String>,
    pub method_name: String,
    pub arguments: Vec<Argument>,
    /// The call this one is chained off, if any. `a.b().c()` gives the
    /// `c()` node a `preceding_call` of the `b()` node.
    pub preceding_call: Option<ExprId>,
    /// The array-load expression this call is invoked on, for calls like
    /// `myList[0].toString()`.
    pub array_invocation: Option<ExprId>,
}

impl MethodCallExpr {
    /// The full textual call name: chained names plus the method name,
    /// joined with `.`. Equals `method_name` for an unqualified call.
    pub fn full_method_name(&self) -> String {
        if self.chained_names.is_empty() {
            self.method_name.clone()
        } else {
            let mut full = self.chained_names.join(".");
            full.push('.');
            full.push_str(&self.method_name);
            full
        }
    }

    /// Whether this call is the first in its chain. A chained call whose
    /// upstream could not be resolved never resolves on its own.
    pub fn is_first_in_chain(&self) -> bool {
        self.preceding_call.is_none()
    }

    /// Symbolic name of the receiver variable, when the call is qualified
    /// by one (`c` in `c.myMethod()`).
    pub fn symbolic_name(&self) -> Option<&str> {
        self.chained_names.first().map(String::as_str)
    }
}

/// `new T(...)`.
#[derive(Clone, Debug)]
pub struct NewObjectExpr {
    pub type_name: String,
    pub arguments: Vec<Argument>,
}

/// `super(...)` or `this(...)`.
#[derive(Clone, Debug)]
pub struct ConstructorCallExpr {
    pub arguments: Vec<Argument>,
}

/// A variable reference standing alone, possibly a synthetic-property
/// load or store.
#[derive(Clone, Debug)]
pub struct VariableRefExpr {
    pub name: String,
    pub tag: RefTag,
    /// True for `this.name` references, which resolve against the instance
    /// scope rather than the local scope.
    pub is_this_reference: bool,
}

/// Every call-shaped expression the resolver understands.
///
/// `Literal` only ever appears in argument position; handing one to the
/// dispatcher signals a graph-construction defect upstream.
#[derive(Clone, Debug)]
pub enum ExprKind {
    MethodCall(MethodCallExpr),
    NewObject(NewObjectExpr),
    SuperCall(ConstructorCallExpr),
    ThisCall(ConstructorCallExpr),
    VariableRef(VariableRefExpr),
    ArrayLoad { array: ExprId },
    CollectionLiteral { type_name: String, arguments: Vec<Argument> },
    QueryLiteral,
    Literal { type_name: String },
}

/// An expression node: its id, the type whose body encloses it, and its
/// shape-specific data.
#[derive(Clone, Debug)]
pub struct ExpressionNode {
    pub id: ExprId,
    pub defining_type: String,
    pub kind: ExprKind,
}

impl ExpressionNode {
    /// Argument slots, for the shapes that have them.
    pub fn arguments(&self) -> Option<&[Argument]> {
        match &self.kind {
            ExprKind::MethodCall(call) => Some(&call.arguments),
            ExprKind::NewObject(new_object) => Some(&new_object.arguments),
            ExprKind::SuperCall(call) | ExprKind::ThisCall(call) => Some(&call.arguments),
            ExprKind::CollectionLiteral { arguments, .. } => Some(arguments),
            _ => None,
        }
    }

    /// Whether this expression invokes something and so can have a
    /// returned value in the symbol environment.
    pub fn is_invocable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::MethodCall(_)
                | ExprKind::NewObject(_)
                | ExprKind::SuperCall(_)
                | ExprKind::ThisCall(_)
        )
    }
}
