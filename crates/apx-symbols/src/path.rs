//! Execution paths and the path-enumeration seam.
//!
//! Path construction and expansion live outside this core; the resolver
//! asks a `PathProvider` for paths and a `PathWalker` to replay one with a
//! visitor. A reverse path ends at a given expression and is walked from
//! the program entry forward to it, recovering the calling context.

use apx_graph::{ExprId, ExpressionNode, MethodId, ProgramGraph};

use crate::scope::SymbolEnvironment;

/// One execution path through the program, as an ordered node sequence.
#[derive(Clone, Debug, Default)]
pub struct ExecutionPath {
    pub nodes: Vec<ExprId>,
}

impl ExecutionPath {
    pub fn new(nodes: Vec<ExprId>) -> Self {
        Self { nodes }
    }
}

/// Expansion options for path enumeration.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathConfig {
    pub collapse_entry_state: bool,
}

/// Produces execution paths; implemented by the path-expansion engine.
pub trait PathProvider {
    /// Forward paths through `method`'s body.
    fn forward_paths(&self, method: MethodId, collapse_entry_state: bool) -> Vec<ExecutionPath>;

    /// Paths ending at `call_site`. Non-empty for any reachable call site.
    fn reverse_paths(&self, call_site: ExprId, config: &PathConfig) -> Vec<ExecutionPath>;
}

/// Per-node callback during a path walk. Returning `false` stops the walk.
pub trait PathVisitor {
    fn visit(&mut self, node: &ExpressionNode, env: &dyn SymbolEnvironment) -> bool;
}

/// Replays a path node by node, maintaining the symbol environment the
/// visitor observes at each step.
pub trait PathWalker {
    fn walk(&self, graph: &ProgramGraph, path: &ExecutionPath, visitor: &mut dyn PathVisitor);
}
