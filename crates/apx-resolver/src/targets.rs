//! User-specified analysis-target matching.
//!
//! An analysis run can be scoped to named methods within a file. Zero or
//! multiple matches for a requested name are surfaced as warnings through
//! the diagnostics sink and the run proceeds with whatever was found.

use std::collections::BTreeMap;

use apx_graph::{MethodFilter, MethodId, ProgramGraph, names_match};
use apx_symbols::{DiagnosticsSink, EventKey};

use crate::error::{ResolverError, ResolverResult};

/// A user-specified analysis target: named methods within one file.
#[derive(Clone, Debug)]
pub struct AnalysisTarget {
    pub file_name: String,
    pub method_names: Vec<String>,
}

/// Method declarations matching the given method-level targets.
///
/// Targets passed here must name specific methods, not whole files. One
/// query runs per target and the results are recombined; this keeps each
/// query much simpler than matching every target at once, and the
/// performance cost is negligible.
pub fn targeted_methods(
    graph: &ProgramGraph,
    targets: &[AnalysisTarget],
    sink: &dyn DiagnosticsSink,
) -> ResolverResult<Vec<MethodId>> {
    if let Some(target) = targets.iter().find(|t| t.method_names.is_empty()) {
        return Err(ResolverError::MethodLevelTargetRequired {
            file_name: target.file_name.clone(),
        });
    }

    let mut targeted = Vec::new();
    for target in targets {
        let matched: Vec<MethodId> = graph
            .find_methods(&MethodFilter::default())
            .into_iter()
            .filter(|&id| {
                let method = graph.method(id);
                names_match(&method.file_name, &target.file_name)
                    && target
                        .method_names
                        .iter()
                        .any(|name| names_match(name, &method.name))
            })
            .collect();
        record_target_diagnostics(graph, target, &matched, sink);
        targeted.extend(matched);
    }
    Ok(targeted)
}

/// Report targets whose method names matched zero or multiple
/// declarations.
fn record_target_diagnostics(
    graph: &ProgramGraph,
    target: &AnalysisTarget,
    matched: &[MethodId],
    sink: &dyn DiagnosticsSink,
) {
    let mut count_by_name: BTreeMap<String, u32> = BTreeMap::new();
    for &id in matched {
        let name = graph.method(id).name.to_ascii_lowercase();
        *count_by_name.entry(name).or_insert(0) += 1;
    }

    for method_name in &target.method_names {
        let count = count_by_name
            .get(&method_name.to_ascii_lowercase())
            .copied()
            .unwrap_or(0);
        let context = format!("Loading {method_name} methods");
        if count == 0 {
            sink.record(
                &context,
                EventKey::WarningNoMethodTargetMatches,
                &[&target.file_name, method_name],
            );
        } else if count > 1 {
            sink.record(
                &context,
                EventKey::WarningMultipleMethodTargetMatches,
                &[&count.to_string(), &target.file_name, method_name],
            );
        }
    }
}
