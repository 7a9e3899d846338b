//! Plan and diagnostic assertions

use mapgen_engine::{Diagnostic, DiagnosticKind, MappingPlan, MappingPlanNode};

/// Node assigned to `target_member` by the root plan
pub fn root_assignment<'p>(plan: &'p MappingPlan, target_member: &str) -> &'p MappingPlanNode {
    let root = plan.root_plan().expect("root references a type plan");
    &root
        .assignment(target_member)
        .unwrap_or_else(|| panic!("no assignment for '{}'", target_member))
        .node
}

pub fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind).collect()
}

pub fn assert_no_diagnostics(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:#?}",
        diagnostics
    );
}
