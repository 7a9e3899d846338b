//! Enum value tables
//!
//! Values pair by name (optionally ignoring case) after explicit value
//! overrides. Source values left without a target get a runtime fallback; in
//! strict mode every unmapped value on either side is also a diagnostic.

use crate::config::{ConfigError, ConfigResult, MappingConfiguration, OverrideSide};
use crate::features::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticsCollector};
use crate::features::mapping_plan::domain::{EnumFallback, EnumPlan, EnumValueMapping};
use crate::features::type_graph::domain::TypeDescriptor;
use rustc_hash::FxHashSet;

pub fn build_enum_plan(
    source: &TypeDescriptor,
    target: &TypeDescriptor,
    config: &MappingConfiguration,
) -> ConfigResult<EnumPlan> {
    let source_values = source.enum_values();
    let target_values = target.enum_values();
    let overrides = &config.member_overrides().enum_values;

    for (from, to) in overrides {
        if !source_values.iter().any(|v| &v.name == from) {
            return Err(ConfigError::unknown_member(
                OverrideSide::Source,
                from.as_str(),
                source.key.as_str(),
                source_values.iter().map(|v| v.name.as_str()),
            ));
        }
        if !target_values.iter().any(|v| &v.name == to) {
            return Err(ConfigError::unknown_member(
                OverrideSide::Target,
                to.as_str(),
                target.key.as_str(),
                target_values.iter().map(|v| v.name.as_str()),
            ));
        }
    }

    let ignore_case = config.enum_mapping_ignore_case();
    let mut plan = EnumPlan::default();

    for value in source_values {
        let matched = match overrides.get(&value.name) {
            Some(explicit) => Some(explicit.as_str()),
            None => target_values
                .iter()
                .find(|t| t.name == value.name)
                .or_else(|| {
                    target_values
                        .iter()
                        .find(|t| ignore_case && t.name.eq_ignore_ascii_case(&value.name))
                })
                .map(|t| t.name.as_str()),
        };

        match matched {
            Some(target_name) => plan.entries.push(EnumValueMapping {
                source: value.name.clone(),
                target: target_name.to_string(),
            }),
            None => plan.unmapped_source.push(value.name.clone()),
        }
    }

    let used: FxHashSet<&str> = plan.entries.iter().map(|e| e.target.as_str()).collect();
    plan.unmapped_target = target_values
        .iter()
        .filter(|t| !used.contains(t.name.as_str()))
        .map(|t| t.name.clone())
        .collect();

    if !plan.unmapped_source.is_empty() {
        plan.fallback = Some(if config.throw_on_mapping_null_mismatch() {
            EnumFallback::Throw
        } else {
            EnumFallback::TargetDefault
        });
    }

    Ok(plan)
}

/// Strict mode: one diagnostic per unmapped value on either side
pub fn report_unmapped_values(
    plan: &EnumPlan,
    source: &TypeDescriptor,
    target: &TypeDescriptor,
    config: &MappingConfiguration,
    collector: &DiagnosticsCollector,
) {
    if !config.strict_enum_mappings() {
        if !plan.unmapped_source.is_empty() {
            tracing::debug!(
                "{} -> {}: {} enum value(s) deferred to runtime fallback",
                source.key,
                target.key,
                plan.unmapped_source.len()
            );
        }
        return;
    }

    for value in &plan.unmapped_source {
        collector.report(
            config,
            Diagnostic::new(
                DiagnosticKind::UnmappedEnumValue,
                format!("Source enum value '{}' has no target value", value),
            )
            .with_types(&source.key, &target.key)
            .with_member(value.as_str()),
        );
    }
    for value in &plan.unmapped_target {
        collector.report(
            config,
            Diagnostic::new(
                DiagnosticKind::UnmappedEnumValue,
                format!("Target enum value '{}' is never produced", value),
            )
            .with_types(&source.key, &target.key)
            .with_member(value.as_str()),
        );
    }
}
