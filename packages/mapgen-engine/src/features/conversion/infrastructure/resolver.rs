//! Conversion Resolver
//!
//! Chooses the conversion strategy for one (source type, target type) pair.
//! Decision order:
//!
//! 1. identical types, shallow copy → direct assignment
//! 2. identical types, deep copy → deep clone for reference-like types,
//!    direct assignment for immutable ones
//! 3. enum → enum → enum mapping
//! 4. collection → collection → element-wise mapping
//! 5. object → object → nested object mapping
//! 6. anything → string → string conversion
//! 7. string → primitive/enum → parse; primitive → primitive → numeric
//!    conversion
//!
//! Anything else has no conversion and the member stays unmapped.

use crate::config::{
    ConfigResult, CopyBehavior, FormatProviderRegistry, MappingConfiguration, StringFormatOverride,
};
use crate::features::conversion::ports::NestedPlanner;
use crate::features::mapping_plan::domain::MappingPlanNode;
use crate::features::type_graph::domain::TypeDescriptor;
use std::sync::Arc;

/// Settings that apply to one conversion site
pub struct ConversionContext<'a> {
    pub copy: CopyBehavior,
    pub string_format: Option<&'a StringFormatOverride>,
    /// Configuration nested plans are requested with
    pub nested_config: &'a Arc<MappingConfiguration>,
    pub registry: &'a FormatProviderRegistry,
}

impl ConversionContext<'_> {
    /// Explicit provider, else the registry default, else ambient
    fn provider(&self) -> Option<String> {
        self.string_format
            .and_then(|f| f.provider.clone())
            .or_else(|| self.registry.default_name().map(String::from))
    }

    fn format(&self) -> Option<String> {
        self.string_format.and_then(|f| f.format.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionResolver;

impl ConversionResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        ctx: &ConversionContext<'_>,
        planner: &mut dyn NestedPlanner,
    ) -> ConfigResult<Option<MappingPlanNode>> {
        let nested = ctx.nested_config;

        if source.key == target.key {
            if ctx.copy == CopyBehavior::Shallow || !target.is_reference_like() {
                return Ok(Some(MappingPlanNode::DirectAssignment));
            }
            let child = match target.element_type() {
                Some(element) => planner.plan_for(element, element, nested)?,
                None => planner.plan_for(&source.key, &target.key, nested)?,
            };
            return Ok(child.map(|child| MappingPlanNode::DeepClone { child }));
        }

        if source.is_enum() && target.is_enum() {
            let child = planner.plan_for(&source.key, &target.key, nested)?;
            return Ok(child.map(|child| MappingPlanNode::Enum { child }));
        }

        if let Some(target_element) = target.element_type() {
            let Some(source_element) = source.element_type() else {
                return Ok(None);
            };
            let element = planner.plan_for(source_element, target_element, nested)?;
            return Ok(element.map(|element| MappingPlanNode::Collection { element }));
        }

        if source.is_object() && target.is_object() {
            let child = planner.plan_for(&source.key, &target.key, nested)?;
            return Ok(child.map(|child| MappingPlanNode::NestedObject { child }));
        }

        if target.is_string() && !source.is_string() {
            return Ok(Some(MappingPlanNode::StringConversion {
                format: ctx.format(),
                provider: ctx.provider(),
            }));
        }

        if source.is_string() && (target.primitive_kind().is_some() || target.is_enum()) {
            return Ok(Some(MappingPlanNode::Parse {
                target: target.key.clone(),
                provider: ctx.provider(),
            }));
        }

        if let (Some(from), Some(to)) = (source.primitive_kind(), target.primitive_kind()) {
            return Ok(from
                .conversion_to(to)
                .map(|conversion| MappingPlanNode::PrimitiveConversion { from, to, conversion }));
        }

        Ok(None)
    }
}
