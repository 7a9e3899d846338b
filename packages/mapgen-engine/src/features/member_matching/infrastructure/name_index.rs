//! Normalized name → members index

use crate::config::PropertyNameMappingStrategy;
use crate::features::type_graph::domain::MemberDescriptor;
use rustc_hash::FxHashMap;

/// Source members grouped by normalized name, declaration order preserved
pub struct NameIndex<'g> {
    strategy: PropertyNameMappingStrategy,
    by_name: FxHashMap<String, Vec<&'g MemberDescriptor>>,
}

impl<'g> NameIndex<'g> {
    pub fn build(
        members: impl IntoIterator<Item = &'g MemberDescriptor>,
        strategy: PropertyNameMappingStrategy,
    ) -> Self {
        let mut by_name: FxHashMap<String, Vec<&'g MemberDescriptor>> = FxHashMap::default();
        for member in members {
            by_name
                .entry(strategy.normalize(&member.name))
                .or_default()
                .push(member);
        }
        Self { strategy, by_name }
    }

    pub fn candidates(&self, name: &str) -> &[&'g MemberDescriptor] {
        self.by_name
            .get(&self.strategy.normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
