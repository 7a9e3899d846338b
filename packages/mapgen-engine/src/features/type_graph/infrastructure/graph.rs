//! Immutable type graph with build-time validation
//!
//! The extractor hands over descriptors through `TypeGraphBuilder`; `build()`
//! checks that every reference resolves before the engine ever sees the graph:
//! 1. No duplicate type keys or member names
//! 2. Member types and collection element types exist
//! 3. Collection element chains end in a non-collection type
//!
//! Recursion through object members is fine (A → B → A); an infinite chain of
//! collections is not, because nothing would ever terminate the element plans.

use crate::features::type_graph::domain::{builtin_descriptors, TypeDescriptor, TypeKey};
use crate::features::type_graph::error::{GraphError, GraphResult};
use crate::features::type_graph::ports::TypeLookup;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: FxHashMap<TypeKey, TypeDescriptor>,
}

impl TypeGraph {
    pub fn get(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type keys in sorted order
    pub fn keys(&self) -> Vec<&TypeKey> {
        let mut keys: Vec<_> = self.types.keys().collect();
        keys.sort();
        keys
    }
}

impl TypeLookup for TypeGraph {
    fn lookup(&self, key: &TypeKey) -> Option<&TypeDescriptor> {
        self.types.get(key)
    }
}

#[derive(Debug, Default)]
pub struct TypeGraphBuilder {
    types: Vec<TypeDescriptor>,
}

impl TypeGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-seeded with the primitive kinds and `string`
    pub fn with_builtins() -> Self {
        Self {
            types: builtin_descriptors(),
        }
    }

    pub fn add(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn add_all(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.types.extend(descriptors);
        self
    }

    pub fn build(self) -> GraphResult<TypeGraph> {
        let mut types: FxHashMap<TypeKey, TypeDescriptor> = FxHashMap::default();

        for descriptor in self.types {
            Self::check_members(&descriptor)?;

            if types.contains_key(&descriptor.key) {
                return Err(GraphError::DuplicateType(descriptor.key.to_string()));
            }
            types.insert(descriptor.key.clone(), descriptor);
        }

        Self::check_references(&types)?;
        Self::check_collection_chains(&types)?;

        Ok(TypeGraph { types })
    }

    fn check_members(descriptor: &TypeDescriptor) -> GraphResult<()> {
        let mut seen = FxHashSet::default();
        for member in &descriptor.members {
            if !seen.insert(member.name.as_str()) {
                return Err(GraphError::DuplicateMember {
                    type_key: descriptor.key.to_string(),
                    member: member.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_references(types: &FxHashMap<TypeKey, TypeDescriptor>) -> GraphResult<()> {
        // Sorted so the reported error is stable
        let mut keys: Vec<_> = types.keys().collect();
        keys.sort();

        for key in keys {
            let descriptor = &types[key];
            for member in &descriptor.members {
                if !types.contains_key(&member.type_key) {
                    return Err(GraphError::UnknownMemberType {
                        type_key: key.to_string(),
                        member: member.name.clone(),
                        referenced: member.type_key.to_string(),
                    });
                }
            }
            if let Some(element) = descriptor.element_type() {
                if !types.contains_key(element) {
                    return Err(GraphError::UnknownElementType {
                        collection: key.to_string(),
                        element: element.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_collection_chains(types: &FxHashMap<TypeKey, TypeDescriptor>) -> GraphResult<()> {
        let mut graph: DiGraph<&TypeKey, ()> = DiGraph::new();
        let mut nodes: FxHashMap<&TypeKey, NodeIndex> = FxHashMap::default();

        let mut collections: Vec<_> = types.values().filter(|t| t.is_collection()).collect();
        collections.sort_by(|a, b| a.key.cmp(&b.key));

        for collection in collections {
            let Some(element) = collection.element_type() else {
                continue;
            };
            let from = *nodes
                .entry(&collection.key)
                .or_insert_with(|| graph.add_node(&collection.key));
            let to = *nodes.entry(element).or_insert_with(|| graph.add_node(element));
            graph.add_edge(from, to, ());
        }

        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| GraphError::CollectionCycle(graph[cycle.node_id()].to_string()))
    }
}
