use crate::features::type_graph::domain::{TypeDescriptor, TypeKey};

/// Read access to an already resolved type graph
pub trait TypeLookup: Send + Sync {
    fn lookup(&self, key: &TypeKey) -> Option<&TypeDescriptor>;

    fn contains(&self, key: &TypeKey) -> bool {
        self.lookup(key).is_some()
    }
}
