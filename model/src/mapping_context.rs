use std::collections::{HashMap, HashSet};

use super::{
    builtins::DEFAULT_ROOT_TYPE_NAME,
    components::{Component, ConstructionComponentTable, HasSlots, Slots},
    error::ModelError,
    EntityDescriptor, Ref, TypeKind, TypeRef,
};

/// State shared by all mapping functions while a schema is read.
pub(super) struct MappingContext {
    components: ConstructionComponentTable,
    entities: HashMap<String, Ref<EntityDescriptor>>,
    primitives: HashSet<String>,
    interfaces: HashSet<String>,
    root_type: String,
}

impl MappingContext {
    pub(super) fn new() -> Self {
        Self {
            components: ConstructionComponentTable::new(),
            entities: HashMap::new(),
            primitives: HashSet::new(),
            interfaces: HashSet::new(),
            root_type: DEFAULT_ROOT_TYPE_NAME.to_string(),
        }
    }

    pub(super) fn into_components(self) -> ConstructionComponentTable {
        self.components
    }

    pub(super) fn create<R>(&mut self, value: R) -> Ref<R>
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        self.components.create(value)
    }

    pub(super) fn insert<R>(&mut self, ref_: Ref<R>, value: R) -> Ref<R>
    where
        R: Component,
        Slots: HasSlots<R>,
    {
        self.components.insert(ref_, value)
    }

    /// Reserves the slot of the entity called `name`, so that it can be referenced before it
    /// is mapped.
    pub(super) fn reserve_entity(
        &mut self,
        name: &str,
    ) -> Result<Ref<EntityDescriptor>, ModelError> {
        if self.entities.contains_key(name) {
            return Err(ModelError::DuplicateEntity(name.to_string()));
        }
        let ref_ = self.components.reserve();
        self.entities.insert(name.to_string(), ref_);
        Ok(ref_)
    }

    pub(super) fn lookup_entity(&self, name: &str) -> Option<Ref<EntityDescriptor>> {
        self.entities.get(name).copied()
    }

    pub(super) fn entity_lookup_table(&self) -> HashMap<String, Ref<EntityDescriptor>> {
        self.entities.clone()
    }

    pub(super) fn register_primitive(&mut self, name: &str) {
        self.primitives.insert(name.to_string());
    }

    pub(super) fn register_interface(&mut self, name: &str) {
        self.interfaces.insert(name.to_string());
    }

    pub(super) fn set_root_type(&mut self, name: &str) {
        self.root_type = name.to_string();
    }

    pub(super) fn root_type(&self) -> &str {
        &self.root_type
    }

    /// The root type as it appears in bounds of unbounded wildcards.
    pub(super) fn root_type_ref(&self) -> TypeRef {
        TypeRef::new(self.root_type.clone(), self.type_kind(&self.root_type))
    }

    pub(super) fn type_kind(&self, name: &str) -> TypeKind {
        if self.primitives.contains(name) {
            TypeKind::Primitive
        } else if self.interfaces.contains(name) {
            TypeKind::Interface
        } else {
            TypeKind::Class
        }
    }
}
