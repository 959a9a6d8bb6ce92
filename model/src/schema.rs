use std::collections::HashMap;

use roxmltree::Node;

use super::{
    builtins::register_builtins,
    components::SchemaComponentTable,
    error::ModelError,
    mapping_context::MappingContext,
    values::{attribute, required_attribute, validate_path},
    EntityDescriptor, Ref,
};

/// The set of entities a traverser is generated for.
#[derive(Clone, Debug)]
pub struct Schema {
    /// All entities, abstract ones included, in declaration order.
    pub entities: Vec<Ref<EntityDescriptor>>,
    /// Name of the universal root type.
    pub root_type: String,

    entity_names: HashMap<String, Ref<EntityDescriptor>>,
}

impl Schema {
    pub const TAG_NAME: &'static str = "model";
    const INTERFACE_TAG_NAME: &'static str = "interface";
    const PRIMITIVE_TAG_NAME: &'static str = "primitive";

    /// The entity called `name`, if the schema declares one.
    pub fn lookup_entity(&self, name: &str) -> Option<Ref<EntityDescriptor>> {
        self.entity_names.get(name).copied()
    }

    /// The entities that can be instantiated, in declaration order.
    pub fn concrete_entities<'a>(
        &'a self,
        table: &'a SchemaComponentTable,
    ) -> impl Iterator<Item = Ref<EntityDescriptor>> + 'a {
        self.entities
            .iter()
            .copied()
            .filter(move |entity| !entity.get(table).is_abstract)
    }

    pub(super) fn map_from_xml(
        context: &mut MappingContext,
        model: Node,
    ) -> Result<Self, ModelError> {
        if model.tag_name().name() != Self::TAG_NAME {
            return Err(ModelError::NotAModel(model.tag_name().name().to_string()));
        }

        register_builtins(context);
        if let Some(root) = attribute::<&str>(model, "root")? {
            context.set_root_type(root);
        }

        // Declarations first, so that field types and forward `extends` references resolve
        // regardless of document order.
        let mut reserved = Vec::new();
        for child in model.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                Self::INTERFACE_TAG_NAME => {
                    let name: &str = required_attribute(child, "name")?;
                    context.register_interface(name);
                }
                Self::PRIMITIVE_TAG_NAME => {
                    let name: &str = required_attribute(child, "name")?;
                    context.register_primitive(name);
                }
                EntityDescriptor::TAG_NAME => {
                    let name: &str = required_attribute(child, "name")?;
                    validate_path(name)?;
                    reserved.push((context.reserve_entity(name)?, child));
                }
                other => {
                    return Err(ModelError::UnexpectedElement {
                        parent: Self::TAG_NAME.into(),
                        found: other.into(),
                    })
                }
            }
        }

        let entities = reserved
            .into_iter()
            .map(|(self_ref, node)| EntityDescriptor::map_from_xml(context, self_ref, node))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entities,
            root_type: context.root_type().to_string(),
            entity_names: context.entity_lookup_table(),
        })
    }

    /// Rejects entities whose parent chain loops back onto itself.
    pub(super) fn check_acyclic(&self, table: &SchemaComponentTable) -> Result<(), ModelError> {
        for entity_ref in self.entities.iter().copied() {
            let ancestors = std::iter::successors(Some(entity_ref), |e| e.get(table).parent);
            if ancestors.take(self.entities.len() + 1).count() > self.entities.len() {
                return Err(ModelError::InheritanceCycle(
                    entity_ref.get(table).name.clone(),
                ));
            }
        }
        Ok(())
    }
}
