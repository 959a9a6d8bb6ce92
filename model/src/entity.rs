use roxmltree::Node;
use tracing::debug;

use super::{
    components::Component,
    error::ModelError,
    mapping_context::MappingContext,
    values::{attribute, required_attribute, validate_identifier},
    FieldDescriptor, Ref,
};

/// One declared class of the schema.
#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    /// The type path of the class, e.g. `crate::billing::Invoice`.
    pub name: String,
    pub is_abstract: bool,
    pub parent: Option<Ref<EntityDescriptor>>,
    /// Fields declared directly on this entity, in declaration order.
    pub fields: Vec<Ref<FieldDescriptor>>,
    /// Names of the accessor methods the class provides.
    pub methods: Vec<String>,
}

impl Component for EntityDescriptor {
    const DISPLAY_NAME: &'static str = "entity";
}

impl EntityDescriptor {
    pub const TAG_NAME: &'static str = "entity";
    pub const METHOD_TAG_NAME: &'static str = "method";

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }

    /// Maps an `<entity>` element into the slot reserved as `self_ref`.
    pub(super) fn map_from_xml(
        context: &mut MappingContext,
        self_ref: Ref<Self>,
        entity: Node,
    ) -> Result<Ref<Self>, ModelError> {
        let name: String = required_attribute(entity, "name")?;
        let is_abstract = attribute(entity, "abstract")?.unwrap_or(false);

        let parent = attribute::<&str>(entity, "extends")?
            .map(|parent| {
                context
                    .lookup_entity(parent)
                    .ok_or_else(|| ModelError::UnknownParent {
                        entity: name.clone(),
                        parent: parent.to_string(),
                    })
            })
            .transpose()?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for child in entity.children().filter(|c| c.is_element()) {
            match child.tag_name().name() {
                FieldDescriptor::TAG_NAME => {
                    fields.push(FieldDescriptor::map_from_xml(
                        context, child, self_ref, &name,
                    )?);
                }
                Self::METHOD_TAG_NAME => {
                    let method: String = required_attribute(child, "name")?;
                    validate_identifier(&method)?;
                    methods.push(method);
                }
                other => {
                    return Err(ModelError::UnexpectedElement {
                        parent: Self::TAG_NAME.into(),
                        found: other.into(),
                    })
                }
            }
        }

        debug!(
            entity = %name,
            fields = fields.len(),
            methods = methods.len(),
            is_abstract,
            "mapped entity"
        );

        Ok(context.insert(
            self_ref,
            Self {
                name,
                is_abstract,
                parent,
                fields,
                methods,
            },
        ))
    }
}
