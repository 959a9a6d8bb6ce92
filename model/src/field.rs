use roxmltree::Node;

use super::{
    components::Component,
    error::ModelError,
    mapping_context::MappingContext,
    values::{attribute, required_attribute, validate_identifier},
    EntityDescriptor, Ref, TypeRef,
};

/// A field declared directly on an entity.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_: TypeRef,
    /// The field holds zero or more values of the element type, which is the first type
    /// argument of `type_`.
    pub is_collection: bool,
    /// The entity declaring this field.
    pub owner: Ref<EntityDescriptor>,
}

impl Component for FieldDescriptor {
    const DISPLAY_NAME: &'static str = "field";
}

impl FieldDescriptor {
    pub const TAG_NAME: &'static str = "field";

    /// Maps a `<field>`; the type is given either by the `type` attribute or by a nested
    /// `<type>` element.
    pub(super) fn map_from_xml(
        context: &mut MappingContext,
        field: Node,
        owner: Ref<EntityDescriptor>,
        owner_name: &str,
    ) -> Result<Ref<Self>, ModelError> {
        let name: String = required_attribute(field, "name")?;
        validate_identifier(&name)?;
        let is_collection = attribute(field, "collection")?.unwrap_or(false);

        let mut nested = None;
        for child in field.children().filter(|c| c.is_element()) {
            if child.tag_name().name() == TypeRef::TAG_NAME && nested.is_none() {
                nested = Some(child);
            } else {
                return Err(ModelError::UnexpectedElement {
                    parent: Self::TAG_NAME.into(),
                    found: child.tag_name().name().into(),
                });
            }
        }

        let type_ = match (attribute::<&str>(field, "type")?, nested) {
            (Some(type_name), None) => TypeRef::from_name(context, type_name),
            (None, Some(node)) => TypeRef::map_from_xml(context, node)?,
            (Some(_), Some(node)) => {
                return Err(ModelError::UnexpectedElement {
                    parent: Self::TAG_NAME.into(),
                    found: node.tag_name().name().into(),
                })
            }
            (None, None) => {
                return Err(ModelError::MissingType {
                    entity: owner_name.to_string(),
                    field: name,
                })
            }
        };

        Ok(context.create(Self {
            name,
            type_,
            is_collection,
            owner,
        }))
    }
}
