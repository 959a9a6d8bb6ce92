use dt_model::{Schema, TypeArgument, TypeRef};

/// Whether values of a type can lead to traversable sub-objects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Traversable {
    /// The type is an entity of the schema and is always visited.
    Yes,
    /// The type can never reach an entity.
    No,
    /// The root type or an interface: the runtime value decides.
    Maybe,
    /// Reserved for types outside the schema that are traversable by convention. Never
    /// produced by [`classify`].
    External,
}

/// A parameterized type without the type argument the classifier needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedParameterization {
    pub type_name: String,
}

/// Decides the verdict for `raw` and returns it with the type it was decided on.
///
/// Parameterized types stand for their first type argument (a collection's or wrapper's
/// element), with wildcards replaced by their upper bound.
pub fn classify<'t>(
    schema: &Schema,
    raw: &'t TypeRef,
) -> Result<(Traversable, &'t TypeRef), MalformedParameterization> {
    if raw.is_primitive() {
        return Ok((Traversable::No, raw));
    }

    let type_ = if raw.is_parameterized() {
        raw.first_argument()
            .map(TypeArgument::effective)
            .ok_or_else(|| MalformedParameterization {
                type_name: raw.to_string(),
            })?
    } else {
        raw
    };

    let verdict = if type_.name == schema.root_type || type_.is_interface() {
        Traversable::Maybe
    } else if schema.lookup_entity(&type_.name).is_some() {
        Traversable::Yes
    } else {
        Traversable::No
    };
    Ok((verdict, type_))
}
