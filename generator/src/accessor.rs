use dt_model::{FieldDescriptor, Ref, SchemaComponentTable};
use heck::ToSnakeCase;
use syn::Ident;

use crate::naming::name_to_ident;

/// The read accessor of a field on the generated code's side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    pub name: String,
}

impl Accessor {
    pub fn ident(&self) -> Ident {
        name_to_ident(&self.name)
    }
}

/// Maps a field to the method reading it; `None` if the owning class has no such method.
pub trait AccessorResolver {
    fn resolve(&self, table: &SchemaComponentTable, field: Ref<FieldDescriptor>)
        -> Option<Accessor>;
}

/// Resolves `get_<field>` first, then `is_<field>`, among the methods of the field's owner.
#[derive(Clone, Debug)]
pub struct ConventionalAccessorResolver {
    prefixes: Vec<String>,
}

impl ConventionalAccessorResolver {
    pub fn new<P: Into<String>>(prefixes: impl IntoIterator<Item = P>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    fn candidate(prefix: &str, field_name: &str) -> String {
        let field_name = field_name.to_snake_case();
        if prefix.is_empty() {
            field_name
        } else {
            format!("{prefix}_{field_name}")
        }
    }
}

impl Default for ConventionalAccessorResolver {
    fn default() -> Self {
        Self::new(["get", "is"])
    }
}

impl AccessorResolver for ConventionalAccessorResolver {
    fn resolve(
        &self,
        table: &SchemaComponentTable,
        field: Ref<FieldDescriptor>,
    ) -> Option<Accessor> {
        let field = field.get(table);
        let owner = field.owner.get(table);
        self.prefixes
            .iter()
            .map(|prefix| Self::candidate(prefix, &field.name))
            .find(|candidate| owner.has_method(candidate))
            .map(|name| Accessor { name })
    }
}
