use dt_model::{Schema, SchemaComponentTable};
use syn::Ident;

use crate::{naming::name_to_ident, options::GeneratorOptions};

pub(super) struct GeneratorContext<'a> {
    pub(super) schema: &'a Schema,
    pub(super) table: &'a SchemaComponentTable,
    pub(super) options: &'a GeneratorOptions,
}

impl<'a> GeneratorContext<'a> {
    pub(super) fn new(
        schema: &'a Schema,
        table: &'a SchemaComponentTable,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            schema,
            table,
            options,
        }
    }

    pub(super) fn payload_accessor(&self) -> Ident {
        name_to_ident(&self.options.conventions.payload_accessor)
    }

    pub(super) fn as_any_method(&self) -> Ident {
        name_to_ident(&self.options.conventions.as_any_method)
    }
}
