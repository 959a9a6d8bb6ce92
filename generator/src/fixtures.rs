use dt_model::{EntityDescriptor, FieldDescriptor, Ref, Schema, SchemaComponentTable};

pub(crate) fn schema(xml: &str) -> (Schema, SchemaComponentTable) {
    let doc = roxmltree::Document::parse(xml).expect("fixture is well-formed XML");
    dt_model::read_schema(&doc).expect("fixture is a valid model")
}

pub(crate) fn entity(schema: &Schema, name: &str) -> Ref<EntityDescriptor> {
    schema
        .lookup_entity(name)
        .unwrap_or_else(|| panic!("fixture declares entity {name}"))
}

pub(crate) fn field(
    schema: &Schema,
    table: &SchemaComponentTable,
    entity_name: &str,
    field_name: &str,
) -> Ref<FieldDescriptor> {
    entity(schema, entity_name)
        .get(table)
        .fields
        .iter()
        .copied()
        .find(|f| f.get(table).name == field_name)
        .unwrap_or_else(|| panic!("fixture declares field {entity_name}.{field_name}"))
}
