pub mod builtins;
pub mod entity;
pub mod error;
pub mod field;
pub mod schema;
pub mod type_ref;

mod components;
mod mapping_context;
mod values;

pub use entity::EntityDescriptor;
pub use error::ModelError;
pub use field::FieldDescriptor;
pub use schema::Schema;
pub use type_ref::{TypeArgument, TypeKind, TypeRef};

pub use components::{ComponentTable, Ref, SchemaComponentTable};
use mapping_context::MappingContext;

/// Reads a `<model>` document into a [`Schema`] and the table holding its components.
pub fn read_schema(
    document: &roxmltree::Document,
) -> Result<(Schema, SchemaComponentTable), ModelError> {
    let mut context = MappingContext::new();
    let schema = Schema::map_from_xml(&mut context, document.root_element())?;
    let components = context
        .into_components()
        .convert_to_schema_table()
        .expect("every reserved entity is mapped");
    schema.check_acyclic(&components)?;
    Ok((schema, components))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(xml: &str) -> Result<(Schema, SchemaComponentTable), ModelError> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        read_schema(&doc)
    }

    const INVOICE: &str = r#"
        <model>
            <entity name="Invoice" extends="Document">
                <field name="id" type="i32"/>
                <field name="customer" type="Customer"/>
                <field name="lines" collection="true">
                    <type name="Vec"><type name="LineItem"/></type>
                </field>
                <method name="get_id"/>
                <method name="get_customer"/>
                <method name="get_lines"/>
            </entity>
            <entity name="Document" abstract="true">
                <field name="note" type="String"/>
                <method name="get_note"/>
            </entity>
            <entity name="Customer"/>
            <entity name="LineItem"/>
        </model>
    "#;

    #[test]
    fn reads_entities_in_declaration_order() {
        let (schema, table) = read(INVOICE).unwrap();
        let names = schema
            .entities
            .iter()
            .map(|e| e.get(&table).name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Invoice", "Document", "Customer", "LineItem"]);
        assert_eq!(schema.root_type, "Any");
    }

    #[test]
    fn forward_parent_reference_resolves() {
        let (schema, table) = read(INVOICE).unwrap();
        let invoice = schema.lookup_entity("Invoice").unwrap().get(&table);
        let parent = invoice.parent.unwrap().get(&table);
        assert_eq!(parent.name, "Document");
        assert!(parent.is_abstract);
        assert!(invoice.has_method("get_lines"));
    }

    #[test]
    fn fields_point_back_to_their_owner() {
        let (schema, table) = read(INVOICE).unwrap();
        let invoice_ref = schema.lookup_entity("Invoice").unwrap();
        let invoice = invoice_ref.get(&table);
        let fields = invoice
            .fields
            .iter()
            .map(|f| f.get(&table))
            .collect::<Vec<_>>();

        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.owner == invoice_ref));
        assert_eq!(fields[0].type_, TypeRef::primitive("i32"));
        assert!(fields[2].is_collection);
        assert_eq!(fields[2].type_.to_string(), "Vec<LineItem>");
    }

    #[test]
    fn concrete_entities_skip_abstract_ones() {
        let (schema, table) = read(INVOICE).unwrap();
        let concrete = schema
            .concrete_entities(&table)
            .map(|e| e.get(&table).name.clone())
            .collect::<Vec<_>>();
        assert_eq!(concrete, ["Invoice", "Customer", "LineItem"]);
    }

    #[test]
    fn declared_interfaces_and_primitives_resolve() {
        let (schema, table) = read(
            r#"
            <model root="Object">
                <interface name="Serializable"/>
                <primitive name="Decimal"/>
                <entity name="Holder">
                    <field name="payload" type="Serializable"/>
                    <field name="amount" type="Decimal"/>
                    <field name="anything" type="Object"/>
                </entity>
            </model>
            "#,
        )
        .unwrap();
        let holder = schema.lookup_entity("Holder").unwrap().get(&table);
        let kinds = holder
            .fields
            .iter()
            .map(|f| f.get(&table).type_.kind)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [TypeKind::Interface, TypeKind::Primitive, TypeKind::Class]
        );
        assert_eq!(schema.root_type, "Object");
    }

    #[test]
    fn rejects_wrong_root_element() {
        let err = read("<schema/>").unwrap_err();
        assert_eq!(err, ModelError::NotAModel("schema".into()));
    }

    #[test]
    fn rejects_duplicate_entities() {
        let err = read(r#"<model><entity name="A"/><entity name="A"/></model>"#).unwrap_err();
        assert_eq!(err, ModelError::DuplicateEntity("A".into()));
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = read(r#"<model><entity name="A" extends="B"/></model>"#).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownParent {
                entity: "A".into(),
                parent: "B".into(),
            }
        );
    }

    #[test]
    fn rejects_inheritance_cycles() {
        let err = read(
            r#"<model><entity name="A" extends="B"/><entity name="B" extends="A"/></model>"#,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::InheritanceCycle("A".into()));
    }

    #[test]
    fn rejects_self_inheritance() {
        let err = read(r#"<model><entity name="A" extends="A"/></model>"#).unwrap_err();
        assert_eq!(err, ModelError::InheritanceCycle("A".into()));
    }

    #[test]
    fn rejects_untyped_fields() {
        let err = read(r#"<model><entity name="A"><field name="x"/></entity></model>"#)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingType {
                entity: "A".into(),
                field: "x".into(),
            }
        );
    }

    #[test]
    fn rejects_invalid_entity_names() {
        let err = read(r#"<model><entity name="com.example.A"/></model>"#).unwrap_err();
        assert_eq!(err, ModelError::InvalidName("com.example.A".into()));
    }

    #[test]
    fn rejects_invalid_field_and_method_names() {
        let err = read(
            r#"<model><entity name="A"><field name="line-items" type="i32"/></entity></model>"#,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::InvalidName("line-items".into()));

        let err = read(r#"<model><entity name="A"><method name="a::get"/></entity></model>"#)
            .unwrap_err();
        assert_eq!(err, ModelError::InvalidName("a::get".into()));
    }

    #[test]
    fn rejects_parameterized_primitive_fields() {
        let err = read(
            r#"<model><entity name="A">
                <field name="x"><type name="bool"><type name="A"/></type></field>
            </entity></model>"#,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::ParameterizedPrimitive("bool".into()));
    }
}
