use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("expected a <model> root element, found <{0}>")]
    NotAModel(String),
    #[error("<{element}> is missing the required `{attribute}` attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },
    #[error("invalid value {value:?} for attribute `{attribute}` on <{element}>")]
    InvalidValue {
        element: String,
        attribute: &'static str,
        value: String,
    },
    #[error("unexpected <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },
    #[error("{0:?} is not a valid Rust name or path")]
    InvalidName(String),
    #[error("entity {0} is declared more than once")]
    DuplicateEntity(String),
    #[error("entity {entity} extends unknown entity {parent}")]
    UnknownParent { entity: String, parent: String },
    #[error("the inheritance chain of entity {0} is cyclic")]
    InheritanceCycle(String),
    #[error("primitive type {0} cannot take type arguments")]
    ParameterizedPrimitive(String),
    #[error("field `{field}` of entity {entity} declares no type")]
    MissingType { entity: String, field: String },
}
