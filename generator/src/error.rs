use thiserror::Error;

/// Configuration errors found while generating; each one aborts the whole run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no accessor found for field `{field}` of entity {entity}")]
    UnresolvedAccessor { entity: String, field: String },
    #[error(
        "field `{field}` of entity {entity} has type {type_name}, which lacks the type argument \
         naming its element type"
    )]
    MalformedParameterization {
        entity: String,
        field: String,
        type_name: String,
    },
}
