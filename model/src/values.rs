use roxmltree::Node;

use crate::error::ModelError;

/// Conversion of an attribute's literal into its value.
pub trait ActualValue<'a>: Sized {
    fn convert(src: &'a str) -> Option<Self>;
}

impl<'a> ActualValue<'a> for &'a str {
    fn convert(src: &'a str) -> Option<Self> {
        Some(src.trim())
    }
}

impl ActualValue<'_> for String {
    fn convert(src: &str) -> Option<Self> {
        Some(src.trim().to_string())
    }
}

impl ActualValue<'_> for bool {
    fn convert(src: &str) -> Option<Self> {
        match src.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// The converted value of the attribute `name` on `node`, or `None` if it is absent.
pub fn attribute<'a, T: ActualValue<'a>>(
    node: Node<'a, '_>,
    name: &'static str,
) -> Result<Option<T>, ModelError> {
    let Some(src) = node.attribute(name) else {
        return Ok(None);
    };
    T::convert(src)
        .map(Some)
        .ok_or_else(|| ModelError::InvalidValue {
            element: node.tag_name().name().to_string(),
            attribute: name,
            value: src.to_string(),
        })
}

pub fn required_attribute<'a, T: ActualValue<'a>>(
    node: Node<'a, '_>,
    name: &'static str,
) -> Result<T, ModelError> {
    attribute(node, name)?.ok_or_else(|| ModelError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name,
    })
}

/// Checks that `name` is a path of identifiers separated by `::`.
pub fn validate_path(name: &str) -> Result<(), ModelError> {
    let is_identifier = |segment: &str| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
            && chars.all(|c| c == '_' || c.is_alphanumeric())
            && segment != "_"
    };
    if name.split("::").all(is_identifier) {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_string()))
    }
}

/// Checks that `name` is a single identifier.
pub fn validate_identifier(name: &str) -> Result<(), ModelError> {
    if name.contains("::") {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    validate_path(name)
}
