use std::fmt;

use roxmltree::Node;

use super::{
    error::ModelError,
    mapping_context::MappingContext,
    values::{attribute, required_attribute},
};

/// How a declared type participates in the host type system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Interface,
    Class,
}

/// A reference to a declared type.
///
/// `parameters` is `None` for a type without type arguments. `Some(vec![])` is a parameterized
/// type whose argument list is empty, which the generator rejects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub kind: TypeKind,
    pub parameters: Option<Vec<TypeArgument>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeArgument {
    Type(TypeRef),
    /// `? extends bound`; an unbounded wildcard is bounded by the root type.
    Wildcard { bound: TypeRef },
}

impl TypeArgument {
    /// The type standing in for this argument: the type itself, or the wildcard's upper bound.
    pub fn effective(&self) -> &TypeRef {
        match self {
            Self::Type(type_) => type_,
            Self::Wildcard { bound } => bound,
        }
    }
}

impl TypeRef {
    pub const TAG_NAME: &'static str = "type";
    pub const WILDCARD_TAG_NAME: &'static str = "wildcard";

    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: None,
        }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Primitive)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn with_arguments(self, arguments: Vec<TypeArgument>) -> Self {
        Self {
            parameters: Some(arguments),
            ..self
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::Primitive
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_parameterized(&self) -> bool {
        self.parameters.is_some()
    }

    pub fn arguments(&self) -> &[TypeArgument] {
        self.parameters.as_deref().unwrap_or_default()
    }

    pub fn first_argument(&self) -> Option<&TypeArgument> {
        self.arguments().first()
    }

    /// The last segment of the type's path.
    pub fn local_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// A type named by a `type` attribute: never parameterized.
    pub(super) fn from_name(context: &MappingContext, name: &str) -> Self {
        Self::new(name, context.type_kind(name))
    }

    /// Maps a `<type>` element. Its `<type>` and `<wildcard>` children are the type arguments.
    pub(super) fn map_from_xml(context: &MappingContext, node: Node) -> Result<Self, ModelError> {
        let name: &str = required_attribute(node, "name")?;

        let mut arguments = Vec::new();
        for child in node.children().filter(|c| c.is_element()) {
            let argument = match child.tag_name().name() {
                Self::TAG_NAME => TypeArgument::Type(Self::map_from_xml(context, child)?),
                Self::WILDCARD_TAG_NAME => {
                    let bound = child
                        .children()
                        .find(|c| c.is_element())
                        .map(|bound| {
                            if bound.tag_name().name() == Self::TAG_NAME {
                                Self::map_from_xml(context, bound)
                            } else {
                                Err(ModelError::UnexpectedElement {
                                    parent: Self::WILDCARD_TAG_NAME.into(),
                                    found: bound.tag_name().name().into(),
                                })
                            }
                        })
                        .transpose()?
                        .unwrap_or_else(|| context.root_type_ref());
                    TypeArgument::Wildcard { bound }
                }
                other => {
                    return Err(ModelError::UnexpectedElement {
                        parent: Self::TAG_NAME.into(),
                        found: other.into(),
                    })
                }
            };
            arguments.push(argument);
        }

        let parameterized = attribute::<bool>(node, "parameterized")?.unwrap_or(false);
        let type_ = Self::from_name(context, name);
        if arguments.is_empty() && !parameterized {
            return Ok(type_);
        }
        if type_.is_primitive() {
            return Err(ModelError::ParameterizedPrimitive(name.to_string()));
        }
        Ok(type_.with_arguments(arguments))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(arguments) = &self.parameters {
            write!(f, "<")?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(type_) => write!(f, "{type_}"),
            Self::Wildcard { bound } => write!(f, "? extends {bound}"),
        }
    }
}
