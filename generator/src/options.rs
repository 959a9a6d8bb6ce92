use dt_model::TypeRef;
use proc_macro2::Span;
use syn::{parse_quote, Ident, Path};

/// Naming conventions of the host classes the traverser is generated for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conventions {
    /// Accessor prefixes, tried in order; an empty prefix means the bare field name.
    pub getter_prefixes: Vec<String>,
    /// Name of the single-value box whose payload is traversed instead of the box itself.
    pub wrapper_type: String,
    /// Method returning the payload of a wrapped value.
    pub payload_accessor: String,
    /// Method viewing a value of the root type or of an interface as `&dyn Any`.
    pub as_any_method: String,
    /// Prefix of the generated dispatch methods.
    pub method_prefix: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            getter_prefixes: vec!["get".into(), "is".into()],
            wrapper_type: "JaxbElement".into(),
            payload_accessor: "get_value".into(),
            as_any_method: "as_any".into(),
            method_prefix: "traverse".into(),
        }
    }
}

impl Conventions {
    /// Whether `type_` is a wrapped value: the wrapper type itself, carrying its payload type
    /// as a type argument.
    pub fn is_wrapped(&self, type_: &TypeRef) -> bool {
        !self.wrapper_type.is_empty()
            && type_.is_parameterized()
            && type_.local_name() == self.wrapper_type
    }
}

/// Everything the generator needs besides the schema itself.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// The visitor abstraction, generic over the visit result and the error type.
    pub visitor: Path,
    /// The trait the generated type implements, generic over the error type.
    pub traverser: Path,
    /// The marker trait of traversable values; `accept` is called through it.
    pub visitable: Path,
    /// Name of the generated type.
    pub impl_name: Ident,
    pub conventions: Conventions,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            visitor: parse_quote!(Visitor),
            traverser: parse_quote!(Traverser),
            visitable: parse_quote!(Visitable),
            impl_name: Ident::new("DepthFirstTraverserImpl", Span::call_site()),
            conventions: Conventions::default(),
        }
    }
}
