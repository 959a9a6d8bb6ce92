use syn::{parse_quote, Expr, Ident, Stmt};

use super::{classify::Traversable, common::GeneratorContext};

/// The four ways a field can hold its values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum FieldShape {
    Plain,
    Wrapped,
    Collection,
    WrappedCollection,
}

impl FieldShape {
    pub(super) fn new(is_collection: bool, is_wrapped: bool) -> Self {
        match (is_collection, is_wrapped) {
            (false, false) => Self::Plain,
            (false, true) => Self::Wrapped,
            (true, false) => Self::Collection,
            (true, true) => Self::WrappedCollection,
        }
    }
}

/// The statement visiting `value`, or `None` if values of this verdict are never visited.
fn visit_value(ctx: &GeneratorContext, verdict: Traversable) -> Option<Stmt> {
    match verdict {
        Traversable::Yes => {
            let visitable = &ctx.options.visitable;
            Some(parse_quote! {
                #visitable::accept(value, visitor)?;
            })
        }
        Traversable::Maybe => {
            let as_any = ctx.as_any_method();
            Some(parse_quote! {
                Self::visit_dynamic(value.#as_any(), visitor)?;
            })
        }
        Traversable::No | Traversable::External => None,
    }
}

/// Emits the traversal of one field of `bean`, read through `accessor`.
///
/// Every value is bound through `if let Some(..)` before it is visited; fields whose values are
/// never visited produce no statement at all.
pub(super) fn emit_field(
    ctx: &GeneratorContext,
    accessor: &Ident,
    shape: FieldShape,
    verdict: Traversable,
) -> Option<Stmt> {
    let visit = visit_value(ctx, verdict)?;
    let getter: Expr = parse_quote!(bean.#accessor());
    let payload = ctx.payload_accessor();

    let stmt = match shape {
        FieldShape::Plain => parse_quote! {
            if let Some(value) = #getter {
                #visit
            }
        },
        FieldShape::Wrapped => parse_quote! {
            if let Some(element) = #getter {
                if let Some(value) = element.#payload() {
                    #visit
                }
            }
        },
        FieldShape::Collection => parse_quote! {
            for item in #getter {
                if let Some(value) = item {
                    #visit
                }
            }
        },
        FieldShape::WrappedCollection => parse_quote! {
            for item in #getter {
                if let Some(element) = item {
                    if let Some(value) = element.#payload() {
                        #visit
                    }
                }
            }
        },
    };
    Some(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, options::GeneratorOptions};
    use pretty_assertions::assert_eq;
    use quote::quote;

    fn emit(shape: FieldShape, verdict: Traversable) -> Option<String> {
        let (schema, table) = fixtures::schema("<model/>");
        let options = GeneratorOptions::default();
        let ctx = GeneratorContext::new(&schema, &table, &options);
        let accessor: Ident = parse_quote!(get_x);
        emit_field(&ctx, &accessor, shape, verdict).map(|stmt| quote!(#stmt).to_string())
    }

    #[test]
    fn plain_entity_is_visited_behind_a_guard() {
        assert_eq!(
            emit(FieldShape::Plain, Traversable::Yes).unwrap(),
            quote! {
                if let Some(value) = bean.get_x() {
                    Visitable::accept(value, visitor)?;
                }
            }
            .to_string()
        );
    }

    #[test]
    fn plain_unknown_value_is_tested_at_runtime() {
        assert_eq!(
            emit(FieldShape::Plain, Traversable::Maybe).unwrap(),
            quote! {
                if let Some(value) = bean.get_x() {
                    Self::visit_dynamic(value.as_any(), visitor)?;
                }
            }
            .to_string()
        );
    }

    #[test]
    fn wrapped_value_is_unwrapped_once() {
        let emitted = emit(FieldShape::Wrapped, Traversable::Yes).unwrap();
        assert_eq!(
            emitted,
            quote! {
                if let Some(element) = bean.get_x() {
                    if let Some(value) = element.get_value() {
                        Visitable::accept(value, visitor)?;
                    }
                }
            }
            .to_string()
        );
        assert_eq!(emitted.matches("get_value").count(), 1);
    }

    #[test]
    fn collection_iterates_and_guards_each_element() {
        let emitted = emit(FieldShape::Collection, Traversable::Yes).unwrap();
        assert_eq!(
            emitted,
            quote! {
                for item in bean.get_x() {
                    if let Some(value) = item {
                        Visitable::accept(value, visitor)?;
                    }
                }
            }
            .to_string()
        );
        assert_eq!(emitted.matches("for ").count(), 1);
    }

    #[test]
    fn wrapped_collection_unwraps_each_element() {
        assert_eq!(
            emit(FieldShape::WrappedCollection, Traversable::Maybe).unwrap(),
            quote! {
                for item in bean.get_x() {
                    if let Some(element) = item {
                        if let Some(value) = element.get_value() {
                            Self::visit_dynamic(value.as_any(), visitor)?;
                        }
                    }
                }
            }
            .to_string()
        );
    }

    #[test]
    fn untraversable_values_emit_nothing_in_any_shape() {
        for shape in [
            FieldShape::Plain,
            FieldShape::Wrapped,
            FieldShape::Collection,
            FieldShape::WrappedCollection,
        ] {
            assert_eq!(emit(shape, Traversable::No), None);
            assert_eq!(emit(shape, Traversable::External), None);
        }
    }

    #[test]
    fn configured_names_are_used() {
        let (schema, table) = fixtures::schema("<model/>");
        let mut options = GeneratorOptions::default();
        options.visitable = parse_quote!(crate::visit::Visitable);
        options.conventions.payload_accessor = "payload".into();
        let ctx = GeneratorContext::new(&schema, &table, &options);
        let accessor: Ident = parse_quote!(entry);

        let stmt = emit_field(&ctx, &accessor, FieldShape::Wrapped, Traversable::Yes).unwrap();
        assert_eq!(
            quote!(#stmt).to_string(),
            quote! {
                if let Some(element) = bean.entry() {
                    if let Some(value) = element.payload() {
                        crate::visit::Visitable::accept(value, visitor)?;
                    }
                }
            }
            .to_string()
        );
    }

    #[test]
    fn shapes_follow_collection_and_wrapper_flags() {
        assert_eq!(FieldShape::new(false, false), FieldShape::Plain);
        assert_eq!(FieldShape::new(false, true), FieldShape::Wrapped);
        assert_eq!(FieldShape::new(true, false), FieldShape::Collection);
        assert_eq!(FieldShape::new(true, true), FieldShape::WrappedCollection);
    }
}
