mod classify;
mod common;
mod emit;
mod hierarchy;

pub use classify::{classify, MalformedParameterization, Traversable};
pub use hierarchy::fields;

use dt_model::{EntityDescriptor, FieldDescriptor, Ref, Schema, SchemaComponentTable, TypeArgument};
use quote::quote;
use syn::{parse_quote, Ident, ImplItemFn, Item, Stmt};
use tracing::{debug, info, trace};

use crate::{
    accessor::AccessorResolver,
    error::GenerateError,
    naming::{dispatch_method_names, path_from_name},
    options::GeneratorOptions,
};
use common::GeneratorContext;
use emit::{emit_field, FieldShape};

/// Builds the traversal statement of one field, or `None` if the field is never visited.
fn traverse_field(
    ctx: &GeneratorContext,
    resolver: &dyn AccessorResolver,
    field_ref: Ref<FieldDescriptor>,
) -> Result<Option<(Stmt, Traversable)>, GenerateError> {
    let field = field_ref.get(ctx.table);
    let owner = field.owner.get(ctx.table);
    let malformed = |type_name: String| GenerateError::MalformedParameterization {
        entity: owner.name.clone(),
        field: field.name.clone(),
        type_name,
    };

    let accessor = resolver.resolve(ctx.table, field_ref).ok_or_else(|| {
        GenerateError::UnresolvedAccessor {
            entity: owner.name.clone(),
            field: field.name.clone(),
        }
    })?;

    let element = if field.is_collection {
        field
            .type_
            .first_argument()
            .map(TypeArgument::effective)
            .ok_or_else(|| malformed(field.type_.to_string()))?
    } else {
        &field.type_
    };
    let wrapped = ctx.options.conventions.is_wrapped(element);
    let (verdict, decided_on) =
        classify(ctx.schema, element).map_err(|err| malformed(err.type_name))?;
    trace!(
        entity = %owner.name,
        field = %field.name,
        element = %decided_on,
        ?verdict,
        "classified field"
    );

    let shape = FieldShape::new(field.is_collection, wrapped);
    Ok(emit_field(ctx, &accessor.ident(), shape, verdict).map(|stmt| (stmt, verdict)))
}

/// Builds the dispatch method of a concrete entity. The flag tells whether the body tests
/// values at runtime.
fn dispatch_method(
    ctx: &GeneratorContext,
    resolver: &dyn AccessorResolver,
    entity: Ref<EntityDescriptor>,
    method_name: &Ident,
) -> Result<(ImplItemFn, bool), GenerateError> {
    let mut stmts = Vec::new();
    let mut is_dynamic = false;
    for field in fields(ctx.table, entity) {
        if let Some((stmt, verdict)) = traverse_field(ctx, resolver, field)? {
            is_dynamic |= verdict == Traversable::Maybe;
            stmts.push(stmt);
        }
    }

    let bean_type = path_from_name(&entity.get(ctx.table).name);
    let visitor = &ctx.options.visitor;
    let method = parse_quote! {
        fn #method_name<R>(&self, bean: &#bean_type, visitor: &mut dyn #visitor<R, E>) -> Result<(), E> {
            #(#stmts)*
            Ok(())
        }
    };
    Ok((method, is_dynamic))
}

/// Visits a type-erased value if it is one of the concrete entities, and ignores it otherwise.
fn visit_dynamic(ctx: &GeneratorContext, concrete: &[Ref<EntityDescriptor>]) -> ImplItemFn {
    let visitor = &ctx.options.visitor;
    let visitable = &ctx.options.visitable;
    let variants = concrete.iter().map(|entity| {
        let entity_type = path_from_name(&entity.get(ctx.table).name);
        quote! {
            if let Some(value) = value.downcast_ref::<#entity_type>() {
                return #visitable::accept(value, visitor).map(|_| ());
            }
        }
    });

    parse_quote! {
        fn visit_dynamic<R, E>(value: &dyn ::core::any::Any, visitor: &mut dyn #visitor<R, E>) -> Result<(), E> {
            #(#variants)*
            Ok(())
        }
    }
}

/// Generates the depth-first traverser of `schema`.
///
/// Produces one dispatch method per concrete entity, in model order. The first field that
/// cannot be handled aborts the run.
pub fn generate(
    schema: &Schema,
    table: &SchemaComponentTable,
    options: &GeneratorOptions,
    resolver: &dyn AccessorResolver,
) -> Result<syn::File, GenerateError> {
    let ctx = GeneratorContext::new(schema, table, options);

    for entity in &schema.entities {
        let entity = entity.get(table);
        if entity.is_abstract {
            debug!(entity = %entity.name, "skipping abstract entity");
        }
    }
    let concrete = schema.concrete_entities(table).collect::<Vec<_>>();
    let method_names = dispatch_method_names(
        &options.conventions.method_prefix,
        concrete.iter().map(|entity| entity.get(table).name.as_str()),
    );

    let mut methods = Vec::with_capacity(concrete.len());
    let mut is_dynamic = false;
    for (&entity, method_name) in concrete.iter().zip(&method_names) {
        let (method, uses_dynamic) = dispatch_method(&ctx, resolver, entity, method_name)?;
        methods.push(method);
        is_dynamic |= uses_dynamic;
    }

    let impl_name = &options.impl_name;
    let traverser = &options.traverser;
    let mut items: Vec<Item> = vec![
        parse_quote! {
            pub struct #impl_name;
        },
        parse_quote! {
            impl<E> #traverser<E> for #impl_name {
                #(#methods)*
            }
        },
    ];
    if is_dynamic {
        let helper = visit_dynamic(&ctx, &concrete);
        items.push(parse_quote! {
            impl #impl_name {
                #helper
            }
        });
    }
    info!(methods = methods.len(), "generated traverser");

    let doc_comment = concat!(
        "Generated by ",
        env!("CARGO_PKG_NAME"),
        " ",
        env!("CARGO_PKG_VERSION")
    );
    Ok(syn::File {
        shebang: None,
        attrs: vec![
            parse_quote!(#![doc = #doc_comment]),
            parse_quote!(#![allow(unused_variables, clippy::all)]),
        ],
        items,
    })
}

/// Like [`generate`], rendered as formatted Rust source.
pub fn generate_source(
    schema: &Schema,
    table: &SchemaComponentTable,
    options: &GeneratorOptions,
    resolver: &dyn AccessorResolver,
) -> Result<String, GenerateError> {
    generate(schema, table, options, resolver).map(|file| prettyplease::unparse(&file))
}
