use std::collections::{HashMap, HashSet};

use check_keyword::CheckKeyword;
use heck::ToSnakeCase;
use proc_macro2::Span;
use syn::{parse_quote, Ident, Path};

const PATH_ROOTS: [&str; 3] = ["crate", "self", "super"];

pub fn name_to_ident(name: &str) -> Ident {
    if ["crate", "self", "super", "Self"].contains(&name) {
        // These are keywords that are not allowed as raw identifiers
        Ident::new(&format!("{}_", name), Span::call_site())
    } else if name.is_keyword() {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// Converts a schema type name like `crate::billing::Invoice` into a path.
pub fn path_from_name(name: &str) -> Path {
    let segments = name.split("::").enumerate().map(|(i, segment)| {
        if i == 0 && PATH_ROOTS.contains(&segment) {
            Ident::new(segment, Span::call_site())
        } else {
            name_to_ident(segment)
        }
    });
    parse_quote!(#(#segments)::*)
}

fn local_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

fn qualified_snake_name(name: &str) -> String {
    name.split("::")
        .filter(|segment| !PATH_ROOTS.contains(segment))
        .map(|segment| segment.to_snake_case())
        .collect::<Vec<_>>()
        .join("_")
}

/// Names the dispatch method of each entity in `names`, keeping the input order.
///
/// Methods are named after the entity's local name. Entities sharing a local name are named
/// after their whole path instead. A name that is still taken gets the first free numeric
/// suffix, so the result never repeats a name.
pub fn dispatch_method_names<'a>(
    prefix: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<Ident> {
    let names = names.into_iter().collect::<Vec<_>>();
    let mut local_counts = HashMap::<String, usize>::new();
    for name in &names {
        *local_counts
            .entry(local_name(name).to_snake_case())
            .or_default() += 1;
    }

    let candidates = names
        .iter()
        .map(|name| {
            let local = local_name(name).to_snake_case();
            if local_counts[&local] > 1 {
                qualified_snake_name(name)
            } else {
                local
            }
        })
        .collect::<Vec<_>>();

    let wanted = candidates.iter().map(String::as_str).collect::<HashSet<_>>();
    let mut taken = HashSet::new();
    candidates
        .iter()
        .map(|candidate| {
            let mut snake = candidate.clone();
            let mut suffix = 1;
            while taken.contains(&snake) || (suffix > 1 && wanted.contains(snake.as_str())) {
                suffix += 1;
                snake = format!("{candidate}_{suffix}");
            }
            taken.insert(snake.clone());
            if prefix.is_empty() {
                name_to_ident(&snake)
            } else {
                name_to_ident(&format!("{prefix}_{snake}"))
            }
        })
        .collect()
}
