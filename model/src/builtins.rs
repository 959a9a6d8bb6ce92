use std::collections::HashSet;

use lazy_static::lazy_static;

use super::mapping_context::MappingContext;

/// Name of the universal root type, used when a model does not declare its own.
pub const DEFAULT_ROOT_TYPE_NAME: &str = "Any";

lazy_static! {
    /// The Rust primitive types; values of these types never reach an entity.
    pub static ref PRIMITIVE_TYPE_NAMES: HashSet<&'static str> = [
        "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
        "u64", "u128", "usize", "f32", "f64",
    ]
    .into_iter()
    .collect();
}

pub(super) fn register_builtins(context: &mut MappingContext) {
    for name in PRIMITIVE_TYPE_NAMES.iter() {
        context.register_primitive(name);
    }
}
