//! Generates a depth-first traverser for the entities of a data-class model.
//!
//! The generated type implements a caller-supplied traverser trait with one dispatch method per
//! concrete entity. Each method hands every sub-object reachable through the entity's fields,
//! inherited ones included, to a visitor.

pub mod accessor;
pub mod error;
pub mod naming;
pub mod options;
pub mod traverser;

#[cfg(test)]
mod fixtures;

pub use accessor::{Accessor, AccessorResolver, ConventionalAccessorResolver};
pub use error::GenerateError;
pub use options::{Conventions, GeneratorOptions};
pub use traverser::{generate, generate_source, Traversable};
