use std::path::PathBuf;

use clap::Parser;
use dt_traverser_generator::{Conventions, GeneratorOptions};
use syn::{Ident, Path};

fn rust_path(src: &str) -> Result<String, String> {
    syn::parse_str::<Path>(src)
        .map(|_| src.to_string())
        .map_err(|err| format!("not a Rust path: {err}"))
}

fn rust_ident(src: &str) -> Result<String, String> {
    if src.starts_with("r#") {
        return Err("raw identifiers are not accepted".into());
    }
    syn::parse_str::<Ident>(src)
        .map(|_| src.to_string())
        .map_err(|err| format!("not a Rust identifier: {err}"))
}

fn name_prefix(src: &str) -> Result<String, String> {
    let mut chars = src.chars();
    let valid = match chars.next() {
        None => true,
        Some(first) => {
            (first == '_' || first.is_alphabetic()) && chars.all(|c| c == '_' || c.is_alphanumeric())
        }
    };
    if valid {
        Ok(src.to_string())
    } else {
        Err("a name prefix consists of letters, digits and underscores".into())
    }
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(help = "The model file or URL")]
    pub input: String,

    #[arg(short, long, help = "Write the generated source here instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[arg(long, default_value = "Visitor", value_parser = rust_path)]
    pub visitor: String,

    #[arg(long, default_value = "Traverser", value_parser = rust_path)]
    pub traverser: String,

    #[arg(long, default_value = "Visitable", value_parser = rust_path)]
    pub visitable: String,

    #[arg(long, default_value = "DepthFirstTraverserImpl", value_parser = rust_ident)]
    pub impl_name: String,

    #[arg(
        long,
        default_value = "JaxbElement",
        help = "Type whose payload is traversed instead of itself"
    )]
    pub wrapper: String,

    #[arg(long, default_value = "get_value", value_parser = rust_ident)]
    pub payload_accessor: String,

    #[arg(long, default_value = "as_any", value_parser = rust_ident)]
    pub as_any: String,

    #[arg(
        long,
        default_value = "traverse",
        value_parser = name_prefix,
        help = "Prefix of the generated method names"
    )]
    pub method_prefix: String,

    #[arg(
        long = "getter-prefix",
        default_values = ["get", "is"],
        value_parser = name_prefix,
        help = "Accessor prefix, tried in the order given"
    )]
    pub getter_prefixes: Vec<String>,
}

impl Cli {
    /// The generator options selected on the command line.
    pub fn generator_options(&self) -> syn::Result<GeneratorOptions> {
        Ok(GeneratorOptions {
            visitor: syn::parse_str(&self.visitor)?,
            traverser: syn::parse_str(&self.traverser)?,
            visitable: syn::parse_str(&self.visitable)?,
            impl_name: syn::parse_str(&self.impl_name)?,
            conventions: Conventions {
                getter_prefixes: self.getter_prefixes.clone(),
                wrapper_type: self.wrapper.clone(),
                payload_accessor: self.payload_accessor.clone(),
                as_any_method: self.as_any.clone(),
                method_prefix: self.method_prefix.clone(),
            },
        })
    }
}
