mod cli;

use std::{fs, io, process::ExitCode};

use clap::Parser;
use dt_model::ModelError;
use dt_traverser_generator::{ConventionalAccessorResolver, GenerateError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write the generated source")]
    Write(#[source] io::Error),
    #[error("cannot fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("the model is not well-formed XML")]
    Xml(#[from] roxmltree::Error),
    #[error("invalid model")]
    Model(#[from] ModelError),
    #[error("invalid generator option")]
    Option(#[from] syn::Error),
    #[error("generation failed")]
    Generate(#[from] GenerateError),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn load(input: &str) -> Result<String, CliError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        debug!(url = input, "fetching model");
        let fetch = |source: reqwest::Error| CliError::Fetch {
            url: input.to_string(),
            source,
        };
        reqwest::blocking::get(input)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch)
    } else {
        debug!(path = input, "reading model");
        fs::read_to_string(input).map_err(|source| CliError::Read {
            path: input.to_string(),
            source,
        })
    }
}

fn run(cli: &cli::Cli) -> Result<(), CliError> {
    let options = cli.generator_options()?;
    let source = load(&cli.input)?;
    let parsing_options = roxmltree::ParsingOptions {
        allow_dtd: cli.allow_dtd,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(&source, parsing_options)?;
    let (schema, components) = dt_model::read_schema(&document)?;

    let resolver = ConventionalAccessorResolver::new(options.conventions.getter_prefixes.clone());
    let generated =
        dt_traverser_generator::generate_source(&schema, &components, &options, &resolver)?;

    match &cli.output {
        Some(path) => fs::write(path, generated).map_err(CliError::Write),
        None => {
            print!("{generated}");
            Ok(())
        }
    }
}

/// The error and its chain of causes, on one line.
fn report(err: &CliError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    init_tracing();
    let cli = cli::Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", report(&err));
            ExitCode::FAILURE
        }
    }
}
