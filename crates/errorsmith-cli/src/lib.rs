//! CLI logic for the errorsmith catalog checker.
//!
//! The checker loads a catalog of error type descriptions, builds every type
//! and reports the resulting constructor signatures.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fmt::Write as _;
use std::fs;

use log::info;

use errorsmith::{Catalog, ErrorRegistry, ErrorTypeFactory, ErrorsmithError};

/// Run the errorsmith CLI application
///
/// Reads the catalog named by `args`, builds every error type it describes
/// and writes a report to the output file, or to stdout when none is given.
///
/// # Errors
///
/// Returns `ErrorsmithError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Catalog parsing and definition errors
pub fn run(args: &Args) -> Result<(), ErrorsmithError> {
    info!(catalog_path = args.catalog; "Checking catalog");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.catalog)?;

    let catalog = Catalog::from_toml_str(&source)
        .map_err(|err| ErrorsmithError::new_catalog_error(err, source.as_str()))?;

    let factory = ErrorTypeFactory::new(app_config.factory().clone());
    let registry = factory
        .create_catalog(&catalog)
        .map_err(|err| ErrorsmithError::new_catalog_error(err, source.as_str()))?;

    let report = describe(&registry);

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file = output; "Report written");
        }
        None => print!("{report}"),
    }

    Ok(())
}

/// Renders one line per error type, followed by its fixed attributes.
///
/// ```text
/// RateLimited(message, retry_after, data)
///     status = 429
/// ```
pub fn describe(registry: &ErrorRegistry) -> String {
    let mut report = String::new();

    for error_type in registry {
        // Writing to a String cannot fail
        let _ = writeln!(report, "{}", error_type.signature());
        for (name, value) in error_type.attributes() {
            let _ = writeln!(report, "    {name} = {value}");
        }
    }

    report
}
