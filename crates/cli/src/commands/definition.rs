//! Offline commands on definition files.
//!
//! # Usage
//!
//! ```bash
//! # Check a definition file
//! stepcart validate gift-box.json
//!
//! # Render the page body a definition would publish
//! stepcart render gift-box.json -o gift-box.html
//! ```

use std::io::Write;
use std::path::Path;

use stepcart_admin::render::render_document;
use stepcart_core::ConfiguratorDefinition;
use tracing::info;

use super::CliError;

/// Read and parse a definition file without validating it.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `Parse` if it is not a
/// definition.
pub fn load(path: &Path) -> Result<ConfiguratorDefinition, CliError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

/// Read, parse and validate a definition file.
///
/// # Errors
///
/// As [`load`], plus `Validation` for a definition that breaks an invariant.
pub fn load_valid(path: &Path) -> Result<ConfiguratorDefinition, CliError> {
    let definition = load(path)?;
    definition.validate()?;
    Ok(definition)
}

/// Validate a definition file and report what it contains.
///
/// # Errors
///
/// See [`load_valid`].
pub fn validate(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let definition = load_valid(path)?;
    writeln!(
        out,
        "{}: valid ({} steps, {} discount tiers on {})",
        definition.title,
        definition.step_count(),
        definition.discount.rules.len(),
        definition.discount.metric,
    )?;
    Ok(())
}

/// Render a definition file to `output`, or to `out` when no path is given.
///
/// # Errors
///
/// See [`load_valid`]; `Io` if the output file cannot be written.
pub fn render(path: &Path, output: Option<&Path>, out: &mut impl Write) -> Result<(), CliError> {
    let definition = load_valid(path)?;
    let body = render_document(&definition)?;

    match output {
        Some(target) => {
            std::fs::write(target, &body).map_err(|source| CliError::Io {
                path: target.display().to_string(),
                source,
            })?;
            info!(path = %target.display(), bytes = body.len(), "Rendered document written");
        }
        None => out.write_all(body.as_bytes())?,
    }
    Ok(())
}
