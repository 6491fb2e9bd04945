//! Configuration constants and validation functions for the command-line tools.

use std::sync::LazyLock;

use katameros_core::{Language, LanguageRegistry};
use regex::Regex;

use crate::error::{CliError, Result};

/// Languages processed when `--languages` is not given. The first one is the
/// ground truth.
pub const DEFAULT_LANGUAGES: &str = "en,ar,co,co-en";

/// Extension written for YAML documents.
pub const YAML_EXTENSION: &str = "yml";

/// Extensions recognised as YAML documents.
pub const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Extension written for JSON documents.
pub const JSON_EXTENSION: &str = "json";

/// Language code pattern: two lowercase letters, optionally `-xx`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LANGUAGE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[a-z]{2})?$").expect("valid regex"));

/// Validate a short language code and resolve it.
///
/// # Returns
/// * `Ok(Language)` for a known code
/// * `Err(CliError::InvalidLanguageCode)` if the code is malformed
/// * `Err(CliError::Corpus)` if the code is well formed but unknown
///
/// # Examples
/// ```
/// use katameros_cli::config::validate_language_code;
/// use katameros_core::Language;
///
/// assert_eq!(validate_language_code("co-en").unwrap(), Language::CopticEnglish);
/// assert!(validate_language_code("English").is_err());
/// assert!(validate_language_code("fr").is_err());
/// ```
pub fn validate_language_code(code: &str) -> Result<Language> {
    if !LANGUAGE_CODE_PATTERN.is_match(code) {
        return Err(CliError::InvalidLanguageCode(code.to_string()));
    }
    Ok(Language::from_code(code)?)
}

/// Build a registry from a comma-separated list of language codes.
///
/// # Examples
/// ```
/// use katameros_cli::config::parse_registry;
/// use katameros_core::Language;
///
/// let registry = parse_registry("ar, en").unwrap();
/// assert_eq!(registry.ground_truth(), Language::Arabic);
/// ```
pub fn parse_registry(codes: &str) -> Result<LanguageRegistry> {
    let languages = codes
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(validate_language_code)
        .collect::<Result<Vec<_>>>()?;
    Ok(LanguageRegistry::new(languages)?)
}
