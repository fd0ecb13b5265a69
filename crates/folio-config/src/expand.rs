//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(missing) = required_vars(value).find(|var| std::env::var_os(var).is_none()) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{missing}}} not set"),
        });
    }

    let expanded = shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok());
    Ok(expanded.into_owned())
}

/// Names of `${VAR}` references that carry no default.
fn required_vars(value: &str) -> impl Iterator<Item = &str> {
    value.split("${").skip(1).filter_map(|rest| {
        let inner = &rest[..rest.find('}')?];
        (!inner.contains(":-")).then_some(inner)
    })
}
