//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left untouched. An unset variable without a default is an
/// error naming both the variable and the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional string in place.
pub(crate) fn expand_env_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(inner) = value.as_mut() {
        *inner = expand_env(inner, field)?;
    }
    Ok(())
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);
