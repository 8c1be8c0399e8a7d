//! `${VAR}` and `${VAR:-default}` references in config values.

use crate::ConfigError;

/// Expand environment references in a config value.
///
/// Only `${...}` references are expanded. Any other `$` is kept as
/// written, so a secret like `pa$word` needs no escaping. An unset
/// variable without a default is an error naming both the field and the
/// variable.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, String> {
        std::env::var(name).map(Some).map_err(|_| name.to_owned())
    };
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}').map(|offset| start + offset) else {
            break;
        };
        expanded.push_str(&rest[..start]);
        let reference = shellexpand::env_with_context(&rest[start..=end], &lookup)
            .map_err(|e| ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} not set", e.cause),
            })?;
        expanded.push_str(&reference);
        rest = &rest[end + 1..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}
