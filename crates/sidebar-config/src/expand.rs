//! `${VAR}` expansion for path-like configuration values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Values without `${` are returned untouched, so literal dollar signs in
/// paths survive. `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut unset = Vec::new();
    let expanded = shellexpand::env_with_context_no_errors(value, |var| {
        let found = std::env::var(var).ok();
        if found.is_none() {
            unset.push(var.to_owned());
        }
        found
    })
    .into_owned();

    // Unset variables without a default are left in place
    if let Some(var) = unset
        .iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_docs_root() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDEBAR_TEST_DOCS", "/srv/docs");
        }
        let result = expand_env("${SIDEBAR_TEST_DOCS}/api/0.6.1", "docs.root").unwrap();
        assert_eq!(result, "/srv/docs/api/0.6.1");
        unsafe {
            std::env::remove_var("SIDEBAR_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SIDEBAR_TEST_VERSION");
        }
        let result = expand_env("docs/api/${SIDEBAR_TEST_VERSION:-0.6.1}", "docs.root").unwrap();
        assert_eq!(result, "docs/api/0.6.1");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SIDEBAR_TEST_MISSING");
        }
        let err = expand_env("${SIDEBAR_TEST_MISSING}", "export.output").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SIDEBAR_TEST_MISSING"));
        assert!(err.to_string().contains("export.output"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        let result = expand_env("docs/$version", "docs.root").unwrap();
        assert_eq!(result, "docs/$version");
    }
}
