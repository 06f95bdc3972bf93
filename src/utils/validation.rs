use crate::utils::error::{CartError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> CartError {
    CartError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Accepts absolute `http`/`https` URLs only.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        Err(invalid(field_name, path, "Path cannot be empty"))
    } else if path.contains('\0') {
        Err(invalid(field_name, path, "Path contains null bytes"))
    } else {
        Ok(())
    }
}

pub fn validate_at_least(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://example.com").is_ok());
        assert!(validate_url("api.base_url", "http://localhost:3333").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "invalid-url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_at_least() {
        assert!(validate_at_least("api.timeout_seconds", 5, 1).is_ok());

        let err = validate_at_least("api.timeout_seconds", 0, 1).unwrap_err();
        match err {
            CartError::InvalidConfigValueError { field, value, .. } => {
                assert_eq!(field, "api.timeout_seconds");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_path_and_strings() {
        assert!(validate_path("storage.path", "./.cart").is_ok());
        assert!(validate_path("storage.path", "").is_err());
        assert!(validate_path("storage.path", "bad\0path").is_err());
        assert!(validate_non_empty_string("storage.key", "@RocketShoes:cart").is_ok());
        assert!(validate_non_empty_string("storage.key", " \t").is_err());
    }
}
