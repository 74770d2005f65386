//! Field-level validation errors shared by request and profile validators.

use serde::Serialize;
use std::fmt;

/// A validation failure on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted field path (e.g. "color_palette.primary")
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

/// One or more field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure on `field`.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Returns true when no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded failures, in insertion order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Converts into `Ok(value)` when empty, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Checks that `slug` is kebab-case: lowercase ASCII, digits and inner hyphens.
pub fn check_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("must not be empty".to_string());
    }

    if slug.len() > 60 {
        return Err(format!("must be at most 60 characters (got {})", slug.len()));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(format!(
            "'{slug}' must be kebab-case (lowercase, hyphens, and digits only)"
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(format!("'{slug}' cannot start or end with a hyphen or repeat hyphens"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slug_valid() {
        assert!(check_slug("plumber").is_ok());
        assert!(check_slug("kitchen-fitter").is_ok());
        assert!(check_slug("trade-2").is_ok());
    }

    #[test]
    fn test_check_slug_invalid() {
        assert!(check_slug("").is_err());
        assert!(check_slug("Plumber").is_err());
        assert!(check_slug("kitchen fitter").is_err());
        assert!(check_slug("-roofer").is_err());
        assert!(check_slug("roofer-").is_err());
        assert!(check_slug("a--b").is_err());
        assert!(check_slug("../etc").is_err());
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result(()).is_ok());
        errors.push("slug", "must not be empty");
        errors.push("name", "too long");
        assert_eq!(
            errors.to_string(),
            "validation failed: slug: must not be empty; name: too long"
        );
        assert_eq!(errors.errors().len(), 2);
    }
}
