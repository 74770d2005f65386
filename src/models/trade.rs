//! Trade catalog entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{check_slug, ValidationErrors};

/// Maximum length of a trade display name.
const MAX_NAME_LEN: usize = 60;
/// Maximum length of a trade description.
const MAX_DESCRIPTION_LEN: usize = 500;

/// A trade (business category) in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique kebab-case slug
    pub slug: String,
    /// Display name
    pub name: String,
    /// Icon key
    pub icon: String,
    /// Short description
    pub description: String,
}

/// Request payload for creating a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrade {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Unique kebab-case slug
    #[serde(default)]
    pub slug: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Icon key
    #[serde(default)]
    pub icon: String,
}

impl NewTrade {
    /// Reads a create payload from loose JSON.
    ///
    /// Every field is optional here (emptiness is checked by
    /// [`NewTrade::validate`]); present fields must be strings.
    ///
    /// # Errors
    ///
    /// Returns every field with the wrong type, or `body` when the payload is
    /// not an object.
    pub fn from_value(raw: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(object) = raw.as_object() else {
            errors.push("body", "must be a JSON object");
            return Err(errors);
        };

        let mut field = |name: &str| match object.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                errors.push(name, "must be a string");
                String::new()
            }
        };

        let request = Self {
            name: field("name"),
            slug: field("slug"),
            description: field("description"),
            icon: field("icon"),
        };
        errors.into_result(request)
    }

    /// Validates and trims the request into a [`Trade`].
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(self) -> Result<Trade, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let slug = self.slug.trim().to_string();
        let name = self.name.trim().to_string();
        let icon = self.icon.trim().to_string();
        let description = self.description.trim().to_string();

        if let Err(message) = check_slug(&slug) {
            errors.push("slug", message);
        }

        if name.is_empty() {
            errors.push("name", "must not be empty");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push("name", format!("must be at most {MAX_NAME_LEN} characters"));
        }

        if icon.is_empty() {
            errors.push("icon", "must not be empty");
        }

        if description.is_empty() {
            errors.push("description", "must not be empty");
        } else if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(
                "description",
                format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
            );
        }

        errors.into_result(Trade {
            slug,
            name,
            icon,
            description,
        })
    }
}
