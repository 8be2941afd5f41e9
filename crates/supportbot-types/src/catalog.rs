//! Product catalog types.
//!
//! Products are loaded once at startup and shared read-only. Every field is
//! held as display text so the prompt builder never re-formats numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// A sellable product used to ground LLM answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl Product {
    /// Convert one raw catalog entry into a `Product`.
    ///
    /// `id` and `name` are required; `description`, `price` and `category`
    /// default to empty text. Numbers and booleans are rendered as text, so
    /// `{"id": 7, "price": 19.5}` yields `id = "7"`, `price = "19.5"`.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, CatalogError> {
        let obj = value.as_object().ok_or_else(|| CatalogError::MalformedEntry {
            index,
            reason: "entry is not an object".to_string(),
        })?;

        let field = |name: &str, required: bool| -> Result<String, CatalogError> {
            match obj.get(name) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Number(n)) => Ok(n.to_string()),
                Some(Value::Bool(b)) => Ok(b.to_string()),
                None | Some(Value::Null) if !required => Ok(String::new()),
                None | Some(Value::Null) => Err(CatalogError::MalformedEntry {
                    index,
                    reason: format!("missing required field '{name}'"),
                }),
                Some(_) => Err(CatalogError::MalformedEntry {
                    index,
                    reason: format!("field '{name}' is not a scalar"),
                }),
            }
        };

        Ok(Self {
            id: field("id", true)?,
            name: field("name", true)?,
            description: field("description", false)?,
            price: field("price", false)?,
            category: field("category", false)?,
        })
    }

    /// Whether the fields needed to render a catalog row are present.
    pub fn is_renderable(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_normalizes_numbers() {
        let product = Product::from_value(
            0,
            &json!({
                "id": 7,
                "name": "Blue Widget",
                "description": "A widget, but blue",
                "price": 19.5,
                "category": "widgets"
            }),
        )
        .unwrap();

        assert_eq!(product.id, "7");
        assert_eq!(product.price, "19.5");
        assert_eq!(product.category, "widgets");
    }

    #[test]
    fn test_from_value_optional_fields_default_to_empty() {
        let product = Product::from_value(3, &json!({"id": "p-1", "name": "Lamp"})).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.price, "");
        assert!(product.is_renderable());
    }

    #[test]
    fn test_from_value_missing_name_is_malformed() {
        let err = Product::from_value(4, &json!({"id": 1})).unwrap_err();
        match err {
            CatalogError::MalformedEntry { index, reason } => {
                assert_eq!(index, 4);
                assert!(reason.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_value_rejects_non_objects_and_nested_values() {
        assert!(Product::from_value(0, &json!("just a string")).is_err());
        assert!(Product::from_value(0, &json!({"id": 1, "name": ["a", "b"]})).is_err());
    }

    #[test]
    fn test_blank_name_is_not_renderable() {
        let product = Product {
            id: "1".to_string(),
            name: "   ".to_string(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
        };
        assert!(!product.is_renderable());
    }
}
