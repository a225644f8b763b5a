//! Attribute schema validation.
//!
//! Every kind declares exactly one schema describing the attributes its
//! instances carry: name, value type, and bounds. A bag is committed to
//! the document only after validating against the schema, so a property
//! editor cannot write an attribute the kind does not declare or a value
//! outside its bounds.
//!
//! Errors accumulate rather than short-circuiting, so every problem is
//! reported at once.

use std::collections::HashMap;

use formworks_core::error::{FormworksError, FormworksResult, ValidationError};

use crate::attributes::{AttributeMap, AttributeValue};

/// The value type an attribute accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Text value.
    Text,
    /// Boolean flag.
    Bool,
    /// Integer quantity.
    Integer,
    /// List of text values.
    TextList,
}

impl AttributeType {
    const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::TextList => "text list",
        }
    }
}

/// Declares one attribute of a kind's schema.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// The persisted attribute name.
    pub name: &'static str,
    /// The accepted value type.
    pub value_type: AttributeType,
    /// Minimum length for text values (characters).
    pub min_len: Option<usize>,
    /// Maximum length for text values (characters).
    pub max_len: Option<usize>,
    /// Minimum for integer values.
    pub min: Option<i64>,
    /// Maximum for integer values.
    pub max: Option<i64>,
}

impl AttributeSpec {
    /// A text attribute with optional length bounds.
    pub const fn text(name: &'static str, min_len: Option<usize>, max_len: Option<usize>) -> Self {
        Self {
            name,
            value_type: AttributeType::Text,
            min_len,
            max_len,
            min: None,
            max: None,
        }
    }

    /// A boolean attribute.
    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            value_type: AttributeType::Bool,
            min_len: None,
            max_len: None,
            min: None,
            max: None,
        }
    }

    /// An integer attribute with an inclusive range.
    pub const fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            value_type: AttributeType::Integer,
            min_len: None,
            max_len: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// A text-list attribute.
    pub const fn text_list(name: &'static str) -> Self {
        Self {
            name,
            value_type: AttributeType::TextList,
            min_len: None,
            max_len: None,
            min: None,
            max: None,
        }
    }

    fn check(&self, value: &AttributeValue, errors: &mut Vec<ValidationError>) {
        match (self.value_type, value) {
            (AttributeType::Text, AttributeValue::Text(s)) => {
                let chars = s.chars().count();
                if let Some(min) = self.min_len {
                    if chars < min {
                        errors.push(ValidationError::new(
                            format!(
                                "Ensure this value has at least {min} characters (it has {chars})."
                            ),
                            "min_length",
                        ));
                    }
                }
                if let Some(max) = self.max_len {
                    if chars > max {
                        errors.push(ValidationError::new(
                            format!(
                                "Ensure this value has at most {max} characters (it has {chars})."
                            ),
                            "max_length",
                        ));
                    }
                }
            }
            (AttributeType::Bool, AttributeValue::Bool(_))
            | (AttributeType::TextList, AttributeValue::TextList(_)) => {}
            (AttributeType::Integer, AttributeValue::Integer(n)) => {
                if let Some(min) = self.min {
                    if *n < min {
                        errors.push(ValidationError::new(
                            format!("Ensure this value is greater than or equal to {min}."),
                            "min_value",
                        ));
                    }
                }
                if let Some(max) = self.max {
                    if *n > max {
                        errors.push(ValidationError::new(
                            format!("Ensure this value is less than or equal to {max}."),
                            "max_value",
                        ));
                    }
                }
            }
            (expected, _) => {
                errors.push(ValidationError::new(
                    format!("Expected a {} value.", expected.name()),
                    "invalid_type",
                ));
            }
        }
    }
}

/// The complete attribute schema of one kind.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    specs: &'static [AttributeSpec],
}

impl AttributeSchema {
    /// Creates a schema from its attribute specs.
    pub const fn new(specs: &'static [AttributeSpec]) -> Self {
        Self { specs }
    }

    /// The attribute specs, in declaration order.
    pub const fn specs(&self) -> &'static [AttributeSpec] {
        self.specs
    }

    /// Looks up one spec by attribute name.
    pub fn spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Validates an attribute bag against this schema.
    ///
    /// Every declared attribute must be present with the declared type and
    /// within bounds; attributes the schema does not declare are rejected.
    /// All problems are accumulated into one
    /// [`FormworksError::Validation`].
    pub fn validate(&self, attrs: &AttributeMap) -> FormworksResult<()> {
        let mut attribute_errors: HashMap<String, Vec<ValidationError>> = HashMap::new();

        for spec in self.specs {
            let mut errors = Vec::new();
            match attrs.get(spec.name) {
                Some(value) => spec.check(value, &mut errors),
                None => errors.push(ValidationError::new(
                    "This attribute is required.",
                    "required",
                )),
            }
            if !errors.is_empty() {
                attribute_errors.insert(spec.name.to_string(), errors);
            }
        }

        for (name, _) in attrs.iter() {
            if self.spec(name).is_none() {
                attribute_errors
                    .entry(name.to_string())
                    .or_default()
                    .push(ValidationError::new("Unexpected attribute.", "unexpected"));
            }
        }

        if attribute_errors.is_empty() {
            Ok(())
        } else {
            Err(FormworksError::Validation(
                ValidationError::with_attribute_errors(attribute_errors),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_SCHEMA: AttributeSchema = AttributeSchema::new(&[
        AttributeSpec::text("label", Some(2), Some(80)),
        AttributeSpec::flag("required"),
        AttributeSpec::integer("rows", 1, 20),
    ]);

    fn valid_attrs() -> AttributeMap {
        AttributeMap::new()
            .with("label", "Text field")
            .with("required", false)
            .with("rows", 3_i64)
    }

    #[test]
    fn test_valid_bag_passes() {
        assert!(TEST_SCHEMA.validate(&valid_attrs()).is_ok());
    }

    #[test]
    fn test_missing_attribute_is_required() {
        let attrs = AttributeMap::new().with("label", "ok").with("rows", 3_i64);
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.attribute_errors["required"][0].code, "required");
    }

    #[test]
    fn test_text_length_bounds() {
        let attrs = valid_attrs().with("label", "x");
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert!(v.attribute_errors["label"][0]
            .message
            .contains("at least 2 characters"));

        let attrs = valid_attrs().with("label", "x".repeat(81));
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert!(v.attribute_errors["label"][0]
            .message
            .contains("at most 80 characters"));
    }

    #[test]
    fn test_integer_range() {
        let attrs = valid_attrs().with("rows", 0_i64);
        assert!(TEST_SCHEMA.validate(&attrs).is_err());
        let attrs = valid_attrs().with("rows", 21_i64);
        assert!(TEST_SCHEMA.validate(&attrs).is_err());
        let attrs = valid_attrs().with("rows", 20_i64);
        assert!(TEST_SCHEMA.validate(&attrs).is_ok());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let attrs = valid_attrs().with("required", "yes");
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.attribute_errors["required"][0].code, "invalid_type");
    }

    #[test]
    fn test_unexpected_attribute_is_rejected() {
        let attrs = valid_attrs().with("surprise", "!");
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.attribute_errors["surprise"][0].code, "unexpected");
    }

    #[test]
    fn test_errors_accumulate_across_attributes() {
        let attrs = AttributeMap::new().with("label", "x").with("rows", 99_i64);
        let err = TEST_SCHEMA.validate(&attrs).unwrap_err();
        let FormworksError::Validation(v) = err else {
            panic!("expected validation error");
        };
        assert_eq!(v.attribute_errors.len(), 3); // label, required, rows
    }

    #[test]
    fn test_multibyte_length_counts_chars() {
        // Two characters, six bytes: must satisfy min_len = 2.
        let attrs = valid_attrs().with("label", "да");
        assert!(TEST_SCHEMA.validate(&attrs).is_ok());
    }
}
