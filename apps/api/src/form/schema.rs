//! Section schema for the calculator form.
//!
//! The schema is plain configuration: an ordered list of sections, each naming
//! the fields it owns and the subset that must be filled. The scorer is built
//! from a `FieldSchema` and never loads or checks one itself; loading and
//! validation happen once at startup in `FieldSchema::from_json_file`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionSpec {
    pub key: String,
    pub display_name: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl SectionSpec {
    fn new(key: &str, display_name: &str, fields: &[&str], required: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            required: required.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSchema {
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("schema has no sections")]
    Empty,

    #[error("section '{0}' has no fields")]
    EmptySection(String),

    #[error("duplicate section key '{0}'")]
    DuplicateSection(String),

    #[error("field '{field}' appears in more than one section (second: '{section}')")]
    DuplicateField { field: String, section: String },

    #[error("required field '{field}' is not listed in section '{section}'")]
    UnknownRequired { field: String, section: String },

    #[error("cannot read schema file: {0}")]
    Io(String),

    #[error("cannot parse schema JSON: {0}")]
    Parse(String),
}

impl FieldSchema {
    /// The marketplace seller form: five sections, 18 fields.
    pub fn marketplace() -> Self {
        Self {
            sections: vec![
                SectionSpec::new(
                    "cost_of_goods",
                    "Cost of goods",
                    &[
                        "purchase_price",
                        "delivery_to_warehouse",
                        "packaging_cost",
                        "marking_cost",
                    ],
                    &["purchase_price"],
                ),
                SectionSpec::new(
                    "marketplace_fees",
                    "Marketplace fees",
                    &[
                        "commission_percent",
                        "logistics_cost",
                        "storage_cost",
                        "acceptance_cost",
                        "return_rate_percent",
                    ],
                    &["commission_percent", "logistics_cost"],
                ),
                SectionSpec::new(
                    "additional_costs",
                    "Additional costs",
                    &["advertising_percent", "fulfillment_cost", "other_costs"],
                    &[],
                ),
                SectionSpec::new(
                    "tax_regime",
                    "Tax regime",
                    &["tax_regime", "tax_rate_percent"],
                    &["tax_regime", "tax_rate_percent"],
                ),
                SectionSpec::new(
                    "pricing",
                    "Pricing",
                    &[
                        "selling_price",
                        "discount_percent",
                        "seller_discount_percent",
                        "target_margin_percent",
                    ],
                    &["selling_price"],
                ),
            ],
        }
    }

    pub fn total_fields(&self) -> usize {
        self.sections.iter().map(|s| s.fields.len()).sum()
    }

    /// Parses and validates a schema from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let schema: FieldSchema =
            serde_json::from_str(raw).map_err(|e| SchemaError::Parse(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SchemaError::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_json_str(&raw)
    }

    /// Structural checks applied to schemas supplied from outside the binary.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.sections.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut section_keys = HashSet::new();
        let mut field_names = HashSet::new();

        for section in &self.sections {
            if !section_keys.insert(section.key.as_str()) {
                return Err(SchemaError::DuplicateSection(section.key.clone()));
            }
            if section.fields.is_empty() {
                return Err(SchemaError::EmptySection(section.key.clone()));
            }
            for field in &section.fields {
                if !field_names.insert(field.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        field: field.clone(),
                        section: section.key.clone(),
                    });
                }
            }
            if let Some(unknown) = section
                .required
                .iter()
                .find(|r| !section.fields.contains(r))
            {
                return Err(SchemaError::UnknownRequired {
                    field: unknown.clone(),
                    section: section.key.clone(),
                });
            }
        }

        Ok(())
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::marketplace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_marketplace_schema_shape() {
        let schema = FieldSchema::marketplace();
        assert_eq!(schema.sections.len(), 5);
        assert_eq!(schema.total_fields(), 18);
        assert!(schema.validate().is_ok());
        let keys: Vec<_> = schema.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "cost_of_goods",
                "marketplace_fees",
                "additional_costs",
                "tax_regime",
                "pricing"
            ]
        );
    }

    #[test]
    fn test_parse_valid_json() {
        let raw = r#"{"sections":[
            {"key":"a","display_name":"A","fields":["x","y"],"required":["x"]},
            {"key":"b","display_name":"B","fields":["z"]}
        ]}"#;
        let schema = FieldSchema::from_json_str(raw).unwrap();
        assert_eq!(schema.total_fields(), 3);
        assert!(schema.sections[1].required.is_empty());
    }

    #[test]
    fn test_reject_empty_schema() {
        let err = FieldSchema::from_json_str(r#"{"sections":[]}"#).unwrap_err();
        assert_eq!(err, SchemaError::Empty);
    }

    #[test]
    fn test_reject_empty_section() {
        let raw = r#"{"sections":[{"key":"a","display_name":"A","fields":[]}]}"#;
        assert_eq!(
            FieldSchema::from_json_str(raw).unwrap_err(),
            SchemaError::EmptySection("a".to_string())
        );
    }

    #[test]
    fn test_reject_duplicate_section_key() {
        let raw = r#"{"sections":[
            {"key":"a","display_name":"A","fields":["x"]},
            {"key":"a","display_name":"A again","fields":["y"]}
        ]}"#;
        assert_eq!(
            FieldSchema::from_json_str(raw).unwrap_err(),
            SchemaError::DuplicateSection("a".to_string())
        );
    }

    #[test]
    fn test_reject_field_in_two_sections() {
        let raw = r#"{"sections":[
            {"key":"a","display_name":"A","fields":["x"]},
            {"key":"b","display_name":"B","fields":["x"]}
        ]}"#;
        let err = FieldSchema::from_json_str(raw).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { ref field, .. } if field == "x"));
    }

    #[test]
    fn test_reject_required_not_in_fields() {
        let raw = r#"{"sections":[
            {"key":"a","display_name":"A","fields":["x"],"required":["y"]}
        ]}"#;
        let err = FieldSchema::from_json_str(raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownRequired {
                field: "y".to_string(),
                section: "a".to_string()
            }
        );
    }

    #[test]
    fn test_reject_malformed_json() {
        let err = FieldSchema::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let raw = serde_json::to_string(&FieldSchema::marketplace()).unwrap();
        file.write_all(raw.as_bytes()).unwrap();
        let schema = FieldSchema::from_json_file(file.path()).unwrap();
        assert_eq!(schema, FieldSchema::marketplace());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FieldSchema::from_json_file("/nonexistent/schema.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
