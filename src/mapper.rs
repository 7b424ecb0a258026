//! Storage-type translation tables
//!
//! Pure functions mapping a storage column type to the UI input kind and
//! TypeScript type used in generated code, plus the default validation rule
//! per input kind. All functions here are total: unknown storage types fall
//! back to a plain text field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TypeScript type used to represent a field's value in generated interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TsType {
    String,
    Number,
    Boolean,
    Object,
}

impl TsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TsType::String => "string",
            TsType::Number => "number",
            TsType::Boolean => "boolean",
            TsType::Object => "object",
        }
    }
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI control category selected for a field
///
/// Serialized names match the generated form components
/// (`datetime-local`, `relationship-select`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Text,
    Number,
    Email,
    Textarea,
    Checkbox,
    Date,
    DatetimeLocal,
    Time,
    Select,
    RelationshipSelect,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Email => "email",
            InputKind::Textarea => "textarea",
            InputKind::Checkbox => "checkbox",
            InputKind::Date => "date",
            InputKind::DatetimeLocal => "datetime-local",
            InputKind::Time => "time",
            InputKind::Select => "select",
            InputKind::RelationshipSelect => "relationship-select",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input kind + TypeScript type pair derived from a storage column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeMapping {
    pub ts_type: TsType,
    pub input: InputKind,
}

/// Map a storage column type to its input kind and TypeScript type
///
/// Case-sensitive exact match against a fixed table; unmatched input yields
/// `{string, text}`.
pub fn map_db_type(db_type: &str) -> ColumnTypeMapping {
    let (ts_type, input) = match db_type {
        "integer" | "bigint" | "smallint" => (TsType::Number, InputKind::Number),
        "decimal" | "float" | "double" => (TsType::Number, InputKind::Number),
        "boolean" => (TsType::Boolean, InputKind::Checkbox),
        "date" => (TsType::String, InputKind::Date),
        "datetime" | "timestamp" => (TsType::String, InputKind::DatetimeLocal),
        "time" => (TsType::String, InputKind::Time),
        "text" | "longtext" | "mediumtext" => (TsType::String, InputKind::Textarea),
        "json" => (TsType::Object, InputKind::Textarea),
        _ => (TsType::String, InputKind::Text),
    };
    ColumnTypeMapping { ts_type, input }
}

/// Default validation rule string for an input kind
pub fn default_validation(input: InputKind) -> &'static str {
    match input {
        InputKind::Number => "required|numeric",
        InputKind::Checkbox => "boolean",
        InputKind::Date | InputKind::DatetimeLocal => "required|date",
        InputKind::Email => "required|email",
        InputKind::Textarea => "nullable|string",
        _ => "required|string|max:255",
    }
}

/// TypeScript type for a storage column type (the type half of [`map_db_type`])
pub fn ts_type(db_type: &str) -> TsType {
    map_db_type(db_type).ts_type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_db_type_table() {
        assert_eq!(
            map_db_type("integer"),
            ColumnTypeMapping {
                ts_type: TsType::Number,
                input: InputKind::Number
            }
        );
        assert_eq!(map_db_type("bigint").input, InputKind::Number);
        assert_eq!(map_db_type("decimal").ts_type, TsType::Number);
        assert_eq!(map_db_type("boolean").input, InputKind::Checkbox);
        assert_eq!(map_db_type("boolean").ts_type, TsType::Boolean);
        assert_eq!(map_db_type("date").input, InputKind::Date);
        assert_eq!(map_db_type("datetime").input, InputKind::DatetimeLocal);
        assert_eq!(map_db_type("timestamp").input, InputKind::DatetimeLocal);
        assert_eq!(map_db_type("time").input, InputKind::Time);
        assert_eq!(map_db_type("text").input, InputKind::Textarea);
        assert_eq!(map_db_type("json").ts_type, TsType::Object);
        assert_eq!(map_db_type("json").input, InputKind::Textarea);
    }

    #[test]
    fn test_map_db_type_is_total() {
        // Unknown and degenerate inputs always yield the text fallback.
        for weird in ["", "varchar", "VARCHAR", "Integer", "uuid", "geometry", "💥"] {
            let mapping = map_db_type(weird);
            assert_eq!(mapping.ts_type, TsType::String);
            assert_eq!(mapping.input, InputKind::Text);
        }
    }

    #[test]
    fn test_map_db_type_is_case_sensitive() {
        assert_eq!(map_db_type("BIGINT").input, InputKind::Text);
        assert_eq!(map_db_type("bigint").input, InputKind::Number);
    }

    #[test]
    fn test_default_validation_table() {
        assert_eq!(default_validation(InputKind::Number), "required|numeric");
        assert_eq!(default_validation(InputKind::Checkbox), "boolean");
        assert_eq!(default_validation(InputKind::Date), "required|date");
        assert_eq!(default_validation(InputKind::DatetimeLocal), "required|date");
        assert_eq!(default_validation(InputKind::Email), "required|email");
        assert_eq!(default_validation(InputKind::Textarea), "nullable|string");
        assert_eq!(default_validation(InputKind::Text), "required|string|max:255");
        assert_eq!(default_validation(InputKind::Select), "required|string|max:255");
    }

    #[test]
    fn test_mappers_are_idempotent() {
        assert_eq!(map_db_type("datetime"), map_db_type("datetime"));
        assert_eq!(
            default_validation(InputKind::Textarea),
            default_validation(InputKind::Textarea)
        );
        assert_eq!(ts_type("bigint"), ts_type("bigint"));
    }

    #[test]
    fn test_ts_type_convenience() {
        assert_eq!(ts_type("boolean"), TsType::Boolean);
        assert_eq!(ts_type("varchar"), TsType::String);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&InputKind::DatetimeLocal).unwrap(),
            "\"datetime-local\""
        );
        assert_eq!(
            serde_json::to_string(&InputKind::RelationshipSelect).unwrap(),
            "\"relationship-select\""
        );
        assert_eq!(serde_json::to_string(&TsType::Number).unwrap(), "\"number\"");
    }
}
