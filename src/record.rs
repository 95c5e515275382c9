/// Best-effort field extraction from a source mapping.
///
/// Missing keys fall back to defaults (`0` for ids, `""` for text); an
/// explicit YAML `null` is kept as `None` and stored as SQL `NULL`. Scalars
/// are stored in their text form. Anything that cannot be
/// stored in a column is reported as [`ConvertError::InvalidRecord`].
use serde_yaml::{Mapping, Value};

use crate::db::models::{Definition, Entry};
use crate::error::{ConvertError, Result};
use crate::source::kind_of;

/// A fully extracted source record: one entry and its definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub entry: Entry,
    pub definitions: Vec<Definition>,
}

impl SourceRecord {
    pub fn from_mapping(map: &Mapping) -> Result<Self> {
        let entry = Entry {
            id: int_field(map, "id")?,
            head: text_field(map, "head")?,
            entry: text_field(map, "entry")?,
            phone: text_field(map, "phone")?,
            origin: text_field(map, "origin")?,
            info: text_field(map, "info")?,
        };

        let definitions = match map.get("defs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(definition_from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(ConvertError::InvalidRecord {
                    field: "defs",
                    reason: format!("expected a sequence, found {}", kind_of(other)),
                });
            }
        };

        Ok(Self { entry, definitions })
    }
}

/// Returns the raw `id` of a mapping for diagnostics, or `"unknown"`.
pub fn display_id(map: &Mapping) -> String {
    match map.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "unknown".to_string(),
    }
}

fn definition_from_value(value: &Value) -> Result<Definition> {
    let Value::Mapping(map) = value else {
        return Err(ConvertError::InvalidRecord {
            field: "defs",
            reason: format!("definition is not a mapping (found {})", kind_of(value)),
        });
    };

    Ok(Definition {
        def_id: int_field(map, "id")?,
        entry: text_field(map, "entry")?,
        def_type: text_field(map, "type")?,
    })
}

fn int_field(map: &Mapping, field: &'static str) -> Result<Option<i64>> {
    match map.get(field) {
        None => Ok(Some(0)),
        Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ConvertError::InvalidRecord {
                field,
                reason: format!("{n} is not an integer"),
            }),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ConvertError::InvalidRecord {
                field,
                reason: format!("{s:?} is not an integer"),
            }),
        Some(other) => Err(ConvertError::InvalidRecord {
            field,
            reason: format!("expected an integer, found {}", kind_of(other)),
        }),
    }
}

fn text_field(map: &Mapping, field: &'static str) -> Result<Option<String>> {
    match map.get(field) {
        None => Ok(Some(String::new())),
        Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(ConvertError::InvalidRecord {
            field,
            reason: format!("expected text, found {}", kind_of(other)),
        }),
    }
}
