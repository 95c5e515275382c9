/// Loader for the dictionary YAML dataset.
///
/// The file must hold a top-level sequence of mappings. Field extraction is
/// left to [`crate::record`]; this module only checks the document shape so
/// that a malformed file fails before the destination is touched.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::error::{ConvertError, Result};

/// Load the source file into an ordered list of record mappings.
pub fn load(path: &Path) -> Result<Vec<Mapping>> {
    info!("Loading YAML file: {}", path.display());

    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConvertError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let records = parse(&data).map_err(|reason| ConvertError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;

    info!("Loaded {} dictionary entries", records.len());
    Ok(records)
}

/// Parse YAML text into record mappings. An empty document yields no records.
pub fn parse(data: &str) -> std::result::Result<Vec<Mapping>, String> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }

    let doc: Value = serde_yaml::from_str(data).map_err(|e| e.to_string())?;

    let items = match doc {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        other => {
            return Err(format!(
                "expected a top-level sequence of entries, found {}",
                kind_of(&other)
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Mapping(m) => Ok(m),
            other => Err(format!(
                "entry #{} is not a mapping (found {})",
                i + 1,
                kind_of(&other)
            )),
        })
        .collect()
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence() {
        let yaml = r#"
- id: 1
  entry: ನಮಸ್ಕಾರ
  phone: namaskāra
  defs:
    - id: 1
      entry: greeting
      type: noun
- id: 2
  entry: ಮನೆ
"#;
        let records = parse(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("entry").and_then(Value::as_str),
            Some("ನಮಸ್ಕಾರ")
        );
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
        assert!(parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_sequence() {
        let err = parse("entry: ಮನೆ\nphone: mane\n").unwrap_err();
        assert!(err.contains("mapping"), "unexpected message: {err}");
    }

    #[test]
    fn test_parse_rejects_scalar_item() {
        let err = parse("- id: 1\n- just a string\n").unwrap_err();
        assert!(err.contains("entry #2"), "unexpected message: {err}");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse("- id: 1\n  entry: [unclosed\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound { .. }));
    }
}
