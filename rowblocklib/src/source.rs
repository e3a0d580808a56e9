//! Input loading.
//!
//! Tables arrive as JSON exported by a document extractor:
//!
//! - a table is an array of rows, each row an array of cells
//! - a cell is a string, `null` (empty), or an array of paragraph strings
//!
//! Cells are read with [`Cell`]'s own `Deserialize` impl, so deserializing a
//! [`Table`] directly accepts exactly the same cells.
//! - a document is `{"body": [{"text": [..]}, {"table": [..]}, ..]}`
//!
//! Validation is strict: anything that is not a sequence of sequences of text
//! fails with [`RowblockError::InvalidInput`] naming where it went wrong.

use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::document::{Document, Element};
use crate::{Cell, Row, RowblockError, Table};

/// Parse a single table from JSON text.
pub fn parse_table(input: &str) -> crate::Result<Table> {
    let value: Value = serde_json::from_str(input)?;
    table_from_value(&value, "$")
}

/// Parse a document from JSON text.
pub fn parse_document(input: &str) -> crate::Result<Document> {
    let value: Value = serde_json::from_str(input)?;
    document_from_value(&value)
}

/// Parse either form: a top-level array is a single table, a top-level object
/// is a document.
pub fn parse_input(input: &str) -> crate::Result<Document> {
    let value: Value = serde_json::from_str(input)?;
    match &value {
        Value::Array(_) => Ok(Document::from(table_from_value(&value, "$")?)),
        Value::Object(_) => document_from_value(&value),
        other => Err(RowblockError::invalid(
            "$",
            format!("expected a table or a document, found {}", kind(other)),
        )),
    }
}

/// Read and parse input from any reader.
pub fn read_input<R: Read>(mut reader: R) -> crate::Result<Document> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse_input(&buf)
}

/// Read and parse input from a file.
pub fn load_input(path: impl AsRef<Path>) -> crate::Result<Document> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| RowblockError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "loaded input");
    parse_input(&text)
}

fn document_from_value(value: &Value) -> crate::Result<Document> {
    let body = value
        .as_object()
        .ok_or_else(|| RowblockError::invalid("$", "expected an object with a `body`"))?
        .get("body")
        .ok_or_else(|| RowblockError::invalid("$", "missing `body`"))?
        .as_array()
        .ok_or_else(|| RowblockError::invalid("body", "expected an array of elements"))?;

    let elements = body
        .iter()
        .enumerate()
        .map(|(i, element)| element_from_value(element, &format!("body[{i}]")))
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(Document::new(elements))
}

fn element_from_value(value: &Value, location: &str) -> crate::Result<Element> {
    let object = value.as_object().ok_or_else(|| {
        RowblockError::invalid(location, "expected an object with `text` or `table`")
    })?;

    match (object.get("text"), object.get("table")) {
        (Some(text), None) => {
            let location = format!("{location}.text");
            let paragraphs = text
                .as_array()
                .ok_or_else(|| RowblockError::invalid(&location, "expected an array of strings"))?
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    p.as_str().map(str::to_string).ok_or_else(|| {
                        RowblockError::invalid(
                            format!("{location}[{i}]"),
                            format!("expected a string, found {}", kind(p)),
                        )
                    })
                })
                .collect::<crate::Result<Vec<_>>>()?;
            Ok(Element::Text(paragraphs))
        }
        (None, Some(table)) => Ok(Element::Table(table_from_value(
            table,
            &format!("{location}.table"),
        )?)),
        (Some(_), Some(_)) => Err(RowblockError::invalid(
            location,
            "element has both `text` and `table`",
        )),
        (None, None) => Err(RowblockError::invalid(
            location,
            "element has neither `text` nor `table`",
        )),
    }
}

fn table_from_value(value: &Value, location: &str) -> crate::Result<Table> {
    let rows = value.as_array().ok_or_else(|| {
        RowblockError::invalid(
            location,
            format!("expected an array of rows, found {}", kind(value)),
        )
    })?;

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row_from_value(row, &format!("{location}[{i}]")))
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(Table::new(rows))
}

fn row_from_value(value: &Value, location: &str) -> crate::Result<Row> {
    let cells = value.as_array().ok_or_else(|| {
        RowblockError::invalid(
            location,
            format!("expected an array of cells, found {}", kind(value)),
        )
    })?;

    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| cell_from_value(cell, &format!("{location}[{i}]")))
        .collect()
}

fn cell_from_value(value: &Value, location: &str) -> crate::Result<Cell> {
    Cell::deserialize(value).map_err(|_| {
        let message = match value {
            Value::Array(_) => "expected an array of paragraph strings".to_string(),
            other => format!("expected a text cell, found {}", kind(other)),
        };
        RowblockError::invalid(location, message)
    })
}

/// Short JSON type name for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn location_of(err: RowblockError) -> String {
        match err {
            RowblockError::InvalidInput { location, .. } => location,
            other => panic!("expected InvalidInput, got {other}"),
        }
    }

    #[test]
    fn test_parse_table() {
        let table = parse_table(r#"[["h1", "h2"], ["a", "b"]]"#).unwrap();
        assert_eq!(table, Table::from_rows([["h1", "h2"], ["a", "b"]]));
    }

    #[test]
    fn test_parse_empty_table() {
        assert!(parse_table("[]").unwrap().is_empty());
    }

    #[test]
    fn test_paragraph_cells_are_joined() {
        let table = parse_table(r#"[["h"], [["first", "second"]], [null]]"#).unwrap();
        assert_eq!(table.data_rows()[0], ["first<br>second"]);
        assert_eq!(table.data_rows()[1], [""]);
    }

    #[test]
    fn test_agrees_with_derived_deserialize() {
        let json = r#"[["h"], [null], [["a", "b"]]]"#;
        let derived: Table = serde_json::from_str(json).unwrap();
        assert_eq!(parse_table(json).unwrap(), derived);
    }

    #[test]
    fn test_rejects_non_string_paragraph() {
        let err = parse_table(r#"[["h"], [["a", 1]]]"#).unwrap_err();
        assert_eq!(location_of(err), "$[1][0]");
    }

    #[test]
    fn test_rejects_non_sequence() {
        let err = parse_table(r#"{"a": 1}"#).unwrap_err();
        assert_eq!(location_of(err), "$");
    }

    #[test]
    fn test_rejects_row_that_is_not_an_array() {
        let err = parse_table(r#"[["h"], "oops"]"#).unwrap_err();
        assert_eq!(location_of(err), "$[1]");
    }

    #[test]
    fn test_rejects_numeric_cell() {
        let err = parse_table(r#"[["h"], [3]]"#).unwrap_err();
        assert_eq!(location_of(err), "$[1][0]");
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_table("[[").unwrap_err();
        assert!(matches!(err, RowblockError::Json(_)));
    }

    #[test]
    fn test_parse_document() {
        let doc = parse_document(
            r#"{"body": [{"text": ["Intro"]}, {"table": [["h"], ["v"]]}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.body,
            [
                Element::Text(vec!["Intro".to_string()]),
                Element::Table(Table::from_rows([["h"], ["v"]])),
            ]
        );
    }

    #[test]
    fn test_document_error_location() {
        let err = parse_document(r#"{"body": [{"text": []}, {"table": [["h"], [true]]}]}"#)
            .unwrap_err();
        assert_eq!(location_of(err), "body[1].table[1][0]");
    }

    #[test]
    fn test_element_needs_exactly_one_kind() {
        let err = parse_document(r#"{"body": [{}]}"#).unwrap_err();
        assert_eq!(location_of(err), "body[0]");
        let err = parse_document(r#"{"body": [{"text": [], "table": []}]}"#).unwrap_err();
        assert_eq!(location_of(err), "body[0]");
    }

    #[test]
    fn test_parse_input_detects_form() {
        let doc = parse_input(r#"[["h"], ["v"]]"#).unwrap();
        assert_eq!(doc.tables().count(), 1);

        let doc = parse_input(r#"{"body": []}"#).unwrap();
        assert!(doc.body.is_empty());

        let err = parse_input("42").unwrap_err();
        assert_eq!(location_of(err), "$");
    }

    #[test]
    fn test_read_input_from_reader() {
        let doc = read_input(r#"[["h"], ["v"]]"#.as_bytes()).unwrap();
        assert_eq!(doc.tables().count(), 1);
    }

    #[test]
    fn test_load_input_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, r#"[["h"], ["v"]]"#).unwrap();

        let doc = load_input(&path).unwrap();
        assert_eq!(doc.tables().next().unwrap().len(), 2);
    }

    #[test]
    fn test_load_input_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_input(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, RowblockError::FileRead { .. }));
    }
}
