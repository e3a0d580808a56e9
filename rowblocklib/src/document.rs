//! Whole-document flattening.
//!
//! An extracted document body is an ordered mix of text and tables. Flattening
//! turns it into a list of paragraphs:
//!
//! - text paragraphs pass through (empty ones are dropped)
//! - tables with data rows become one rendered block per row
//! - tables without data rows are layout tables and contribute each paragraph
//!   of each cell as a paragraph of its own

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::{BlockRenderer, BLOCK_SEPARATOR};
use crate::transpose::{transpose_with, TransposeOptions};
use crate::{Block, Table};

/// One top-level element of a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// Plain paragraphs outside any table
    Text(Vec<String>),
    /// An extracted table, header first
    Table(Table),
}

/// An extracted document body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub body: Vec<Element>,
}

impl Document {
    pub fn new(body: Vec<Element>) -> Self {
        Self { body }
    }

    /// Tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|element| match element {
            Element::Table(table) => Some(table),
            Element::Text(_) => None,
        })
    }
}

impl From<Table> for Document {
    fn from(table: Table) -> Self {
        Self::new(vec![Element::Table(table)])
    }
}

/// Flatten a document into paragraphs.
///
/// Fails only if `options` uses the strict policy and some table has a
/// ragged row.
pub fn paragraphs(
    document: &Document,
    options: TransposeOptions,
    renderer: &BlockRenderer,
) -> crate::Result<Vec<String>> {
    paragraphs_with(document, options, |block| renderer.render(block))
}

/// Like [`paragraphs`], with a caller-supplied block renderer.
pub fn paragraphs_with<F>(
    document: &Document,
    options: TransposeOptions,
    render_block: F,
) -> crate::Result<Vec<String>>
where
    F: Fn(&Block) -> String,
{
    let mut out = Vec::new();

    for element in &document.body {
        match element {
            Element::Text(paras) => {
                out.extend(paras.iter().filter(|p| !p.is_empty()).cloned());
            }
            Element::Table(table) if table.has_data() => {
                let blocks = transpose_with(table, options)?;
                out.extend(blocks.map(|block| render_block(&block)));
            }
            Element::Table(table) => {
                debug!(rows = table.len(), "table has no data rows, keeping as text");
                out.extend(table.paragraphs().map(str::to_string));
            }
        }
    }

    debug!(
        elements = document.body.len(),
        paragraphs = out.len(),
        "flattened document"
    );
    Ok(out)
}

/// Flatten a document into a single string, paragraphs separated by a blank
/// line.
pub fn flatten(
    document: &Document,
    options: TransposeOptions,
    renderer: &BlockRenderer,
) -> crate::Result<String> {
    Ok(paragraphs(document, options, renderer)?.join(BLOCK_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowPolicy;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Document {
        Document::new(vec![
            Element::Text(strings(&["Intro", ""])),
            Element::Table(Table::from_rows([["k", "v"], ["a", "1"], ["b", "2"]])),
            Element::Table(Table::from_rows([["Layout cell", ""]])),
            Element::Text(strings(&["Outro"])),
        ])
    }

    #[test]
    fn test_paragraphs_mix_text_and_tables() {
        let paras = paragraphs(&sample(), TransposeOptions::new(), &BlockRenderer::default())
            .unwrap();

        assert_eq!(
            paras,
            [
                "Intro",
                "--------------------\nk: a\nv: 1\n--------------------",
                "--------------------\nk: b\nv: 2\n--------------------",
                "Layout cell",
                "Outro",
            ]
        );
    }

    #[test]
    fn test_empty_table_contributes_nothing() {
        let doc = Document::from(Table::default());
        let paras = paragraphs(&doc, TransposeOptions::new(), &BlockRenderer::default()).unwrap();
        assert!(paras.is_empty());
    }

    #[test]
    fn test_flatten_joins_with_blank_line() {
        let doc = Document::new(vec![Element::Text(strings(&["one", "two"]))]);
        let text = flatten(&doc, TransposeOptions::new(), &BlockRenderer::default()).unwrap();
        assert_eq!(text, "one\n\ntwo");
    }

    #[test]
    fn test_strict_policy_propagates() {
        let doc = Document::from(Table::from_rows(vec![vec!["a", "b"], vec!["1"]]));
        let options = TransposeOptions::new().policy(RowPolicy::Strict);
        assert!(paragraphs(&doc, options, &BlockRenderer::default()).is_err());
    }

    #[test]
    fn test_paragraphs_with_custom_renderer() {
        let paras = paragraphs_with(&sample(), TransposeOptions::new(), |block| {
            format!("{} pairs", block.len())
        })
        .unwrap();
        assert_eq!(paras, ["Intro", "2 pairs", "2 pairs", "Layout cell", "Outro"]);
    }

    #[test]
    fn test_layout_table_keeps_cell_paragraphs_apart() {
        let doc = crate::parse_input(
            r#"{"body": [{"table": [[["first para", "second para"], "x"]]}]}"#,
        )
        .unwrap();
        let paras = paragraphs(&doc, TransposeOptions::new(), &BlockRenderer::default()).unwrap();
        assert_eq!(paras, ["first para", "second para", "x"]);
    }

    #[test]
    fn test_deserialized_document_matches_parsed() {
        let json = r#"{"body": [{"text": ["Intro"]}, {"table": [["h"], [null], [["a", "b"]]]}]}"#;
        let derived: Document = serde_json::from_str(json).unwrap();
        assert_eq!(derived, crate::parse_document(json).unwrap());
    }

    #[test]
    fn test_tables_iterates_in_order() {
        let doc = sample();
        let tables: Vec<&Table> = doc.tables().collect();
        assert_eq!(tables.len(), 2);
        assert!(tables[0].has_data());
        assert!(!tables[1].has_data());
    }
}
