//! Output rendering for the CLI.

use console::Style;
use rowblocklib::{paragraphs_with, transpose_with, Block, BlockRenderer, Document, TransposeOptions};
use std::str::FromStr;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Rendered blocks and paragraphs separated by blank lines
    #[default]
    Text,
    /// Transposed blocks of every table as a JSON array
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

/// Label style used when writing to a terminal
fn label_style() -> Style {
    Style::new().bold()
}

/// Render a document as text.
///
/// With `styled`, labels are bolded. `console` drops the styling by itself
/// when stdout is not a terminal.
pub fn render_text(
    document: &Document,
    options: TransposeOptions,
    renderer: &BlockRenderer,
    styled: bool,
) -> rowblocklib::Result<String> {
    let paras = if styled {
        let style = label_style();
        paragraphs_with(document, options, |block| {
            renderer.render_with(block, |label| style.apply_to(label).to_string())
        })?
    } else {
        paragraphs_with(document, options, |block| renderer.render(block))?
    };
    Ok(paras.join(rowblocklib::BLOCK_SEPARATOR))
}

/// Render the blocks of every table in the document as pretty JSON.
pub fn render_json(document: &Document, options: TransposeOptions) -> anyhow::Result<String> {
    let mut blocks: Vec<Block> = Vec::new();
    for table in document.tables() {
        blocks.extend(transpose_with(table, options)?);
    }
    Ok(serde_json::to_string_pretty(&blocks)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowblocklib::{RowPolicy, Table};

    fn doc() -> Document {
        Document::from(Table::from_rows([["k", "v"], ["a", "1"]]))
    }

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!("json".parse::<OutputMode>(), Ok(OutputMode::Json));
        assert_eq!("TEXT".parse::<OutputMode>(), Ok(OutputMode::Text));
        assert!("csv".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_render_text_plain() {
        let text = render_text(&doc(), TransposeOptions::new(), &BlockRenderer::default(), false)
            .unwrap();
        assert_eq!(text, "--------------------\nk: a\nv: 1\n--------------------");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&doc(), TransposeOptions::new()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["pairs"][0]["label"], "k");
        assert_eq!(parsed[0]["pairs"][1]["value"], "1");
    }

    #[test]
    fn test_render_json_strict_error() {
        let doc = Document::from(Table::from_rows(vec![vec!["k", "v"], vec!["a"]]));
        let options = TransposeOptions::new().policy(RowPolicy::Strict);
        assert!(render_json(&doc, options).is_err());
    }
}
