//! # rowblocklib
//!
//! Reprint document tables as labeled blocks, one block per data row.
//!
//! ## Overview
//!
//! Tables pulled out of documents are hard to read as flat text once the
//! column layout is gone. This library transposes them: the first row is the
//! header, and every following row becomes a block of `header: value` lines.
//!
//! ```text
//! --------------------
//! header_a: datum_a1
//! header_b: datum_b1
//! header_c: datum_c1
//! --------------------
//! ```
//!
//! ## Pipeline
//!
//! 1. **Load**: JSON from a document extractor becomes a [`Table`] or a
//!    [`Document`] ([`source`])
//! 2. **Transpose**: each data row becomes a [`Block`] of [`Pair`]s
//!    ([`transpose`](mod@transpose))
//! 3. **Render**: blocks become text ([`render`](mod@render)), or a whole
//!    document is flattened to paragraphs ([`document`])
//!
//! Everything is pure: no printing, no global state.
//!
//! ## Example
//!
//! ```rust
//! use rowblocklib::{parse_table, render, transpose};
//!
//! let table = parse_table(r#"[["part", "qty"], ["bolt", "4"]]"#).unwrap();
//! let text: Vec<String> = transpose(&table).map(|b| render(&b)).collect();
//!
//! assert_eq!(text, ["--------------------\npart: bolt\nqty: 4\n--------------------"]);
//! ```

pub mod document;
pub mod error;
pub mod render;
pub mod source;
pub mod table;
pub mod transpose;

pub use document::{flatten, paragraphs, paragraphs_with, Document, Element};
pub use error::RowblockError;
pub use render::{render, BlockRenderer, RenderOptions, BLOCK_SEPARATOR};
pub use source::{load_input, parse_document, parse_input, parse_table, read_input};
pub use table::{join_paragraphs, Cell, Row, Table, PARAGRAPH_SEPARATOR};
pub use transpose::{transpose, transpose_with, Block, Blocks, Pair, RowPolicy, TransposeOptions};

/// Result type for rowblocklib operations
pub type Result<T> = std::result::Result<T, RowblockError>;
