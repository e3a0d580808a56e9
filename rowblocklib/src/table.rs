//! Table data model.
//!
//! A `Table` is an ordered list of rows of cells, where the first row is the
//! header. Rows are not required to be the same length as the header; how
//! mismatches are handled is decided at transposition time (see
//! [`RowPolicy`](crate::RowPolicy)).
//!
//! A [`Cell`] keeps its paragraphs separately. They are only joined with
//! [`PARAGRAPH_SEPARATOR`] when a cell is read as a single string, which is
//! what transposition does.

use serde::{Deserialize, Serialize};

/// Separator placed between the paragraphs of a multi-paragraph cell.
pub const PARAGRAPH_SEPARATOR: &str = "<br>";

/// One table cell: its paragraphs, in order.
///
/// Serialized as a string when the cell has exactly one paragraph and as an
/// array of strings otherwise. Deserializes from a string, an array of
/// strings, or `null` (an empty cell).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CellRepr", into = "CellRepr")]
pub struct Cell {
    paragraphs: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Text(String),
    Paragraphs(Vec<String>),
    Empty,
}

impl From<CellRepr> for Cell {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Text(text) => Cell::from(text),
            CellRepr::Paragraphs(paragraphs) => Cell::new(paragraphs),
            CellRepr::Empty => Cell::default(),
        }
    }
}

impl From<Cell> for CellRepr {
    fn from(mut cell: Cell) -> Self {
        if cell.paragraphs.len() == 1 {
            CellRepr::Text(cell.paragraphs.remove(0))
        } else {
            CellRepr::Paragraphs(cell.paragraphs)
        }
    }
}

impl Cell {
    /// Create a cell from its paragraphs.
    pub fn new(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }

    /// The cell's paragraphs, unjoined.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// The cell as one string, paragraphs joined with `<br>`.
    pub fn text(&self) -> String {
        join_paragraphs(&self.paragraphs)
    }

    /// True when no paragraph has any text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(String::is_empty)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(vec![text])
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// Compares the joined text.
impl PartialEq<str> for Cell {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

/// One table row: cells in column order.
pub type Row = Vec<Cell>;

/// A header row followed by zero or more data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows. The first row is the header.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a table from anything iterable as rows of cells or strings.
    ///
    /// ```rust
    /// use rowblocklib::Table;
    ///
    /// let table = Table::from_rows([["name", "qty"], ["bolt", "4"]]);
    /// assert_eq!(table.header().unwrap(), ["name", "qty"]);
    /// assert_eq!(table.data_rows().len(), 1);
    /// ```
    pub fn from_rows<I, R, C>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The header row, if the table has any rows at all.
    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header. Empty for empty and header-only tables.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when there is a header and at least one data row.
    pub fn has_data(&self) -> bool {
        self.rows.len() >= 2
    }

    /// Non-empty paragraphs of every cell, in row-major order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flatten()
            .flat_map(Cell::paragraphs)
            .map(String::as_str)
            .filter(|paragraph| !paragraph.is_empty())
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Join the paragraphs of one cell into a single cell string.
pub fn join_paragraphs<I, S>(paragraphs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, paragraph) in paragraphs.into_iter().enumerate() {
        if i > 0 {
            out.push_str(PARAGRAPH_SEPARATOR);
        }
        out.push_str(paragraph.as_ref());
    }
    out
}
