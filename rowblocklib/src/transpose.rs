//! Table transposition: one labeled block per data row.
//!
//! Given a header row and data rows, each data row becomes a [`Block`] of
//! `(header[i], row[i])` pairs in column order. Blocks are produced lazily by
//! [`Blocks`], which borrows the table and never mutates it.
//!
//! ## Example
//!
//! ```rust
//! use rowblocklib::{transpose, Table};
//!
//! let table = Table::from_rows([
//!     ["part", "qty"],
//!     ["bolt", "4"],
//!     ["nut", "8"],
//! ]);
//!
//! let blocks: Vec<_> = transpose(&table).collect();
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[1].pairs[0].label, "part");
//! assert_eq!(blocks[1].pairs[0].value, "nut");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, trace};

use crate::{Cell, Row, RowblockError, Table};

/// One `label: value` pair of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    /// Column header
    pub label: String,
    /// Cell value from the data row
    pub value: String,
}

impl Pair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The transposed form of one data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Pairs in column order
    pub pairs: Vec<Pair>,
}

impl Block {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// How to pair a data row whose length differs from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Pair up to the shorter of the two; extra labels or values are dropped
    #[default]
    Truncate,
    /// Pair up to the longer of the two; the missing side becomes ""
    Pad,
    /// Reject rows that differ in length from the header
    Strict,
}

impl FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(RowPolicy::Truncate),
            "pad" => Ok(RowPolicy::Pad),
            "strict" => Ok(RowPolicy::Strict),
            _ => Err(format!("Unknown row policy: {}", s)),
        }
    }
}

/// Options for [`transpose_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransposeOptions {
    /// Ragged-row handling
    pub policy: RowPolicy,
}

impl TransposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the ragged-row policy
    pub fn policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Lazy iterator over the blocks of a table.
///
/// The table is only borrowed, so a fresh pass is another call to
/// [`transpose`] on the same table.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    header: &'a [Cell],
    rows: std::slice::Iter<'a, Row>,
    policy: RowPolicy,
}

impl<'a> Blocks<'a> {
    fn new(table: &'a Table, policy: RowPolicy) -> Self {
        // Header-only and empty tables have no data rows to iterate.
        let header = table.header().unwrap_or_default();
        Self {
            header,
            rows: table.data_rows().iter(),
            policy,
        }
    }
}

impl Iterator for Blocks<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let row = self.rows.next()?;
        let block = pair_row(self.header, row, self.policy);
        trace!(pairs = block.len(), "transposed row");
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Blocks<'_> {}

impl std::iter::FusedIterator for Blocks<'_> {}

/// Pair a single row with the header under the given policy.
fn pair_row(header: &[Cell], row: &[Cell], policy: RowPolicy) -> Block {
    let width = match policy {
        RowPolicy::Truncate | RowPolicy::Strict => header.len().min(row.len()),
        RowPolicy::Pad => header.len().max(row.len()),
    };

    if header.len() != row.len() && policy == RowPolicy::Truncate {
        debug!(
            header = header.len(),
            row = row.len(),
            "truncating ragged row to {} pairs",
            width
        );
    }

    let pairs = (0..width)
        .map(|i| Pair {
            label: header.get(i).map(Cell::text).unwrap_or_default(),
            value: row.get(i).map(Cell::text).unwrap_or_default(),
        })
        .collect();

    Block { pairs }
}

/// Transpose a table with the default (truncating) policy.
///
/// Yields one block per data row, in row order. Empty and header-only tables
/// yield nothing.
pub fn transpose(table: &Table) -> Blocks<'_> {
    Blocks::new(table, RowPolicy::Truncate)
}

/// Transpose a table with explicit options.
///
/// Under [`RowPolicy::Strict`] every data row is checked before any block is
/// produced, so the returned iterator itself never fails.
pub fn transpose_with(table: &Table, options: TransposeOptions) -> crate::Result<Blocks<'_>> {
    if options.policy == RowPolicy::Strict {
        let expected = table.header().map_or(0, <[Cell]>::len);
        if let Some((i, row)) = table
            .data_rows()
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            return Err(RowblockError::RaggedRow {
                row: i + 1,
                expected,
                found: row.len(),
            });
        }
    }

    debug!(
        rows = table.data_rows().len(),
        policy = ?options.policy,
        "transposing table"
    );
    Ok(Blocks::new(table, options.policy))
}
