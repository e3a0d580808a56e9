//! Plain-text rendering of blocks.
//!
//! A rendered block is a border line, one `label: value` line per pair, and a
//! closing border line. Blocks are separated by a blank line.

use crate::Block;

/// Separator placed between consecutive rendered blocks or paragraphs.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Border appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Character repeated to draw the border
    pub border_char: char,
    /// Number of border characters
    pub border_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            border_char: '-',
            border_width: 20,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the border character
    pub fn border_char(mut self, c: char) -> Self {
        self.border_char = c;
        self
    }

    /// Builder: set the border width
    pub fn border_width(mut self, width: usize) -> Self {
        self.border_width = width;
        self
    }
}

/// Renders blocks to text. Holds the pre-built border line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRenderer {
    border: String,
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl BlockRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            border: options.border_char.to_string().repeat(options.border_width),
        }
    }

    /// The border line, without a newline.
    pub fn border(&self) -> &str {
        &self.border
    }

    /// Render one block. No trailing newline.
    pub fn render(&self, block: &Block) -> String {
        self.render_with(block, |label| label.to_string())
    }

    /// Render one block, passing each label through `fmt_label` first.
    ///
    /// Used to decorate labels (e.g. terminal styling) without changing the
    /// layout.
    pub fn render_with<F>(&self, block: &Block, fmt_label: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut lines = Vec::with_capacity(block.len() + 2);
        lines.push(self.border.clone());
        for pair in &block.pairs {
            lines.push(format!("{}: {}", fmt_label(&pair.label), pair.value));
        }
        lines.push(self.border.clone());
        lines.join("\n")
    }

    /// Render blocks and join them with a blank line.
    pub fn render_all<'a, I>(&self, blocks: I) -> String
    where
        I: IntoIterator<Item = &'a Block>,
    {
        blocks
            .into_iter()
            .map(|block| self.render(block))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }
}

/// Render one block with the default 20-dash border.
pub fn render(block: &Block) -> String {
    BlockRenderer::default().render(block)
}
