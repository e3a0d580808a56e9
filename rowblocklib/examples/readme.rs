//! Print the README table in transposed form.

use rowblocklib::{transpose, BlockRenderer, Table};

fn main() {
    let table = Table::from_rows([
        ["header_a", "header_b", "header_c"],
        ["datum_a1", "datum_b1", "datum_c1"],
        ["datum_a2", "datum_b2", "datum_c2"],
        ["datum_a3", "datum_b3", "datum_c3"],
    ]);

    let blocks: Vec<_> = transpose(&table).collect();
    println!("{}", BlockRenderer::default().render_all(&blocks));
}
