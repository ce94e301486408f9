//! Levenberg-Marquardt style damping with a block-diagonal matrix
//!
//! Builds a small Jacobian, derives the Jacobi scaling from its column
//! norms and forms the block-diagonal damping term `sqrt(mu) * D`.

use blocksparse::{BlockSparseMatrix, BlockStructureBuilder, EngineConfig};

fn main() -> blocksparse::Result<()> {
    let column_block_sizes = [2, 3];
    let structure = BlockStructureBuilder::new(&column_block_sizes)?
        .with_row(2, &[0, 1])?
        .with_row(1, &[1])?
        .build();

    let mut jacobian = BlockSparseMatrix::<f64>::new_with_config(structure, EngineConfig::serial())?;
    for (k, v) in jacobian.values_mut().iter_mut().enumerate() {
        *v = (k + 1) as f64;
    }
    println!(
        "Jacobian: {} x {} with {} stored values",
        jacobian.num_rows(),
        jacobian.num_cols(),
        jacobian.num_nonzeros()
    );

    let mut norms = vec![0.0; jacobian.num_cols()];
    jacobian.squared_column_norm(&mut norms);
    let scale: Vec<f64> = norms.iter().map(|n| 1.0 / (1.0 + n.sqrt())).collect();
    jacobian.scale_columns(&scale);
    println!("Column scaling: {scale:.4?}");

    let mu: f64 = 1e-2;
    let diagonal: Vec<f64> = norms.iter().map(|n| (mu * n).sqrt()).collect();
    let positions = jacobian.block_structure().column_block_positions.clone();
    let damping = BlockSparseMatrix::create_diagonal_matrix(&diagonal, &column_block_sizes, &positions)?;

    let x = vec![1.0; damping.num_cols()];
    let mut y = vec![0.0; damping.num_rows()];
    damping.right_multiply(&x, &mut y);
    println!("Damping applied to ones: {y:.4?}");

    println!("\nDamping matrix entries:");
    let mut stdout = std::io::stdout().lock();
    damping.write_text(&mut stdout)?;
    Ok(())
}
