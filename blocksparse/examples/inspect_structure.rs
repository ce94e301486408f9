//! Inspect a block structure stored as JSON
//!
//! ```text
//! cargo run --features cli --example inspect_structure -- structure.json --dump entries.txt
//! ```

use blocksparse::{read_structure_json, BlockSparseMatrix, EngineConfig};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Print the shape of a block structure and optionally dump it as text")]
struct Cli {
    /// JSON file holding a compressed row block structure
    structure: std::path::PathBuf,

    /// Fill every stored value with this constant before dumping
    #[arg(long, default_value_t = 1.0)]
    fill: f64,

    /// Write `row col value` lines to this file
    #[arg(long)]
    dump: Option<std::path::PathBuf>,

    /// Run matrix operations serially
    #[arg(long)]
    serial: bool,
}

fn main() -> blocksparse::Result<()> {
    let cli = Cli::parse();

    let structure = read_structure_json(&cli.structure)?;
    let duplicates = structure.duplicate_cells();
    let config = EngineConfig::default().with_parallel(!cli.serial);
    let mut matrix = BlockSparseMatrix::<f64>::new_with_config(structure, config)?;
    matrix.values_mut().fill(cli.fill);

    println!("Block structure: {}", cli.structure.display());
    println!("   Row-blocks:    {}", matrix.num_row_blocks());
    println!("   Column-blocks: {}", matrix.num_col_blocks());
    println!("   Cells:         {}", matrix.block_structure().num_cells());
    println!("   Duplicates:    {duplicates}");
    println!("   Shape:         {} x {}", matrix.num_rows(), matrix.num_cols());
    println!("   Stored values: {}", matrix.num_nonzeros());

    let mut norms = vec![0.0; matrix.num_cols()];
    matrix.squared_column_norm(&mut norms);
    let empty_columns = norms.iter().filter(|&&n| n == 0.0).count();
    println!("   Empty columns: {empty_columns}");

    if let Some(path) = &cli.dump {
        matrix.to_text_file(path)?;
        println!("Wrote {} entries to {}", matrix.num_nonzeros(), path.display());
    }

    Ok(())
}
