//! Conversions of a block-sparse matrix to other representations
//!
//! Dense and coordinate forms feed small-scale diagnostics and fallback
//! solvers. The text form is for visual inspection only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use blocksparse_core::MatrixElement;
use ndarray::Array2;

use super::BlockSparseMatrix;
use crate::compressed_row::CompressedRowSparseMatrix;
use crate::triplet::{write_text_line, TripletSparseMatrix};

impl<T: MatrixElement> BlockSparseMatrix<T> {
    /// Dense `num_rows x num_cols` copy of the matrix
    ///
    /// Blocks are added, not written, so repeated (row-block, column-block)
    /// pairs sum.
    pub fn to_dense_matrix(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_cols), T::ZERO);
        for (row, col, value) in self.entries() {
            dense[[row, col]] += value;
        }
        dense
    }

    /// One (row, col, value) triple per stored scalar
    ///
    /// Triples come in structure order: row-blocks in order, cells in row
    /// order, row-major inside each cell. Entry `k` holds `values()[k]`.
    pub fn to_triplet_sparse_matrix(&self) -> TripletSparseMatrix<T> {
        let mut triplets =
            TripletSparseMatrix::with_capacity(self.num_rows, self.num_cols, self.num_nonzeros);
        for (row, col, value) in self.entries() {
            triplets.push(row, col, value);
        }
        triplets
    }

    /// Compressed sparse row copy of the matrix
    ///
    /// Within a scalar row, column indices follow cell order and are not
    /// sorted; repeated pairs are kept as separate entries.
    pub fn to_compressed_row_sparse_matrix(&self) -> CompressedRowSparseMatrix<T> {
        let mut row_ptr = Vec::with_capacity(self.num_rows + 1);
        let mut col_indices = Vec::with_capacity(self.num_nonzeros);
        let mut values = Vec::with_capacity(self.num_nonzeros);
        row_ptr.push(0);

        let bs = &self.block_structure;
        for row in &bs.rows {
            for r in 0..row.block.size {
                for cell in &row.cells {
                    let col_block = bs.column_block(cell.column_block_id);
                    let start = cell.value_offset + r * col_block.size;
                    col_indices.extend(col_block.range());
                    values.extend_from_slice(&self.values[start..start + col_block.size]);
                }
                row_ptr.push(col_indices.len());
            }
        }

        CompressedRowSparseMatrix::from_parts_unchecked(
            self.num_rows,
            self.num_cols,
            row_ptr,
            col_indices,
            values,
        )
    }

    /// Iterate (row, col, value) for every stored scalar in structure order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.cell_blocks().flat_map(move |cell| {
            let row_position = cell.row_block.position;
            let col_position = cell.col_block.position;
            let cols = cell.col_block.size;
            self.values[cell.values]
                .iter()
                .enumerate()
                .map(move |(k, &value)| (row_position + k / cols, col_position + k % cols, value))
        })
    }

    /// Write `row col value`, one line per stored scalar, in structure order
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (row, col, value) in self.entries() {
            write_text_line(writer, row, col, value)?;
        }
        Ok(())
    }

    /// Write the text form to a new file at `path`
    pub fn to_text_file<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_text(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::block_sparse_matrix::tests::sample_matrix;
    use crate::EngineConfig;
    use ndarray::array;

    #[test]
    fn test_to_dense_matrix() {
        let m = sample_matrix(EngineConfig::serial());
        let expected = array![
            [1.0, 2.0, 3.0, 4.0, 5.0],
            [6.0, 7.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 8.0, 9.0, 10.0],
            [0.0, 0.0, 11.0, 12.0, 13.0],
        ];
        assert_eq!(m.to_dense_matrix(), expected);
    }

    #[test]
    fn test_to_triplet_order() {
        let m = sample_matrix(EngineConfig::serial());
        let t = m.to_triplet_sparse_matrix();
        assert_eq!(t.num_nonzeros(), 13);
        assert_eq!((t.num_rows(), t.num_cols()), (4, 5));
        assert_eq!(&t.rows()[..7], &[0, 0, 0, 0, 0, 1, 1]);
        assert_eq!(&t.cols()[..7], &[0, 1, 2, 3, 4, 0, 1]);
        assert_eq!(&t.rows()[7..], &[2, 2, 2, 3, 3, 3]);
        assert_eq!(&t.cols()[7..], &[2, 3, 4, 2, 3, 4]);
        assert_eq!(t.values(), m.values());
    }

    #[test]
    fn test_to_compressed_row() {
        let m = sample_matrix(EngineConfig::serial());
        let crs = m.to_compressed_row_sparse_matrix();
        assert_eq!(crs.row_ptr(), &[0, 5, 7, 10, 13]);
        assert_eq!(crs.col_indices(), &[0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 2, 3, 4]);
        assert_eq!(crs.to_dense(), m.to_dense_matrix());
    }

    #[test]
    fn test_write_text() {
        let m = sample_matrix(EngineConfig::serial());
        let mut out = Vec::new();
        m.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "         0          0          1.000000");
        assert_eq!(lines[12], "         3          4         13.000000");
        for line in &lines {
            assert_eq!(line.split_whitespace().count(), 3);
        }
    }
}
