//! JSON persistence of block structures
//!
//! Only the pattern is stored; values are not part of the document.
//! Loaded structures go through the same validation as constructed ones.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use blocksparse_core::{validate_structure, CompressedRowBlockStructure, MatrixElement};

use crate::{BlockSparseMatrix, EngineConfig, Result};

/// Serialize a block structure to a JSON string
pub fn structure_to_json(structure: &CompressedRowBlockStructure) -> Result<String> {
    Ok(serde_json::to_string(structure)?)
}

/// Parse and validate a block structure from a JSON string
pub fn structure_from_json(json: &str) -> Result<CompressedRowBlockStructure> {
    let structure: CompressedRowBlockStructure = serde_json::from_str(json)?;
    validate_structure(&structure)?;
    Ok(structure)
}

/// Write a block structure as pretty-printed JSON to `path`
pub fn write_structure_json<P: AsRef<Path>>(
    structure: &CompressedRowBlockStructure,
    path: P,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, structure)?;
    writer.flush()?;
    Ok(())
}

/// Read and validate a block structure from a JSON file
pub fn read_structure_json<P: AsRef<Path>>(path: P) -> Result<CompressedRowBlockStructure> {
    let reader = BufReader::new(File::open(path)?);
    let structure: CompressedRowBlockStructure = serde_json::from_reader(reader)?;
    validate_structure(&structure)?;
    Ok(structure)
}

impl<T: MatrixElement> BlockSparseMatrix<T> {
    /// Zero-valued matrix over a structure read from JSON
    pub fn from_structure_json(json: &str, config: EngineConfig) -> Result<Self> {
        let structure = structure_from_json(json)?;
        Ok(Self::new_with_config(structure, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use blocksparse_core::{BlockSparseError, BlockStructureBuilder};

    fn sample_structure() -> CompressedRowBlockStructure {
        BlockStructureBuilder::new(&[2, 3])
            .and_then(|b| b.with_row(1, &[0, 1]))
            .and_then(|b| b.with_row(2, &[1]))
            .map(|b| b.build())
            .unwrap()
    }

    #[test]
    fn test_structure_json_roundtrip() {
        let structure = sample_structure();
        let json = structure_to_json(&structure).unwrap();
        assert_eq!(structure_from_json(&json).unwrap(), structure);
    }

    #[test]
    fn test_structure_json_rejects_invalid_pattern() {
        let mut structure = sample_structure();
        structure.rows[1].cells[0].value_offset = 0;
        let json = structure_to_json(&structure).unwrap();
        match structure_from_json(&json) {
            Err(Error::Core(BlockSparseError::CellOffsetMismatch)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_structure_json_rejects_garbage() {
        assert!(matches!(structure_from_json("{ not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_matrix_from_structure_json() {
        let json = structure_to_json(&sample_structure()).unwrap();
        let m = BlockSparseMatrix::<f32>::from_structure_json(&json, EngineConfig::serial())
            .unwrap();
        assert_eq!((m.num_rows(), m.num_cols(), m.num_nonzeros()), (3, 5, 11));
        assert!(m.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_structure_json_file() {
        let path = std::env::temp_dir().join("blocksparse_structure_test.json");
        write_structure_json(&sample_structure(), &path).unwrap();
        let loaded = read_structure_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, sample_structure());
    }
}
