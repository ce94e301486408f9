//! Execution settings for block-sparse matrix operations

/// Configuration for how matrix operations are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Allow operations to run on the rayon thread pool
    pub parallel: bool,
    /// Row-block count below which operations always run serially
    pub min_parallel_row_blocks: usize,
}

impl EngineConfig {
    /// Default row-block threshold for parallel execution
    pub const DEFAULT_MIN_PARALLEL_ROW_BLOCKS: usize = 64;

    /// Config that never leaves the calling thread
    pub const fn serial() -> Self {
        Self {
            parallel: false,
            min_parallel_row_blocks: Self::DEFAULT_MIN_PARALLEL_ROW_BLOCKS,
        }
    }

    /// Enable or disable parallel execution
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the row-block threshold for parallel execution
    pub fn with_min_parallel_row_blocks(mut self, min_parallel_row_blocks: usize) -> Self {
        self.min_parallel_row_blocks = min_parallel_row_blocks;
        self
    }

    /// Whether a matrix with `num_row_blocks` row-blocks should run in parallel
    pub fn use_parallel(&self, num_row_blocks: usize) -> bool {
        self.parallel && num_row_blocks >= self.min_parallel_row_blocks.max(2)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_row_blocks: Self::DEFAULT_MIN_PARALLEL_ROW_BLOCKS,
        }
    }
}
