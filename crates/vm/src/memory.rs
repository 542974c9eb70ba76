//! Linear, auto-growing machine memory.
//!
//! Any non-negative address is valid. Touching an address past the current
//! end (for reading or writing) zero-fills the gap up to and including that
//! address. Negative addresses are rejected. Growth is unbounded unless a
//! driver opts into a ceiling with [`Memory::with_limit`].

use thiserror::Error;

/// Errors from a single memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("negative address {0}")]
    Negative(i64),

    #[error("address {address} exceeds memory limit of {limit} cells")]
    LimitExceeded { address: i64, limit: usize },
}

/// Growable array of signed 64-bit cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    limit: Option<usize>,
}

impl Memory {
    /// Create memory holding `cells`, starting at address 0.
    pub fn new(cells: Vec<i64>) -> Self {
        Self { cells, limit: None }
    }

    /// Set the ceiling on how far memory may grow.
    ///
    /// A limit below the current length does not shrink existing memory;
    /// it only stops further growth.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Read the cell at `address`, growing memory if needed.
    pub fn read(&mut self, address: i64) -> Result<i64, MemoryError> {
        let index = self.ensure(address)?;
        Ok(self.cells[index])
    }

    /// Write `value` to the cell at `address`, growing memory if needed.
    pub fn write(&mut self, address: i64, value: i64) -> Result<(), MemoryError> {
        let index = self.ensure(address)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Current length in cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been loaded or touched.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrow the cells as they currently stand.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Consume the memory, yielding its cells.
    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }

    /// Validate `address` and grow so that it is in bounds.
    fn ensure(&mut self, address: i64) -> Result<usize, MemoryError> {
        let index = usize::try_from(address).map_err(|_| MemoryError::Negative(address))?;
        if index >= self.cells.len() {
            if let Some(limit) = self.limit.filter(|&limit| index >= limit) {
                return Err(MemoryError::LimitExceeded { address, limit });
            }
            self.cells.resize(index + 1, 0);
        }
        Ok(index)
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Self::new(cells)
    }
}
