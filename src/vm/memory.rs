//! VM tape memory
//!
//! This module provides the integer tape that serves as both program and
//! data for the machine.
//!
//! The tape is responsible for:
//! - Indexed reads and writes over a conceptually infinite, zero-initialized
//!   address space
//! - Growing storage lazily on the first write past the current end
//! - Rejecting negative addresses as address faults
//!
//! The module defines an `AddressSpace` trait that encapsulates the
//! operations the decoder and executor need, enabling alternative tape
//! implementations if needed.

use crate::vm::errors::VMError;
use serde::{Deserialize, Serialize};

/// Defines read/write operations over the machine's address space
pub trait AddressSpace {
    /// Read the value at an address; never-written addresses read as 0
    fn read(&self, address: i64) -> Result<i64, VMError>;

    /// Write a value to an address, growing storage as needed
    fn write(&mut self, address: i64, value: i64) -> Result<(), VMError>;

    /// Current length of backing storage
    fn len(&self) -> usize;

    /// Whether the tape holds no cells
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Grow-on-demand integer tape
///
/// Cells beyond the current length are conceptually zero. Reads do not grow
/// the backing storage; the first write past the end extends it (zero-filled)
/// to exactly cover the written address. The tape never shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    cells: Vec<i64>,
}

impl Tape {
    /// Create a tape holding a copy of the given program at address 0
    pub fn new(program: &[i64]) -> Self {
        Self {
            cells: program.to_vec(),
        }
    }

    /// Borrow the backing cells, e.g. for snapshot comparison in tests
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}

impl AddressSpace for Tape {
    fn read(&self, address: i64) -> Result<i64, VMError> {
        if address < 0 {
            return Err(VMError::AddressFault { address });
        }
        Ok(self.cells.get(address as usize).copied().unwrap_or(0))
    }

    fn write(&mut self, address: i64, value: i64) -> Result<(), VMError> {
        if address < 0 {
            return Err(VMError::AddressFault { address });
        }
        let index = address as usize;
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
        self.cells[index] = value;
        Ok(())
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}
