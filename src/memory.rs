use crate::error::BoundsError;

/// The LS-8 can address 256 bytes of memory.
pub const MEMORY_SIZE: usize = 0x100;

/// Flat, byte addressable system memory.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8, BoundsError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(BoundsError::Memory(address))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), BoundsError> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(BoundsError::Memory(address))?;
        *cell = value;
        Ok(())
    }

    /// Copy `bytes` into memory starting at address 0.
    pub fn fill(&mut self, bytes: &[u8]) -> Result<(), BoundsError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(BoundsError::Memory(bytes.len() - 1));
        }
        self.cells[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the populated prefix is interesting
        let used = self
            .cells
            .iter()
            .rposition(|&cell| cell != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Memory")
            .field("cells", &&self.cells[..used])
            .finish()
    }
}
