use std::fmt;

use crate::error::BoundsError;

pub const REGISTER_COUNT: usize = 8;

/// Initial stack pointer. The stack grows down from here.
pub const STACK_START: u8 = 0xF4;

/// Represents the CPU registers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Register {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    /// Reserved as the stack pointer.
    R7,
}

impl Register {
    pub const SP: Register = Register::R7;

    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Register {
    type Error = BoundsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Register::ALL
            .get(value as usize)
            .copied()
            .ok_or(BoundsError::Register(value as usize))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.index())
    }
}

/// 8x 8-bit general purpose registers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegisterFile {
    slots: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// All registers zeroed, except the stack pointer.
    pub fn new() -> Self {
        let mut slots = [0; REGISTER_COUNT];
        slots[Register::SP.index()] = STACK_START;
        RegisterFile { slots }
    }

    pub fn get(&self, index: usize) -> Result<u8, BoundsError> {
        self.slots
            .get(index)
            .copied()
            .ok_or(BoundsError::Register(index))
    }

    /// Store `value` truncated to the register width.
    pub fn set(&mut self, index: usize, value: u32) -> Result<(), BoundsError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BoundsError::Register(index))?;
        *slot = truncate(value);
        Ok(())
    }

    #[inline]
    pub fn read(&self, reg: Register) -> u8 {
        self.slots[reg.index()]
    }

    #[inline]
    pub fn write(&mut self, reg: Register, value: u32) {
        self.slots[reg.index()] = truncate(value);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.slots
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn truncate(value: u32) -> u8 {
    (value & 0xFF) as u8
}
