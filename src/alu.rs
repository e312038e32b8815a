use std::fmt;

use crate::flags::Flag;
use crate::isa::Opcode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AluOp {
    Add,
    Mul,
    Cmp,
}

/// What an ALU operation produces: a new value for the first register, or a condition code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AluOutput {
    Value(u8),
    Flag(Flag),
}

impl AluOp {
    /// Arithmetic is done in wide integers and truncated to the register width.
    pub fn eval(self, a: u8, b: u8) -> AluOutput {
        let (wide_a, wide_b) = (u32::from(a), u32::from(b));
        match self {
            AluOp::Add => AluOutput::Value(((wide_a + wide_b) & 0xFF) as u8),
            AluOp::Mul => AluOutput::Value(((wide_a * wide_b) & 0xFF) as u8),
            AluOp::Cmp => AluOutput::Flag(Flag::from(a.cmp(&b))),
        }
    }
}

impl From<Opcode> for AluOp {
    fn from(opcode: Opcode) -> Self {
        match opcode {
            Opcode::ADD => AluOp::Add,
            Opcode::MUL => AluOp::Mul,
            Opcode::CMP => AluOp::Cmp,
            // Decoder only routes ALU opcodes here
            _ => unreachable!("`{opcode}` is not an ALU operation"),
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AluOp::Add => "ADD",
            AluOp::Mul => "MUL",
            AluOp::Cmp => "CMP",
        };
        f.write_str(name)
    }
}
