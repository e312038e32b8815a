use std::fmt;

use crate::alu::AluOp;
use crate::error::{BoundsError, Fault};
use crate::memory::Memory;
use crate::registers::Register;

/// Every instruction understood by the LS-8.
///
/// The opcode byte describes itself: bits 7-6 hold the operand count, bit 5 marks ALU
/// operations and bit 4 marks operations which set the PC themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum Opcode {
    HLT = 0b0000_0001,
    LDI = 0b1000_0010,
    PRN = 0b0100_0111,
    ADD = 0b1010_0000,
    MUL = 0b1010_0010,
    CMP = 0b1010_0111,
    PUSH = 0b0100_0101,
    POP = 0b0100_0110,
    CALL = 0b0101_0000,
    RET = 0b0001_0001,
    JMP = 0b0101_0100,
    JEQ = 0b0101_0101,
    JNE = 0b0101_0110,
}

impl Opcode {
    pub const ALL: [Opcode; 13] = [
        Opcode::HLT,
        Opcode::LDI,
        Opcode::PRN,
        Opcode::ADD,
        Opcode::MUL,
        Opcode::CMP,
        Opcode::PUSH,
        Opcode::POP,
        Opcode::CALL,
        Opcode::RET,
        Opcode::JMP,
        Opcode::JEQ,
        Opcode::JNE,
    ];

    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn operand_count(self) -> u8 {
        self.byte() >> 6
    }

    /// Bytes taken by the instruction, including the opcode.
    pub fn width(self) -> u8 {
        self.operand_count() + 1
    }

    pub fn is_alu(self) -> bool {
        self.byte() & 0b0010_0000 != 0
    }

    pub fn sets_pc(self) -> bool {
        self.byte() & 0b0001_0000 != 0
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::HLT => "HLT",
            Opcode::LDI => "LDI",
            Opcode::PRN => "PRN",
            Opcode::ADD => "ADD",
            Opcode::MUL => "MUL",
            Opcode::CMP => "CMP",
            Opcode::PUSH => "PUSH",
            Opcode::POP => "POP",
            Opcode::CALL => "CALL",
            Opcode::RET => "RET",
            Opcode::JMP => "JMP",
            Opcode::JEQ => "JEQ",
            Opcode::JNE => "JNE",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .into_iter()
            .find(|opcode| opcode.byte() == byte)
            .ok_or(byte)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded instruction with validated operands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instr {
    /// Stop the machine
    Hlt,
    /// Load an immediate byte into `dest`
    Ldi { dest: Register, imm: u8 },
    /// Print the decimal value of `src`
    Prn { src: Register },
    /// `ADD`, `MUL` or `CMP` on two registers
    Alu { op: AluOp, a: Register, b: Register },
    Push { src: Register },
    Pop { dest: Register },
    /// Push the return address and jump to the address held in `target`
    Call { target: Register },
    Ret,
    Jmp { target: Register },
    Jeq { target: Register },
    Jne { target: Register },
}

impl Instr {
    /// Decode the instruction starting at `pc`.
    ///
    /// Operand addresses wrap around the end of memory.
    pub fn decode(mem: &Memory, pc: u8) -> Result<(Opcode, Instr), Fault> {
        let byte = mem.read(pc as usize)?;
        let opcode =
            Opcode::try_from(byte).map_err(|opcode| Fault::UnsupportedOpcode { pc, opcode })?;

        let operand = |n: u8| mem.read(pc.wrapping_add(n) as usize);
        let register = |n: u8| -> Result<Register, BoundsError> { Register::try_from(operand(n)?) };

        let instr = match opcode {
            Opcode::HLT => Instr::Hlt,
            Opcode::LDI => Instr::Ldi {
                dest: register(1)?,
                imm: operand(2)?,
            },
            Opcode::PRN => Instr::Prn { src: register(1)? },
            Opcode::ADD | Opcode::MUL | Opcode::CMP => Instr::Alu {
                op: AluOp::from(opcode),
                a: register(1)?,
                b: register(2)?,
            },
            Opcode::PUSH => Instr::Push { src: register(1)? },
            Opcode::POP => Instr::Pop { dest: register(1)? },
            Opcode::CALL => Instr::Call {
                target: register(1)?,
            },
            Opcode::RET => Instr::Ret,
            Opcode::JMP => Instr::Jmp {
                target: register(1)?,
            },
            Opcode::JEQ => Instr::Jeq {
                target: register(1)?,
            },
            Opcode::JNE => Instr::Jne {
                target: register(1)?,
            },
        };
        Ok((opcode, instr))
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Hlt => write!(f, "HLT"),
            Instr::Ldi { dest, imm } => write!(f, "LDI {dest}, {imm}"),
            Instr::Prn { src } => write!(f, "PRN {src}"),
            Instr::Alu { op, a, b } => write!(f, "{op} {a}, {b}"),
            Instr::Push { src } => write!(f, "PUSH {src}"),
            Instr::Pop { dest } => write!(f, "POP {dest}"),
            Instr::Call { target } => write!(f, "CALL {target}"),
            Instr::Ret => write!(f, "RET"),
            Instr::Jmp { target } => write!(f, "JMP {target}"),
            Instr::Jeq { target } => write!(f, "JEQ {target}"),
            Instr::Jne { target } => write!(f, "JNE {target}"),
        }
    }
}
