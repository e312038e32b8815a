use std::io::{self, Stdout, Write};

use crate::alu::{AluOp, AluOutput};
use crate::error::{BoundsError, Fault};
use crate::flags::Flag;
use crate::isa::{Instr, Opcode};
use crate::loader::Image;
use crate::memory::Memory;
use crate::output::{Output, Trace};
use crate::registers::{Register, RegisterFile};

/// Represents complete machine state during runtime.
///
/// Output of `PRN` goes to `W`, which is stdout unless given otherwise.
pub struct RunState<W = Stdout> {
    /// System memory - 256 bytes
    mem: Memory,
    /// Program counter
    pc: u8,
    /// 8x 8-bit registers, R7 is the stack pointer
    reg: RegisterFile,
    /// Condition code
    flag: Flag,
    halted: bool,
    out: W,
    trace: bool,
}

/// Why [`RunState::run`] returned.
#[derive(Debug)]
pub enum Termination {
    Halted,
    Fault(Fault),
}

impl Termination {
    pub fn is_halted(&self) -> bool {
        matches!(self, Termination::Halted)
    }
}

impl RunState<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for RunState<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> RunState<W> {
    pub fn with_output(out: W) -> Self {
        RunState {
            mem: Memory::new(),
            pc: 0,
            reg: RegisterFile::new(),
            flag: Flag::default(),
            halted: false,
            out,
            trace: false,
        }
    }

    pub fn from_image(image: &Image, out: W) -> Result<Self, BoundsError> {
        let mut state = Self::with_output(out);
        state.load(image)?;
        Ok(state)
    }

    /// Copy a program image into memory, starting at address 0.
    pub fn load(&mut self, image: &Image) -> Result<(), BoundsError> {
        self.mem.fill(image.as_bytes())
    }

    /// Print a trace line to stderr before every instruction.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Run until `HLT` or a fault.
    ///
    /// On a fault, machine state is left as it was right before the failing instruction.
    pub fn run(&mut self) -> Termination {
        while !self.halted {
            if self.trace {
                Output::Trace.print_str(&format!("{}\n", self.trace()));
            }
            if let Err(fault) = self.step() {
                return Termination::Fault(fault);
            }
        }
        Termination::Halted
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> Result<(), Fault> {
        let (opcode, instr) = Instr::decode(&self.mem, self.pc)?;
        self.execute(opcode, instr)?;
        if !opcode.sets_pc() {
            self.pc = self.pc.wrapping_add(opcode.width());
        }
        Ok(())
    }

    fn execute(&mut self, opcode: Opcode, instr: Instr) -> Result<(), Fault> {
        match instr {
            Instr::Hlt => self.halted = true,
            Instr::Ldi { dest, imm } => self.reg.write(dest, u32::from(imm)),
            Instr::Prn { src } => {
                let val = self.reg.read(src);
                writeln!(self.out, "{val}")?;
                self.out.flush()?;
            }
            Instr::Alu { op, a, b } => self.alu(op, a, b),
            Instr::Push { src } => {
                let val = self.reg.read(src);
                self.push_val(val)?;
            }
            Instr::Pop { dest } => {
                let val = self.pop_val()?;
                self.reg.write(dest, u32::from(val));
            }
            Instr::Call { target } => {
                let addr = self.reg.read(target);
                // Resume after the CALL opcode and its operand
                let ret_addr = self.pc.wrapping_add(Opcode::CALL.width());
                self.push_val(ret_addr)?;
                self.pc = addr;
            }
            Instr::Ret => self.pc = self.pop_val()?,
            Instr::Jmp { target } => self.pc = self.reg.read(target),
            Instr::Jeq { target } => self.jump_if(self.flag.is_equal(), target, opcode),
            Instr::Jne { target } => self.jump_if(!self.flag.is_equal(), target, opcode),
        }
        Ok(())
    }

    /// Apply `op` to `a` and `b`; arithmetic results are stored in `a`.
    fn alu(&mut self, op: AluOp, a: Register, b: Register) {
        match op.eval(self.reg.read(a), self.reg.read(b)) {
            AluOutput::Value(val) => self.reg.write(a, u32::from(val)),
            AluOutput::Flag(flag) => self.flag = flag,
        }
    }

    /// Jump to `target` if `cond` holds, otherwise step over the branch instruction.
    fn jump_if(&mut self, cond: bool, target: Register, opcode: Opcode) {
        if cond {
            self.pc = self.reg.read(target);
        } else {
            self.pc = self.pc.wrapping_add(opcode.width());
        }
    }

    fn push_val(&mut self, val: u8) -> Result<(), BoundsError> {
        // Decrement stack, wrapping below address 0
        let sp = self.sp().wrapping_sub(1);
        self.mem.write(sp as usize, val)?;
        self.reg.write(Register::SP, u32::from(sp));
        Ok(())
    }

    fn pop_val(&mut self) -> Result<u8, BoundsError> {
        let sp = self.sp();
        let val = self.mem.read(sp as usize)?;
        self.reg.write(Register::SP, u32::from(sp.wrapping_add(1)));
        Ok(val)
    }

    pub fn trace(&self) -> Trace {
        let at = |n: u8| self.mem.as_slice()[self.pc.wrapping_add(n) as usize];
        let mut reg = [0; 8];
        reg.copy_from_slice(self.reg.as_slice());
        Trace {
            pc: self.pc,
            bytes: [at(0), at(1), at(2)],
            reg,
        }
    }

    pub fn pc(&self) -> u8 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.reg.read(Register::SP)
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.reg
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.reg
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.mem
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
