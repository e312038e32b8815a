use std::cell::RefCell;
use std::fmt;

use colored::{ColoredString, Colorize};

/// Where non-program output goes. Everything here is written to stderr, so that stdout only
/// carries what the program prints with `PRN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    /// Machine state dump, one line per instruction.
    Trace,
    /// Progress messages (`Loading`, `Running`, ...).
    Status,
}

impl Output {
    thread_local! {
        static IS_MINIMAL: RefCell<bool> = const { RefCell::new(false) };
    }

    /// Returns the previous value.
    pub fn set_minimal(new_value: bool) -> bool {
        Self::IS_MINIMAL.with(|value| value.replace(new_value))
    }

    pub fn is_minimal() -> bool {
        Self::IS_MINIMAL.with(|value| *value.borrow())
    }

    pub fn print_str(&self, string: &str) {
        match (self, Self::is_minimal()) {
            (Self::Trace, false) => eprint!("{}", ColoredString::from(string).blue()),
            // Never color if `--minimal`
            (Self::Trace, true) => eprint!("{}", string),
            (Self::Status, false) => eprint!("{}", string),
            (Self::Status, true) => (),
        }
    }
}

/// Snapshot of the machine: PC, the three bytes from PC onward, and every register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Trace {
    pub pc: u8,
    pub bytes: [u8; 3],
    pub reg: [u8; 8],
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2] = self.bytes;
        write!(f, "TRACE: {:02X} | {:02X} {:02X} {:02X} |", self.pc, b0, b1, b2)?;
        for reg in self.reg {
            write!(f, " {:02X}", reg)?;
        }
        Ok(())
    }
}
