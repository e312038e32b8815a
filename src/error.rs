use std::ops::Range;
use std::path::PathBuf;
use std::{error::Error, fmt, io};

use miette::{miette, LabeledSpan, Report, Severity};

/// An address or register index outside of its valid range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsError {
    Memory(usize),
    Register(usize),
}

/// Reason a run stopped before reaching `HLT`.
#[derive(Debug)]
pub enum Fault {
    UnsupportedOpcode { pc: u8, opcode: u8 },
    Bounds(BoundsError),
    /// Output channel could not be written to.
    Output(io::Error),
}

/// Error loading a program image. Nothing is executed if loading fails.
#[derive(Debug)]
pub enum LoadError {
    NotFound {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        error: io::Error,
    },
    InvalidLiteral {
        /// 1-based
        line: usize,
        /// Byte offsets into the source
        span: Range<usize>,
        reason: LiteralError,
    },
    TooLarge {
        cells: usize,
    },
}

/// Why a line is not an 8-bit binary literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralError {
    Length { found: usize },
    Digit { found: char },
}

impl Error for BoundsError {}
impl Error for LiteralError {}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Fault::Bounds(error) => Some(error),
            Fault::Output(error) => Some(error),
            Fault::UnsupportedOpcode { .. } => None,
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { error, .. } => Some(error),
            LoadError::InvalidLiteral { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<BoundsError> for Fault {
    fn from(error: BoundsError) -> Self {
        Fault::Bounds(error)
    }
}

impl From<io::Error> for Fault {
    fn from(error: io::Error) -> Self {
        Fault::Output(error)
    }
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::Memory(address) => {
                write!(f, "Memory address {:#x} is out of range", address)
            }
            BoundsError::Register(index) => {
                write!(f, "Register R{} does not exist", index)
            }
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::UnsupportedOpcode { pc, opcode } => {
                write!(f, "Unsupported opcode {:#010b} at {:#04x}", opcode, pc)
            }
            Fault::Bounds(error) => write!(f, "{}", error),
            Fault::Output(error) => write!(f, "Failed to write output: {}", error),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { path } => write!(f, "{} not found", path.display()),
            LoadError::Io { path, error } => {
                write!(f, "Could not read {}: {}", path.display(), error)
            }
            LoadError::InvalidLiteral { line, reason, .. } => {
                write!(f, "Line {}: {}", line, reason)
            }
            LoadError::TooLarge { cells } => {
                write!(f, "Program has {} bytes but memory only holds 256", cells)
            }
        }
    }
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralError::Length { found } => {
                write!(f, "Expected 8 binary digits, found {}", found)
            }
            LiteralError::Digit { found } => write!(f, "Invalid binary digit `{}`", found),
        }
    }
}

// Loader reports

pub fn load_report(error: &LoadError, src: &str) -> Report {
    match error {
        LoadError::InvalidLiteral { span, reason, .. } => {
            let help = match reason {
                LiteralError::Length { .. } => {
                    "each line holds exactly one byte, written as 8 binary digits"
                }
                LiteralError::Digit { .. } => "only `0` and `1` are allowed; comments start with #",
            };
            miette!(
                severity = Severity::Error,
                code = "load::bad_lit",
                help = help,
                labels = vec![LabeledSpan::at(span.clone(), "incorrect literal")],
                "{error}",
            )
            .with_source_code(src.to_owned())
        }
        LoadError::TooLarge { .. } => miette!(
            severity = Severity::Error,
            code = "load::too_large",
            help = "remove instructions or split the program",
            "{error}",
        ),
        LoadError::NotFound { .. } => miette!(
            severity = Severity::Error,
            code = "load::not_found",
            help = "check the path to the program file",
            "{error}",
        ),
        LoadError::Io { .. } => miette!(
            severity = Severity::Error,
            code = "load::io",
            "{error}",
        ),
    }
}

// Runtime reports

pub fn fault_report(fault: &Fault) -> Report {
    match fault {
        Fault::UnsupportedOpcode { .. } => miette!(
            severity = Severity::Error,
            code = "run::opcode",
            help = "the program counter may have run into data; run with --trace to follow it",
            "{fault}",
        ),
        Fault::Bounds(_) => miette!(
            severity = Severity::Error,
            code = "run::bounds",
            help = "register operands must be between 0 and 7",
            "{fault}",
        ),
        Fault::Output(_) => miette!(
            severity = Severity::Error,
            code = "run::output",
            "{fault}",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let fault = Fault::UnsupportedOpcode {
            pc: 0x10,
            opcode: 0xFF,
        };
        assert_eq!(
            fault.to_string(),
            "Unsupported opcode 0b11111111 at 0x10"
        );
        assert_eq!(
            Fault::from(BoundsError::Register(9)).to_string(),
            "Register R9 does not exist"
        );
        let error = LoadError::InvalidLiteral {
            line: 3,
            span: 10..15,
            reason: LiteralError::Digit { found: '2' },
        };
        assert_eq!(error.to_string(), "Line 3: Invalid binary digit `2`");
    }

    #[test]
    fn report_keeps_message() {
        let src = "10000010\n0000002\n";
        let error = LoadError::InvalidLiteral {
            line: 2,
            span: 9..16,
            reason: LiteralError::Length { found: 7 },
        };
        let report = load_report(&error, src);
        assert_eq!(report.to_string(), "Line 2: Expected 8 binary digits, found 7");
    }
}
