use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use miette::Report;

use ls8::error::{fault_report, load_report};
use ls8::{read_source, Fault, Image, LoadError, Output, RunState, Termination};

/// Run a program on the LS-8, a tiny 8-bit virtual CPU.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// `.ls8` program image: one 8-digit binary literal per line, `#` starts a comment
    path: PathBuf,
    /// Print machine state before every instruction (also enabled by `LS8_TRACE=1`)
    #[arg(short, long)]
    trace: bool,
    /// Produce minimal output, suited for blackbox tests
    #[arg(short, long)]
    minimal: bool,
}

/// Setting this to `1` has the same effect as `--trace`.
const TRACE_VAR: &str = "LS8_TRACE";

// Exit codes, one per kind of failure
const EXIT_USAGE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_BAD_IMAGE: u8 = 3;
const EXIT_UNSUPPORTED_OPCODE: u8 = 4;
const EXIT_OUT_OF_BOUNDS: u8 = 5;
const EXIT_OUTPUT: u8 = 6;

/// Error to show the user before exiting with `code`.
struct Failure {
    report: Report,
    code: u8,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };
    Output::set_minimal(args.minimal);

    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new() //
                .context_lines(ls8::DIAGNOSTIC_CONTEXT_LINES)
                .build(),
        )
    }));

    let trace = args.trace || trace_from_env(std::env::var(TRACE_VAR).ok().as_deref());
    match run(&args.path, trace) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{:?}", failure.report);
            ExitCode::from(failure.code)
        }
    }
}

enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

fn message(color: MsgColor, left: &str, right: &str) {
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    Output::Status.print_str(&format!("{left:>12} {right}\n"));
}

fn run(path: &Path, trace: bool) -> Result<(), Failure> {
    file_message(MsgColor::Green, "Loading", path);
    let image = load(path)?;

    // `Image` never holds more than memory can fit
    let mut program = RunState::from_image(&image, std::io::stdout()).map_err(|e| Failure {
        report: fault_report(&Fault::Bounds(e)),
        code: EXIT_OUT_OF_BOUNDS,
    })?;
    program.set_trace(trace);

    message(MsgColor::Green, "Running", &format!("{} bytes", image.len()));
    match program.run() {
        Termination::Halted => {
            file_message(MsgColor::Cyan, "Halted", path);
            Ok(())
        }
        Termination::Fault(fault) => {
            message(MsgColor::Red, "Faulted", &format!("at {:#04x}", program.pc()));
            let code = match fault {
                Fault::UnsupportedOpcode { .. } => EXIT_UNSUPPORTED_OPCODE,
                Fault::Bounds(_) => EXIT_OUT_OF_BOUNDS,
                Fault::Output(_) => EXIT_OUTPUT,
            };
            Err(Failure {
                report: fault_report(&fault),
                code,
            })
        }
    }
}

/// Read and parse the program image; nothing runs unless the whole image is valid.
fn load(path: &Path) -> Result<Image, Failure> {
    let src = read_source(path).map_err(|e| {
        let code = match e {
            LoadError::NotFound { .. } => EXIT_NOT_FOUND,
            _ => EXIT_BAD_IMAGE,
        };
        Failure {
            report: load_report(&e, ""),
            code,
        }
    })?;
    Image::parse(&src).map_err(|e| Failure {
        report: load_report(&e, &src),
        code: EXIT_BAD_IMAGE,
    })
}

fn trace_from_env(value: Option<&str>) -> bool {
    value == Some("1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_env_value() {
        assert!(trace_from_env(Some("1")));
        assert!(!trace_from_env(Some("0")));
        assert!(!trace_from_env(Some("")));
        assert!(!trace_from_env(None));
    }
}
