use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{LiteralError, LoadError};
use crate::memory::MEMORY_SIZE;

/// A parsed program, ready to be copied into memory from address 0.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Image {
    cells: Vec<u8>,
}

impl Image {
    /// Parse the textual image format.
    ///
    /// Every significant line is one 8-digit binary literal. Anything after a `#` is a comment,
    /// and lines left empty after removing comments do not take up an address.
    pub fn parse(src: &str) -> Result<Image, LoadError> {
        let mut cells = Vec::new();
        let mut line_start = 0;

        for (i, line) in src.split_inclusive('\n').enumerate() {
            let offset = line_start;
            line_start += line.len();

            let code = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            };
            let literal = code.trim();
            if literal.is_empty() {
                continue;
            }

            let lead = code.len() - code.trim_start().len();
            let span = offset + lead..offset + lead + literal.len();
            let value = parse_literal(literal).map_err(|reason| LoadError::InvalidLiteral {
                line: i + 1,
                span,
                reason,
            })?;
            cells.push(value);
        }

        if cells.len() > MEMORY_SIZE {
            return Err(LoadError::TooLarge { cells: cells.len() });
        }
        Ok(Image { cells })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Image, LoadError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(LoadError::TooLarge { cells: bytes.len() });
        }
        Ok(Image {
            cells: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read a program file, telling a missing file apart from other failures.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            error,
        },
    })
}

fn parse_literal(literal: &str) -> Result<u8, LiteralError> {
    let found = literal.chars().count();
    if found != 8 {
        return Err(LiteralError::Length { found });
    }
    literal.chars().try_fold(0u8, |acc, ch| match ch {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        found => Err(LiteralError::Digit { found }),
    })
}
