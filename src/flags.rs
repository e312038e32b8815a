use std::cmp::Ordering;
use std::fmt;

/// Condition code, set by `CMP`. Laid out as `00000LGE`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Flag {
    /// Less than
    L = 0b100,
    /// Greater than
    G = 0b010,
    /// Equal
    #[default]
    E = 0b001,
}

impl Flag {
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn is_equal(self) -> bool {
        self == Flag::E
    }
}

impl From<Ordering> for Flag {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Flag::L,
            Ordering::Greater => Flag::G,
            Ordering::Equal => Flag::E,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.bits())
    }
}
