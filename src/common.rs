use std::num::NonZeroU32;

pub use vec1::vec1;

/// Totals, modifiers and range bounds.
pub type Int = i64;
/// Number of dice in a compound roll. Zero is allowed.
pub type Count = u64;
/// Number of faces on a die. A 0-sided die cannot be represented.
pub type Sides = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Default cap on how many dice a single compound roll may throw.
pub const DEFAULT_MAX_DICE: Count = 10_000;

/// Default number of records returned by a history query.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    /// Applies the sign to an unsigned magnitude, failing if the result does not fit in [Int].
    pub fn apply(self, magnitude: u64) -> Option<Int> {
        match self {
            Self::Pos => Int::try_from(magnitude).ok(),
            Self::Neg => Int::try_from(-i128::from(magnitude)).ok(),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        let c = match self {
            Self::Pos => '+',
            Self::Neg => '-',
        };
        f.write_char(c)
    }
}
