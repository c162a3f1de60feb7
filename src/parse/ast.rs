use crate::common::*;
use std::fmt;

/// A parsed dice expression.
///
/// Each variant corresponds to one of the accepted notations, in the order they are tried.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Expression {
    /// `d<N>`: a single die.
    Die(Sides),
    /// `<C>d<N>[+M|-M]`: the sum of `count` dice plus a modifier.
    Dice {
        count: Count,
        sides: Sides,
        modifier: Int,
    },
    /// `<A>-<B>`: a uniform pick from an inclusive range. Always `low <= high`.
    Range { low: Int, high: Int },
    /// A plain integer, rolled as itself.
    Literal(Int),
}

impl Expression {
    pub const fn die(sides: Sides) -> Self {
        Self::Die(sides)
    }

    pub const fn dice(count: Count, sides: Sides, modifier: Int) -> Self {
        Self::Dice {
            count,
            sides,
            modifier,
        }
    }

    /// Whether rolling this expression draws any random numbers at all.
    pub fn is_random(&self) -> bool {
        match self {
            Self::Die(_) => true,
            Self::Dice { count, .. } => *count > 0,
            Self::Range { low, high } => low != high,
            Self::Literal(_) => false,
        }
    }

    /// The smallest and largest totals this expression can produce, or `None` if either end
    /// overflows.
    pub fn bounds(&self) -> Option<(Int, Int)> {
        match *self {
            Self::Die(sides) => Some((1, Int::from(sides.get()))),
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                let count = Int::try_from(count).ok()?;
                let min = count.checked_add(modifier)?;
                let max = count
                    .checked_mul(Int::from(sides.get()))?
                    .checked_add(modifier)?;
                Some((min, max))
            }
            Self::Range { low, high } => Some((low, high)),
            Self::Literal(x) => Some((x, x)),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Die(sides) => write!(f, "d{}", sides),
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                write!(f, "{}d{}", count, sides)?;
                match modifier {
                    0 => Ok(()),
                    m if m > 0 => write!(f, "{}{}", Sign::Pos, m),
                    m => write!(f, "{}", m),
                }
            }
            Self::Range { low, high } => write!(f, "{}-{}", low, high),
            Self::Literal(x) => fmt::Display::fmt(&x, f),
        }
    }
}
