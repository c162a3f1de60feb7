//! Dice rolling for a tabletop campaign manager.
//!
//! Four notations are understood, tried in this order and always matched against the whole
//! input:
//!
//! | notation        | example | result                                    |
//! |-----------------|---------|-------------------------------------------|
//! | `d<N>`          | `d20`   | one die, `1..=N`                          |
//! | `<C>d<N>[±M]`   | `2d6+1` | sum of `C` dice plus `M`                  |
//! | `<A>-<B>`       | `5-10`  | uniform pick from `A..=B` (`A <= B`)      |
//! | integer         | `-3`    | the number itself                         |
//!
//! The `d` may be upper or lower case. Surrounding whitespace is not accepted.
//!
//! ```
//! let total = campaign_dice::roll("2d6+1").unwrap();
//! assert!((3..=13).contains(&total));
//! assert_eq!(campaign_dice::roll("42"), Ok(42));
//! assert!(campaign_dice::roll("d0").is_err());
//! ```

pub mod common;
pub mod error;
pub mod parse;
pub mod roll;
pub mod session;

pub use common::{Count, Int, Sides, DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_DICE};
pub use error::{InvalidReason, RollError};
pub use parse::ast::Expression;
pub use roll::{RollConfig, RollContext, Roller};

pub type Result<T, E = RollError> = std::result::Result<T, E>;

/// Rolls `expression` on the thread-local generator.
pub fn roll(expression: &str) -> Result<Int> {
    let mut ctx: RollContext = RollContext::default();
    ctx.roll(expression)
}

/// Rolls `expression` on the given roller, e.g. a seeded [rand::rngs::StdRng].
pub fn roll_with<R: Roller>(expression: &str, roller: R) -> Result<Int> {
    RollContext::with_roller(roller).roll(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::ScriptedRoller;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_d6_in_range() {
        for _ in 0..10_000 {
            assert!((1..=6).contains(&roll("d6").unwrap()));
        }
    }

    #[test]
    fn test_roll_unseeded_varies() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(roll("d20").unwrap());
        }
        assert!(seen.len() > 1);

        let mut ctx: RollContext = RollContext::default();
        let totals: std::collections::HashSet<_> =
            (0..200).map(|_| ctx.roll("3d6").unwrap()).collect();
        assert!(totals.len() > 1);
    }

    #[test]
    fn test_roll_with_script() {
        assert_eq!(roll_with("2d6+1", ScriptedRoller::new([3, 5])), Ok(9));
        assert_eq!(roll_with("0d6+4", ScriptedRoller::default()), Ok(4));
    }

    #[test]
    fn test_roll_with_borrowed_rng() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(roll_with("3d6", &mut a), roll_with("3d6", &mut b));
        }
    }

    #[test]
    fn test_roll_errors_echo_input() {
        for s in ["abc", "2d", "d", "d0", "10-5"] {
            let err = roll(s).unwrap_err();
            assert_eq!(err.expression(), s);
            assert!(err.to_string().starts_with(&format!("invalid dice pattern {:?}", s)));
        }
    }
}
