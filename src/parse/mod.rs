pub mod ast;
mod lexer;
mod parser;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

use crate::error::RollError;

/// Parses a dice expression without rolling it.
///
/// # Examples
/// ```
/// # use campaign_dice::parse::{parse, ast::Expression};
/// let expr = parse("2d6+1").unwrap();
/// assert!(matches!(expr, Expression::Dice { count: 2, modifier: 1, .. }));
/// assert_eq!(expr.to_string(), "2d6+1");
/// ```
pub fn parse(s: &str) -> Result<ast::Expression, RollError> {
    parser::Parser::new(s)
        .parse()
        .map_err(|why| RollError::invalid(s, why))
}

impl std::str::FromStr for ast::Expression {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::ast::Expression;
    use crate::error::{InvalidReason, RollError};

    #[test]
    fn test_from_str_keeps_input() {
        let err = "2d".parse::<Expression>().unwrap_err();
        assert_eq!(err.expression(), "2d");
        assert!(matches!(err.reason(), InvalidReason::Syntax(_)));
        assert!(matches!(err, RollError::InvalidExpression { .. }));
    }

    #[test]
    fn test_canonical_form() {
        for s in ["d20", "2d6+1", "3d8-2", "5-10", "42", "-1"] {
            assert_eq!(s.parse::<Expression>().unwrap().to_string(), s);
        }
        assert_eq!("D20".parse::<Expression>().unwrap().to_string(), "d20");
        assert_eq!("1d6+0".parse::<Expression>().unwrap().to_string(), "1d6");
    }
}
