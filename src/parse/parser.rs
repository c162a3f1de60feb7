use super::{ast::*, lexer::*};
use crate::common::*;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<T = Expression> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: NonEmpty<TokenKind>,
    },
    UnexpectedString {
        expected: NonEmpty<TokenKind>,
    },
    TrailingInput,
    NumberTooLarge,
    ZeroSides,
    InvertedRange {
        low: Int,
        high: Int,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                found: Some(found),
                expected,
            } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken {
                found: None,
                expected,
            } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::TrailingInput => write!(f, "unexpected input after a complete expression"),
            Self::NumberTooLarge => write!(f, "number is too large"),
            Self::ZeroSides => write!(f, "a die must have at least one side"),
            Self::InvertedRange { low, high } => {
                write!(f, "range start {} is greater than range end {}", low, high)
            }
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a.as_str()),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => {
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}

/// Recognizes exactly one of the four dice notations, covering the whole input.
///
/// The notations are tried in a fixed order (`d<N>`, `<C>d<N>[±M]`, `<A>-<B>`, integer). Since
/// each one must match the entire input they never overlap, so the leading token alone decides
/// which one is attempted.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            source: s,
        }
    }

    pub fn parse(mut self) -> PResult {
        let expr = self.parse_expression()?;
        self.expect_end()?;
        Ok(expr)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(vec1![expected])
        }
    }

    fn consume_as<T: std::str::FromStr>(
        &mut self,
        expected: TokenKind,
    ) -> PResult<Result<T, T::Err>> {
        self.consume(expected)?;
        Ok(self.lexer.slice().parse())
    }

    // The lexer only produces ASCII digits for integers, so overflow is the only way to fail.
    fn consume_unsigned<T: std::str::FromStr>(&mut self) -> PResult<T> {
        match self.consume_as::<T>(TokenKind::Integer)? {
            Ok(x) => Ok(x),
            Err(_) => self.error(ParseErrorKind::NumberTooLarge),
        }
    }

    fn end(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        let span = self.lexer.span();
        self.error_at(kind, span)
    }

    fn error_at<T>(&self, kind: ParseErrorKind, span: Range<usize>) -> PResult<T> {
        Err(ParseError {
            kind,
            slice: self.source.get(span.clone()).unwrap_or_default().to_string(),
            span,
        })
    }

    fn unexpected_token<T>(&mut self, expected: NonEmpty<TokenKind>) -> PResult<T> {
        match self.advance() {
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            None => {
                let end = self.end();
                self.error_at(
                    ParseErrorKind::UnexpectedToken {
                        found: None,
                        expected,
                    },
                    end,
                )
            }
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn expect_end(&mut self) -> PResult<()> {
        match self.advance() {
            None => Ok(()),
            Some(_) => {
                let start = self.lexer.span().start;
                self.error_at(ParseErrorKind::TrailingInput, start..self.source.len())
            }
        }
    }

    fn parse_expression(&mut self) -> PResult {
        if self.matches(TokenKind::Die) {
            self.parse_die()
        } else if self.matches(TokenKind::Integer) {
            let lead: u64 = self.consume_unsigned()?;
            if self.matches(TokenKind::Die) {
                self.parse_dice(lead)
            } else if self.matches(TokenKind::Minus) {
                self.parse_range(lead)
            } else {
                self.literal(Sign::Pos, lead)
            }
        } else if self.matches_any(TokenKind::SIGNS) {
            let sign = self.parse_sign()?;
            let magnitude = self.consume_unsigned()?;
            self.literal(sign, magnitude)
        } else {
            self.unexpected_token(vec1![
                TokenKind::Die,
                TokenKind::Integer,
                TokenKind::Plus,
                TokenKind::Minus
            ])
        }
    }

    fn parse_die(&mut self) -> PResult {
        self.consume(TokenKind::Die)?;
        let sides = self.parse_sides()?;
        Ok(Expression::die(sides))
    }

    fn parse_dice(&mut self, count: Count) -> PResult {
        self.consume(TokenKind::Die)?;
        let sides = self.parse_sides()?;
        let modifier = if self.matches_any(TokenKind::SIGNS) {
            let sign = self.parse_sign()?;
            let magnitude = self.consume_unsigned()?;
            match sign.apply(magnitude) {
                Some(x) => x,
                None => return self.error(ParseErrorKind::NumberTooLarge),
            }
        } else {
            0
        };
        Ok(Expression::dice(count, sides, modifier))
    }

    fn parse_range(&mut self, low: u64) -> PResult {
        self.consume(TokenKind::Minus)?;
        let high: u64 = self.consume_unsigned()?;
        let (low, high) = match (Sign::Pos.apply(low), Sign::Pos.apply(high)) {
            (Some(low), Some(high)) => (low, high),
            _ => return self.error(ParseErrorKind::NumberTooLarge),
        };
        if low > high {
            return self.error_at(ParseErrorKind::InvertedRange { low, high }, 0..self.source.len());
        }
        Ok(Expression::Range { low, high })
    }

    fn parse_sides(&mut self) -> PResult<Sides> {
        let sides: u32 = self.consume_unsigned()?;
        match Sides::new(sides) {
            Some(sides) => Ok(sides),
            None => self.error(ParseErrorKind::ZeroSides),
        }
    }

    fn parse_sign(&mut self) -> PResult<Sign> {
        if self.matches(TokenKind::Plus) {
            self.advance();
            Ok(Sign::Pos)
        } else if self.matches(TokenKind::Minus) {
            self.advance();
            Ok(Sign::Neg)
        } else {
            self.unexpected_token(vec1![TokenKind::Plus, TokenKind::Minus])
        }
    }

    fn literal(&mut self, sign: Sign, magnitude: u64) -> PResult {
        match sign.apply(magnitude) {
            Some(x) => Ok(Expression::Literal(x)),
            None => self.error(ParseErrorKind::NumberTooLarge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides(n: u32) -> Sides {
        Sides::new(n).unwrap()
    }

    fn check(s: &str, expected: Expression) {
        assert_eq!(Parser::new(s).parse(), Ok(expected));
    }

    fn check_err(s: &str) -> ParseErrorKind {
        Parser::new(s).parse().unwrap_err().kind
    }

    #[test]
    fn test_parse_die() {
        check("d20", Expression::die(sides(20)));
        check("D20", Expression::die(sides(20)));
        check("d06", Expression::die(sides(6)));
    }

    #[test]
    fn test_parse_dice() {
        check("2d6", Expression::dice(2, sides(6), 0));
        check("2d6+1", Expression::dice(2, sides(6), 1));
        check("3D8-2", Expression::dice(3, sides(8), -2));
        check("0d6+4", Expression::dice(0, sides(6), 4));
    }

    #[test]
    fn test_parse_range() {
        check("5-10", Expression::Range { low: 5, high: 10 });
        check("7-7", Expression::Range { low: 7, high: 7 });
        check("0-100", Expression::Range { low: 0, high: 100 });
    }

    #[test]
    fn test_parse_literal() {
        check("42", Expression::Literal(42));
        check("-3", Expression::Literal(-3));
        check("+3", Expression::Literal(3));
        check("-9223372036854775808", Expression::Literal(Int::MIN));
    }

    #[test]
    fn test_parse_zero_sides() {
        assert_eq!(check_err("d0"), ParseErrorKind::ZeroSides);
        assert_eq!(check_err("2d0"), ParseErrorKind::ZeroSides);
        assert_eq!(check_err("0d0+1"), ParseErrorKind::ZeroSides);
    }

    #[test]
    fn test_parse_inverted_range() {
        let err = Parser::new("10-5").parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvertedRange { low: 10, high: 5 });
        assert_eq!(err.span, 0..4);
        assert_eq!(err.slice, "10-5");
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(
            check_err("d"),
            ParseErrorKind::UnexpectedToken {
                found: None,
                expected: vec1![TokenKind::Integer],
            }
        );
        assert_eq!(
            check_err("2d"),
            ParseErrorKind::UnexpectedToken {
                found: None,
                expected: vec1![TokenKind::Integer],
            }
        );
        assert!(matches!(
            check_err("abc"),
            ParseErrorKind::UnexpectedString { .. }
        ));
        assert!(matches!(
            check_err(""),
            ParseErrorKind::UnexpectedToken { found: None, .. }
        ));
        assert_eq!(check_err("2d6+"), check_err("2d"));
        assert_eq!(check_err("2d6 + 1"), ParseErrorKind::TrailingInput);
        assert_eq!(check_err("d6d6"), ParseErrorKind::TrailingInput);
        assert_eq!(check_err("1-2-3"), ParseErrorKind::TrailingInput);
        assert!(matches!(
            check_err("-5-10"),
            ParseErrorKind::TrailingInput
        ));
        assert!(matches!(
            check_err(" d6"),
            ParseErrorKind::UnexpectedString { .. }
        ));
    }

    #[test]
    fn test_parse_too_large() {
        assert_eq!(check_err("d4294967296"), ParseErrorKind::NumberTooLarge);
        assert_eq!(check_err("99999999999999999999"), ParseErrorKind::NumberTooLarge);
        assert_eq!(check_err("9223372036854775808"), ParseErrorKind::NumberTooLarge);
        assert_eq!(check_err("1d6+9223372036854775808"), ParseErrorKind::NumberTooLarge);
    }

    #[test]
    fn test_error_message() {
        let err = Parser::new("2d").parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "error at position 2 (\"\"): unexpected end of input, expected <integer>"
        );
        let err = Parser::new("x").parse().unwrap_err();
        assert!(err
            .to_string()
            .ends_with("expected 'd', <integer>, '+', or '-'"));
    }
}
