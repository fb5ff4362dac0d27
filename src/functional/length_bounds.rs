//! Interval notation for the `length` validator.
//!
//! `[2,5]` accepts 2 to 5 characters, `]2,5[` accepts 3 or 4. Either side
//! may be left empty: `[3,` sets only a minimum, `,10]` only a maximum.

use std::str::FromStr;

use thiserror::Error;

use super::error_codes::{ErrorCode, FieldErrorList};

/// One side of a length interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub value: usize,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(value: usize) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: usize) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Parsed `length` against-parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsParseError {
    #[error("expected `lower,upper`")]
    MissingSeparator,
    #[error("lower bound `{0}` must start with `[` or `]`")]
    LowerBracket(String),
    #[error("upper bound `{0}` must end with `]` or `[`")]
    UpperBracket(String),
    #[error("`{0}` is not a length")]
    NotANumber(String),
}

impl LengthBounds {
    /// Checks a length, reporting at most one error per side.
    pub fn check(&self, len: usize) -> FieldErrorList {
        let mut errors = Vec::new();

        if let Some(lower) = self.lower {
            let too_short = if lower.inclusive {
                len < lower.value
            } else {
                len <= lower.value
            };
            if too_short {
                errors.push(ErrorCode::LengthMin);
            }
        }

        if let Some(upper) = self.upper {
            let too_long = if upper.inclusive {
                len > upper.value
            } else {
                len >= upper.value
            };
            if too_long {
                errors.push(ErrorCode::LengthMax);
            }
        }

        errors
    }
}

fn parse_length(digits: &str) -> Result<usize, BoundsParseError> {
    let digits = digits.trim();
    digits
        .parse::<usize>()
        .map_err(|_| BoundsParseError::NotANumber(digits.to_string()))
}

fn parse_lower(token: &str) -> Result<Option<Bound>, BoundsParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = token.strip_prefix('[') {
        parse_length(rest).map(|value| Some(Bound::inclusive(value)))
    } else if let Some(rest) = token.strip_prefix(']') {
        parse_length(rest).map(|value| Some(Bound::exclusive(value)))
    } else {
        Err(BoundsParseError::LowerBracket(token.to_string()))
    }
}

fn parse_upper(token: &str) -> Result<Option<Bound>, BoundsParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = token.strip_suffix(']') {
        parse_length(rest).map(|value| Some(Bound::inclusive(value)))
    } else if let Some(rest) = token.strip_suffix('[') {
        parse_length(rest).map(|value| Some(Bound::exclusive(value)))
    } else {
        Err(BoundsParseError::UpperBracket(token.to_string()))
    }
}

impl FromStr for LengthBounds {
    type Err = BoundsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lower, upper) = s.split_once(',').ok_or(BoundsParseError::MissingSeparator)?;
        if upper.contains(',') {
            return Err(BoundsParseError::MissingSeparator);
        }

        Ok(Self {
            lower: parse_lower(lower)?,
            upper: parse_upper(upper)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exclusive_bounds() {
        let bounds: LengthBounds = "]2,5[".parse().unwrap();
        assert_eq!(bounds.lower, Some(Bound::exclusive(2)));
        assert_eq!(bounds.upper, Some(Bound::exclusive(5)));
    }

    #[test]
    fn test_parse_open_sides() {
        let min_only: LengthBounds = "[3,".parse().unwrap();
        assert_eq!(min_only.lower, Some(Bound::inclusive(3)));
        assert_eq!(min_only.upper, None);

        let max_only: LengthBounds = ",10]".parse().unwrap();
        assert_eq!(max_only.lower, None);
        assert_eq!(max_only.upper, Some(Bound::inclusive(10)));

        assert_eq!(",".parse::<LengthBounds>().unwrap(), LengthBounds::default());
    }

    #[test]
    fn test_reject_plain_pair() {
        assert_eq!(
            "2,5".parse::<LengthBounds>(),
            Err(BoundsParseError::LowerBracket("2".to_string()))
        );
        assert_eq!(
            "[2,5".parse::<LengthBounds>(),
            Err(BoundsParseError::UpperBracket("5".to_string()))
        );
    }

    #[test]
    fn test_reject_garbage() {
        assert_eq!(
            "[2".parse::<LengthBounds>(),
            Err(BoundsParseError::MissingSeparator)
        );
        assert_eq!(
            "[1,2,3]".parse::<LengthBounds>(),
            Err(BoundsParseError::MissingSeparator)
        );
        assert_eq!(
            "[a,5]".parse::<LengthBounds>(),
            Err(BoundsParseError::NotANumber("a".to_string()))
        );
        assert_eq!(
            "[-1,5]".parse::<LengthBounds>(),
            Err(BoundsParseError::NotANumber("-1".to_string()))
        );
    }

    #[test]
    fn test_check_exclusive_interval() {
        let bounds: LengthBounds = "]2,5[".parse().unwrap();
        assert_eq!(bounds.check(2), vec![ErrorCode::LengthMin]);
        assert!(bounds.check(3).is_empty());
        assert!(bounds.check(4).is_empty());
        assert_eq!(bounds.check(5), vec![ErrorCode::LengthMax]);
    }

    #[test]
    fn test_check_inclusive_interval() {
        let bounds: LengthBounds = "[2,5]".parse().unwrap();
        assert_eq!(bounds.check(1), vec![ErrorCode::LengthMin]);
        assert!(bounds.check(2).is_empty());
        assert!(bounds.check(5).is_empty());
        assert_eq!(bounds.check(6), vec![ErrorCode::LengthMax]);
    }

    #[test]
    fn test_check_empty_range_reports_both_sides() {
        let bounds: LengthBounds = "[5,2]".parse().unwrap();
        assert_eq!(
            bounds.check(3),
            vec![ErrorCode::LengthMin, ErrorCode::LengthMax]
        );
    }
}
