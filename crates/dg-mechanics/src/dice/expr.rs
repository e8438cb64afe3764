//! Typed dice notation such as `d20`, `2d6+3` or `3 D 8 - 1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DiceRollResult, roll_dice};
use crate::error::{MechError, MechResult};
use crate::random::RandomSource;

/// Most dice a single expression may roll.
pub const MAX_COUNT: u32 = 100;

/// Most faces a die in an expression may have.
pub const MAX_SIDES: u32 = 1000;

/// A parsed `[count]d<sides>[+/-modifier]` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice, 1 when omitted.
    pub count: u32,
    /// Faces per die.
    pub sides: u32,
    /// Flat modifier, 0 when omitted.
    pub modifier: i32,
}

impl DiceExpr {
    /// A single die with no modifier.
    pub fn die(sides: u32) -> Self {
        Self {
            count: 1,
            sides,
            modifier: 0,
        }
    }

    /// Build an expression from parts.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll this expression, labelling the result with its notation.
    pub fn roll(&self, rng: &mut impl RandomSource) -> MechResult<DiceRollResult> {
        roll_dice(rng, self.sides, self.count, self.modifier, self.to_string())
    }

    /// Smallest possible total.
    pub fn min_total(&self) -> i64 {
        i64::from(self.count) + i64::from(self.modifier)
    }

    /// Largest possible total.
    pub fn max_total(&self) -> i64 {
        i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier)
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| MechError::InvalidExpression {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.is_empty() {
            return Err(invalid("expression is empty"));
        }

        let (count_part, rest) = compact
            .split_once('d')
            .ok_or_else(|| invalid("expected a 'd' between count and sides"))?;

        let count = if count_part.is_empty() {
            1
        } else {
            parse_number(count_part).ok_or_else(|| invalid("dice count must be a number"))?
        };

        let sign_at = rest.find(['+', '-']);
        let (sides_part, modifier) = match sign_at {
            Some(idx) => {
                let (sides_part, signed) = rest.split_at(idx);
                let magnitude = &signed[1..];
                let value = parse_number(magnitude)
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| invalid("modifier must be a number"))?;
                let modifier = if signed.starts_with('-') { -value } else { value };
                (sides_part, modifier)
            }
            None => (rest, 0),
        };

        if sides_part.is_empty() {
            return Err(invalid("missing number of sides"));
        }
        let sides = parse_number(sides_part).ok_or_else(|| invalid("sides must be a number"))?;

        if !(1..=MAX_COUNT).contains(&count) {
            return Err(invalid(&format!("dice count must be between 1 and {MAX_COUNT}")));
        }
        if !(1..=MAX_SIDES).contains(&sides) {
            return Err(invalid(&format!("sides must be between 1 and {MAX_SIDES}")));
        }

        Ok(Self {
            count,
            sides,
            modifier,
        })
    }
}

/// Digits only; no sign, no leading `+`.
fn parse_number(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    fn parse(s: &str) -> DiceExpr {
        s.parse().unwrap()
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!(parse("d20"), DiceExpr::new(1, 20, 0));
        assert_eq!(parse("2d6"), DiceExpr::new(2, 6, 0));
        assert_eq!(parse("2d6+3"), DiceExpr::new(2, 6, 3));
        assert_eq!(parse("1d8-2"), DiceExpr::new(1, 8, -2));
    }

    #[test]
    fn tolerates_whitespace_and_case() {
        assert_eq!(parse("  3 D 8 - 1 "), DiceExpr::new(3, 8, -1));
        assert_eq!(parse("2d6 + 5"), DiceExpr::new(2, 6, 5));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "", "   ", "20", "d", "2d", "xd6", "2d6+", "2d6+x", "2dd6", "2d6+3+1", "-2d6", "2d-6",
            "2.5d6", "d6 plus 2",
        ] {
            let err = bad.parse::<DiceExpr>().unwrap_err();
            assert!(
                matches!(err, MechError::InvalidExpression { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn enforces_bounds() {
        assert!("0d6".parse::<DiceExpr>().is_err());
        assert!("101d6".parse::<DiceExpr>().is_err());
        assert!("1d0".parse::<DiceExpr>().is_err());
        assert!("1d1001".parse::<DiceExpr>().is_err());
        assert_eq!(parse("100d1000"), DiceExpr::new(100, 1000, 0));
        assert_eq!(parse("1d1"), DiceExpr::die(1));
    }

    #[test]
    fn error_names_input_and_reason() {
        let err = "2d".parse::<DiceExpr>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid dice expression \"2d\": missing number of sides"
        );
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(parse(" d20 ").to_string(), "1d20");
        assert_eq!(parse("2D6 +3").to_string(), "2d6+3");
        assert_eq!(parse("4d4-1").to_string(), "4d4-1");
    }

    #[test]
    fn rolls_with_its_own_label() {
        let mut rng = ScriptedSource::new(&[6, 5]);
        let r = parse("2d6+3").roll(&mut rng).unwrap();
        assert_eq!(r.total, 14);
        assert_eq!(r.label, "2d6+3");
    }

    #[test]
    fn min_and_max_totals() {
        let e = parse("3d6-2");
        assert_eq!(e.min_total(), 1);
        assert_eq!(e.max_total(), 16);
    }
}
