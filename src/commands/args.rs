//! Whitespace-delimited argument stream
//!
//! Handlers pull their parameters positionally from the text that follows the
//! command name. Missing or malformed fields become `InvalidArgument` errors.

use std::str::SplitWhitespace;

use crate::core::{ForceVec, Result, SimCliError};

/// Cursor over the arguments of one command invocation
#[derive(Debug, Clone)]
pub struct Args<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    /// Create a stream over the argument text
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
        }
    }

    /// Next raw token, if any
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Next token, required; `what` names the field in the error
    pub fn word(&mut self, what: &str) -> Result<&'a str> {
        self.next_token()
            .ok_or_else(|| SimCliError::invalid_argument(format!("missing {}", what)))
    }

    /// Next token parsed as a finite number
    pub fn number(&mut self, what: &str) -> Result<f64> {
        let token = self.word(what)?;
        parse_finite(token).ok_or_else(|| {
            SimCliError::invalid_argument(format!("{} must be a number, got '{}'", what, token))
        })
    }

    /// Three consecutive numbers named `<prefix>x`, `<prefix>y`, `<prefix>z`
    pub fn vector3(&mut self, prefix: &str) -> Result<[f64; 3]> {
        Ok([
            self.number(&format!("{}x", prefix))?,
            self.number(&format!("{}y", prefix))?,
            self.number(&format!("{}z", prefix))?,
        ])
    }

    /// Couple then force, `cx cy cz fx fy fz`
    pub fn force_vec(&mut self) -> Result<ForceVec> {
        let couple = self.vector3("c")?;
        let force = self.vector3("f")?;
        Ok(ForceVec::new(couple, force))
    }

    /// All remaining tokens parsed as numbers
    pub fn remaining_numbers(&mut self, what: &str) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        while let Some(token) = self.next_token() {
            let value = parse_finite(token).ok_or_else(|| {
                SimCliError::invalid_argument(format!(
                    "{}[{}] must be a number, got '{}'",
                    what,
                    values.len(),
                    token
                ))
            })?;
            values.push(value);
        }
        Ok(values)
    }

    /// Whether every token has been consumed
    pub fn is_empty(&self) -> bool {
        self.tokens.clone().next().is_none()
    }
}

// `f64::from_str` also accepts nan/inf, which no actuator target can use
fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_fields() {
        let mut args = Args::new("torso  1 2 3\t4 5 6");
        assert_eq!(args.word("body").unwrap(), "torso");
        let f = args.force_vec().unwrap();
        assert_eq!(f.couple, [1.0, 2.0, 3.0]);
        assert_eq!(f.force, [4.0, 5.0, 6.0]);
        assert!(args.is_empty());
    }

    #[test]
    fn test_missing_field() {
        let mut args = Args::new("torso 1 2 3 4");
        args.word("body").unwrap();
        let err = args.force_vec().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "missing fy");
    }

    #[test]
    fn test_malformed_number() {
        let mut args = Args::new("1 two");
        assert_eq!(args.number("cx").unwrap(), 1.0);
        let err = args.number("cy").unwrap_err();
        assert_eq!(err.to_string(), "cy must be a number, got 'two'");
    }

    #[test]
    fn test_rejects_non_finite() {
        for token in ["nan", "NaN", "inf", "-inf", "infinity", "1e999"] {
            let err = Args::new(token).number("fx").unwrap_err();
            assert!(err.is_invalid_argument(), "{} accepted", token);
        }
        let err = Args::new("0.5 inf").remaining_numbers("q").unwrap_err();
        assert_eq!(err.to_string(), "q[1] must be a number, got 'inf'");
    }

    #[test]
    fn test_remaining_numbers() {
        let mut args = Args::new("0.1 -2 3e-1");
        assert_eq!(args.remaining_numbers("q").unwrap(), vec![0.1, -2.0, 0.3]);
        assert!(Args::new("").remaining_numbers("q").unwrap().is_empty());

        let err = Args::new("0.1 x").remaining_numbers("q").unwrap_err();
        assert_eq!(err.to_string(), "q[1] must be a number, got 'x'");
    }

    #[test]
    fn test_empty_stream() {
        let mut args = Args::new("   ");
        assert!(args.is_empty());
        assert_eq!(args.word("joint").unwrap_err().to_string(), "missing joint");
    }
}
