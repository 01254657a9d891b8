use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Unknown key '{0}'. Try digits, '.', + - * /, =, %, +/-, sin, cos, tan, √, x^n or AC.")]
    Unknown(String),
}

/// Binary operator waiting for its right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// `None` when dividing by zero.
    pub fn apply(&self, a: f64, b: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(a + b),
            Operator::Subtract => Some(a - b),
            Operator::Multiply => Some(a * b),
            Operator::Divide if b == 0.0 => None,
            Operator::Divide => Some(a / b),
        }
    }
}

/// Unary function applied to the displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl MathFn {
    pub fn as_str(&self) -> &'static str {
        match self {
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
            MathFn::Tan => "tan",
            MathFn::Sqrt => "√",
        }
    }
}

/// A single key press fed into the [`Calculator`](crate::Calculator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A single digit key, 0-9. Larger values are ignored by the engine.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Percent,
    Negate,
    Function(MathFn),
    Power,
    Clear,
}

impl Token {
    /// Digits and the decimal point extend the display rather than act on it.
    pub fn is_entry(&self) -> bool {
        matches!(self, Token::Digit(_) | Token::Decimal)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(d) => write!(f, "{d}"),
            Token::Decimal => f.write_str("."),
            Token::Operator(op) => f.write_str(op.as_str()),
            Token::Equals => f.write_str("="),
            Token::Percent => f.write_str("%"),
            Token::Negate => f.write_str("+/-"),
            Token::Function(func) => f.write_str(func.as_str()),
            Token::Power => f.write_str("x^n"),
            Token::Clear => f.write_str("AC"),
        }
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let [b @ b'0'..=b'9'] = trimmed.as_bytes() {
            return Ok(Token::Digit(b - b'0'));
        }

        let token = match trimmed.to_lowercase().as_str() {
            "." => Token::Decimal,
            "+" => Token::Operator(Operator::Add),
            "-" => Token::Operator(Operator::Subtract),
            "*" | "x" | "×" => Token::Operator(Operator::Multiply),
            "/" | "÷" => Token::Operator(Operator::Divide),
            "=" => Token::Equals,
            "%" => Token::Percent,
            "+/-" | "neg" => Token::Negate,
            "sin" => Token::Function(MathFn::Sin),
            "cos" => Token::Function(MathFn::Cos),
            "tan" => Token::Function(MathFn::Tan),
            "√" | "sqrt" => Token::Function(MathFn::Sqrt),
            "x^n" | "^" | "pow" => Token::Power,
            "ac" | "c" | "clear" => Token::Clear,
            _ => return Err(TokenError::Unknown(trimmed.to_string())),
        };

        Ok(token)
    }
}

/// Split a whitespace separated line of key labels into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token>, TokenError> {
    line.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keypad_labels() {
        assert_eq!("7".parse::<Token>(), Ok(Token::Digit(7)));
        assert_eq!("+/-".parse::<Token>(), Ok(Token::Negate));
        assert_eq!("√".parse::<Token>(), Ok(Token::Function(MathFn::Sqrt)));
        assert_eq!("x^n".parse::<Token>(), Ok(Token::Power));
        assert_eq!("AC".parse::<Token>(), Ok(Token::Clear));
        assert_eq!("/".parse::<Token>(), Ok(Token::Operator(Operator::Divide)));
    }

    #[test]
    fn parses_ascii_aliases() {
        assert_eq!("sqrt".parse::<Token>(), Ok(Token::Function(MathFn::Sqrt)));
        assert_eq!("^".parse::<Token>(), Ok(Token::Power));
        assert_eq!("neg".parse::<Token>(), Ok(Token::Negate));
        assert_eq!("clear".parse::<Token>(), Ok(Token::Clear));
    }

    #[test]
    fn display_matches_keypad_label() {
        for label in ["0", "9", ".", "+", "-", "*", "/", "=", "%", "+/-", "sin", "cos", "tan", "√", "x^n", "AC"] {
            let token: Token = label.parse().expect("label should parse");
            assert_eq!(token.to_string(), label);
        }
    }

    #[test]
    fn unknown_label_errors() {
        let err = "log".parse::<Token>().unwrap_err();
        assert_eq!(err, TokenError::Unknown("log".to_string()));
        assert!(err.to_string().contains("Unknown key 'log'"));

        assert!("12".parse::<Token>().is_err());
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        let tokens = tokenize(" 1 0  + 5 = ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Digit(1),
                Token::Digit(0),
                Token::Operator(Operator::Add),
                Token::Digit(5),
                Token::Equals,
            ]
        );

        assert!(tokenize("1 + two").is_err());
    }

    #[test]
    fn entry_keys() {
        assert!(Token::Digit(0).is_entry());
        assert!(Token::Decimal.is_entry());
        assert!(!Token::Negate.is_entry());
        assert!(!Token::Operator(Operator::Add).is_entry());
    }

    #[test]
    fn divide_by_zero_has_no_value() {
        assert_eq!(Operator::Divide.apply(8.0, 0.0), None);
        assert_eq!(Operator::Divide.apply(8.0, 2.0), Some(4.0));
        assert_eq!(Operator::Subtract.apply(2.0, 5.0), Some(-3.0));
    }
}
