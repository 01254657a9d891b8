use tracing::debug;

use crate::{
    format::{format_float, format_number, round_to},
    token::{MathFn, Operator, Token, TokenError},
};

/// Shown instead of a number after an invalid computation.
pub const ERROR_MARKER: &str = "Error";

/// |cos| below this means tan is undefined.
const TAN_POLE_EPSILON: f64 = 1e-12;

const FUNCTION_PRECISION: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Normal,
    /// Cleared by whatever key comes next.
    Error,
}

/// Keypad calculator with left-to-right evaluation and no operator precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    accumulator: f64,
    operator: Operator,
    new_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            accumulator: 0.0,
            operator: Operator::default(),
            new_operand: true,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// True when the next digit starts a new number instead of extending the display.
    pub fn is_new_operand(&self) -> bool {
        self.new_operand
    }

    pub fn state(&self) -> State {
        if self.display == ERROR_MARKER {
            State::Error
        } else {
            State::Normal
        }
    }

    pub fn is_error(&self) -> bool {
        self.state() == State::Error
    }

    /// Process one key press and return the new display value.
    pub fn handle_input(&mut self, token: Token) -> &str {
        self.apply(token);
        debug!(%token, display = %self.display, "Key processed");
        &self.display
    }

    /// Parse a keypad label and process it.
    pub fn press(&mut self, label: &str) -> Result<&str, TokenError> {
        let token = label.parse()?;
        Ok(self.handle_input(token))
    }

    /// Process a sequence of key presses, returning the final display value.
    pub fn feed<I>(&mut self, tokens: I) -> &str
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.handle_input(token);
        }
        &self.display
    }

    fn apply(&mut self, token: Token) {
        if self.is_error() {
            self.clear();
            return;
        }

        match token {
            Token::Clear => self.clear(),
            _ if token.is_entry() => self.enter(token),
            _ => self.operate(token),
        }
    }

    fn operate(&mut self, token: Token) {
        let Some(current) = self.value() else {
            self.fail();
            return;
        };

        match token {
            Token::Operator(op) => {
                let result = self.evaluate(current);
                self.accumulator = parse_finite(&result).unwrap_or(0.0);
                self.display = result;
                self.operator = op;
                self.new_operand = true;
            }
            Token::Equals => {
                self.display = self.evaluate(current);
                self.reset();
            }
            Token::Percent => {
                self.display = format_float(current / 100.0);
                self.reset();
            }
            Token::Negate => {
                if current > 0.0 {
                    self.display.insert(0, '-');
                } else if current < 0.0 {
                    self.display = format_number(current.abs());
                }
            }
            Token::Function(func) => {
                self.display = apply_function(func, current);
                self.reset();
            }
            Token::Power => {
                let value = self.accumulator.powf(current);
                self.display = if value.is_finite() {
                    format_float(value)
                } else {
                    ERROR_MARKER.to_string()
                };
                self.reset();
            }
            Token::Digit(_) | Token::Decimal | Token::Clear => {}
        }
    }

    /// Digits and the decimal point. A key that would leave the display
    /// unparseable (a second '.', an overflowing digit run) is ignored,
    /// as is a `Digit` outside 0-9.
    fn enter(&mut self, token: Token) {
        if matches!(token, Token::Digit(d) if d > 9) {
            return;
        }

        let fresh = self.display == "0" || self.new_operand;

        let next = match (token, fresh) {
            (Token::Decimal, true) => "0.".to_string(),
            (_, true) => token.to_string(),
            (_, false) => format!("{}{token}", self.display),
        };

        if parse_finite(&next).is_some() {
            self.display = next;
            self.new_operand = false;
        }
    }

    fn evaluate(&self, rhs: f64) -> String {
        match self.operator.apply(self.accumulator, rhs) {
            Some(value) if value.is_finite() => format_number(value),
            _ => ERROR_MARKER.to_string(),
        }
    }

    fn value(&self) -> Option<f64> {
        parse_finite(&self.display)
    }

    fn clear(&mut self) {
        self.display = "0".to_string();
        self.reset();
    }

    fn fail(&mut self) {
        self.display = ERROR_MARKER.to_string();
        self.reset();
    }

    fn reset(&mut self) {
        self.accumulator = 0.0;
        self.operator = Operator::default();
        self.new_operand = true;
    }
}

/// Trig functions take degrees; results are rounded to six places.
fn apply_function(func: MathFn, x: f64) -> String {
    let value = match func {
        MathFn::Sin => x.to_radians().sin(),
        MathFn::Cos => x.to_radians().cos(),
        MathFn::Tan => {
            let rad = x.to_radians();
            if rad.cos().abs() < TAN_POLE_EPSILON {
                return ERROR_MARKER.to_string();
            }
            rad.tan()
        }
        MathFn::Sqrt if x < 0.0 => return ERROR_MARKER.to_string(),
        MathFn::Sqrt => x.sqrt(),
    };

    if value.is_finite() {
        format_float(round_to(value, FUNCTION_PRECISION))
    } else {
        ERROR_MARKER.to_string()
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
