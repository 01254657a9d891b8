//! Core library for the `calc` keypad calculator.
//!
//! This crate defines:
//! - The input/evaluation state machine driven one key at a time
//! - The key token model and its textual labels
//! - Display formatting of numeric results
//! - The keypad layout and per-kind button styling
//!
//! It is used by `calc-cli`, but any front end can own a [`Calculator`],
//! forward key presses into it and render [`Calculator::display`].

pub mod engine;
pub mod format;
pub mod keypad;
pub mod token;

pub use engine::{Calculator, ERROR_MARKER, State};
pub use keypad::{Button, ButtonKind, ButtonStyle, Color, keypad};
pub use token::{MathFn, Operator, Token, TokenError, tokenize};
