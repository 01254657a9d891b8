use crate::token::{MathFn, Operator, Token};

/// Palette entries used by the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    White24,
    Black,
    Orange,
    BlueGrey100,
    Green200,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::White24 => "white24",
            Color::Black => "black",
            Color::Orange => "orange",
            Color::BlueGrey100 => "bluegrey100",
            Color::Green200 => "green200",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub background: Color,
    pub foreground: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Digit,
    /// Binary operators and "=".
    Action,
    /// AC, +/- and %.
    ExtraAction,
    /// sin, cos, tan, √ and x^n.
    Math,
}

impl ButtonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonKind::Digit => "digit",
            ButtonKind::Action => "action",
            ButtonKind::ExtraAction => "extra",
            ButtonKind::Math => "math",
        }
    }

    pub fn style(&self) -> ButtonStyle {
        let (background, foreground) = match self {
            ButtonKind::Digit => (Color::White24, Color::White),
            ButtonKind::Action => (Color::Orange, Color::White),
            ButtonKind::ExtraAction => (Color::BlueGrey100, Color::Black),
            ButtonKind::Math => (Color::Green200, Color::Black),
        };

        ButtonStyle { background, foreground }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub token: Token,
    pub kind: ButtonKind,
    /// Relative width within its row.
    pub span: u8,
    pub tooltip: Option<&'static str>,
}

impl Button {
    fn new(token: Token, kind: ButtonKind) -> Self {
        Self { token, kind, span: 1, tooltip: None }
    }

    fn math(token: Token, tooltip: &'static str) -> Self {
        Self { tooltip: Some(tooltip), ..Self::new(token, ButtonKind::Math) }
    }

    pub fn label(&self) -> String {
        self.token.to_string()
    }

    pub fn style(&self) -> ButtonStyle {
        self.kind.style()
    }
}

/// Rows of the keypad, top to bottom.
pub fn keypad() -> Vec<Vec<Button>> {
    use ButtonKind::{Action, Digit, ExtraAction};

    let digit = |d: u8| Button::new(Token::Digit(d), Digit);
    let op = |o: Operator| Button::new(Token::Operator(o), Action);

    vec![
        vec![
            Button::math(Token::Function(MathFn::Sin), "sin(°)"),
            Button::math(Token::Function(MathFn::Cos), "cos(°)"),
            Button::math(Token::Function(MathFn::Tan), "tan(°)"),
            Button::math(Token::Function(MathFn::Sqrt), "sqrt"),
            Button::math(Token::Power, "x^n"),
        ],
        vec![
            Button::new(Token::Clear, ExtraAction),
            Button::new(Token::Negate, ExtraAction),
            Button::new(Token::Percent, ExtraAction),
            op(Operator::Divide),
        ],
        vec![digit(7), digit(8), digit(9), op(Operator::Multiply)],
        vec![digit(4), digit(5), digit(6), op(Operator::Subtract)],
        vec![digit(1), digit(2), digit(3), op(Operator::Add)],
        vec![
            Button { span: 2, ..digit(0) },
            Button::new(Token::Decimal, Digit),
            Button::new(Token::Equals, Action),
        ],
    ]
}
