//! Rendering of numeric results for the display.

/// Whole numbers lose their fractional part (`15.0` -> `"15"`), anything else
/// keeps its shortest round-trip decimal form (`0.1 + 0.2` -> `"0.30000000000000004"`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0.0
        "0".to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Float rendering used after functions: always carries a fractional part
/// (`1.0`, `8.0`) and switches to exponent form for very large or small values.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// Round half away from zero to `places` decimal digits.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;

    if rounded.is_finite() {
        rounded + 0.0
    } else {
        value
    }
}
