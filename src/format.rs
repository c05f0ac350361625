// src/format.rs
//
// Text <-> number conversion for control values.
//
// Form controls carry their value as text. These helpers keep the text
// form identical to what a browser would show for the same number.

/// Format a value the way it is displayed in a control.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        exponent_form(value)
    } else {
        format!("{}", value)
    }
}

/// `1.5e+300` / `1e-7`: shortest digits, explicit sign on positive exponents.
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// Parse control text into a value.
///
/// Never fails: text that is not a number yields NaN, which then flows
/// through like any other value.
pub fn parse_value(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => f64::NAN,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if text
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            f64::NAN
        }
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers_have_no_fraction() {
        assert_eq!(format_value(25.0), "25");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(-0.0), "0");
    }

    #[test]
    fn test_format_fractions_and_specials() {
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_switches_to_exponent() {
        assert_eq!(format_value(1e21), "1e+21");
        assert_eq!(format_value(1.5e300), "1.5e+300");
        assert_eq!(format_value(-2.5e22), "-2.5e+22");
        assert_eq!(format_value(1e-7), "1e-7");
        assert_eq!(format_value(-1.25e-9), "-1.25e-9");

        // boundaries stay decimal
        assert_eq!(format_value(1e-6), "0.000001");
        assert_eq!(format_value(1e20), "100000000000000000000");
    }

    #[test]
    fn test_exponent_text_parses_back() {
        for value in [1e21, 1.5e300, 1e-7, -3.75e-12, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(parse_value(&format_value(value)), value);
        }
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_value("42"), 42.0);
        assert_eq!(parse_value(" 0.5 "), 0.5);
        assert_eq!(parse_value("-1e3"), -1000.0);
        assert_eq!(parse_value("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        assert!(parse_value("").is_nan());
        assert!(parse_value("abc").is_nan());
        assert!(parse_value("inf").is_nan());
        assert!(parse_value("12px").is_nan());
    }
}
