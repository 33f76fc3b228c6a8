//! Parsed formula trees.

use std::fmt;

/// An S-expression as read from a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Sexp {
    Number(f64),
    Boolean(bool),
    /// String literal contents, with escapes already resolved.
    String(String),
    /// A bare word: function name, reference, or nonsense.
    Symbol(String),
    List(Vec<Sexp>),
}

impl Sexp {
    pub fn symbol(name: &str) -> Sexp {
        Sexp::Symbol(name.to_string())
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Number(n) => f.write_str(&format_number(*n)),
            Sexp::Boolean(b) => write!(f, "{}", b),
            Sexp::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                f.write_str("\"")
            }
            Sexp::Symbol(s) => f.write_str(s),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Format a number for display.
///
/// Always keeps a decimal point: `3` is `3.0`. Magnitudes of at least 1e7 or
/// below 1e-3 use scientific form with an uppercase exponent (`1.0E7`,
/// `1.5E-4`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = n.abs();
    if n == 0.0 || (1e-3..1e7).contains(&abs) {
        let s = n.to_string();
        if s.contains('.') { s } else { format!("{}.0", s) }
    } else {
        let s = format!("{:e}", n);
        match s.split_once('e') {
            Some((mantissa, exp)) if mantissa.contains('.') => format!("{}E{}", mantissa, exp),
            Some((mantissa, exp)) => format!("{}.0E{}", mantissa, exp),
            None => s,
        }
    }
}

/// Parse a display string back into a number.
///
/// Accepts what [`format_number`] produces plus plain numerals with
/// surrounding whitespace. Rejects Rust-only spellings such as `inf`.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    match s {
        "NaN" => return Some(f64::NAN),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }
    s.parse::<f64>().ok()
}
