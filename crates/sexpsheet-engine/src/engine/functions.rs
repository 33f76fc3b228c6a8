//! Built-in spreadsheet functions.
//!
//! SUM, PRODUCT and ENUM are folds over their (flattened) arguments; each one
//! decides how blanks, booleans and strings contribute. `<` is a strict
//! two-argument comparison.

use std::fmt;

use super::error::ErrorReason;
use super::sexp::{format_number, parse_number};

/// An argument as seen by a function, after references have been followed.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Number(f64),
    Boolean(bool),
    Text(String),
    Blank,
    /// Display string of a nested formula that was evaluated on its own.
    Computed(String),
}

/// The functions a formula list can call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sum,
    Product,
    LessThan,
    Enum,
}

impl Function {
    pub fn lookup(name: &str) -> Option<Function> {
        match name {
            "SUM" => Some(Function::Sum),
            "PRODUCT" => Some(Function::Product),
            "<" => Some(Function::LessThan),
            "ENUM" => Some(Function::Enum),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sum => "SUM",
            Function::Product => "PRODUCT",
            Function::LessThan => "<",
            Function::Enum => "ENUM",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function expressed as a left fold over its arguments.
pub trait Fold {
    type Acc;

    fn init(&self) -> Self::Acc;
    fn step(&self, acc: Self::Acc, arg: Arg) -> Self::Acc;
    fn finish(&self, acc: Self::Acc) -> String;

    fn apply(&self, args: impl IntoIterator<Item = Arg>) -> String
    where
        Self: Sized,
    {
        let acc = args
            .into_iter()
            .fold(self.init(), |acc, arg| self.step(acc, arg));
        self.finish(acc)
    }
}

/// Sum of numeric arguments. Blanks, booleans and strings count as 0.
pub struct Sum;

impl Fold for Sum {
    type Acc = f64;

    fn init(&self) -> f64 {
        0.0
    }

    fn step(&self, acc: f64, arg: Arg) -> f64 {
        match arg {
            Arg::Number(n) => acc + n,
            Arg::Computed(s) => parse_number(&s).map_or(acc, |n| acc + n),
            Arg::Boolean(_) | Arg::Text(_) | Arg::Blank => acc,
        }
    }

    fn finish(&self, acc: f64) -> String {
        format_number(acc)
    }
}

/// Product of numeric arguments.
///
/// Blanks, booleans and strings are skipped rather than multiplied in. The
/// first number seeds the product; with no numbers at all the result is 0.
pub struct Product;

impl Fold for Product {
    type Acc = Option<f64>;

    fn init(&self) -> Option<f64> {
        None
    }

    fn step(&self, acc: Option<f64>, arg: Arg) -> Option<f64> {
        let n = match arg {
            Arg::Number(n) => n,
            Arg::Computed(s) => match parse_number(&s) {
                Some(n) => n,
                None => return acc,
            },
            Arg::Boolean(_) | Arg::Text(_) | Arg::Blank => return acc,
        };
        Some(acc.map_or(n, |product| product * n))
    }

    fn finish(&self, acc: Option<f64>) -> String {
        format_number(acc.unwrap_or(0.0))
    }
}

/// Space-separated listing of every argument's display form.
pub struct Enumerate;

/// How a blank cell shows up in an ENUM listing.
pub const ENUM_BLANK: &str = "<blank>";

impl Fold for Enumerate {
    type Acc = Vec<String>;

    fn init(&self) -> Vec<String> {
        Vec::new()
    }

    fn step(&self, mut acc: Vec<String>, arg: Arg) -> Vec<String> {
        acc.push(match arg {
            Arg::Number(n) => format_number(n),
            Arg::Boolean(b) => b.to_string(),
            Arg::Text(s) => format!("\"{}\"", s),
            Arg::Blank => ENUM_BLANK.to_string(),
            Arg::Computed(s) => s,
        });
        acc
    }

    fn finish(&self, acc: Vec<String>) -> String {
        acc.join(" ").trim_end().to_string()
    }
}

/// `(< a b)` once both arguments are known.
///
/// A blank on either side wins over an error on the other, and both win over
/// a type mismatch.
pub fn less_than(
    lhs: Result<Arg, ErrorReason>,
    rhs: Result<Arg, ErrorReason>,
) -> Result<String, ErrorReason> {
    if is_blank(&lhs) || is_blank(&rhs) {
        return Err(ErrorReason::InvalidBlankCellRef);
    }
    let lhs = lhs.map_err(ErrorReason::as_argument_error)?;
    let rhs = rhs.map_err(ErrorReason::as_argument_error)?;
    Ok((numeric(&lhs)? < numeric(&rhs)?).to_string())
}

/// A blank cell, or a nested formula that displays as blank.
fn is_blank(arg: &Result<Arg, ErrorReason>) -> bool {
    match arg {
        Ok(Arg::Blank) => true,
        Ok(Arg::Computed(s)) => s.is_empty(),
        _ => false,
    }
}

fn numeric(arg: &Arg) -> Result<f64, ErrorReason> {
    match arg {
        Arg::Number(n) => Ok(*n),
        Arg::Computed(s) => parse_number(s).ok_or(ErrorReason::ArgType),
        Arg::Boolean(_) | Arg::Text(_) => Err(ErrorReason::ArgType),
        Arg::Blank => Err(ErrorReason::InvalidBlankCellRef),
    }
}
