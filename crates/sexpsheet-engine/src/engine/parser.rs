//! S-expression parser for cell contents.
//!
//! Text is split into tokens on whitespace and parenthesis boundaries (quoted
//! strings are kept whole), then read by recursive descent. Symbols are not
//! checked against the reference or function grammars here; the evaluator
//! decides what a symbol means.

use regex::Regex;
use std::sync::OnceLock;

use super::error::SyntaxError;
use super::sexp::Sexp;

/// Lists nested deeper than this are rejected instead of recursing further.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Open,
    Close,
    Str(String),
    Atom(String),
}

#[derive(Clone, Debug)]
struct Located {
    token: Token,
    pos: usize,
}

/// Parse text holding exactly one form.
pub fn parse(text: &str) -> Result<Sexp, SyntaxError> {
    let tokens = tokenize(text)?;
    let mut reader = Reader { tokens, next: 0 };
    let Some(first) = reader.tokens.first() else {
        return Err(SyntaxError::at(0, "empty input"));
    };
    let start = first.pos;
    let sexp = reader.form(0)?;
    if let Some(extra) = reader.tokens.get(reader.next) {
        return Err(SyntaxError::at(
            extra.pos,
            format!("unexpected trailing input after form starting at byte {}", start),
        ));
    }
    Ok(sexp)
}

fn tokenize(text: &str) -> Result<Vec<Located>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Located { token: Token::Open, pos });
            }
            ')' => {
                chars.next();
                tokens.push(Located { token: Token::Close, pos });
            }
            '"' => {
                chars.next();
                let mut out = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, '"')) => out.push('"'),
                            Some((_, '\\')) => out.push('\\'),
                            Some((_, other)) => {
                                out.push('\\');
                                out.push(other);
                            }
                            None => break,
                        },
                        '"' => {
                            closed = true;
                            break;
                        }
                        _ => out.push(c),
                    }
                }
                if !closed {
                    return Err(SyntaxError::at(pos, "unterminated string literal"));
                }
                tokens.push(Located { token: Token::Str(out), pos });
            }
            _ => {
                let mut atom = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                        break;
                    }
                    atom.push(c);
                    chars.next();
                }
                tokens.push(Located { token: Token::Atom(atom), pos });
            }
        }
    }

    Ok(tokens)
}

struct Reader {
    tokens: Vec<Located>,
    next: usize,
}

impl Reader {
    fn form(&mut self, depth: usize) -> Result<Sexp, SyntaxError> {
        let Some(located) = self.tokens.get(self.next).cloned() else {
            let end = self.tokens.last().map(|t| t.pos + 1).unwrap_or(0);
            return Err(SyntaxError::at(end, "unexpected end of input"));
        };
        self.next += 1;

        match located.token {
            Token::Open => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(SyntaxError::at(
                        located.pos,
                        format!("nesting deeper than {} levels", MAX_NESTING_DEPTH),
                    ));
                }
                let mut items = Vec::new();
                loop {
                    match self.tokens.get(self.next) {
                        Some(Located { token: Token::Close, .. }) => {
                            self.next += 1;
                            return Ok(Sexp::List(items));
                        }
                        Some(_) => items.push(self.form(depth + 1)?),
                        None => {
                            return Err(SyntaxError::at(located.pos, "unclosed parenthesis"));
                        }
                    }
                }
            }
            Token::Close => Err(SyntaxError::at(located.pos, "unexpected ')'")),
            Token::Str(s) => Ok(Sexp::String(s)),
            Token::Atom(atom) => Ok(atom_to_sexp(atom)),
        }
    }
}

fn atom_to_sexp(atom: String) -> Sexp {
    match atom.as_str() {
        "true" => Sexp::Boolean(true),
        "false" => Sexp::Boolean(false),
        _ if numeral_re().is_match(&atom) => match atom.parse::<f64>() {
            Ok(n) => Sexp::Number(n),
            Err(_) => Sexp::Symbol(atom),
        },
        _ => Sexp::Symbol(atom),
    }
}

fn numeral_re() -> &'static Regex {
    static NUMERAL_RE: OnceLock<Regex> = OnceLock::new();
    NUMERAL_RE.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("numeral regex must compile")
    })
}
