//! Sandboxed arithmetic expressions over a single series variable `x`.
//!
//! The grammar is closed: numeric literals, the variable `x`, the constants
//! `pi` and `e`, the operators `+ - * / % ^ **`, parentheses, and a fixed
//! table of functions. Function and constant names may carry an `np.`
//! prefix (`np.sqrt(x)`), which is ignored.
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/" | "%") unary)*
//! unary   := ("+" | "-") unary | power
//! power   := primary (("^" | "**") unary)?
//! primary := number | name | name "(" expr ("," expr)* ")" | "(" expr ")"
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::catalog::scale;

/// Longest accepted expression text, in bytes.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Deepest accepted nesting of sub-expressions.
pub const MAX_DEPTH: usize = 64;

/// Errors from parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("expression nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("unknown name '{name}' at position {position} (only 'x', 'pi' and 'e' are defined)")]
    UnknownName { name: String, position: usize },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("{function}() takes {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    Domain(String),
}

type ExprResult<T> = std::result::Result<T, ExpressionError>;

// =============================================================================
// TOKENS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Name(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(text: &str) -> ExprResult<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i];

        let kind = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                TokenKind::Caret
            }
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i);
                let literal = &text[start..i];
                let value = literal.parse::<f64>().map_err(|_| ExpressionError::InvalidNumber {
                    text: literal.to_string(),
                    position: start,
                })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
                {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Name(text[start..i].to_string()),
                    position: start,
                });
                continue;
            }
            _ => {
                // Report the full character, not the byte.
                let ch = text[start..].chars().next().unwrap_or('?');
                return Err(ExpressionError::UnexpectedChar { ch, position: start });
            }
        };

        i += 1;
        tokens.push(Token {
            kind,
            position: start,
        });
    }

    Ok(tokens)
}

/// End index of a numeric literal: digits, one optional fraction, one
/// optional exponent.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

// =============================================================================
// SYNTAX TREE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Floor,
    Ceil,
    Round,
    Min,
    Max,
    Pow,
    Clamp,
    Scale,
}

impl Function {
    /// Every callable function.
    pub const ALL: [Function; 23] = [
        Function::Abs,
        Function::Sqrt,
        Function::Exp,
        Function::Ln,
        Function::Log10,
        Function::Log2,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Floor,
        Function::Ceil,
        Function::Round,
        Function::Min,
        Function::Max,
        Function::Pow,
        Function::Clamp,
        Function::Scale,
    ];

    fn lookup(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Function::Ln),
            "power" => Some(Function::Pow),
            "clip" => Some(Function::Clamp),
            "minimum" => Some(Function::Min),
            "maximum" => Some(Function::Max),
            "absolute" => Some(Function::Abs),
            "arcsin" => Some(Function::Asin),
            "arccos" => Some(Function::Acos),
            "arctan" => Some(Function::Atan),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Round => "round",
            Function::Min => "min",
            Function::Max => "max",
            Function::Pow => "pow",
            Function::Clamp => "clamp",
            Function::Scale => "scale",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Function::Min | Function::Max | Function::Pow => 2,
            Function::Clamp => 3,
            Function::Scale => 5,
            _ => 1,
        }
    }

    fn call(self, args: &[f64]) -> ExprResult<f64> {
        let a = args[0];
        Ok(match self {
            Function::Abs => a.abs(),
            Function::Sqrt => a.sqrt(),
            Function::Exp => a.exp(),
            Function::Ln => a.ln(),
            Function::Log10 => a.log10(),
            Function::Log2 => a.log2(),
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Asin => a.asin(),
            Function::Acos => a.acos(),
            Function::Atan => a.atan(),
            Function::Sinh => a.sinh(),
            Function::Cosh => a.cosh(),
            Function::Tanh => a.tanh(),
            Function::Floor => a.floor(),
            Function::Ceil => a.ceil(),
            Function::Round => a.round_ties_even(),
            Function::Min => a.min(args[1]),
            Function::Max => a.max(args[1]),
            Function::Pow => a.powf(args[1]),
            Function::Clamp => {
                // NaN bounds would make f64::clamp panic.
                let (lo, hi) = (args[1], args[2]);
                if lo.is_nan() || hi.is_nan() || lo > hi {
                    return Err(ExpressionError::Domain(format!(
                        "clamp() bounds must satisfy lo <= hi, got {} and {}",
                        lo, hi
                    )));
                }
                a.clamp(lo, hi)
            }
            Function::Scale => scale(a, args[1], args[2], args[3], args[4])
                .map_err(|e| ExpressionError::Domain(e.to_string()))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Number(f64),
    Variable,
    Negate(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

impl Node {
    fn eval(&self, x: f64) -> ExprResult<f64> {
        match self {
            Node::Number(n) => Ok(*n),
            Node::Variable => Ok(x),
            Node::Negate(inner) => Ok(-inner.eval(x)?),
            Node::Binary(op, lhs, rhs) => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                Ok(match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    // Floored modulo: the result takes the sign of the divisor.
                    BinaryOp::Rem => a - b * (a / b).floor(),
                    BinaryOp::Pow => a.powf(b),
                })
            }
            Node::Call(function, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(x))
                    .collect::<ExprResult<Vec<f64>>>()?;
                function.call(&values)
            }
        }
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: TokenKind) -> ExprResult<()> {
        match self.next() {
            Some(token) if token.kind == expected => Ok(()),
            Some(token) => Err(unexpected(token)),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    fn descend(&mut self) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::TooDeep { max: MAX_DEPTH });
        }
        Ok(())
    }

    fn expression(&mut self) -> ExprResult<Node> {
        self.descend()?;
        let mut node = self.term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            node = Node::Binary(op, Box::new(node), Box::new(self.term()?));
        }
        self.depth -= 1;
        Ok(node)
    }

    fn term(&mut self) -> ExprResult<Node> {
        let mut node = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.pos += 1;
            node = Node::Binary(op, Box::new(node), Box::new(self.unary()?));
        }
        Ok(node)
    }

    fn unary(&mut self) -> ExprResult<Node> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.descend()?;
                let node = Node::Negate(Box::new(self.unary()?));
                self.depth -= 1;
                Ok(node)
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.descend()?;
                let node = self.unary()?;
                self.depth -= 1;
                Ok(node)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> ExprResult<Node> {
        let base = self.primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(Node::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> ExprResult<Node> {
        let token = self.next().ok_or(ExpressionError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Node::Number(n)),
            TokenKind::LParen => {
                let node = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(node)
            }
            TokenKind::Name(ref name) => {
                let bare = name.strip_prefix("np.").unwrap_or(name);
                if self.peek() == Some(&TokenKind::LParen) {
                    self.pos += 1;
                    self.call(bare, token.position)
                } else {
                    match bare {
                        "x" => Ok(Node::Variable),
                        "pi" => Ok(Node::Number(std::f64::consts::PI)),
                        "e" => Ok(Node::Number(std::f64::consts::E)),
                        _ => Err(ExpressionError::UnknownName {
                            name: name.clone(),
                            position: token.position,
                        }),
                    }
                }
            }
            _ => Err(unexpected(token)),
        }
    }

    fn call(&mut self, name: &str, position: usize) -> ExprResult<Node> {
        let function = Function::lookup(name).ok_or_else(|| ExpressionError::UnknownFunction {
            name: name.to_string(),
            position,
        })?;

        let mut args = Vec::new();
        if self.peek() != Some(&TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if self.peek() == Some(&TokenKind::Comma) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        if args.len() != function.arity() {
            return Err(ExpressionError::Arity {
                function: function.name(),
                expected: function.arity(),
                found: args.len(),
            });
        }

        Ok(Node::Call(function, args))
    }
}

fn unexpected(token: Token) -> ExpressionError {
    ExpressionError::UnexpectedToken {
        found: token.kind.to_string(),
        position: token.position,
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// A parsed, validated expression in the variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parse and validate an expression.
    pub fn parse(text: &str) -> ExprResult<Self> {
        if text.len() > MAX_EXPRESSION_LEN {
            return Err(ExpressionError::TooLong {
                len: text.len(),
                max: MAX_EXPRESSION_LEN,
            });
        }

        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }

        let mut parser = ExprParser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let root = parser.expression()?;

        if let Some(token) = parser.next() {
            return Err(unexpected(token));
        }

        Ok(Self {
            source: text.trim().to_string(),
            root,
        })
    }

    /// The expression text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate at a single value of `x`.
    pub fn evaluate(&self, x: f64) -> ExprResult<f64> {
        self.root.eval(x)
    }

    /// Evaluate element-wise over a series.
    pub fn apply(&self, series: &[f64]) -> ExprResult<Vec<f64>> {
        series.iter().map(|&x| self.evaluate(x)).collect()
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> ExprResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
