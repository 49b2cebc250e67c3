use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// `|name`, the slice holds the function name.
  Pipe,
  /// `!`
  VarGet,
  /// `&`
  Assign,
  /// `@`
  ObjectAccess,
  /// `#`
  ArrayAccess,

  Symbol,
  String,
  Number,
  Identifier,
  Keyword,

  Eof,
}

/// 1-based position of the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
  pub line: usize,
  pub column: usize,
}

impl Span {
  pub fn new(line: usize, column: usize) -> Span {
    Span { line, column }
  }
}

impl fmt::Display for Span {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub slice: String,
  pub span: Span,
}

impl Token {
  pub fn new(kind: TokenKind, slice: String, span: Span) -> Token {
    Token {
      kind,
      slice,
      span,
    }
  }

  pub fn is_symbol(&self, symbol: &str) -> bool {
    self.kind == TokenKind::Symbol && self.slice == symbol
  }
}

/// A lenient recovery made by the lexer or parser. Ignored unless the
/// caller asks for strict mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub message: String,
  pub span: Span,
}

impl Diagnostic {
  pub fn new(message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic {
      message: message.into(),
      span,
    }
  }
}
