use crate::token::{Diagnostic, Span, Token, TokenKind};

const SYMBOLS: &str = "{}[]():,-";
const KEYWORDS: [&str; 3] = ["true", "false", "null"];

fn is_name_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '-'
}

/// Hand-written scanner. Every character selects exactly one rule, there is
/// no backtracking and no failure: anything it does not understand is
/// skipped and noted in `diagnostics`.
pub struct Lexer {
  chars: Vec<char>,
  pos: usize,
  line: usize,
  column: usize,
  tokens: Vec<Token>,
  pub diagnostics: Vec<Diagnostic>,
}

impl Lexer {
  pub fn new(source: &str) -> Self {
    Lexer {
      chars: source.chars().collect(),
      pos: 0,
      line: 1,
      column: 1,
      tokens: Vec::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn lex(mut self) -> Vec<Token> {
    self.tokenize();
    self.tokens
  }

  /// Like [`Lexer::lex`] but also hands back the lenient recoveries.
  pub fn lex_with_diagnostics(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
    self.tokenize();
    (self.tokens, self.diagnostics)
  }

  fn tokenize(&mut self) {
    loop {
      self.skip_whitespace();

      let c = match self.peek() {
        Some(c) => c,
        None => break,
      };

      match c {
        '|' => self.read_pipe(),
        '!' => self.read_marker(TokenKind::VarGet),
        '&' => self.read_marker(TokenKind::Assign),
        '@' => self.read_object_access(),
        '#' => self.read_array_access(),
        '"' => self.read_string(),
        c if SYMBOLS.contains(c) => {
          let span = self.span();
          self.bump();
          self.push(TokenKind::Symbol, c.to_string(), span);
        }
        c if c.is_ascii_digit() => self.read_number(),
        c if c.is_alphabetic() => self.read_word(),
        c => {
          let span = self.span();
          tracing::trace!(%span, ?c, "skipping unrecognised character");
          self.diagnostics.push(Diagnostic::new(format!("unexpected character {:?}", c), span));
          self.bump();
        }
      }
    }

    let span = self.span();
    self.push(TokenKind::Eof, String::new(), span);
    tracing::debug!(count = self.tokens.len(), "tokenized source");
  }

  fn peek(&self) -> Option<char> {
    self.chars.get(self.pos).copied()
  }

  fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.pos += 1;
    if c == '\n' {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
    Some(c)
  }

  fn span(&self) -> Span {
    Span::new(self.line, self.column)
  }

  fn push(&mut self, kind: TokenKind, slice: String, span: Span) {
    self.tokens.push(Token::new(kind, slice, span));
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.peek(), Some(c) if c.is_whitespace()) {
      self.bump();
    }
  }

  fn take_while(&mut self, pred: fn(char) -> bool) -> String {
    let mut run = String::new();
    while let Some(c) = self.peek() {
      if !pred(c) {
        break;
      }
      run.push(c);
      self.bump();
    }
    run
  }

  /// Reads a name run and emits it as an identifier if it is non-empty.
  fn read_name(&mut self) {
    let span = self.span();
    let name = self.take_while(is_name_char);
    if !name.is_empty() {
      self.push(TokenKind::Identifier, name, span);
    }
  }

  fn read_pipe(&mut self) {
    let span = self.span();
    self.bump();
    let name = self.take_while(is_word_char);
    self.push(TokenKind::Pipe, name, span);
  }

  fn read_marker(&mut self, kind: TokenKind) {
    let span = self.span();
    self.bump();
    self.push(kind, String::new(), span);
    self.read_name();
  }

  fn read_object_access(&mut self) {
    self.read_marker(TokenKind::ObjectAccess);
    if self.peek() == Some('.') {
      self.bump();
      self.read_name();
    }
  }

  fn read_array_access(&mut self) {
    self.read_marker(TokenKind::ArrayAccess);
    if self.peek() == Some('.') {
      self.bump();
      let span = self.span();
      let index = self.take_while(|c| c.is_ascii_digit());
      if !index.is_empty() {
        self.push(TokenKind::Number, index, span);
      }
    }
  }

  fn read_string(&mut self) {
    let span = self.span();
    self.bump();

    let mut value = String::new();
    let mut terminated = false;

    while let Some(c) = self.bump() {
      match c {
        '"' => {
          terminated = true;
          break;
        }
        // A trailing backslash at end of input is kept as-is.
        '\\' => match self.bump() {
          Some('n') => value.push('\n'),
          Some('t') => value.push('\t'),
          Some('r') => value.push('\r'),
          Some(escaped) => value.push(escaped),
          None => value.push('\\'),
        },
        c => value.push(c),
      }
    }

    if !terminated {
      tracing::trace!(%span, "unterminated string literal");
      self.diagnostics.push(Diagnostic::new("unterminated string literal", span));
    }

    self.push(TokenKind::String, value, span);
  }

  fn read_number(&mut self) {
    let span = self.span();
    let text = self.take_while(|c| c.is_ascii_digit() || c == '.');
    self.push(TokenKind::Number, text, span);
  }

  fn read_word(&mut self) {
    let span = self.span();
    let word = self.take_while(is_word_char);
    let kind = if KEYWORDS.contains(&word.as_str()) {
      TokenKind::Keyword
    } else {
      TokenKind::Identifier
    };
    self.push(kind, word, span);
  }
}
