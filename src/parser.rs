use crate::ast::{Literal, Node, Program};
use crate::token::{Diagnostic, Span, Token, TokenKind};

/// Recursive-descent parser over the token stream. It never fails: input it
/// cannot make sense of becomes a `null` literal and a diagnostic.
pub struct Parser {
  tokens: Vec<Token>,
  pos: usize,
  pub diagnostics: Vec<Diagnostic>,
}

impl Parser {
  pub fn new(mut tokens: Vec<Token>) -> Self {
    if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
      let span = tokens.last().map(|t| t.span).unwrap_or(Span::new(1, 1));
      tokens.push(Token::new(TokenKind::Eof, String::new(), span));
    }

    Parser {
      tokens,
      pos: 0,
      diagnostics: Vec::new(),
    }
  }

  pub fn parse(mut self) -> Program {
    self.parse_program()
  }

  /// Like [`Parser::parse`] but also hands back the lenient recoveries.
  pub fn parse_with_diagnostics(mut self) -> (Program, Vec<Diagnostic>) {
    let program = self.parse_program();
    (program, self.diagnostics)
  }

  fn parse_program(&mut self) -> Program {
    let mut program = Vec::new();

    while !self.is_at_end() {
      let node = match self.current().kind {
        TokenKind::Pipe => self.parse_pipe(),
        TokenKind::Assign => self.parse_assign(),
        TokenKind::VarGet => self.parse_variable(),
        _ => self.parse_expression(),
      };
      program.push(node);
    }

    tracing::debug!(statements = program.len(), "parsed program");
    program
  }

  fn current(&self) -> &Token {
    &self.tokens[self.pos.min(self.tokens.len() - 1)]
  }

  fn advance(&mut self) {
    if self.pos < self.tokens.len() - 1 {
      self.pos += 1;
    }
  }

  fn is_at_end(&self) -> bool {
    self.current().kind == TokenKind::Eof
  }

  fn recover(&mut self, message: String) {
    let span = self.current().span;
    tracing::trace!(%span, %message, "lenient parse");
    self.diagnostics.push(Diagnostic::new(message, span));
  }

  /// A `!` only closes an argument list when it opens a new line; on the
  /// same line it is read as an argument.
  fn ends_arguments(&self) -> bool {
    let token = self.current();
    match token.kind {
      TokenKind::Pipe | TokenKind::Assign | TokenKind::Eof => true,
      TokenKind::VarGet => self.pos > 0 && token.span.line > self.tokens[self.pos - 1].span.line,
      _ => false,
    }
  }

  fn parse_pipe(&mut self) -> Node {
    let name = self.current().slice.clone();
    self.advance();

    let mut args = Vec::new();
    while !self.ends_arguments() {
      if self.current().is_symbol(":") {
        self.advance();
        continue;
      }
      args.push(self.parse_expression());
    }

    Node::Pipe { name, args }
  }

  fn parse_assign(&mut self) -> Node {
    self.advance();
    let name = self.parse_name("&");

    if self.current().is_symbol(":") {
      self.advance();
    }

    let value = self.parse_expression();
    Node::assign(name, value)
  }

  fn parse_variable(&mut self) -> Node {
    self.advance();
    Node::Variable(self.parse_name("!"))
  }

  fn parse_name(&mut self, marker: &str) -> String {
    if self.current().kind == TokenKind::Identifier {
      let name = self.current().slice.clone();
      self.advance();
      name
    } else {
      self.recover(format!("expected a name after `{}`", marker));
      String::new()
    }
  }

  fn parse_expression(&mut self) -> Node {
    let token = self.current().clone();

    match token.kind {
      TokenKind::String => {
        self.advance();
        Node::Literal(Literal::String(token.slice))
      }
      TokenKind::Number => {
        self.advance();
        self.number(&token)
      }
      TokenKind::Keyword => {
        self.advance();
        Node::Literal(match token.slice.as_str() {
          "true" => Literal::Boolean(true),
          "false" => Literal::Boolean(false),
          _ => Literal::Null,
        })
      }
      TokenKind::VarGet => self.parse_variable(),
      TokenKind::Pipe => self.parse_pipe(),
      // Bare words are text, not lookups.
      TokenKind::Identifier => {
        self.advance();
        Node::Literal(Literal::String(token.slice))
      }
      TokenKind::Symbol if token.slice == "-" => {
        self.advance();
        let next = self.current().clone();
        if next.kind == TokenKind::Number {
          self.advance();
          match self.number(&next) {
            Node::Literal(literal) => Node::Literal(literal.negate()),
            other => other,
          }
        } else {
          Node::Literal(Literal::Integer(-1))
        }
      }
      TokenKind::Eof => {
        self.recover("expected an expression, found end of input".to_owned());
        Node::null()
      }
      _ => {
        self.recover(format!("unexpected {:?} token {:?}", token.kind, token.slice));
        self.advance();
        Node::null()
      }
    }
  }

  fn number(&mut self, token: &Token) -> Node {
    match Literal::number(&token.slice) {
      Some(literal) => Node::Literal(literal),
      None => {
        tracing::trace!(span = %token.span, text = %token.slice, "malformed number");
        self.diagnostics.push(Diagnostic::new(format!("malformed number {:?}", token.slice), token.span));
        Node::null()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexer::Lexer;

  fn parse(source: &str) -> Program {
    Parser::new(Lexer::new(source).lex()).parse()
  }

  fn int(n: i64) -> Node {
    Node::Literal(Literal::Integer(n))
  }

  #[test]
  fn pipe_with_positional_arguments() {
    assert_eq!(parse("|add:5:3"), vec![Node::pipe("add", vec![int(5), int(3)])]);
  }

  #[test]
  fn pipe_without_arguments() {
    assert_eq!(parse("|random"), vec![Node::pipe("random", vec![])]);
  }

  #[test]
  fn assignment_with_and_without_colon() {
    assert_eq!(parse("&x:42"), vec![Node::assign("x", int(42))]);
    assert_eq!(parse("&x 42"), vec![Node::assign("x", int(42))]);
  }

  #[test]
  fn assignment_of_a_call() {
    assert_eq!(
      parse("&sum:|add:!x:!y"),
      vec![Node::assign(
        "sum",
        Node::pipe("add", vec![Node::Variable("x".into()), Node::Variable("y".into())])
      )]
    );
  }

  #[test]
  fn variable_on_new_line_ends_call() {
    assert_eq!(
      parse("|print:\"a\"\n!x"),
      vec![Node::pipe("print", vec![Node::string("a")]), Node::Variable("x".into())]
    );
  }

  #[test]
  fn pipe_and_assign_markers_end_call() {
    assert_eq!(
      parse("|print:1 |print:2 &y:3"),
      vec![
        Node::pipe("print", vec![int(1)]),
        Node::pipe("print", vec![int(2)]),
        Node::assign("y", int(3)),
      ]
    );
  }

  #[test]
  fn literals() {
    assert_eq!(
      parse("\"s\" 1.5 true false null word"),
      vec![
        Node::string("s"),
        Node::Literal(Literal::Float(1.5)),
        Node::Literal(Literal::Boolean(true)),
        Node::Literal(Literal::Boolean(false)),
        Node::null(),
        Node::string("word"),
      ]
    );
  }

  #[test]
  fn negative_numbers() {
    assert_eq!(parse("|abs:-5"), vec![Node::pipe("abs", vec![int(-5)])]);
    assert_eq!(parse("-2.5"), vec![Node::Literal(Literal::Float(-2.5))]);
    assert_eq!(parse("- word"), vec![int(-1), Node::string("word")]);
  }

  #[test]
  fn unknown_tokens_become_null() {
    let (program, diagnostics) = Parser::new(Lexer::new("( )").lex()).parse_with_diagnostics();
    assert_eq!(program, vec![Node::null(), Node::null()]);
    assert_eq!(diagnostics.len(), 2);
  }

  #[test]
  fn member_access_degrades_to_literals() {
    assert_eq!(parse("@user.name"), vec![Node::null(), Node::string("user"), Node::string("name")]);
  }

  #[test]
  fn malformed_number_is_null() {
    assert_eq!(parse("1.2.3"), vec![Node::null()]);
  }

  #[test]
  fn dangling_markers() {
    assert_eq!(parse("!"), vec![Node::Variable(String::new())]);
    assert_eq!(parse("&x:"), vec![Node::assign("x", Node::null())]);
  }

  #[test]
  fn empty_input() {
    assert!(parse("").is_empty());
    assert!(Parser::new(vec![]).parse().is_empty());
  }
}
