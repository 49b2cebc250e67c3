pub mod ast;
pub mod builtin;
pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod native;
pub mod object;
pub mod parser;
pub mod sink;
pub mod token;

pub use config::Options;
pub use error::Error;
pub use evaluator::Evaluator;
pub use native::{CallError, Context};
pub use object::Object;

use ast::Program;
use lexer::Lexer;
use parser::Parser;
use token::Token;

pub fn tokenize(source: &str) -> Vec<Token> {
  Lexer::new(source).lex()
}

/// Parses leniently; malformed input never fails here.
pub fn parse(source: &str) -> Program {
  Parser::new(tokenize(source)).parse()
}

/// Parses under `options`. In strict mode the first recovery the lexer or
/// parser made comes back as [`Error::Syntax`].
pub fn compile(source: &str, options: &Options) -> Result<Program, Error> {
  let (tokens, lex_diagnostics) = Lexer::new(source).lex_with_diagnostics();
  let (program, parse_diagnostics) = Parser::new(tokens).parse_with_diagnostics();

  if options.strict {
    if let Some(diagnostic) = lex_diagnostics.into_iter().chain(parse_diagnostics).next() {
      return Err(diagnostic.into());
    }
  }

  Ok(program)
}

/// Evaluates `source` in a fresh evaluator wired to standard input and
/// output, returning the value of the last statement.
pub fn run(source: &str) -> Result<Object, Error> {
  run_with(source, &Options::default())
}

pub fn run_with(source: &str, options: &Options) -> Result<Object, Error> {
  let program = compile(source, options)?;
  let mut evaluator = Evaluator::with_context(Context::stdio(options.seed));
  evaluator.eval(&program)
}
