use std::sync::Arc;

use crate::ast::Node;
use crate::builtin::Registry;
use crate::env::Env;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::native::{CallError, Context, Native};
use crate::object::Object;
use crate::parser::Parser;

/// Walks a program statement by statement against one environment. Every
/// binding lives until the evaluator is dropped; nothing is shared with
/// other evaluators except, optionally, the built-in registry.
pub struct Evaluator {
  env: Env,
  context: Context,
}

impl Evaluator {
  /// Fresh namespace, the standard registry and standard input/output.
  pub fn new() -> Self {
    Self::with_context(Context::default())
  }

  pub fn with_context(context: Context) -> Self {
    Evaluator {
      env: Env::new(),
      context,
    }
  }

  /// Builds an evaluator around an existing registry so several evaluators
  /// can share one.
  pub fn with_registry(registry: Arc<Registry>, context: Context) -> Self {
    Evaluator {
      env: Env::with_registry(registry),
      context,
    }
  }

  pub fn env(&self) -> &Env {
    &self.env
  }

  pub fn context(&mut self) -> &mut Context {
    &mut self.context
  }

  pub fn get_var(&self, name: &str) -> Option<Object> {
    self.env.get(name)
  }

  pub fn set_var(&mut self, name: impl Into<String>, value: Object) {
    self.env.set(name, value);
  }

  /// Makes a host closure callable as `|name:…`.
  pub fn define_function<F>(&mut self, name: &str, func: F)
  where
    F: Fn(&mut Context, Vec<Object>) -> Result<Object, CallError> + 'static,
  {
    self.env.define(Native::host(name, func));
  }

  /// A built-in as a callable value, for handing to `map`, `filter` and
  /// the other higher-order built-ins.
  pub fn builtin_ref(&self, name: &str) -> Option<Object> {
    self.env.registry().get(name).map(|func| Object::Native(Native::builtin(name, func)))
  }

  /// Tokenizes, parses and evaluates `source` leniently.
  pub fn run(&mut self, source: &str) -> Result<Object, Error> {
    let tokens = Lexer::new(source).lex();
    let program = Parser::new(tokens).parse();
    self.eval(&program)
  }

  /// Runs the statements in order and returns the value of the last one.
  /// Stops at the first failure; earlier side effects stay.
  pub fn eval(&mut self, program: &[Node]) -> Result<Object, Error> {
    let mut result = Object::Null;

    for statement in program {
      result = self.eval_node(statement)?;
    }

    Ok(result)
  }

  fn eval_node(&mut self, node: &Node) -> Result<Object, Error> {
    match node {
      Node::Literal(literal) => Ok(Object::from(literal.clone())),
      Node::Variable(name) => Ok(self.eval_identifier(name)),
      Node::Assign { name, value } => {
        let value = self.eval_node(value)?;
        self.env.set(name.as_str(), value.clone());
        Ok(value)
      }
      Node::Pipe { name, args } => self.eval_call_expression(name, args),
    }
  }

  /// Unbound names are `null`, not an error.
  fn eval_identifier(&self, name: &str) -> Object {
    self.env.get(name).unwrap_or(Object::Null)
  }

  fn eval_call_expression(&mut self, name: &str, args: &[Node]) -> Result<Object, Error> {
    let args = args
      .iter()
      .map(|arg| self.eval_node(arg))
      .collect::<Result<Vec<_>, _>>()?;

    let function = self.env.function(name).ok_or_else(|| Error::NameResolution {
      name: name.to_owned(),
    })?;

    tracing::trace!(name, args = args.len(), "calling");

    function.call(&mut self.context, args).map_err(|source| Error::InvocationType {
      name: name.to_owned(),
      source,
    })
  }
}

impl Default for Evaluator {
  fn default() -> Self {
    Self::new()
  }
}
