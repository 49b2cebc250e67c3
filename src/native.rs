use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::object::Object;

/// Signature shared by every built-in.
pub type BuiltinFn = fn(&mut Context, Vec<Object>) -> Result<Object, CallError>;

/// Host-provided function body.
pub type HostFn = dyn Fn(&mut Context, Vec<Object>) -> Result<Object, CallError>;

/// Why a function rejected the arguments it was called with.
#[derive(Debug, Error)]
pub enum CallError {
  #[error("expected {expected} argument(s), got {found}")]
  Arity { expected: &'static str, found: usize },
  #[error("expected {expected}, got {found}")]
  Type { expected: &'static str, found: &'static str },
  #[error("{0}")]
  Value(String),
  #[error(transparent)]
  Io(#[from] io::Error),
}

impl CallError {
  pub fn type_mismatch(expected: &'static str, found: &Object) -> CallError {
    CallError::Type {
      expected,
      found: found.type_name(),
    }
  }
}

#[derive(Clone)]
enum Body {
  Builtin(BuiltinFn),
  Host(Rc<HostFn>),
}

/// A callable runtime value: either a registry entry or a host closure.
#[derive(Clone)]
pub struct Native {
  name: Rc<str>,
  body: Body,
}

impl Native {
  pub fn builtin(name: &str, func: BuiltinFn) -> Native {
    Native {
      name: name.into(),
      body: Body::Builtin(func),
    }
  }

  pub fn host<F>(name: &str, func: F) -> Native
  where
    F: Fn(&mut Context, Vec<Object>) -> Result<Object, CallError> + 'static,
  {
    Native {
      name: name.into(),
      body: Body::Host(Rc::new(func)),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn call(&self, ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
    match &self.body {
      Body::Builtin(func) => func(ctx, args),
      Body::Host(func) => func(ctx, args),
    }
  }
}

impl fmt::Debug for Native {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Native({})", self.name)
  }
}

impl PartialEq for Native {
  fn eq(&self, other: &Native) -> bool {
    self.name == other.name
  }
}

/// Everything a built-in may touch besides its arguments: the output sink,
/// the input source and the random number generator.
pub struct Context {
  output: Box<dyn Write>,
  input: Box<dyn BufRead>,
  pub rng: StdRng,
}

impl Context {
  pub fn new(output: Box<dyn Write>, input: Box<dyn BufRead>, seed: Option<u64>) -> Self {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    Context { output, input, rng }
  }

  /// Standard output and standard input.
  pub fn stdio(seed: Option<u64>) -> Self {
    Context::new(Box::new(io::stdout()), Box::new(BufReader::new(io::stdin())), seed)
  }

  pub fn output(&mut self) -> &mut dyn Write {
    self.output.as_mut()
  }

  /// Reads one line without its terminator, `None` at end of input.
  pub fn read_line(&mut self) -> io::Result<Option<String>> {
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    if line.ends_with('\n') {
      line.pop();
      if line.ends_with('\r') {
        line.pop();
      }
    }
    Ok(Some(line))
  }
}

impl Default for Context {
  fn default() -> Self {
    Context::stdio(None)
  }
}
