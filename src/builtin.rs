use std::collections::HashMap;
use std::fmt;

use crate::native::{BuiltinFn, CallError, Native};
use crate::object::{Array, Object};

mod array;
mod control;
mod dict;
mod io;
mod logic;
mod math;
mod string;
mod types;

/// The immutable table every pipe call resolves against. Entries are plain
/// function pointers, so one registry can be shared between evaluators.
pub struct Registry {
  table: HashMap<&'static str, BuiltinFn>,
}

impl Registry {
  fn new() -> Self {
    Registry {
      table: HashMap::new(),
    }
  }

  fn register(&mut self, name: &'static str, func: BuiltinFn) {
    self.table.insert(name, func);
  }

  pub fn get(&self, name: &str) -> Option<BuiltinFn> {
    self.table.get(name).copied()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.table.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

  /// Registered names in alphabetical order.
  pub fn names(&self) -> Vec<&'static str> {
    let mut names: Vec<_> = self.table.keys().copied().collect();
    names.sort_unstable();
    names
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry").field("functions", &self.len()).finish()
  }
}

pub fn builtin() -> Registry {
  let mut registry = Registry::new();
  io::register(&mut registry);
  math::register(&mut registry);
  string::register(&mut registry);
  array::register(&mut registry);
  dict::register(&mut registry);
  types::register(&mut registry);
  logic::register(&mut registry);
  control::register(&mut registry);
  registry
}

// ── argument helpers ──────────────────────────────────────────────────────────

const COUNTS: [&str; 4] = ["0", "1", "2", "3"];

/// Destructures exactly `N` arguments.
fn exact<const N: usize>(args: Vec<Object>) -> Result<[Object; N], CallError> {
  let found = args.len();
  args.try_into().map_err(|_| CallError::Arity {
    expected: COUNTS[N],
    found,
  })
}

/// Checks the argument count lies in `min..=max`.
fn between(args: &[Object], min: usize, max: usize, expected: &'static str) -> Result<(), CallError> {
  if args.len() < min || args.len() > max {
    return Err(CallError::Arity {
      expected,
      found: args.len(),
    });
  }
  Ok(())
}

fn number(arg: &Object) -> Result<f64, CallError> {
  arg.as_f64().ok_or_else(|| CallError::type_mismatch("a number", arg))
}

fn text(arg: &Object) -> Result<&str, CallError> {
  match arg {
    Object::String(s) => Ok(s),
    other => Err(CallError::type_mismatch("str", other)),
  }
}

fn array(arg: &Object) -> Result<Array, CallError> {
  match arg {
    Object::Array(items) => Ok(items.clone()),
    other => Err(CallError::type_mismatch("list", other)),
  }
}

fn callable(arg: &Object) -> Result<&Native, CallError> {
  match arg {
    Object::Native(native) => Ok(native),
    other => Err(CallError::type_mismatch("function", other)),
  }
}

/// An optional slice bound: `null` means "not given".
fn bound(arg: Option<&Object>) -> Result<Option<i64>, CallError> {
  match arg {
    None | Some(Object::Null) => Ok(None),
    Some(Object::Integer(n)) => Ok(Some(*n)),
    Some(other) => Err(CallError::type_mismatch("int or null", other)),
  }
}

/// Resolves slice bounds against a length the way negative-index slicing
/// does: negatives count from the end and everything clamps into range.
fn slice_range(len: usize, start: Option<i64>, end: Option<i64>) -> (usize, usize) {
  let len = len as i64;
  let clamp = |index: i64| {
    let index = if index < 0 { index + len } else { index };
    index.clamp(0, len) as usize
  };

  let start = start.map(clamp).unwrap_or(0);
  let end = end.map(clamp).unwrap_or(len as usize);
  (start, end.max(start))
}

fn cannot_compare(a: &Object, b: &Object) -> CallError {
  CallError::Value(format!("cannot compare {} with {}", a.type_name(), b.type_name()))
}
