//! `if`, `for` and `while` as ordinary built-ins.
//!
//! Call arguments are evaluated before dispatch, so these only select
//! between values that already exist; both branches of an `if` have run by
//! the time it is called. A callable operand is the one way to defer work:
//! it is invoked here instead of being returned.

use super::{between, exact, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("if", builtin_if);
  registry.register("for", builtin_for);
  registry.register("while", builtin_while);
}

/// Invokes callables with no arguments, passes other values through.
fn force(ctx: &mut Context, value: Object) -> Result<Object, CallError> {
  match value {
    Object::Native(native) => native.call(ctx, vec![]),
    other => Ok(other),
  }
}

fn builtin_if(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  between(&args, 2, 3, "2 or 3")?;
  let mut args = args.into_iter();
  let condition = args.next().unwrap_or(Object::Null);
  let then = args.next().unwrap_or(Object::Null);
  let otherwise = args.next().unwrap_or(Object::Null);

  if condition.is_truthy() {
    force(ctx, then)
  } else {
    force(ctx, otherwise)
  }
}

/// Applies the body to every item of an array (a lone value counts as a
/// one-item array) and collects the results.
fn builtin_for(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [iterable, body] = exact(args)?;
  let items = match iterable {
    Object::Array(items) => items.borrow().clone(),
    single => vec![single],
  };

  let mut results = Vec::with_capacity(items.len());
  for item in items {
    results.push(match &body {
      Object::Native(native) => native.call(ctx, vec![item])?,
      _ => Object::Null,
    });
  }
  Ok(Object::array(results))
}

fn builtin_while(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [condition, body] = exact(args)?;

  let condition = match condition {
    Object::Native(native) => native,
    constant if constant.is_truthy() => {
      return Err(CallError::Value(
        "while needs a function as its condition; a constant true value never terminates".to_owned(),
      ))
    }
    _ => return Ok(Object::Null),
  };

  let mut result = Object::Null;
  while condition.call(ctx, vec![])?.is_truthy() {
    result = match &body {
      Object::Native(native) => native.call(ctx, vec![])?,
      _ => Object::Null,
    };
  }
  Ok(result)
}
