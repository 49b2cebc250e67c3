use std::cmp::Ordering;

use rand::Rng;

use super::{cannot_compare, exact, number, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("add", builtin_add);
  registry.register("sub", builtin_sub);
  registry.register("mul", builtin_mul);
  registry.register("div", builtin_div);
  registry.register("mod", builtin_mod);
  registry.register("abs", builtin_abs);
  registry.register("sqrt", builtin_sqrt);
  registry.register("pow", builtin_pow);
  registry.register("round", builtin_round);
  registry.register("floor", builtin_floor);
  registry.register("ceil", builtin_ceil);
  registry.register("max", builtin_max);
  registry.register("min", builtin_min);
  registry.register("random", builtin_random);
}

/// Integer arithmetic while both sides are integers and the result fits,
/// float arithmetic otherwise.
fn arith(
  a: &Object,
  b: &Object,
  int_op: fn(i64, i64) -> Option<i64>,
  float_op: fn(f64, f64) -> f64,
) -> Result<Object, CallError> {
  if let (Object::Integer(x), Object::Integer(y)) = (a, b) {
    if let Some(n) = int_op(*x, *y) {
      return Ok(Object::Integer(n));
    }
  }
  Ok(Object::Float(float_op(number(a)?, number(b)?)))
}

fn is_zero(value: &Object) -> Result<bool, CallError> {
  Ok(number(value)? == 0.0)
}

fn to_integer(x: f64) -> Result<Object, CallError> {
  if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
    Ok(Object::Integer(x as i64))
  } else {
    Err(CallError::Value(format!("cannot convert {} to an integer", x)))
  }
}

fn builtin_add(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  args
    .iter()
    .try_fold(Object::Integer(0), |sum, arg| arith(&sum, arg, i64::checked_add, |a, b| a + b))
}

fn builtin_sub(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  arith(&a, &b, i64::checked_sub, |a, b| a - b)
}

fn builtin_mul(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  if args.is_empty() {
    return Ok(Object::Integer(0));
  }
  args
    .iter()
    .try_fold(Object::Integer(1), |product, arg| arith(&product, arg, i64::checked_mul, |a, b| a * b))
}

fn builtin_div(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  let dividend = number(&a)?;
  if is_zero(&b)? {
    return Ok(Object::Integer(0));
  }
  Ok(Object::Float(dividend / number(&b)?))
}

/// Floored modulo: the result takes the sign of the divisor.
fn builtin_mod(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  number(&a)?;
  if is_zero(&b)? {
    return Ok(Object::Integer(0));
  }
  arith(
    &a,
    &b,
    |x, y| {
      let r = x.checked_rem(y).unwrap_or(0);
      Some(if r != 0 && (r < 0) != (y < 0) { r + y } else { r })
    },
    |x, y| {
      let r = x % y;
      if r != 0.0 && (r < 0.0) != (y < 0.0) {
        r + y
      } else {
        r
      }
    },
  )
}

fn builtin_abs(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a] = exact(args)?;
  match a {
    Object::Integer(n) => Ok(n.checked_abs().map(Object::Integer).unwrap_or(Object::Float((n as f64).abs()))),
    other => Ok(Object::Float(number(&other)?.abs())),
  }
}

fn builtin_sqrt(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a] = exact(args)?;
  let x = number(&a)?;
  if x < 0.0 {
    return Err(CallError::Value("math domain error".to_owned()));
  }
  Ok(Object::Float(x.sqrt()))
}

fn builtin_pow(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [base, exponent] = exact(args)?;

  if let (Object::Integer(b), Object::Integer(e)) = (&base, &exponent) {
    if let Some(n) = u32::try_from(*e).ok().and_then(|e| b.checked_pow(e)) {
      return Ok(Object::Integer(n));
    }
  }

  let (b, e) = (number(&base)?, number(&exponent)?);
  if b == 0.0 && e < 0.0 {
    return Err(CallError::Value("zero cannot be raised to a negative power".to_owned()));
  }
  let result = b.powf(e);
  if result.is_nan() && !b.is_nan() && !e.is_nan() {
    return Err(CallError::Value("math domain error".to_owned()));
  }
  Ok(Object::Float(result))
}

fn rounded(args: Vec<Object>, op: fn(f64) -> f64) -> Result<Object, CallError> {
  let [a] = exact(args)?;
  match a {
    Object::Integer(n) => Ok(Object::Integer(n)),
    other => to_integer(op(number(&other)?)),
  }
}

/// Halves round to the nearest even integer.
fn builtin_round(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  rounded(args, f64::round_ties_even)
}

fn builtin_floor(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  rounded(args, f64::floor)
}

fn builtin_ceil(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  rounded(args, f64::ceil)
}

/// Picks the extreme value; a lone array argument ranges over its items.
fn extreme(args: Vec<Object>, wanted: Ordering) -> Result<Object, CallError> {
  let spread = match args.as_slice() {
    [Object::Array(items)] => Some(items.borrow().clone()),
    _ => None,
  };

  let mut candidates = spread.unwrap_or(args).into_iter();
  let mut best = match candidates.next() {
    Some(first) => first,
    None => return Ok(Object::Integer(0)),
  };

  for candidate in candidates {
    let ordering = candidate.compare(&best).ok_or_else(|| cannot_compare(&candidate, &best))?;
    if ordering == wanted {
      best = candidate;
    }
  }
  Ok(best)
}

fn builtin_max(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  extreme(args, Ordering::Greater)
}

fn builtin_min(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  extreme(args, Ordering::Less)
}

/// Uniform in `[0, 1)`, or between the two bounds when exactly two are given.
fn builtin_random(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let r: f64 = ctx.rng.gen();
  if let [low, high] = args.as_slice() {
    let (low, high) = (number(low)?, number(high)?);
    return Ok(Object::Float(low + (high - low) * r));
  }
  Ok(Object::Float(r))
}
