use std::cmp::Ordering;

use super::{cannot_compare, exact, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("eq", builtin_eq);
  registry.register("ne", builtin_ne);
  registry.register("gt", builtin_gt);
  registry.register("lt", builtin_lt);
  registry.register("gte", builtin_gte);
  registry.register("lte", builtin_lte);
  registry.register("and", builtin_and);
  registry.register("or", builtin_or);
  registry.register("not", builtin_not);
}

fn builtin_eq(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  Ok(Object::Boolean(a == b))
}

fn builtin_ne(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  Ok(Object::Boolean(a != b))
}

fn ordered(args: Vec<Object>, accept: fn(Ordering) -> bool) -> Result<Object, CallError> {
  let [a, b] = exact(args)?;
  let ordering = a.compare(&b).ok_or_else(|| cannot_compare(&a, &b))?;
  Ok(Object::Boolean(accept(ordering)))
}

fn builtin_gt(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  ordered(args, Ordering::is_gt)
}

fn builtin_lt(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  ordered(args, Ordering::is_lt)
}

fn builtin_gte(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  ordered(args, Ordering::is_ge)
}

fn builtin_lte(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  ordered(args, Ordering::is_le)
}

fn builtin_and(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  Ok(Object::Boolean(args.iter().all(Object::is_truthy)))
}

fn builtin_or(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  Ok(Object::Boolean(args.iter().any(Object::is_truthy)))
}

fn builtin_not(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::Boolean(!value.is_truthy()))
}
