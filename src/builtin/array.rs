use std::cmp::Ordering;

use super::{array, between, bound, callable, exact, slice_range, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("push", builtin_push);
  registry.register("pop", builtin_pop);
  registry.register("shift", builtin_shift);
  registry.register("unshift", builtin_unshift);
  registry.register("slice", builtin_slice);
  registry.register("reverse", builtin_reverse);
  registry.register("sort", builtin_sort);
  registry.register("map", builtin_map);
  registry.register("filter", builtin_filter);
  registry.register("find", builtin_find);
  registry.register("some", builtin_some);
  registry.register("every", builtin_every);
}

fn builtin_push(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [target, value] = exact(args)?;
  array(&target)?.borrow_mut().push(value);
  Ok(target)
}

fn builtin_unshift(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [target, value] = exact(args)?;
  array(&target)?.borrow_mut().insert(0, value);
  Ok(target)
}

/// Removes and returns the last item; an empty or missing array gives `null`.
fn builtin_pop(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [target] = exact(args)?;
  if !target.is_truthy() {
    return Ok(Object::Null);
  }
  let popped = array(&target)?.borrow_mut().pop();
  Ok(popped.unwrap_or(Object::Null))
}

fn builtin_shift(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [target] = exact(args)?;
  if !target.is_truthy() {
    return Ok(Object::Null);
  }
  let items = array(&target)?;
  let mut items = items.borrow_mut();
  Ok(if items.is_empty() { Object::Null } else { items.remove(0) })
}

fn builtin_slice(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  between(&args, 2, 3, "2 or 3")?;
  let (start, end) = (bound(args.get(1))?, bound(args.get(2))?);

  match &args[0] {
    Object::Array(items) => {
      let items = items.borrow();
      let (start, end) = slice_range(items.len(), start, end);
      Ok(Object::array(items[start..end].to_vec()))
    }
    Object::String(s) => {
      let chars: Vec<char> = s.chars().collect();
      let (start, end) = slice_range(chars.len(), start, end);
      Ok(Object::String(chars[start..end].iter().collect()))
    }
    other => Err(CallError::type_mismatch("list or str", other)),
  }
}

fn builtin_reverse(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  match &value {
    Object::Array(items) => Ok(Object::array(items.borrow().iter().rev().cloned().collect())),
    Object::String(s) => Ok(Object::String(s.chars().rev().collect())),
    other => Err(CallError::type_mismatch("list or str", other)),
  }
}

/// Stable ascending sort into a new array.
fn builtin_sort(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  let mut items = array(&value)?.borrow().clone();

  let mut failure = None;
  items.sort_by(|a, b| {
    a.compare(b).unwrap_or_else(|| {
      failure.get_or_insert_with(|| super::cannot_compare(a, b));
      Ordering::Equal
    })
  });

  match failure {
    Some(error) => Err(error),
    None => Ok(Object::array(items)),
  }
}

/// Snapshot of the array and the callable for the higher-order built-ins.
fn each(args: Vec<Object>) -> Result<(Vec<Object>, Object), CallError> {
  let [items, func] = exact(args)?;
  callable(&func)?;
  let items = array(&items)?.borrow().clone();
  Ok((items, func))
}

fn apply(ctx: &mut Context, func: &Object, item: Object) -> Result<Object, CallError> {
  callable(func)?.call(ctx, vec![item])
}

fn builtin_map(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let (items, func) = each(args)?;
  let mapped = items
    .into_iter()
    .map(|item| apply(ctx, &func, item))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(Object::array(mapped))
}

fn builtin_filter(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let (items, func) = each(args)?;
  let mut kept = Vec::new();
  for item in items {
    if apply(ctx, &func, item.clone())?.is_truthy() {
      kept.push(item);
    }
  }
  Ok(Object::array(kept))
}

fn builtin_find(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let (items, func) = each(args)?;
  for item in items {
    if apply(ctx, &func, item.clone())?.is_truthy() {
      return Ok(item);
    }
  }
  Ok(Object::Null)
}

fn builtin_some(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let (items, func) = each(args)?;
  for item in items {
    if apply(ctx, &func, item)?.is_truthy() {
      return Ok(Object::Boolean(true));
    }
  }
  Ok(Object::Boolean(false))
}

fn builtin_every(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let (items, func) = each(args)?;
  for item in items {
    if !apply(ctx, &func, item)?.is_truthy() {
      return Ok(Object::Boolean(false));
    }
  }
  Ok(Object::Boolean(true))
}
