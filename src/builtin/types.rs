use super::{exact, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("typeof", builtin_typeof);
  registry.register("tostring", builtin_tostring);
  registry.register("tonumber", builtin_tonumber);
  registry.register("tobool", builtin_tobool);
  registry.register("isnull", builtin_isnull);
}

fn builtin_typeof(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::string(value.type_name()))
}

fn builtin_tostring(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::String(value.to_string()))
}

/// Only strings are converted, always to a float; every other value is
/// handed back unchanged.
fn builtin_tonumber(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  match value {
    Object::String(s) => s
      .trim()
      .parse::<f64>()
      .map(Object::Float)
      .map_err(|_| CallError::Value(format!("could not convert string to number: {:?}", s))),
    other => Ok(other),
  }
}

fn builtin_tobool(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::Boolean(value.is_truthy()))
}

fn builtin_isnull(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::Boolean(matches!(value, Object::Null)))
}
