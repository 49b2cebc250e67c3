use super::{exact, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("keys", builtin_keys);
  registry.register("values", builtin_values);
  registry.register("get", builtin_get);
  registry.register("set", builtin_set);
}

fn builtin_keys(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(match value {
    Object::Map(entries) => Object::array(entries.borrow().keys().map(Object::string).collect()),
    _ => Object::array(vec![]),
  })
}

fn builtin_values(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(match value {
    Object::Map(entries) => Object::array(entries.borrow().values().cloned().collect()),
    _ => Object::array(vec![]),
  })
}

/// Keys are compared by their text, so `1` and `"1"` name the same entry.
fn builtin_get(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value, key] = exact(args)?;
  Ok(match value {
    Object::Map(entries) => entries.borrow().get(&key.to_string()).cloned().unwrap_or(Object::Null),
    _ => Object::Null,
  })
}

/// Inserts into a map and returns that same map; anything else comes back
/// untouched.
fn builtin_set(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [target, key, value] = exact(args)?;
  if let Object::Map(entries) = &target {
    // The key may be this very map; render it before borrowing mutably.
    let key = key.to_string();
    entries.borrow_mut().insert(key, value);
  }
  Ok(target)
}
