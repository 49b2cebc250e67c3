use super::{array, between, bound, exact, slice_range, text, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("concat", builtin_concat);
  registry.register("uppercase", builtin_uppercase);
  registry.register("lowercase", builtin_lowercase);
  registry.register("split", builtin_split);
  registry.register("join", builtin_join);
  registry.register("length", builtin_length);
  registry.register("substring", builtin_substring);
  registry.register("trim", builtin_trim);
  registry.register("replace", builtin_replace);
}

fn builtin_concat(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  Ok(Object::String(args.iter().map(|arg| arg.to_string()).collect()))
}

fn builtin_uppercase(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::String(value.to_string().to_uppercase()))
}

fn builtin_lowercase(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::String(value.to_string().to_lowercase()))
}

fn builtin_split(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value, delimiter] = exact(args)?;
  let delimiter = text(&delimiter)?;
  if delimiter.is_empty() {
    return Err(CallError::Value("empty separator".to_owned()));
  }

  let parts = value.to_string().split(delimiter).map(Object::string).collect();
  Ok(Object::array(parts))
}

fn builtin_join(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [items, delimiter] = exact(args)?;
  let items = array(&items)?;
  let delimiter = text(&delimiter)?;

  let joined = items.borrow().iter().map(|item| item.to_string()).collect::<Vec<_>>().join(delimiter);
  Ok(Object::String(joined))
}

fn builtin_length(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  let len = match &value {
    Object::String(s) => s.chars().count(),
    Object::Array(items) => items.borrow().len(),
    Object::Map(entries) => entries.borrow().len(),
    other => return Err(CallError::type_mismatch("str, list or dict", other)),
  };
  Ok(Object::Integer(len as i64))
}

/// Character-based, with negative and out-of-range bounds handled like
/// `slice`.
fn builtin_substring(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  between(&args, 2, 3, "2 or 3")?;
  let chars: Vec<char> = args[0].to_string().chars().collect();
  let (start, end) = slice_range(chars.len(), bound(args.get(1))?, bound(args.get(2))?);
  Ok(Object::String(chars[start..end].iter().collect()))
}

fn builtin_trim(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value] = exact(args)?;
  Ok(Object::string(value.to_string().trim()))
}

fn builtin_replace(_: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let [value, from, to] = exact(args)?;
  Ok(Object::String(value.to_string().replace(text(&from)?, text(&to)?)))
}
