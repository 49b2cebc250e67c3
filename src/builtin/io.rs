use chrono::Local;

use super::{between, Registry};
use crate::native::{CallError, Context};
use crate::object::Object;

pub(super) fn register(registry: &mut Registry) {
  registry.register("print", builtin_print);
  registry.register("log", builtin_print);
  registry.register("input", builtin_input);
  registry.register("time", builtin_time);
}

fn builtin_print(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  let line = args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().join(" ");
  writeln!(ctx.output(), "{}", line)?;

  Ok(Object::Null)
}

fn builtin_input(ctx: &mut Context, args: Vec<Object>) -> Result<Object, CallError> {
  between(&args, 0, 1, "0 or 1")?;

  if let Some(prompt) = args.first() {
    write!(ctx.output(), "{}", prompt)?;
    ctx.output().flush()?;
  }

  Ok(ctx.read_line()?.map(Object::String).unwrap_or(Object::Null))
}

fn builtin_time(_: &mut Context, _: Vec<Object>) -> Result<Object, CallError> {
  Ok(Object::Integer(Local::now().timestamp_millis()))
}
