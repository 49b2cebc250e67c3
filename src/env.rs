use std::collections::HashMap;
use std::sync::Arc;

use crate::builtin::{builtin, Registry};
use crate::native::Native;
use crate::object::Object;

type Objects = HashMap<String, Object>;

/// One flat, mutable namespace plus the read-only built-in registry and
/// the functions the host registered. There are no nested scopes.
#[derive(Debug)]
pub struct Env {
  objects: Objects,
  builtins: Arc<Registry>,
  functions: HashMap<String, Native>,
}

impl Env {
  pub fn new() -> Self {
    Self::with_registry(Arc::new(builtin()))
  }

  pub fn with_registry(builtins: Arc<Registry>) -> Self {
    Self {
      objects: HashMap::new(),
      builtins,
      functions: HashMap::new(),
    }
  }

  pub fn get(&self, name: &str) -> Option<Object> {
    self.objects.get(name).cloned()
  }

  pub fn set(&mut self, name: impl Into<String>, value: Object) {
    self.objects.insert(name.into(), value);
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }

  pub fn registry(&self) -> &Arc<Registry> {
    &self.builtins
  }

  /// Registers a host function. Built-ins of the same name take precedence.
  pub fn define(&mut self, native: Native) {
    if self.builtins.contains(native.name()) {
      tracing::warn!(name = native.name(), "host function is shadowed by a built-in");
    }
    self.functions.insert(native.name().to_owned(), native);
  }

  /// Resolves a call target: the registry first, then host functions.
  pub fn function(&self, name: &str) -> Option<Native> {
    match self.builtins.get(name) {
      Some(func) => Some(Native::builtin(name, func)),
      None => self.functions.get(name).cloned(),
    }
  }
}

impl Default for Env {
  fn default() -> Self {
    Self::new()
  }
}
