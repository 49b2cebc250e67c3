use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

use crate::ast::Literal;
use crate::native::Native;

pub type Array = Rc<RefCell<Vec<Object>>>;
pub type Map = Rc<RefCell<BTreeMap<String, Object>>>;

/// A runtime value. Arrays and maps are shared: every binding holding the
/// same container sees mutations made through any other.
#[derive(Clone)]
pub enum Object {
  Null,
  Boolean(bool),
  Integer(i64),
  Float(f64),
  String(String),
  Array(Array),
  Map(Map),
  Native(Native),
}

impl Object {
  pub fn array(items: Vec<Object>) -> Object {
    Object::Array(Rc::new(RefCell::new(items)))
  }

  pub fn map(entries: BTreeMap<String, Object>) -> Object {
    Object::Map(Rc::new(RefCell::new(entries)))
  }

  pub fn string(s: impl Into<String>) -> Object {
    Object::String(s.into())
  }

  /// The name `typeof` reports.
  pub fn type_name(&self) -> &'static str {
    match self {
      Object::Null => "null",
      Object::Boolean(_) => "bool",
      Object::Integer(_) => "int",
      Object::Float(_) => "float",
      Object::String(_) => "str",
      Object::Array(_) => "list",
      Object::Map(_) => "dict",
      Object::Native(_) => "function",
    }
  }

  pub fn is_truthy(&self) -> bool {
    match self {
      Object::Null => false,
      Object::Boolean(b) => *b,
      Object::Integer(n) => *n != 0,
      Object::Float(x) => *x != 0.0,
      Object::String(s) => !s.is_empty(),
      Object::Array(items) => !items.borrow().is_empty(),
      Object::Map(entries) => !entries.borrow().is_empty(),
      Object::Native(_) => true,
    }
  }

  pub fn is_number(&self) -> bool {
    matches!(self, Object::Integer(_) | Object::Float(_))
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Object::Integer(n) => Some(*n as f64),
      Object::Float(x) => Some(*x),
      _ => None,
    }
  }

  /// Natural ordering used by `sort`, `max`, `gt` and friends. `None` means
  /// the two values cannot be ordered against each other.
  pub fn compare(&self, other: &Object) -> Option<Ordering> {
    self.compare_with(other, &mut Vec::new())
  }

  /// `pairs` holds the array pairs already being compared further up; meeting
  /// one again counts as equal instead of descending forever.
  fn compare_with(&self, other: &Object, pairs: &mut Vec<(Address, Address)>) -> Option<Ordering> {
    match (self, other) {
      (Object::Integer(a), Object::Integer(b)) => Some(a.cmp(b)),
      (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),
      (Object::String(a), Object::String(b)) => Some(a.cmp(b)),
      (Object::Boolean(a), Object::Boolean(b)) => Some(a.cmp(b)),
      (Object::Array(a), Object::Array(b)) => {
        let pair = (address(a), address(b));
        if Rc::ptr_eq(a, b) || pairs.contains(&pair) {
          return Some(Ordering::Equal);
        }

        pairs.push(pair);
        let ordering = compare_items(&a.borrow(), &b.borrow(), pairs);
        pairs.pop();
        ordering
      }
      _ => None,
    }
  }

  fn eq_with(&self, other: &Object, pairs: &mut Vec<(Address, Address)>) -> bool {
    match (self, other) {
      (Object::Null, Object::Null) => true,
      (Object::Boolean(a), Object::Boolean(b)) => a == b,
      (Object::Integer(a), Object::Integer(b)) => a == b,
      (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
      (Object::String(a), Object::String(b)) => a == b,
      (Object::Array(a), Object::Array(b)) => {
        let pair = (address(a), address(b));
        if Rc::ptr_eq(a, b) || pairs.contains(&pair) {
          return true;
        }

        pairs.push(pair);
        let (a, b) = (a.borrow(), b.borrow());
        let equal = a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_with(y, pairs));
        pairs.pop();
        equal
      }
      (Object::Map(a), Object::Map(b)) => {
        let pair = (address(a), address(b));
        if Rc::ptr_eq(a, b) || pairs.contains(&pair) {
          return true;
        }

        pairs.push(pair);
        let (a, b) = (a.borrow(), b.borrow());
        let equal = a.len() == b.len()
          && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| ka == kb && va.eq_with(vb, pairs));
        pairs.pop();
        equal
      }
      (Object::Native(a), Object::Native(b)) => a == b,
      _ => false,
    }
  }

  /// Writes the value; `open` holds the containers currently being written,
  /// so a container that holds itself prints as `[...]` or `{...}`.
  fn fmt_with(&self, f: &mut Formatter<'_>, open: &mut Vec<Address>) -> fmt::Result {
    match self {
      Object::Array(items) => {
        let at = address(items);
        if open.contains(&at) {
          return f.write_str("[...]");
        }

        open.push(at);
        f.write_str("[")?;
        for (i, item) in items.borrow().iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          item.fmt_nested(f, open)?;
        }
        open.pop();
        f.write_str("]")
      }
      Object::Map(entries) => {
        let at = address(entries);
        if open.contains(&at) {
          return f.write_str("{...}");
        }

        open.push(at);
        f.write_str("{")?;
        for (i, (key, value)) in entries.borrow().iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{:?}: ", key)?;
          value.fmt_nested(f, open)?;
        }
        open.pop();
        f.write_str("}")
      }
      Object::Null => f.write_str("null"),
      Object::Boolean(b) => write!(f, "{}", b),
      Object::Integer(n) => write!(f, "{}", n),
      Object::Float(x) => {
        if x.is_finite() && x.fract() == 0.0 {
          write!(f, "{:.1}", x)
        } else {
          write!(f, "{}", x)
        }
      }
      Object::String(s) => f.write_str(s),
      Object::Native(native) => write!(f, "<function {}>", native.name()),
    }
  }

  /// How a value looks nested inside a container: strings are quoted.
  fn fmt_nested(&self, f: &mut Formatter<'_>, open: &mut Vec<Address>) -> fmt::Result {
    match self {
      Object::String(s) => write!(f, "{:?}", s),
      other => other.fmt_with(f, open),
    }
  }
}

type Address = *const ();

fn address<T>(container: &Rc<RefCell<T>>) -> Address {
  Rc::as_ptr(container) as Address
}

fn compare_items(a: &[Object], b: &[Object], pairs: &mut Vec<(Address, Address)>) -> Option<Ordering> {
  for (x, y) in a.iter().zip(b.iter()) {
    match x.compare_with(y, pairs)? {
      Ordering::Equal => continue,
      ordering => return Some(ordering),
    }
  }
  Some(a.len().cmp(&b.len()))
}

impl PartialEq for Object {
  fn eq(&self, other: &Object) -> bool {
    self.eq_with(other, &mut Vec::new())
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Object::Null => f.write_str("Null"),
      Object::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
      Object::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
      Object::Float(x) => f.debug_tuple("Float").field(x).finish(),
      Object::String(s) => f.debug_tuple("String").field(s).finish(),
      Object::Array(_) => write!(f, "Array({})", self),
      Object::Map(_) => write!(f, "Map({})", self),
      Object::Native(native) => fmt::Debug::fmt(native, f),
    }
  }
}

impl fmt::Display for Object {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.fmt_with(f, &mut Vec::new())
  }
}

impl From<Literal> for Object {
  fn from(literal: Literal) -> Self {
    match literal {
      Literal::Null => Object::Null,
      Literal::Boolean(b) => Object::Boolean(b),
      Literal::Integer(n) => Object::Integer(n),
      Literal::Float(x) => Object::Float(x),
      Literal::String(s) => Object::String(s),
    }
  }
}

impl From<bool> for Object {
  fn from(b: bool) -> Self {
    Object::Boolean(b)
  }
}

impl From<i64> for Object {
  fn from(n: i64) -> Self {
    Object::Integer(n)
  }
}

impl From<f64> for Object {
  fn from(x: f64) -> Self {
    Object::Float(x)
  }
}

impl From<&str> for Object {
  fn from(s: &str) -> Self {
    Object::String(s.to_owned())
  }
}

impl From<String> for Object {
  fn from(s: String) -> Self {
    Object::String(s)
  }
}

impl From<Vec<Object>> for Object {
  fn from(items: Vec<Object>) -> Self {
    Object::array(items)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display() {
    assert_eq!(Object::Null.to_string(), "null");
    assert_eq!(Object::Boolean(true).to_string(), "true");
    assert_eq!(Object::Integer(-7).to_string(), "-7");
    assert_eq!(Object::Float(5.0).to_string(), "5.0");
    assert_eq!(Object::Float(0.25).to_string(), "0.25");
    assert_eq!(Object::string("hi").to_string(), "hi");
    assert_eq!(
      Object::array(vec![Object::Integer(1), Object::string("a"), Object::Null]).to_string(),
      r#"[1, "a", null]"#
    );

    let mut entries = BTreeMap::new();
    entries.insert("k".to_owned(), Object::string("v"));
    entries.insert("n".to_owned(), Object::Integer(2));
    assert_eq!(Object::map(entries).to_string(), r#"{"k": "v", "n": 2}"#);
  }

  #[test]
  fn truthiness() {
    for falsy in [
      Object::Null,
      Object::Boolean(false),
      Object::Integer(0),
      Object::Float(0.0),
      Object::string(""),
      Object::array(vec![]),
      Object::map(BTreeMap::new()),
    ] {
      assert!(!falsy.is_truthy(), "{:?} should be falsy", falsy);
    }
    assert!(Object::Integer(-1).is_truthy());
    assert!(Object::string("0").is_truthy());
    assert!(Object::array(vec![Object::Null]).is_truthy());
  }

  #[test]
  fn equality_crosses_numeric_kinds_only() {
    assert_eq!(Object::Integer(1), Object::Float(1.0));
    assert_ne!(Object::Integer(1), Object::Boolean(true));
    assert_ne!(Object::string("1"), Object::Integer(1));
    assert_eq!(
      Object::array(vec![Object::Integer(1)]),
      Object::array(vec![Object::Float(1.0)])
    );
  }

  #[test]
  fn ordering() {
    assert_eq!(Object::Integer(2).compare(&Object::Float(2.5)), Some(Ordering::Less));
    assert_eq!(Object::string("b").compare(&Object::string("a")), Some(Ordering::Greater));
    assert_eq!(Object::Boolean(false).compare(&Object::Boolean(true)), Some(Ordering::Less));
    assert_eq!(
      Object::array(vec![Object::Integer(1)]).compare(&Object::array(vec![Object::Integer(1), Object::Integer(0)])),
      Some(Ordering::Less)
    );
    assert_eq!(Object::string("1").compare(&Object::Integer(1)), None);
    assert_eq!(Object::Null.compare(&Object::Null), None);
  }

  #[test]
  fn shared_containers() {
    let a = Object::array(vec![]);
    let b = a.clone();
    if let Object::Array(items) = &a {
      items.borrow_mut().push(Object::Integer(1));
    }
    assert_eq!(b.to_string(), "[1]");
  }

  /// An array whose last item is the array itself.
  fn looped(first: Object) -> Object {
    let looped = Object::array(vec![first]);
    if let Object::Array(items) = &looped {
      items.borrow_mut().push(looped.clone());
    }
    looped
  }

  #[test]
  fn self_containing_containers_display() {
    let xs = looped(Object::string("a"));
    assert_eq!(xs.to_string(), r#"["a", [...]]"#);
    assert_eq!(format!("{:?}", xs), r#"Array(["a", [...]])"#);

    let outer = Object::array(vec![xs.clone(), xs.clone()]);
    assert_eq!(outer.to_string(), r#"[["a", [...]], ["a", [...]]]"#);

    let m = Object::map(BTreeMap::new());
    if let Object::Map(entries) = &m {
      entries.borrow_mut().insert("self".to_owned(), m.clone());
    }
    assert_eq!(m.to_string(), r#"{"self": {...}}"#);
  }

  #[test]
  fn self_containing_containers_compare() {
    let (a, b) = (looped(Object::Integer(1)), looped(Object::Integer(1)));
    assert_eq!(a, a.clone());
    assert_eq!(a, b);
    assert_eq!(a.compare(&b), Some(Ordering::Equal));

    let c = looped(Object::Integer(2));
    assert_ne!(a, c);
    assert_eq!(a.compare(&c), Some(Ordering::Less));
  }
}
