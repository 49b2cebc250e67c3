pub type Program = Vec<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Literal(Literal),
  Variable(String),
  Pipe {
    name: String,
    args: Vec<Node>,
  },
  Assign {
    name: String,
    value: Box<Node>,
  },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Null,
  Boolean(bool),
  Integer(i64),
  Float(f64),
  String(String),
}

impl Node {
  pub fn null() -> Node {
    Node::Literal(Literal::Null)
  }

  pub fn string(value: impl Into<String>) -> Node {
    Node::Literal(Literal::String(value.into()))
  }

  pub fn pipe(name: impl Into<String>, args: Vec<Node>) -> Node {
    Node::Pipe {
      name: name.into(),
      args,
    }
  }

  pub fn assign(name: impl Into<String>, value: Node) -> Node {
    Node::Assign {
      name: name.into(),
      value: Box::new(value),
    }
  }
}

impl Literal {
  /// Parses the verbatim text of a number token. Text without a `.` is an
  /// integer unless it overflows; text that is not a number at all (the
  /// lexer accepts `1.2.3`) yields `None`.
  pub fn number(text: &str) -> Option<Literal> {
    if !text.contains('.') {
      if let Ok(n) = text.parse::<i64>() {
        return Some(Literal::Integer(n));
      }
    }
    text.parse::<f64>().ok().map(Literal::Float)
  }

  pub fn negate(self) -> Literal {
    match self {
      Literal::Integer(n) => match n.checked_neg() {
        Some(n) => Literal::Integer(n),
        None => Literal::Float(-(n as f64)),
      },
      Literal::Float(x) => Literal::Float(-x),
      other => other,
    }
  }
}
