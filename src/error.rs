use std::io;

use thiserror::Error;

use crate::native::CallError;
use crate::token::Diagnostic;

#[derive(Debug, Error)]
pub enum Error {
  /// A pipe call named a function that is neither built in nor defined by
  /// the host.
  #[error("function not found: {name}")]
  NameResolution { name: String },

  /// A function rejected its evaluated arguments.
  #[error("error calling {name}: {source}")]
  InvocationType {
    name: String,
    #[source]
    source: CallError,
  },

  /// Only raised in strict mode; by default malformed input is absorbed.
  #[error("{line}:{column}: {message}")]
  Syntax {
    message: String,
    line: usize,
    column: usize,
  },

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Error {
  /// Short name of the error kind, for hosts that report it separately
  /// from the message.
  pub fn kind(&self) -> &'static str {
    match self {
      Error::NameResolution { .. } => "NameResolution",
      Error::InvocationType { .. } => "InvocationType",
      Error::Syntax { .. } => "Syntax",
      Error::Io(_) => "Io",
    }
  }
}

impl From<Diagnostic> for Error {
  fn from(diagnostic: Diagnostic) -> Self {
    Error::Syntax {
      message: diagnostic.message,
      line: diagnostic.span.line,
      column: diagnostic.span.column,
    }
  }
}
