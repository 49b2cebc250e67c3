/// How a source text is turned into a running program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
  /// Report the first lexer or parser recovery as a syntax error instead
  /// of running the repaired program.
  pub strict: bool,
  /// Seed for `random`; `None` draws one from the operating system.
  pub seed: Option<u64>,
}

impl Options {
  pub fn strict() -> Self {
    Options {
      strict: true,
      ..Self::default()
    }
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }
}
