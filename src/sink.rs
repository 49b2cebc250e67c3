use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In-memory output sink. Clones share one buffer, so a host can hand one
/// clone to the evaluator and read the emitted text through another.
#[derive(Debug, Clone, Default)]
pub struct SharedSink {
  buffer: Rc<RefCell<Vec<u8>>>,
}

impl SharedSink {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contents(&self) -> String {
    String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
  }

  /// Returns everything written so far and empties the buffer.
  pub fn take(&self) -> String {
    let bytes = std::mem::take(&mut *self.buffer.borrow_mut());
    String::from_utf8_lossy(&bytes).into_owned()
  }
}

impl Write for SharedSink {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.buffer.borrow_mut().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}
