//! Output destinations for the print helpers.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CallError;

/// Where [`print`](super::print) and [`print_each`](super::print_each) write.
///
/// Clones share the same destination. `Memory` captures output for
/// inspection, which is how pipelines are tested.
///
/// # Examples
///
/// ```rust
/// use pointfree::Sink;
///
/// let sink = Sink::memory();
/// sink.write_str("hello\n").unwrap();
/// assert_eq!(sink.contents().as_deref(), Some("hello\n"));
/// ```
#[derive(Clone, Default)]
pub enum Sink {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// An in-memory buffer.
    Memory(Arc<Mutex<Vec<u8>>>),
    /// Any other writer.
    Writer(Arc<Mutex<Box<dyn Write + Send>>>),
}

impl Sink {
    /// Returns a sink writing to standard output.
    pub const fn stdout() -> Self {
        Self::Stdout
    }

    /// Returns a sink writing to standard error.
    pub const fn stderr() -> Self {
        Self::Stderr
    }

    /// Returns an empty in-memory sink.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(Vec::new())))
    }

    /// Returns a sink writing to `writer`.
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::Writer(Arc::new(Mutex::new(Box::new(writer))))
    }

    /// Writes `text` and flushes.
    ///
    /// # Errors
    ///
    /// The I/O error from the underlying writer, as [`CallError::Raised`].
    pub fn write_str(&self, text: &str) -> Result<(), CallError> {
        match self {
            Self::Stdout => write_all(&mut io::stdout().lock(), text),
            Self::Stderr => write_all(&mut io::stderr().lock(), text),
            Self::Memory(buffer) => {
                buffer.lock().extend_from_slice(text.as_bytes());
                Ok(())
            }
            Self::Writer(writer) => write_all(&mut *writer.lock(), text),
        }
    }

    /// Returns the captured output of a `Memory` sink.
    pub fn contents(&self) -> Option<String> {
        match self {
            Self::Memory(buffer) => Some(String::from_utf8_lossy(&buffer.lock()).into_owned()),
            _ => None,
        }
    }
}

fn write_all(writer: &mut dyn Write, text: &str) -> Result<(), CallError> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

impl fmt::Debug for Sink {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => formatter.write_str("Stdout"),
            Self::Stderr => formatter.write_str("Stderr"),
            Self::Memory(buffer) => formatter
                .debug_struct("Memory")
                .field("bytes", &buffer.lock().len())
                .finish(),
            Self::Writer(_) => formatter.write_str("Writer"),
        }
    }
}
