//! The shared destination that handlers write finished records to.
//!
//! See [`Sink`] for more details.
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// A writer shared by a handler and every handler derived from it.
///
/// The lock lives next to the writer, so handlers that trace back to the same
/// sink serialize their writes against each other no matter how they were
/// derived. Records are formatted before the lock is taken and written with a
/// single [`write_all`] call, so bytes from two records are never interleaved.
///
/// Cloning a `Sink` is cheap and yields a handle to the same writer.
///
/// [`write_all`]: Sink::write_all
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Create a new [`Sink`] that owns `writer`.
    ///
    /// # Examples
    /// ```
    /// # use tracing_prettyjson::sink::Sink;
    /// let sink = Sink::new(std::io::stderr());
    /// sink.write_all(b"{}\n").unwrap();
    /// ```
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Sink {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Create a new [`Sink`] that asks `make_writer` for a fresh writer on
    /// every record.
    pub fn from_make_writer<M>(make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + 'static,
    {
        Sink::new(MakeWriterAdapter(make_writer))
    }

    /// A [`Sink`] that writes to stdout.
    pub fn stdout() -> Self {
        Sink::from_make_writer(io::stdout)
    }

    /// A [`Sink`] that writes to stderr.
    pub fn stderr() -> Self {
        Sink::from_make_writer(io::stderr)
    }

    /// Writes the whole buffer and flushes, holding the lock for both.
    ///
    /// # Errors
    ///
    /// Returns the underlying writer's error. The lock is released either way.
    pub fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(buf)?;
        writer.flush()
    }

    /// Returns `true` if both sinks write to the same destination.
    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("handles", &Arc::strong_count(&self.writer))
            .finish_non_exhaustive()
    }
}

struct MakeWriterAdapter<M>(M);

impl<M> Write for MakeWriterAdapter<M>
where
    M: for<'a> MakeWriter<'a>,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.make_writer().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.make_writer().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.make_writer().flush()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    /// An in-memory writer whose clones all append to the same buffer.
    #[derive(Clone, Default)]
    pub(crate) struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
