use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// the report. The returned handle can hold log output back while a live
/// block owns the terminal.
pub fn init_logging(verbose: bool, no_color: bool) -> LogHold {
    let filter = std::env::var("VITALS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| default_filter(verbose),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| default_filter(verbose)),
        );

    let logs = LogHold::stderr();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(logs.clone())
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
    logs
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    }
}

struct HoldState {
    held: bool,
    pending: Vec<u8>,
    sink: Box<dyn Write + Send>,
}

/// Log writer that either passes events through to its sink or keeps them
/// until released. Clones share the same state.
#[derive(Clone)]
pub struct LogHold {
    state: Arc<Mutex<HoldState>>,
}

impl fmt::Debug for LogHold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHold")
            .field("held", &self.lock().held)
            .finish_non_exhaustive()
    }
}

impl LogHold {
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_sink(Box::new(io::stderr()))
    }

    #[must_use]
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            state: Arc::new(Mutex::new(HoldState {
                held: false,
                pending: Vec::new(),
                sink,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HoldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keeps every event written from now on until the guard is dropped.
    #[must_use]
    pub fn hold(&self) -> HeldLogs<'_> {
        self.lock().held = true;
        HeldLogs { logs: self }
    }

    fn release(&self) -> io::Result<()> {
        let mut state = self.lock();
        state.held = false;
        let pending = std::mem::take(&mut state.pending);
        if pending.is_empty() {
            return Ok(());
        }
        state.sink.write_all(&pending)?;
        state.sink.flush()
    }
}

/// Writes the held events to the sink when dropped.
#[derive(Debug)]
pub struct HeldLogs<'a> {
    logs: &'a LogHold,
}

impl Drop for HeldLogs<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.logs.release() {
            eprintln!("Failed to write held log output: {}", err);
        }
    }
}

pub struct LogWriter {
    state: Arc<Mutex<HoldState>>,
}

impl LogWriter {
    fn lock(&self) -> MutexGuard<'_, HoldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        if state.held {
            state.pending.extend_from_slice(buf);
            return Ok(buf.len());
        }
        state.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock();
        if state.held {
            return Ok(());
        }
        state.sink.flush()
    }
}

impl<'a> MakeWriter<'a> for LogHold {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            state: Arc::clone(&self.state),
        }
    }
}
