//! Test logging: a global stderr subscriber and per-test in-memory capture.

use std::io;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The level comes from `TEST_LOG`, then
/// `RUST_LOG`, then defaults to `warn`.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct SharedBufferWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedBufferWriter(Arc::clone(&self.0))
    }
}

/// Everything logged on the current thread while this value is alive, as
/// JSON lines at `TRACE` and above.
///
/// Only events emitted on the capturing thread are recorded, which covers
/// actix's single-threaded test runtime and its spawned local tasks.
pub struct CapturedLogs {
    buffer: SharedBuffer,
    _guard: DefaultGuard,
}

pub fn capture() -> CapturedLogs {
    let buffer = SharedBuffer::default();
    let subscriber = fmt()
        .json()
        .with_max_level(Level::TRACE)
        .with_writer(buffer.clone())
        .without_time()
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);

    CapturedLogs {
        buffer,
        _guard: guard,
    }
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.0.lock()).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    /// Parsed log records, one per line.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Records whose `fields.message` equals `message`.
    pub fn with_message(&self, message: &str) -> Vec<serde_json::Value> {
        self.records()
            .into_iter()
            .filter(|record| record["fields"]["message"] == message)
            .collect()
    }
}
