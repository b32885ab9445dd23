//! Log output routing
//!
//! Log lines go to stderr, except while the viewer owns the screen:
//! then they are held in memory and written out once the terminal has
//! been restored.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Most bytes held while the screen is in use; later lines are dropped
const HOLD_LIMIT: usize = 1 << 20;

static HOLDING: AtomicBool = AtomicBool::new(false);
static HELD: Mutex<Vec<u8>> = Mutex::new(Vec::new());

/// Install the subscriber; `MONTAGE_LOG` overrides the default `warn` level
pub fn init() {
    let filter = EnvFilter::try_from_env("MONTAGE_LOG")
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::WARN.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(LogWriter::default)
        .with_ansi(false)
        .init();
}

/// Start holding log output (the screen is in use)
pub fn hold() {
    HOLDING.store(true, Ordering::Release);
}

/// Stop holding and write out anything held meanwhile
pub fn release() -> io::Result<()> {
    HOLDING.store(false, Ordering::Release);
    let held = match HELD.lock() {
        Ok(mut held) => std::mem::take(&mut *held),
        Err(_) => return Ok(()),
    };
    if held.is_empty() {
        return Ok(());
    }
    let mut stderr = io::stderr().lock();
    stderr.write_all(&held)?;
    stderr.flush()
}

/// Writer handed to the fmt subscriber for each event
#[derive(Debug, Default)]
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !HOLDING.load(Ordering::Acquire) {
            return io::stderr().write(buf);
        }
        if let Ok(mut held) = HELD.lock() {
            if held.len() + buf.len() <= HOLD_LIMIT {
                held.extend_from_slice(buf);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if HOLDING.load(Ordering::Acquire) {
            Ok(())
        } else {
            io::stderr().flush()
        }
    }
}
