//! Tracing setup on a non-blocking stderr writer.

use std::sync::{Arc, Mutex};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive. Clones share the same writer.
#[derive(Clone)]
pub struct LogGuard(Arc<Mutex<Option<WorkerGuard>>>);

impl LogGuard {
    pub fn new(guard: WorkerGuard) -> Self {
        Self(Arc::new(Mutex::new(Some(guard))))
    }

    /// Flush buffered lines and stop the writer. Later calls do nothing.
    ///
    /// Needed before `std::process::exit`, which skips destructors.
    pub fn flush(&self) {
        let guard = match self.0.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        drop(guard);
    }
}

/// Install the global subscriber, filtered by `RUST_LOG`.
pub fn init() -> LogGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    LogGuard::new(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn flush_writes_pending_lines() {
        let buf = SharedBuf::default();
        let (mut writer, guard) = tracing_appender::non_blocking(buf.clone());
        let logs = LogGuard::new(guard);

        writer.write_all(b"last line\n").unwrap();
        logs.clone().flush();

        assert_eq!(buf.0.lock().unwrap().as_slice(), b"last line\n");
    }

    #[test]
    fn flush_twice_is_harmless() {
        let (_writer, guard) = tracing_appender::non_blocking(io::sink());
        let logs = LogGuard::new(guard);

        logs.flush();
        logs.flush();

        assert!(logs.0.lock().unwrap().is_none());
    }
}
