//! Multi-destination sink fan-out
//!
//! Composes any number of byte destinations into one write target. Every
//! record's bytes go to every destination in registration order; a failing
//! destination never blocks the others, and only the first error is
//! surfaced to the caller.

use super::error::{LogError, Result};
use std::io::Write;

pub struct Fanout {
    destinations: Vec<Box<dyn Write + Send>>,
}

impl Fanout {
    pub fn new() -> Self {
        Self {
            destinations: Vec::new(),
        }
    }

    pub fn add(&mut self, destination: Box<dyn Write + Send>) {
        self.destinations.push(destination);
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Write one encoded record to every destination, best-effort
    pub fn write_record(&mut self, bytes: &[u8]) -> Result<()> {
        let mut first_error: Option<LogError> = None;

        for destination in &mut self.destinations {
            if let Err(e) = destination.write_all(bytes) {
                if first_error.is_none() {
                    first_error = Some(e.into());
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Flush every destination, best-effort, first error surfaced
    pub fn flush(&mut self) -> Result<()> {
        let mut first_error: Option<LogError> = None;

        for destination in &mut self.destinations {
            if let Err(e) = destination.flush() {
                if first_error.is_none() {
                    first_error = Some(e.into());
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Fanout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Shared in-memory destination for assertions
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> Vec<u8> {
            self.0.lock().clone()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Destination that always fails
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken"))
        }
    }

    #[test]
    fn test_every_destination_receives_record() {
        let a = Buffer::default();
        let b = Buffer::default();

        let mut fanout = Fanout::new();
        fanout.add(Box::new(a.clone()));
        fanout.add(Box::new(b.clone()));

        fanout.write_record(b"line\n").unwrap();

        assert_eq!(a.contents(), b"line\n");
        assert_eq!(b.contents(), b"line\n");
    }

    #[test]
    fn test_failure_does_not_stop_remaining_destinations() {
        let after = Buffer::default();

        let mut fanout = Fanout::new();
        fanout.add(Box::new(Broken));
        fanout.add(Box::new(after.clone()));

        let result = fanout.write_record(b"line\n");

        assert!(result.is_err());
        assert_eq!(after.contents(), b"line\n");
    }

    #[test]
    fn test_flush_surfaces_first_error() {
        let mut fanout = Fanout::new();
        fanout.add(Box::new(Buffer::default()));
        fanout.add(Box::new(Broken));

        assert!(fanout.flush().is_err());
    }

    #[test]
    fn test_empty_fanout_drops_bytes() {
        let mut fanout = Fanout::new();
        assert!(fanout.is_empty());
        assert!(fanout.write_record(b"line\n").is_ok());
        assert!(fanout.flush().is_ok());
    }
}
