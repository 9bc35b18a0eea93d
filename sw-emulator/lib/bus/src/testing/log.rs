/*++

Licensed under the Apache-2.0 license.

File Name:

    log.rs

Abstract:

    File contains the shared text log that emulated devices record bus
    transactions into.

--*/
use std::{cell::RefCell, fmt::Write, rc::Rc};

/// Line-oriented transaction log.
///
/// Clones share one buffer, so a test keeps a clone and reads it after the
/// device has been moved into a `BusMmio`.
///
/// ```
/// use borg_emu_bus::testing::Log;
/// use std::fmt::Write;
///
/// let log = Log::new();
/// let device_log = log.clone();
/// writeln!(device_log.w(), "read status").unwrap();
/// assert_eq!(log.count("read status"), 1);
/// assert_eq!(log.take(), "read status\n");
/// ```
#[derive(Clone, Default)]
pub struct Log {
    log: Rc<RefCell<String>>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the log and return what it held.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Number of logged lines that start with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.log
            .borrow()
            .lines()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    /// Writer for `write!()` and `writeln!()`.
    pub fn w(&self) -> impl Write + '_ {
        LogWriter { log: &self.log }
    }
}

struct LogWriter<'a> {
    log: &'a RefCell<String>,
}

impl Write for LogWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.log.borrow_mut().write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let log = Log::new();
        writeln!(log.w(), "write control 0x2").unwrap();
        writeln!(log.w(), "write control 0x1").unwrap();
        assert_eq!(log.take(), "write control 0x2\nwrite control 0x1\n");
        assert_eq!(log.take(), "");
    }

    #[test]
    fn test_clones_share_buffer() {
        let log = Log::new();
        let device_log = log.clone();
        writeln!(device_log.w(), "read result").unwrap();
        assert_eq!(log.take(), "read result\n");
        assert_eq!(device_log.take(), "");
    }

    #[test]
    fn test_count() {
        let log = Log::new();
        writeln!(log.w(), "read(RvSize::Word, 0x10)").unwrap();
        writeln!(log.w(), "write(RvSize::Word, 0x3c, 0x1)").unwrap();
        writeln!(log.w(), "read(RvSize::Word, 0x10)").unwrap();
        assert_eq!(log.count("read("), 2);
        assert_eq!(log.count("write("), 1);
        assert_eq!(log.count("read status"), 0);
    }
}
