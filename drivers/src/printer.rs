/*++

Licensed under the Apache-2.0 license.

File Name:

    printer.rs

Abstract:

    File contains the diagnostic console and its printing macros.

--*/
use core::convert::Infallible;
use ufmt::uWrite;

/// Diagnostic console: the TinyQV UART with the `uart` feature, stdout with
/// `std`, otherwise nothing.
#[derive(Default)]
pub struct Printer;

impl uWrite for Printer {
    type Error = Infallible;

    #[cfg(not(feature = "std"))]
    #[inline(never)]
    fn write_str(&mut self, _str: &str) -> Result<(), Self::Error> {
        #[cfg(feature = "uart")]
        unsafe { crate::Uart::new() }.write(_str);
        Ok(())
    }

    #[cfg(feature = "std")]
    fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
        print!("{str}");
        Ok(())
    }
}

#[macro_export]
macro_rules! cprintln {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwriteln!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

/// Per-thread capture of trace lines for unit tests.
#[cfg(all(test, feature = "trace"))]
#[derive(Default)]
pub(crate) struct TraceCapture;

#[cfg(all(test, feature = "trace"))]
std::thread_local! {
    static TRACE: core::cell::RefCell<String> = const { core::cell::RefCell::new(String::new()) };
}

#[cfg(all(test, feature = "trace"))]
impl TraceCapture {
    /// Lines traced on this thread since the last call.
    pub(crate) fn take() -> String {
        TRACE.with(|trace| core::mem::take(&mut *trace.borrow_mut()))
    }
}

#[cfg(all(test, feature = "trace"))]
impl uWrite for TraceCapture {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        TRACE.with(|trace| trace.borrow_mut().push_str(s));
        Ok(())
    }
}

/// Protocol step tracing, compiled out unless the `trace` feature is on.
macro_rules! ctrace {
    ($($tt:tt)*) => {{
        #[cfg(all(feature = "trace", not(test)))]
        $crate::cprintln!($($tt)*);
        #[cfg(all(feature = "trace", test))]
        {
            let _ = ufmt::uwriteln!(&mut $crate::printer::TraceCapture, $($tt)*);
        }
    }}
}
