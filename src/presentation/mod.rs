//! Helpers used while an experiment is being presented.
//!
//! - [`Shutdown`]: close the display, data files and peripherals in a fixed
//!   order, best-effort, then optionally terminate the process.
//! - [`CountdownTimer`]: wait for a duration, optionally running a callback
//!   (e.g. redrawing a rating scale) until it elapses.
//! - [`ClickWaiter`]: block until a mouse button is pressed and released.
//!
//! The display surface, devices and mouse are external; they are reached
//! only through the small [`Closable`] and [`Mouse`] traits.

mod mouse;
mod timing;

use std::io::Write as _;

pub use mouse::{ClickWaiter, Mouse};
pub use timing::{Clock, CountdownTimer, MonotonicClock};

use crate::error::{CleanupFailure, Error, Result};

/// A resource that must be released before the experiment exits.
pub trait Closable {
    /// Release the resource.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the resource could not be closed cleanly.
    fn close(&mut self) -> std::io::Result<()>;
}

impl Closable for std::fs::File {
    fn close(&mut self) -> std::io::Result<()> {
        self.sync_all()
    }
}

impl<W: std::io::Write> Closable for std::io::BufWriter<W> {
    fn close(&mut self) -> std::io::Result<()> {
        self.flush()
    }
}

/// Ordered, best-effort release of everything an experiment holds open.
///
/// Resources are closed in a fixed order: display surface, data files (in
/// the order added), serial device, secondary device. Resources that were
/// never supplied are skipped. A failing `close()` does not stop the
/// remaining resources from being closed.
///
/// # Examples
///
/// ```
/// use experiment_tools::presentation::{Closable, Shutdown};
///
/// struct Window;
/// impl Closable for Window {
///     fn close(&mut self) -> std::io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut window = Window;
/// let mut log = std::io::BufWriter::new(Vec::new());
///
/// Shutdown::new(&mut window)
///     .data_file(&mut log)
///     .close_all()
///     .unwrap();
/// ```
pub struct Shutdown<'a> {
    window: &'a mut dyn Closable,
    data_files: Vec<&'a mut dyn Closable>,
    serial: Option<&'a mut dyn Closable>,
    secondary: Option<&'a mut dyn Closable>,
}

impl<'a> Shutdown<'a> {
    /// Start a shutdown that closes `window` first.
    pub fn new(window: &'a mut dyn Closable) -> Self {
        Self {
            window,
            data_files: Vec::new(),
            serial: None,
            secondary: None,
        }
    }

    /// Add a data file, closed after the window.
    #[must_use]
    pub fn data_file(mut self, file: &'a mut dyn Closable) -> Self {
        self.data_files.push(file);
        self
    }

    /// Add several data files of the same type.
    #[must_use]
    pub fn data_files<C: Closable + 'a>(mut self, files: impl IntoIterator<Item = &'a mut C>) -> Self {
        self.data_files
            .extend(files.into_iter().map(|f| f as &'a mut dyn Closable));
        self
    }

    /// Set the serial device (e.g. a scanner trigger line).
    #[must_use]
    pub fn serial(mut self, device: &'a mut dyn Closable) -> Self {
        self.serial = Some(device);
        self
    }

    /// Set the secondary device (e.g. a physiology trigger box).
    #[must_use]
    pub fn secondary(mut self, device: &'a mut dyn Closable) -> Self {
        self.secondary = Some(device);
        self
    }

    /// Close every supplied resource in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cleanup`] listing every resource whose `close()`
    /// failed, after all resources have been attempted.
    pub fn close_all(self) -> Result<()> {
        let Shutdown {
            window,
            data_files,
            serial,
            secondary,
        } = self;
        let mut failures = Vec::new();

        trace_info!("closing window");
        close_one(&mut failures, "window".to_string(), window);

        trace_info!(count = data_files.len(), "closing data files");
        for (i, file) in data_files.into_iter().enumerate() {
            close_one(&mut failures, format!("data file {}", i + 1), file);
        }

        if let Some(device) = serial {
            trace_info!("closing serial device");
            close_one(&mut failures, "serial device".to_string(), device);
        }
        if let Some(device) = secondary {
            trace_info!("closing secondary device");
            close_one(&mut failures, "secondary device".to_string(), device);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Cleanup { failures })
        }
    }

    /// Close every supplied resource, then terminate the process.
    ///
    /// Exits with status 0 when everything closed cleanly and 1 otherwise.
    pub fn quit(self) -> ! {
        let code = match self.close_all() {
            Ok(()) => 0,
            Err(err) => {
                trace_warn!(error = %err, "shutdown incomplete");
                let _ = writeln!(std::io::stderr(), "shutdown incomplete: {err}");
                1
            }
        };
        trace_info!(code, "quitting");
        std::process::exit(code)
    }
}

fn close_one(failures: &mut Vec<CleanupFailure>, resource: String, target: &mut dyn Closable) {
    if let Err(source) = target.close() {
        trace_warn!(resource = %resource, error = %source, "close failed");
        failures.push(CleanupFailure { resource, source });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    use super::*;

    struct Recorder {
        name: &'static str,
        fail: bool,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Closable for Recorder {
        fn close(&mut self) -> std::io::Result<()> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                Err(std::io::Error::other(format!("{} stuck", self.name)))
            } else {
                Ok(())
            }
        }
    }

    fn recorder(name: &'static str, fail: bool, log: &Rc<RefCell<Vec<&'static str>>>) -> Recorder {
        Recorder {
            name,
            fail,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_closes_in_fixed_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = recorder("window", false, &log);
        let mut a = recorder("a.csv", false, &log);
        let mut b = recorder("b.csv", false, &log);
        let mut serial = recorder("serial", false, &log);
        let mut labjack = recorder("labjack", false, &log);

        // Supplied out of order on purpose.
        Shutdown::new(&mut window)
            .secondary(&mut labjack)
            .serial(&mut serial)
            .data_file(&mut a)
            .data_file(&mut b)
            .close_all()
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["window", "a.csv", "b.csv", "serial", "labjack"]
        );
    }

    #[test]
    fn test_missing_resources_are_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = recorder("window", false, &log);
        Shutdown::new(&mut window).close_all().unwrap();
        assert_eq!(*log.borrow(), vec!["window"]);
    }

    #[test]
    fn test_failures_do_not_stop_remaining_closes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = recorder("window", true, &log);
        let mut data = recorder("data", false, &log);
        let mut serial = recorder("serial", true, &log);

        let err = Shutdown::new(&mut window)
            .data_file(&mut data)
            .serial(&mut serial)
            .close_all()
            .unwrap_err();

        assert_eq!(*log.borrow(), vec!["window", "data", "serial"]);
        let Error::Cleanup { failures } = err else {
            panic!("expected cleanup error");
        };
        let names: Vec<_> = failures.iter().map(|f| f.resource.as_str()).collect();
        assert_eq!(names, vec!["window", "serial device"]);
    }

    #[test]
    fn test_data_files_from_collection() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut window = recorder("window", false, &log);
        let mut files = vec![recorder("f1", false, &log), recorder("f2", false, &log)];
        Shutdown::new(&mut window)
            .data_files(files.iter_mut())
            .close_all()
            .unwrap();
        assert_eq!(*log.borrow(), vec!["window", "f1", "f2"]);
    }

    #[test]
    fn test_bufwriter_close_flushes() {
        let mut window = std::io::BufWriter::new(Vec::new());
        let mut data = std::io::BufWriter::new(Vec::new());
        data.write_all(b"trial,iti\n").unwrap();
        Shutdown::new(&mut window)
            .data_file(&mut data)
            .close_all()
            .unwrap();
        assert_eq!(data.get_ref().as_slice(), b"trial,iti\n");
    }
}
