// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Lines shared by clones of one `StringLogger`.
#[derive(Default)]
pub struct LoggerInner {
    pub(crate) lines: Vec<String>,
    pub(crate) warn: bool,
}

/// Thread-safe string logger. Clones share the same lines.
#[derive(Clone, Default)]
pub struct StringLogger {
    pub(crate) debug: bool,
    pub(crate) inner: Arc<Mutex<LoggerInner>>,
}

impl StringLogger {
    /// Trace the result of a call, or warn with its error.
    pub fn call<T>(&self, line: String, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.trace(format!("{line} succeeded")),
            Err(e) => self.warn(format!("{line} failed\n{e}")),
        }
        result
    }

    /// Whether the log contains any warnings.
    pub fn contains_warnings(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.warn)
            .unwrap_or(false)
    }

    /// Add all lines from the specified logger to this logger, indented.
    pub fn extend(&self, string_logger: &StringLogger) {
        if Arc::ptr_eq(&self.inner, &string_logger.inner) {
            return;
        }
        let (lines, warn) = match string_logger.inner.lock() {
            Ok(from_inner) => (from_inner.lines.clone(), from_inner.warn),
            Err(_) => return,
        };
        for line in lines {
            self.indent(line, "  ");
        }
        if warn {
            if let Ok(mut inner) = self.inner.lock() {
                inner.warn = true;
            }
        }
    }

    /// Add an indented trace line to this logger.
    pub fn indent(&self, line: String, indentation: &str) {
        if !line.is_empty() {
            let indented_line = format!(
                "{indentation}{}",
                line.replace('\n', &format!("\n{indentation}"))
            );
            self.push(indented_line, false);
        }
    }

    /// Number of lines logged so far.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.lines.len())
            .unwrap_or(0)
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the logged lines.
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.lines.clone())
            .unwrap_or_default()
    }

    /// Create a new string logger.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Add a trace line to this logger.
    pub fn trace(&self, line: String) {
        if !line.is_empty() {
            self.push(line, false);
        }
    }

    /// Add a warning or error line to this logger.
    pub fn warn(&self, line: String) {
        if !line.is_empty() {
            self.push(line, true);
        }
    }

    fn push(&self, line: String, warn: bool) {
        if self.debug {
            println!("{line}");
        }
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.push(line);
            if warn {
                inner.warn = true;
            }
        }
    }
}

impl Display for StringLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if let Ok(inner) = self.inner.lock() {
            f.write_str(&inner.lines.join("\n"))
        } else {
            Ok(())
        }
    }
}
