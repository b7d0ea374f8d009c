/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! User facing output for the command line tools.
//!
//! Every line goes to the error stream (verbose lines only when verbose mode is on) and is
//! mirrored to an optional log file. The log file is opened in append mode and closed again on
//! every write so nothing is left half written when the process is interrupted.

use std::cell::RefCell;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct Messenger {
    prefix: String,
    log_file: Option<PathBuf>,
    verbose: bool,
    stream: RefCell<Box<dyn Write>>,
}

impl Default for Messenger {
    fn default() -> Self {
        Self::with_stream(Box::new(io::stderr()))
    }
}

impl Messenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messenger writing to the given stream instead of stderr
    pub fn with_stream(stream: Box<dyn Write>) -> Self {
        Self {
            prefix: String::new(),
            log_file: None,
            verbose: false,
            stream: RefCell::new(stream),
        }
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    pub fn set_log_file(&mut self, path: impl AsRef<Path>) {
        self.log_file = Some(path.as_ref().to_path_buf());
    }

    /// No argument enables verbose mode, otherwise it is off only for a numeric zero
    pub fn set_verbose(&mut self, flag: Option<&str>) {
        self.verbose = match flag {
            None => true,
            Some(v) => v.trim().parse::<f64>().map_or(true, |n| n != 0.0),
        };
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn message(&self, text: impl Display) {
        self.emit(&format!("{}{}", self.prefix, text));
    }

    pub fn warning(&self, text: impl Display) {
        self.message(text);
    }

    pub fn error(&self, text: impl Display) {
        self.message(text);
    }

    /// Shown only in verbose mode but always logged
    pub fn verbose(&self, text: impl Display) {
        let line = format!("{}{}", self.prefix, text);
        if self.verbose {
            self.write_stream(&line);
        }
        self.log(&line);
    }

    /// Appends a line to the log file, if one is configured.
    ///
    /// A log file that cannot be opened for append terminates the process.
    pub fn log(&self, text: impl Display) {
        let Some(path) = self.log_file.as_ref() else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", text));
        if let Err(err) = result {
            self.write_stream(&format!(
                "{}cannot append to log file {}: {}",
                self.prefix,
                path.display(),
                err
            ));
            std::process::exit(1);
        }
    }

    /// Emits `text` like [`Messenger::message`] then exits with `code`
    pub fn exit_with(&self, code: i32, text: impl Display) -> ! {
        self.message(text);
        std::process::exit(code)
    }

    /// Emits `text` like [`Messenger::error`] then exits with `code`
    pub fn error_exit(&self, code: i32, text: impl Display) -> ! {
        self.error(text);
        std::process::exit(code)
    }

    fn emit(&self, line: &str) {
        self.write_stream(line);
        self.log(line);
    }

    fn write_stream(&self, line: &str) {
        let mut stream = self.stream.borrow_mut();
        // Nothing sensible to do when stderr itself is gone
        let _ = writeln!(stream, "{}", line);
        let _ = stream.flush();
    }
}
