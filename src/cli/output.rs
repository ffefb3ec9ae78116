//! Terminal output for command results and errors
//!
//! Command results go to stdout uncolored so they can be piped into other
//! tools; errors go to stderr in red.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    color: ColorChoice,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.color)
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(color: ColorChoice) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(color),
            color,
        }
    }

    /// Print a command result line
    pub fn println(&self, message: &str) {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        if self.bufwtr.print(&buffer).is_err() {
            log::debug!("stdout closed, dropped: {}", message);
        }
    }

    /// Echo a git command line before running it
    pub fn command(&self, program: &str, args: &[String]) {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.println(&line);
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(self.color);
        let mut buffer = bufwtr.buffer();

        // Try colored output to stderr
        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print an indented hint to stderr (for recovery suggestions)
    pub fn hint(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(self.color);
        let mut buffer = bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(&mut buffer, "    • {}", message);
        let _ = buffer.reset();
        let _ = bufwtr.print(&buffer);
    }
}
