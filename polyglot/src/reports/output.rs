//! Report rendering.
//!
//! Reports describe their content as [`Line`]s through the semantic
//! methods of [`Output`]; an implementation only decides where lines go.

use std::fmt;

/// One rendered line of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Section(String),
    KeyValue(String, String),
    Item(String),
    Added(String),
    Failed(String),
    Warning(String),
    Divider(String),
    Text(String),
    Blank,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Section(name) => write!(f, "{name}:"),
            Line::KeyValue(key, value) => write!(f, "{key}: {value}"),
            Line::Item(text) => write!(f, "  - {text}"),
            Line::Added(text) => write!(f, "  + {text}"),
            Line::Failed(text) => write!(f, "  ! {text}"),
            Line::Warning(msg) => write!(f, "warning: {msg}"),
            Line::Divider(label) => write!(f, "── {label} ──"),
            Line::Text(text) => f.write_str(text),
            Line::Blank => Ok(()),
        }
    }
}

/// Destination for report lines.
pub trait Output {
    fn emit(&mut self, line: Line);

    fn section(&mut self, name: &str) {
        self.emit(Line::Section(name.to_string()));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.emit(Line::KeyValue(key.to_string(), value.to_string()));
    }

    fn list_item(&mut self, text: &str) {
        self.emit(Line::Item(text.to_string()));
    }

    /// A file that was written.
    fn added_item(&mut self, text: &str) {
        self.emit(Line::Added(text.to_string()));
    }

    /// A file that could not be written.
    fn removed_item(&mut self, text: &str) {
        self.emit(Line::Failed(text.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.emit(Line::Warning(msg.to_string()));
    }

    fn divider(&mut self, label: &str) {
        self.emit(Line::Divider(label.to_string()));
    }

    fn preformatted(&mut self, text: &str) {
        self.emit(Line::Text(text.to_string()));
    }

    fn newline(&mut self) {
        self.emit(Line::Blank);
    }
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the terminal. Warnings go to stderr so piped output stays
/// clean.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn emit(&mut self, line: Line) {
        match line {
            Line::Warning(_) => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

/// Output that records each line as text, for asserting on reports.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn emit(&mut self, line: Line) {
        self.lines.push(line.to_string());
    }
}
