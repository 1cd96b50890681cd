//! Input sources and output sinks driven by `read` and `write`

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Supplies one integer per executed `read` statement
pub trait InputSource {
    /// Produce the value for variable `name` read at `line`
    fn read_int(&mut self, name: &str, line: usize) -> Result<i64>;
}

/// Receives one value per executed `write` statement
pub trait OutputSink {
    /// Emit one value (booleans arrive as 0/1)
    fn write_value(&mut self, value: i64) -> Result<()>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn read_int(&mut self, name: &str, line: usize) -> Result<i64> {
        (**self).read_int(name, line)
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write_value(&mut self, value: i64) -> Result<()> {
        (**self).write_value(value)
    }
}

/// Collects written values in order
impl OutputSink for Vec<i64> {
    fn write_value(&mut self, value: i64) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Input from a fixed list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    values: VecDeque<i64>,
}

impl ScriptedInput {
    /// Creates an input that yields `values` in order
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        ScriptedInput {
            values: values.into_iter().collect(),
        }
    }

    /// Values not consumed yet
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_int(&mut self, name: &str, line: usize) -> Result<i64> {
        self.values.pop_front().ok_or_else(|| Error::InputError {
            name: name.to_string(),
            line,
            message: "input exhausted".to_string(),
        })
    }
}

/// Whitespace-separated integers from a buffered reader
///
/// Optionally writes an `Enter <name>: ` prompt before each read.
pub struct ReaderInput<R, W = io::Sink> {
    reader: R,
    pending: VecDeque<String>,
    prompt: Option<W>,
}

impl<R: BufRead> ReaderInput<R, io::Sink> {
    /// Reads from `reader` without prompting
    pub fn new(reader: R) -> Self {
        ReaderInput {
            reader,
            pending: VecDeque::new(),
            prompt: None,
        }
    }
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    /// Reads from `reader`, prompting on `prompt` first
    pub fn with_prompt(reader: R, prompt: W) -> Self {
        ReaderInput {
            reader,
            pending: VecDeque::new(),
            prompt: Some(prompt),
        }
    }

    fn next_word(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

impl<R: BufRead, W: Write> InputSource for ReaderInput<R, W> {
    fn read_int(&mut self, name: &str, line: usize) -> Result<i64> {
        let input_error = |message: String| Error::InputError {
            name: name.to_string(),
            line,
            message,
        };

        if let Some(prompt) = self.prompt.as_mut() {
            write!(prompt, "Enter {}: ", name).map_err(Error::io)?;
            prompt.flush().map_err(Error::io)?;
        }

        match self.next_word().map_err(|e| input_error(e.to_string()))? {
            Some(word) => word
                .parse::<i64>()
                .map_err(|_| input_error(format!("invalid integer '{}'", word))),
            None => Err(input_error("input exhausted".to_string())),
        }
    }
}

/// Writes each value on its own line, with an optional prefix
pub struct WriterSink<W> {
    writer: W,
    prefix: String,
}

impl<W: Write> WriterSink<W> {
    /// Bare values, one per line
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer,
            prefix: String::new(),
        }
    }

    /// Values preceded by `prefix` (e.g. `"Val: "`)
    pub fn with_prefix(writer: W, prefix: impl Into<String>) -> Self {
        WriterSink {
            writer,
            prefix: prefix.into(),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_value(&mut self, value: i64) -> Result<()> {
        writeln!(self.writer, "{}{}", self.prefix, value).map_err(Error::io)?;
        self.writer.flush().map_err(Error::io)
    }
}
