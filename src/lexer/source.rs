//! Line-oriented character sources feeding the scanner

use std::io::BufRead;

use crate::error::{Error, Result};

/// Pull-based, line-at-a-time character source
pub trait LineSource {
    /// Fetch the next line, or `None` at end of input
    fn fetch_line(&mut self) -> Result<Option<String>>;
}

/// Source over an in-memory string
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source reading `text` line by line
    pub fn new(text: &'a str) -> Self {
        StrSource {
            lines: text.lines(),
        }
    }
}

impl LineSource for StrSource<'_> {
    fn fetch_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next().map(str::to_string))
    }
}

/// Source over any buffered reader (a file, stdin, ...)
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps a buffered reader
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn fetch_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(Error::io)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_keeps_blank_lines() {
        let mut source = StrSource::new("a\n\nb");
        assert_eq!(source.fetch_line().unwrap(), Some("a".to_string()));
        assert_eq!(source.fetch_line().unwrap(), Some(String::new()));
        assert_eq!(source.fetch_line().unwrap(), Some("b".to_string()));
        assert_eq!(source.fetch_line().unwrap(), None);
    }

    #[test]
    fn test_reader_source() {
        let mut source = ReaderSource::new("x := 1\nwrite x\n".as_bytes());
        assert_eq!(source.fetch_line().unwrap(), Some("x := 1\n".to_string()));
        assert_eq!(source.fetch_line().unwrap(), Some("write x\n".to_string()));
        assert_eq!(source.fetch_line().unwrap(), None);
    }
}
