use std::io::{self, BufRead};

use super::error::{ParseError, Result};

/// A non-blank line of a description file.
///
/// `raw` is the line exactly as read (minus the line terminator); it is what
/// diagnostics quote back to the user, so it is never trimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub raw: String,
}

impl Line {
    pub fn new(raw: impl Into<String>) -> Self {
        Line { raw: raw.into() }
    }

    /// Whitespace-separated tokens of the trimmed line.
    pub fn tokens(&self) -> Vec<&str> {
        self.raw
            .split(is_space)
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// ASCII whitespace, including vertical tab. Other Unicode spaces are
/// ordinary token characters.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Iterator over the non-blank lines of a reader.
///
/// Empty and whitespace-only lines are skipped entirely.
pub struct LineReader<R> {
    inner: io::Lines<R>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader {
            inner: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(raw) if raw.chars().all(is_space) => continue,
                Ok(raw) => return Some(Ok(Line::new(raw))),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Joins the tokens from `start` onwards with single spaces.
pub fn join_from(tokens: &[&str], start: usize) -> String {
    tokens.get(start..).unwrap_or_default().join(" ")
}

/// Returns the tokens following the leading key, which must number exactly
/// `count`. Too few tokens yields `too_few()`; surplus tokens are reported
/// as [`ParseError::ExtraData`].
pub fn split_arguments<'a, 'b>(
    tokens: &'a [&'b str],
    count: usize,
    raw: &str,
    too_few: impl FnOnce() -> ParseError,
) -> Result<&'a [&'b str]> {
    let arguments = tokens.get(1..).unwrap_or_default();
    if arguments.len() < count {
        return Err(too_few());
    }
    if arguments.len() > count {
        return Err(ParseError::ExtraData {
            key: tokens[0].to_string(),
            extra: join_from(tokens, count + 1),
            line: raw.to_string(),
        });
    }
    Ok(arguments)
}
