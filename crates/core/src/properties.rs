//! Flat key/value property sources
//!
//! Parses the `key=value` text format used by `key.properties` and
//! `local.properties` files:
//! - `#` and `!` comment lines, blank lines ignored
//! - `=` or `:` separators (or whitespace), surrounding blanks trimmed
//! - backslash escapes, `\uXXXX`, and trailing-backslash line continuation
//! - duplicate keys resolved last-wins on lookup
//!
//! A source that does not exist on disk is modelled as `None` by
//! [`PropertySource::load`], never as an error.

use crate::error::{Error, Result, ResultExt};
use std::fmt::Write as _;
use std::path::Path;

const INLINE_ORIGIN: &str = "<inline>";

/// An ordered set of key/value entries read from one location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySource {
    origin: Option<String>,
    entries: Vec<(String, String)>,
}

impl PropertySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Label this source with where it came from (used in diagnostics)
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Where this source came from, or `<inline>`
    pub fn origin(&self) -> &str {
        self.origin.as_deref().unwrap_or(INLINE_ORIGIN)
    }

    /// Build a source from key/value pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            origin: None,
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append an entry; a later entry shadows an earlier one with the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Last value recorded for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in file order, duplicates included
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the source holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse properties text
    pub fn parse(text: &str) -> Result<Self> {
        let mut source = Self::new();

        for (line_no, logical) in logical_lines(text) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key, line_no)?;
            let value = unescape(value, line_no)?;
            source.entries.push((key, value));
        }

        Ok(source)
    }

    /// Read and parse a properties file.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Property source not present");
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::from(e).with_context(format!("Reading {}", path.display())));
            }
        };
        let content = decode(bytes, path);

        let source = Self::parse(&content)
            .context(format!("Parsing {}", path.display()))?
            .with_origin(path.display().to_string());

        tracing::debug!(
            path = %path.display(),
            entries = source.len(),
            "Loaded property source"
        );

        Ok(Some(source))
    }

    /// Render back to properties text that re-parses to the same entries
    pub fn to_properties_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{}={}", escape(key, true), escape(value, false));
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySource {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// UTF-8 when valid, otherwise ISO-8859-1 like `java.util.Properties`
fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), "Not UTF-8; reading as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Join continuation lines and drop comments, yielding `(line number, text)`
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim_start();

        let (start, mut buf) = match pending.take() {
            Some(p) => p,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (line_no, String::new())
            }
        };

        let continues = trailing_backslashes(trimmed) % 2 == 1;
        if continues {
            buf.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(trimmed);
            lines.push((start, buf));
        }
    }

    if let Some(p) = pending {
        lines.push(p);
    }

    lines
}

fn trailing_backslashes(s: &str) -> usize {
    s.chars().rev().take_while(|c| *c == '\\').count()
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut key_end = bytes.len();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b':' | b' ' | b'\t' | b'\x0c' => {
                key_end = i;
                break;
            }
            _ => i += 1,
        }
    }

    if key_end >= bytes.len() {
        return (line, "");
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

fn unescape(raw: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = hex_unit(&mut chars, line_no)?;
                let decoded = match unit {
                    0xD800..=0xDBFF => {
                        let low = match (chars.next(), chars.next()) {
                            (Some('\\'), Some('u')) => hex_unit(&mut chars, line_no)?,
                            _ => return Err(lone_surrogate(unit, line_no)),
                        };
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(lone_surrogate(unit, line_no));
                        }
                        char::decode_utf16([unit, low])
                            .next()
                            .and_then(|r| r.ok())
                            .ok_or_else(|| lone_surrogate(unit, line_no))?
                    }
                    0xDC00..=0xDFFF => return Err(lone_surrogate(unit, line_no)),
                    _ => char::from_u32(u32::from(unit))
                        .ok_or_else(|| lone_surrogate(unit, line_no))?,
                };
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Read the four hex digits of a `\u` escape as one UTF-16 code unit
fn hex_unit(chars: &mut std::str::Chars<'_>, line_no: usize) -> Result<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::properties_parse(
            line_no,
            format!("malformed \\u escape '\\u{}'", hex),
        ));
    }
    u16::from_str_radix(&hex, 16)
        .map_err(|e| Error::properties_parse(line_no, format!("malformed \\u escape: {}", e)))
}

fn lone_surrogate(unit: u16, line_no: usize) -> Error {
    Error::properties_parse(line_no, format!("unpaired surrogate '\\u{:04X}'", unit))
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());

    for (i, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

/// Parse one `key=value` argument, as passed on a command line
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::invalid_input(format!(
            "Expected key=value, got '{}'",
            arg
        ))),
    }
}
