use super::error::Error;
use std::collections::HashMap;

// These are the characters, besides ASCII control characters, which may not
// appear in a header name.
const DISALLOWED_NAME_CHARACTERS: &str = "(),/:;<=>?@[]{} \t\\\"";

/// The value of one header.  A header whose value was continued onto
/// further lines (folded) keeps each line as a separate element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeaderValue {
    Single(String),
    Folded(Vec<String>),
}

impl HeaderValue {
    /// The value as text, if it was given on a single line.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Folded(_) => None,
        }
    }

    /// Every line of the value, in order.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderValue::Single(value) => vec![value.as_str()],
            HeaderValue::Folded(values) => {
                values.iter()
                    .map(String::as_str)
                    .collect()
            },
        }
    }

    fn fold(&mut self, continuation: String) {
        match self {
            HeaderValue::Single(value) => {
                let first = std::mem::take(value);
                *self = HeaderValue::Folded(vec![first, continuation]);
            },
            HeaderValue::Folded(values) => values.push(continuation),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.into())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Single(value)
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(values: Vec<&str>) -> Self {
        HeaderValue::Folded(
            values.into_iter()
                .map(String::from)
                .collect()
        )
    }
}

/// The headers of a request, keyed by upper-cased name and kept in the
/// order in which each name was first seen.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Headers {
    entries: Vec<(String, HeaderValue)>,
    positions: HashMap<String, usize>,
}

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a header under the canonical (upper-cased) form of its name.
    /// An existing header with the same canonical name has its value
    /// replaced.
    pub fn insert<T>(&mut self, name: T, value: HeaderValue)
        where T: AsRef<str>
    {
        let name = name.as_ref().to_uppercase();
        match self.positions.get(&name).copied() {
            Some(position) => self.entries[position].1 = value,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            },
        }
    }

    /// Look up a header by name, ignoring case.
    #[must_use]
    pub fn get<T>(&self, name: T) -> Option<&HeaderValue>
        where T: AsRef<str>
    {
        let position = *self.positions.get(&name.as_ref().to_uppercase())?;
        Some(&self.entries[position].1)
    }

    #[must_use]
    pub fn contains<T>(&self, name: T) -> bool
        where T: AsRef<str>
    {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// Return `true` if the given string may not be used as a header name:
/// it is empty, or contains a control character, whitespace, or one of the
/// delimiters `(),/:;<=>?@[]{}\"`.
#[must_use]
pub fn is_invalid_header_name(name: &str) -> bool {
    name.is_empty()
        || name.chars().any(|c| {
            c.is_ascii_control() || DISALLOWED_NAME_CHARACTERS.contains(c)
        })
}

/// Split a header line into its canonical (upper-cased) name and its
/// value, both trimmed of surrounding whitespace.
pub fn parse_header_line(line: &str) -> Result<(String, String), Error> {
    let delimiter = line.find(':')
        .ok_or_else(|| Error::HeaderLineMissingColon(line.into()))?;
    let name = line[..delimiter].trim();
    let value = line[delimiter+1..].trim();
    if is_invalid_header_name(name) {
        return Err(Error::HeaderNameInvalid(line.into()));
    }
    Ok((name.to_uppercase(), value.into()))
}

// This is the header currently being received.  It stays here rather than in
// the header map until the next line shows it is not being continued.
#[derive(Debug)]
struct HeaderBuffer {
    name: String,
    value: HeaderValue,
}

/// Builds up the headers of a request one line at a time.
#[derive(Debug, Default)]
pub struct HeaderAccumulator {
    headers: Headers,
    pending: Option<HeaderBuffer>,
}

impl HeaderAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The headers stored so far.  The header most recently started is not
    /// included until it is flushed by the next header or by
    /// [`finish`](#method.finish).
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Take in one non-blank header line, already decoded and with its line
    /// ending removed.
    pub fn push_line(&mut self, line: &str) -> Result<(), Error> {
        if line.starts_with(|c: char| c == ' ' || c == '\t') {
            let pending = self.pending.as_mut()
                .ok_or_else(|| Error::HeaderContinuationWithoutHeader(line.into()))?;
            pending.value.fold(line.trim().into());
            return Ok(());
        }
        self.flush();
        let (name, value) = parse_header_line(line)?;
        self.pending = Some(HeaderBuffer{
            name,
            value: HeaderValue::Single(value),
        });
        Ok(())
    }

    /// Store the header in progress, if any, now that the blank line ending
    /// the headers has been seen.
    pub fn finish(&mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        if let Some(HeaderBuffer{name, value}) = self.pending.take() {
            self.headers.insert(name, value);
        }
    }
}
