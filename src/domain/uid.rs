use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// The numeric identifier of a content element.
///
/// Identifiers are what a caller selects a variant by. They are expected to be
/// unique within a single document, but nothing enforces that; see
/// [`Document::seed`](crate::Document::seed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(i32);

impl Uid {
    /// Create a uid from its raw value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Parses a uid from the raw bytes of a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a base-10 integer that fits in
    /// 32 bits.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::new(String::from_utf8_lossy(bytes).into_owned(), None))?;
        text.parse()
    }
}

impl From<i32> for Uid {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|e| Error::new(s.to_string(), Some(e)))
    }
}

/// Error returned when a uid is not a valid 32-bit decimal integer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid uid '{text}': expected a 32-bit decimal integer")]
pub struct Error {
    text: String,
    #[source]
    source: Option<ParseIntError>,
}

impl Error {
    const fn new(text: String, source: Option<ParseIntError>) -> Self {
        Self { text, source }
    }

    /// The text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
