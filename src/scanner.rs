//! Locating content element tags in a raw document.
//!
//! The scanner makes a single forward pass over the input. Every marker
//! occurrence opens a region, and the next marker occurrence closes it; text
//! between regions is passed through untouched.

mod tag;

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
pub use tag::{Tag, TagError};
use tracing::{debug, instrument, trace};

use crate::domain::{Element, Region, Uid};

/// The literal that starts every content element tag.
pub const MARKER: &[u8] = b"<!--  CONTENT ELEMENT, ";

/// How a close tag is matched to the open tag before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pairing {
    /// The next tag closes the current region, whatever uid it declares.
    #[default]
    Positional,

    /// As positional, but the close tag must declare the same uid as the
    /// open tag.
    Strict,
}

/// Errors that abort a scan.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    /// A tag could not be decoded.
    #[error("Malformed tag at byte {offset}: {reason}")]
    MalformedTag {
        /// Byte offset of the tag's marker.
        offset: usize,
        /// What was wrong with it.
        reason: TagError,
    },

    /// An open tag with no following tag to close it.
    #[error("[mark {uid}/{name}] at byte {offset}: expected closing tag not found")]
    UnclosedRegion {
        /// Uid of the open tag.
        uid: Uid,
        /// Name of the open tag.
        name: String,
        /// Byte offset of the open tag.
        offset: usize,
    },

    /// Strict pairing only: the close tag declares a different uid.
    #[error("[mark {uid}/{name}] closed by tag with uid {found} at byte {offset}")]
    MismatchedClose {
        /// Uid of the open tag.
        uid: Uid,
        /// Name of the open tag.
        name: String,
        /// Uid declared by the close tag.
        found: Uid,
        /// Byte offset of the close tag.
        offset: usize,
    },
}

/// Splits a document into text and regions.
#[derive(Debug)]
pub struct TagScanner<'a> {
    input: &'a [u8],
    finder: Finder<'static>,
    pairing: Pairing,
}

impl<'a> TagScanner<'a> {
    /// Create a scanner over `input` using positional pairing.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_pairing(input, Pairing::default())
    }

    /// Create a scanner over `input` with the given pairing mode.
    #[must_use]
    pub fn with_pairing(input: &'a [u8], pairing: Pairing) -> Self {
        Self {
            input,
            finder: Finder::new(MARKER),
            pairing,
        }
    }

    /// Scan the whole input.
    ///
    /// The returned elements are in document order. Empty text between tags
    /// is dropped, but the text after the last region is always emitted, even
    /// when empty.
    ///
    /// # Errors
    ///
    /// Fails on the first tag that cannot be decoded, on an open tag that is
    /// never closed, and (in strict mode) on a close tag with the wrong uid.
    #[instrument(level = "debug", skip(self), fields(len = self.input.len(), pairing = ?self.pairing))]
    pub fn scan(&self) -> Result<Vec<Element<'a>>, ScanError> {
        let input = self.input;
        let mut elements = Vec::new();
        let mut pos = 0;

        loop {
            let Some(open_at) = self.find_marker(pos) else {
                elements.push(Element::Text(&input[pos..]));
                break;
            };

            if pos < open_at {
                elements.push(Element::Text(&input[pos..open_at]));
            }

            let open = Self::decode(input, open_at)?;
            let content_start = open_at + open.byte_len();

            let Some(close_at) = self.find_marker(content_start) else {
                let (uid, name) = open.into_parts();
                return Err(ScanError::UnclosedRegion {
                    uid,
                    name,
                    offset: open_at,
                });
            };

            let close = Self::decode(input, close_at)?;
            if self.pairing == Pairing::Strict && close.uid() != open.uid() {
                let (uid, name) = open.into_parts();
                return Err(ScanError::MismatchedClose {
                    uid,
                    name,
                    found: close.uid(),
                    offset: close_at,
                });
            }

            trace!(uid = %open.uid(), name = open.name(), offset = open_at, "found region");

            let (uid, name) = open.into_parts();
            elements.push(Region::new(uid, name, &input[content_start..close_at]).into());
            pos = close_at + close.byte_len();
        }

        debug!(elements = elements.len(), "scan complete");
        Ok(elements)
    }

    fn find_marker(&self, from: usize) -> Option<usize> {
        self.finder.find(&self.input[from..]).map(|i| i + from)
    }

    fn decode(input: &[u8], offset: usize) -> Result<Tag, ScanError> {
        Tag::decode(&input[offset..]).map_err(|reason| ScanError::MalformedTag { offset, reason })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{self, Write},
        sync::{Arc, Mutex},
    };

    use test_case::test_case;

    use super::*;

    const OPEN_1: &str = "<!--  CONTENT ELEMENT, uid:1/x [begin] -->";
    const CLOSE_1: &str = "<!--  CONTENT ELEMENT, uid:1/x [end] -->";

    fn scan(input: &str) -> Result<Vec<Element<'_>>, ScanError> {
        TagScanner::new(input.as_bytes()).scan()
    }

    fn region<'a>(elements: &'a [Element<'_>], index: usize) -> &'a Region<'a> {
        elements[index].as_region().expect("expected a region")
    }

    #[test]
    fn plain_text_is_a_single_element() {
        let elements = scan("<html>no tags here</html>").unwrap();
        assert_eq!(elements, vec![Element::Text(b"<html>no tags here</html>")]);
    }

    #[test]
    fn empty_input_yields_one_empty_text() {
        assert_eq!(scan("").unwrap(), vec![Element::Text(b"")]);
    }

    #[test]
    fn splits_text_and_region() {
        let input = format!("A{OPEN_1}B{CLOSE_1}C");
        let elements = scan(&input).unwrap();

        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], Element::Text(b"A"));
        assert_eq!(region(&elements, 1).uid(), Uid::new(1));
        assert_eq!(region(&elements, 1).name(), "x");
        assert_eq!(region(&elements, 1).content(), b"B");
        assert_eq!(elements[2], Element::Text(b"C"));
    }

    #[test]
    fn trailing_text_is_emitted_even_when_empty() {
        let input = format!("{OPEN_1}B{CLOSE_1}");
        let elements = scan(&input).unwrap();

        assert_eq!(elements.len(), 2);
        assert!(elements[0].as_region().is_some());
        assert_eq!(elements[1], Element::Text(b""));
    }

    #[test]
    fn empty_gap_between_regions_is_skipped() {
        let input = format!("{OPEN_1}a{CLOSE_1}{OPEN_1}b{CLOSE_1}");
        let elements = scan(&input).unwrap();

        assert_eq!(elements.len(), 3);
        assert_eq!(region(&elements, 0).content(), b"a");
        assert_eq!(region(&elements, 1).content(), b"b");
    }

    #[test]
    fn adjacent_tags_make_an_empty_region() {
        let input = format!("{OPEN_1}{CLOSE_1}");
        let elements = scan(&input).unwrap();
        assert_eq!(region(&elements, 0).content(), b"");
    }

    #[test]
    fn close_tag_uid_is_ignored_by_default() {
        let input = "<!--  CONTENT ELEMENT, uid:1/a [begin] -->x<!--  CONTENT ELEMENT, uid:2/b [end] -->";
        let elements = scan(input).unwrap();

        assert_eq!(region(&elements, 0).uid(), Uid::new(1));
        assert_eq!(region(&elements, 0).name(), "a");
    }

    #[test]
    fn strict_pairing_rejects_mismatched_close() {
        let input = "<!--  CONTENT ELEMENT, uid:1/a [begin] -->x<!--  CONTENT ELEMENT, uid:2/b [end] -->";
        let error = TagScanner::with_pairing(input.as_bytes(), Pairing::Strict)
            .scan()
            .unwrap_err();

        assert_eq!(
            error,
            ScanError::MismatchedClose {
                uid: Uid::new(1),
                name: "a".to_string(),
                found: Uid::new(2),
                offset: 43,
            }
        );
    }

    #[test]
    fn strict_pairing_accepts_matched_close() {
        let input = format!("A{OPEN_1}B{CLOSE_1}C");
        let elements = TagScanner::with_pairing(input.as_bytes(), Pairing::Strict)
            .scan()
            .unwrap();
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn unclosed_region_names_the_open_tag() {
        let input = format!("before{OPEN_1}after");
        let error = scan(&input).unwrap_err();

        assert_eq!(
            error,
            ScanError::UnclosedRegion {
                uid: Uid::new(1),
                name: "x".to_string(),
                offset: 6,
            }
        );
        assert_eq!(
            error.to_string(),
            "[mark 1/x] at byte 6: expected closing tag not found"
        );
    }

    #[test_case("<!--  CONTENT ELEMENT, nope -->", 0; "open tag without uid")]
    #[test_case("ab<!--  CONTENT ELEMENT, uid:x/y [begin] -->", 2; "open tag with bad uid")]
    fn malformed_open_tag_fails(input: &str, offset: usize) {
        let error = scan(input).unwrap_err();
        assert!(matches!(error, ScanError::MalformedTag { offset: o, .. } if o == offset));
    }

    #[test]
    fn malformed_close_tag_fails() {
        let input = format!("{OPEN_1}body<!--  CONTENT ELEMENT, broken -->");
        let error = scan(&input).unwrap_err();

        assert_eq!(
            error,
            ScanError::MalformedTag {
                offset: OPEN_1.len() + 4,
                reason: TagError::MissingUid,
            }
        );
    }

    #[test]
    fn marker_inside_content_closes_the_region() {
        // No nesting: an inner open tag acts as the close of the outer one.
        let input = "<!--  CONTENT ELEMENT, uid:1/outer [begin] -->a\
                     <!--  CONTENT ELEMENT, uid:2/inner [begin] -->b\
                     <!--  CONTENT ELEMENT, uid:2/inner [end] -->c\
                     <!--  CONTENT ELEMENT, uid:1/outer [end] -->";
        let elements = scan(input).unwrap();

        assert_eq!(region(&elements, 0).content(), b"a");
        assert_eq!(elements[1], Element::Text(b"b"));
        assert_eq!(region(&elements, 2).uid(), Uid::new(2));
        assert_eq!(region(&elements, 2).content(), b"c");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn scan_logs_element_count() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let input = format!("A{OPEN_1}B{CLOSE_1}C");
        tracing::subscriber::with_default(subscriber, || scan(&input).unwrap());

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("scan complete"));
        assert!(logs.contains("elements=3"));
    }
}
