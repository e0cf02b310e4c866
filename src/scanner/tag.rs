use memchr::{memchr, memmem};

use super::MARKER;
use crate::domain::{Uid, UidError};

const UID: &[u8] = b"uid:";
const END: &[u8] = b"-->";

/// A decoded content element tag.
///
/// Open and close tags share one grammar:
///
/// ```text
/// <!--  CONTENT ELEMENT, uid:<N>/<name> [begin] -->
/// ```
///
/// Everything between the name and the `-->` terminator (normally `[begin]`
/// or `[end]`) is skipped without inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    uid: Uid,
    name: String,
    len: usize,
}

impl Tag {
    /// Decode the tag at the start of `buf`.
    ///
    /// `buf` must begin with [`MARKER`]; the scanner only calls this at marker
    /// positions. The tag may extend to anywhere in the rest of the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the `uid:` literal is missing, the uid is not
    /// followed by `/`, the uid is not a valid integer, or the tag is never
    /// terminated.
    pub fn decode(buf: &[u8]) -> Result<Self, TagError> {
        debug_assert!(buf.starts_with(MARKER));

        let mut i = MARKER.len();
        while buf.get(i) == Some(&b' ') {
            i += 1;
        }

        if !buf[i..].starts_with(UID) {
            return Err(TagError::MissingUid);
        }
        i += UID.len();

        let slash = memchr(b'/', &buf[i..]).ok_or(TagError::MissingSlash)? + i;
        let uid = Uid::from_bytes(&buf[i..slash])?;

        let name_end = memchr(b' ', &buf[slash..]).ok_or(TagError::Unterminated)? + slash;
        let name = String::from_utf8_lossy(&buf[slash + 1..name_end]).into_owned();

        // [begin] / [end] are not checked
        let terminator = memmem::find(&buf[name_end..], END).ok_or(TagError::Unterminated)?;

        Ok(Self {
            uid,
            name,
            len: name_end + terminator + END.len(),
        })
    }

    /// The declared uid.
    #[must_use]
    pub const fn uid(&self) -> Uid {
        self.uid
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of the whole tag in bytes, up to and including `-->`.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.len
    }

    /// Consumes the tag, returning its uid and name.
    #[must_use]
    pub fn into_parts(self) -> (Uid, String) {
        (self.uid, self.name)
    }
}

/// Reasons a tag fails to decode.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TagError {
    /// The marker is not followed by `uid:`.
    #[error("Invalid tag, no 'uid:' found")]
    MissingUid,

    /// No `/` follows the uid.
    #[error("Invalid tag, no '/' after uid")]
    MissingSlash,

    /// The uid is not a 32-bit integer.
    #[error(transparent)]
    Uid(#[from] UidError),

    /// No `-->` terminates the tag.
    #[error("Invalid unended tag")]
    Unterminated,
}
