use std::io::{self, Write};

use super::Uid;

/// Markup opening the envelope that hides an inactive region.
pub const HIDE_OPEN: &[u8] = br#"<div style="opacity: 0;">"#;

/// Markup closing the envelope that hides an inactive region.
pub const HIDE_CLOSE: &[u8] = b"</div>";

/// A content element: the bytes between an open tag and the tag that closes
/// it.
///
/// The tags themselves are not kept. A region starts hidden and becomes
/// visible once it is seeded with its own uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
    uid: Uid,
    name: String,
    content: &'a [u8],
    visible: bool,
}

impl<'a> Region<'a> {
    /// Create a hidden region.
    #[must_use]
    pub const fn new(uid: Uid, name: String, content: &'a [u8]) -> Self {
        Self {
            uid,
            name,
            content,
            visible: false,
        }
    }

    /// The uid declared by the open tag.
    #[must_use]
    pub const fn uid(&self) -> Uid {
        self.uid
    }

    /// The name declared by the open tag. Informational only.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw content, exactly as it appeared in the source.
    #[must_use]
    pub const fn content(&self) -> &'a [u8] {
        self.content
    }

    /// Whether the region renders without the hiding envelope.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Make the region visible if `target` is its uid.
    ///
    /// Never hides a region that is already visible. Returns `true` if the
    /// uid matched.
    pub fn seed(&mut self, target: Uid) -> bool {
        let matched = self.uid == target;
        if matched {
            self.visible = true;
        }
        matched
    }

    /// Write the content, wrapped in the hiding envelope unless visible.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the writer.
    pub fn render<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        if self.visible {
            return writer.write_all(self.content);
        }
        writer.write_all(HIDE_OPEN)?;
        writer.write_all(self.content)?;
        writer.write_all(HIDE_CLOSE)
    }
}
