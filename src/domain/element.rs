use std::io::{self, Write};

use super::{Region, Uid};

/// One piece of a scanned document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<'a> {
    /// Bytes outside any region, copied through verbatim.
    Text(&'a [u8]),

    /// A content element that may be shown or hidden.
    Region(Region<'a>),
}

impl<'a> Element<'a> {
    /// Offer a target uid to this element.
    ///
    /// Text ignores it. Returns `true` if a region matched.
    pub fn seed(&mut self, target: Uid) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Region(region) => region.seed(target),
        }
    }

    /// Write this element's rendered form.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the writer.
    pub fn render<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Self::Text(bytes) => writer.write_all(bytes),
            Self::Region(region) => region.render(writer),
        }
    }

    /// Returns the region, if this element is one.
    #[must_use]
    pub const fn as_region(&self) -> Option<&Region<'a>> {
        match self {
            Self::Region(region) => Some(region),
            Self::Text(_) => None,
        }
    }

    /// Returns the passthrough bytes, if this element is text.
    #[must_use]
    pub const fn as_text(&self) -> Option<&'a [u8]> {
        match self {
            Self::Text(bytes) => Some(*bytes),
            Self::Region(_) => None,
        }
    }
}

impl<'a> From<Region<'a>> for Element<'a> {
    fn from(region: Region<'a>) -> Self {
        Self::Region(region)
    }
}
