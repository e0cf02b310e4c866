use std::io::{self, Read, Write};

use tracing::{debug, instrument};

use super::{Element, Region, Uid};
use crate::scanner::{Pairing, ScanError, TagScanner};

/// A scanned document: text and regions in their original order.
///
/// Rendering every element in order reproduces the source, except that
/// regions which are not visible are wrapped in the hiding envelope.
///
/// The document borrows the buffer it was scanned from. Use [`Source`] to
/// materialise a reader first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> Document<'a> {
    /// Scan `input` with positional pairing.
    ///
    /// # Errors
    ///
    /// Returns an error if any tag is malformed or a region is never closed.
    /// No partial document is produced.
    pub fn parse(input: &'a [u8]) -> Result<Self, ScanError> {
        Self::parse_with(input, Pairing::default())
    }

    /// Scan `input` with the given pairing mode.
    ///
    /// # Errors
    ///
    /// See [`TagScanner::scan`].
    pub fn parse_with(input: &'a [u8], pairing: Pairing) -> Result<Self, ScanError> {
        let elements = TagScanner::with_pairing(input, pairing).scan()?;
        Ok(Self { elements })
    }

    /// Make every region whose uid is `uid` visible.
    ///
    /// Returns the number of regions that matched. Zero means every region
    /// stays hidden; more than one means the document reuses a uid, and all
    /// of the matching regions are shown. Seeding twice with the same target
    /// changes nothing.
    #[instrument(level = "debug", skip_all, fields(uid = %uid))]
    pub fn seed(&mut self, uid: Uid) -> usize {
        let matched = self
            .elements
            .iter_mut()
            .map(|element| element.seed(uid))
            .filter(|&matched| matched)
            .count();
        debug!(matched, "seeded document");
        matched
    }

    /// Write the rendered document.
    ///
    /// # Errors
    ///
    /// Stops at the first write error and returns it. Whatever was written
    /// before the failure stays written.
    pub fn render<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for element in &self.elements {
            element.render(writer)?;
        }
        Ok(())
    }

    /// Render into a new buffer.
    ///
    /// # Panics
    ///
    /// Never; writing to a `Vec` cannot fail.
    #[must_use]
    pub fn render_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.render(&mut out).expect("writing to a Vec never fails");
        out
    }

    /// All elements, in document order.
    #[must_use]
    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// The regions, in document order.
    pub fn regions(&self) -> impl Iterator<Item = &Region<'a>> {
        self.elements.iter().filter_map(Element::as_region)
    }

    /// The regions that will render without the hiding envelope.
    pub fn visible(&self) -> impl Iterator<Item = &Region<'a>> {
        self.regions().filter(|region| region.is_visible())
    }

    /// Number of elements, text included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements.
    ///
    /// A successful scan always yields at least the trailing text element, so
    /// this is only true for documents built by hand.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> FromIterator<Element<'a>> for Document<'a> {
    fn from_iter<T: IntoIterator<Item = Element<'a>>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

/// The fully-read bytes of a source document.
///
/// Scanning needs the whole document in memory; a [`Document`] borrows from
/// this buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    bytes: Vec<u8>,
}

impl Source {
    /// Read `reader` to the end.
    ///
    /// # Errors
    ///
    /// Returns any error from the reader.
    pub fn read<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        debug!(len = bytes.len(), "read source document");
        Ok(Self { bytes })
    }

    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Scan the buffer into a document.
    ///
    /// # Errors
    ///
    /// See [`TagScanner::scan`].
    pub fn parse(&self, pairing: Pairing) -> Result<Document<'_>, ScanError> {
        Document::parse_with(&self.bytes, pairing)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
