//! Content Variant Rendering
//!
//! A static HTML document carries several candidate content blocks, each
//! delimited by a pair of marker comments:
//!
//! ```html
//! <!--  CONTENT ELEMENT, uid:1/hero [begin] -->
//! ...
//! <!--  CONTENT ELEMENT, uid:1/hero [end] -->
//! ```
//!
//! Rendering a variant keeps every block in the output but hides all of them
//! except the one whose uid was selected.
//!
//! ```
//! use variant::{Document, Uid};
//!
//! let input = b"A<!--  CONTENT ELEMENT, uid:1/x [begin] -->B<!--  CONTENT ELEMENT, uid:1/x [end] -->C";
//! let mut document = Document::parse(input).unwrap();
//! document.seed(Uid::new(1));
//!
//! assert_eq!(document.render_to_vec(), b"ABC");
//! ```

use std::io::{self, Read, Write};

use tracing::warn;

pub mod domain;
pub use domain::{Config, Document, Element, Region, Source, Uid};

/// Splitting raw documents into text and regions.
pub mod scanner;
pub use scanner::{Pairing, ScanError, TagScanner};

/// Errors from reading, scanning or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be read or the output could not be written.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The input is not a well-formed document.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Summary of a completed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    /// Number of regions in the document.
    pub regions: usize,
    /// Number of regions left visible.
    pub visible: usize,
}

/// Read a whole document, show the regions matching `uid`, and write the
/// result.
///
/// A uid with no matching region, or with several, is logged but is not an
/// error.
///
/// # Errors
///
/// Returns an error if reading fails, the document does not scan, or writing
/// fails. Nothing is written unless the scan succeeds.
pub fn render_variant<R: Read, W: Write>(
    reader: R,
    writer: &mut W,
    uid: Uid,
    pairing: Pairing,
) -> Result<Rendered, Error> {
    let source = Source::read(reader)?;
    let mut document = source.parse(pairing)?;

    let visible = document.seed(uid);
    let regions = document.regions().count();
    match visible {
        0 => warn!(%uid, regions, "no region matches uid; all regions hidden"),
        1 => {}
        n => warn!(%uid, matches = n, "uid is shared by several regions; all are shown"),
    }

    document.render(writer)?;
    writer.flush()?;

    Ok(Rendered { regions, visible })
}
