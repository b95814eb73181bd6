//! # docxtract
//!
//! Plain text and image extraction from DOCX files.
//!
//! This library reads a Word package (a ZIP archive of XML parts) and
//! flattens it to text: header parts, the main document part, and footer
//! parts in document order, with tabs, line breaks, and paragraph
//! boundaries translated to their text equivalents. Embedded images can be
//! copied out alongside the text.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Whole document as one trimmed string
//! let text = docxtract::extract_text("document.docx")?;
//! println!("{}", text);
//!
//! // One string per page, split on page breaks
//! for page in docxtract::extract_pages("document.docx")? {
//!     println!("{}", page);
//! }
//! # Ok::<(), docxtract::Error>(())
//! ```
//!
//! ## Reusing one open package
//!
//! ```no_run
//! use docxtract::DocxExtractor;
//!
//! let extractor = DocxExtractor::open("document.docx")?;
//! let text = extractor.extract_text()?;
//! let images = extractor.extract_images("assets")?;
//! println!("{} chars, {} images", text.len(), images.len());
//! # Ok::<(), docxtract::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;

// Re-exports
pub use container::DocxContainer;
pub use docx::DocxExtractor;
pub use error::{Error, Result};

use std::path::Path;

/// Extract a document's text as a single trimmed string.
///
/// # Example
///
/// ```no_run
/// let text = docxtract::extract_text("document.docx")?;
/// println!("{}", text);
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    DocxExtractor::open(path)?.extract_text()
}

/// Extract a document's text split on page breaks.
///
/// Leading and trailing empty pages are dropped; interior empty pages are
/// kept so page positions stay meaningful.
pub fn extract_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    DocxExtractor::open(path)?.extract_pages()
}

/// Extract text from an in-memory DOCX package.
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String> {
    DocxExtractor::from_bytes(data.to_vec())?.extract_text()
}

/// Extract page-split text from an in-memory DOCX package.
pub fn extract_pages_from_bytes(data: &[u8]) -> Result<Vec<String>> {
    DocxExtractor::from_bytes(data.to_vec())?.extract_pages()
}
