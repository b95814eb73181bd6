//! Multi-part document assembly and image extraction.

use crate::container::DocxContainer;
use crate::error::{Error, Result};
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::transform;

/// The mandatory main document part.
const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Name prefixes for the optional header and footer parts.
const HEADER_PREFIX: &str = "word/header";
const FOOTER_PREFIX: &str = "word/footer";

/// Extensions recognized for image copy-out, matched case-sensitively.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Extractor for DOCX (Word) packages.
///
/// Assembles header parts, the main document part, and footer parts into
/// one flattened text result, and optionally copies embedded images out of
/// the package.
pub struct DocxExtractor {
    container: DocxContainer,
}

impl DocxExtractor {
    /// Open a DOCX file for extraction.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_container(DocxContainer::open(path)?))
    }

    /// Create an extractor from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::from_container(DocxContainer::from_bytes(data)?))
    }

    /// Create an extractor from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Ok(Self::from_container(DocxContainer::from_reader(reader)?))
    }

    /// Create an extractor from an already-open container.
    pub fn from_container(container: DocxContainer) -> Self {
        Self { container }
    }

    /// Get a reference to the underlying container.
    pub fn container(&self) -> &DocxContainer {
        &self.container
    }

    /// Extract the document as a single string.
    ///
    /// Header parts come first (in archive enumeration order), then the
    /// main document part, then footer parts. The result is trimmed of
    /// surrounding whitespace once; internal whitespace is untouched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtract::DocxExtractor;
    ///
    /// let extractor = DocxExtractor::open("document.docx")?;
    /// println!("{}", extractor.extract_text()?);
    /// # Ok::<(), docxtract::Error>(())
    /// ```
    pub fn extract_text(&self) -> Result<String> {
        let mut text = String::new();
        for name in self.assembly_order()? {
            let xml = self.container.read_xml(&name)?;
            text.push_str(&transform::xml_to_text(&xml)?);
        }
        Ok(text.trim().to_string())
    }

    /// Extract the document as page segments.
    ///
    /// Parts are assembled in the same order as [`extract_text`]; each
    /// page-type break ends a segment. Leading and trailing empty segments
    /// are dropped, then each remaining segment is trimmed individually.
    /// Internal empty segments are preserved.
    ///
    /// [`extract_text`]: Self::extract_text
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        let mut pages: Vec<String> = Vec::new();
        for name in self.assembly_order()? {
            let xml = self.container.read_xml(&name)?;
            pages.extend(transform::xml_to_pages(&xml)?);
        }
        // Edge stripping runs before the per-segment trim, so a
        // whitespace-only edge segment survives as an empty string
        strip_empty_edges(&mut pages);
        Ok(pages.iter().map(|page| page.trim().to_string()).collect())
    }

    /// Copy embedded images into `dir`, returning the written paths.
    ///
    /// Every archive entry with a recognized image extension is written to
    /// `dir` under its base filename (directory components stripped).
    /// Entries sharing a base filename are written in enumeration order
    /// and the later entry silently overwrites the earlier one. The
    /// directory must already exist; a failed write is fatal.
    pub fn extract_images(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::new();
        for name in self.container.entry_names() {
            if !has_image_extension(&name) {
                continue;
            }
            let base = Path::new(&name).file_name().unwrap_or_default();
            let dst = dir.join(base);
            fs::write(&dst, self.container.read_bytes(&name)?)?;
            written.push(dst);
        }
        Ok(written)
    }

    /// Part names contributing text, in assembly order: headers, then the
    /// main document, then footers.
    fn assembly_order(&self) -> Result<Vec<String>> {
        if !self.container.exists(MAIN_DOCUMENT_PART) {
            return Err(Error::MissingPart(MAIN_DOCUMENT_PART.to_string()));
        }

        let names = self.container.entry_names();
        let mut order: Vec<String> = names
            .iter()
            .filter(|name| is_numbered_part(name, HEADER_PREFIX))
            .cloned()
            .collect();
        order.push(MAIN_DOCUMENT_PART.to_string());
        order.extend(
            names
                .iter()
                .filter(|name| is_numbered_part(name, FOOTER_PREFIX))
                .cloned(),
        );
        Ok(order)
    }
}

impl std::fmt::Debug for DocxExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxExtractor")
            .field("container", &self.container)
            .finish()
    }
}

/// Match `<prefix><digits>.xml` where the digit run may be empty.
fn is_numbered_part(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))
}

fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

/// Drop leading and trailing empty segments, keeping internal ones.
fn strip_empty_edges(segments: &mut Vec<String>) {
    while segments.last().is_some_and(|seg| seg.is_empty()) {
        segments.pop();
    }
    while segments.first().is_some_and(|seg| seg.is_empty()) {
        segments.remove(0);
    }
}
