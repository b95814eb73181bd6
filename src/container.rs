//! ZIP container abstraction for DOCX packages.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// DOCX package abstraction over a ZIP archive.
///
/// The whole package is buffered in memory; the archive handle lives for
/// the duration of the container and is released on drop. Entries can be
/// read any number of times and always yield identical bytes.
pub struct DocxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl DocxContainer {
    /// Open a DOCX package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtract::DocxContainer;
    ///
    /// let container = DocxContainer::open("document.docx")?;
    /// # Ok::<(), docxtract::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// List all entry names in the archive, in archive enumeration order.
    ///
    /// Multi-part assembly depends on this order, so it is returned as
    /// stored in the archive's central directory.
    pub fn entry_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, name: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == name);
        found
    }

    /// Read the raw bytes of an entry.
    pub fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut entry = archive.by_name(name)?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an XML entry from the archive as a string.
    ///
    /// Handles different encodings:
    /// - UTF-8 (with or without BOM)
    /// - UTF-16 LE (with BOM: FF FE)
    /// - UTF-16 BE (with BOM: FE FF)
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_bytes(name)?;
        decode_xml_bytes(&bytes)
    }
}

impl std::fmt::Debug for DocxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxContainer")
            .field("entries", &self.entry_names().len())
            .finish()
    }
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// DOCX parts are typically UTF-8 encoded, but documents produced by some
/// tools use UTF-16.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        // UTF-8 BOM
        return String::from_utf8(rest.to_vec()).map_err(|e| Error::Encoding(e.to_string()));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        // UTF-16 LE BOM
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        // UTF-16 BE BOM
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // No BOM and not valid UTF-8: ASCII XML in UTF-16 has null bytes
            // at alternating positions
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                let content = decode_utf16(bytes, u16::from_le_bytes)?;
                Ok(fix_xml_encoding_declaration(&content))
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                let content = decode_utf16(bytes, u16::from_be_bytes)?;
                Ok(fix_xml_encoding_declaration(&content))
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

/// Decode UTF-16 bytes to String with the given byte-pair interpretation.
fn decode_utf16(bytes: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// Rewrite a UTF-16 XML encoding declaration to UTF-8.
///
/// After a UTF-16 part is decoded to a Rust String, the declaration still
/// says encoding="UTF-16", which would make quick-xml re-interpret the
/// already-decoded text.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }

    #[test]
    fn test_entry_names_in_order() {
        let data = archive_with(&[
            ("word/document.xml", b"<a/>"),
            ("media/image1.png", b"\x89PNG"),
            ("word/footer1.xml", b"<b/>"),
        ]);
        let container = DocxContainer::from_bytes(data).unwrap();
        assert_eq!(
            container.entry_names(),
            vec!["word/document.xml", "media/image1.png", "word/footer1.xml"]
        );
    }

    #[test]
    fn test_read_bytes_roundtrip() {
        let data = archive_with(&[("media/image1.png", &[0xFF, 0xD8, 0x01, 0x02])]);
        let container = DocxContainer::from_bytes(data).unwrap();

        assert!(container.exists("media/image1.png"));
        assert!(!container.exists("media/image2.png"));
        assert_eq!(
            container.read_bytes("media/image1.png").unwrap(),
            vec![0xFF, 0xD8, 0x01, 0x02]
        );
        // re-reads return identical bytes
        assert_eq!(
            container.read_bytes("media/image1.png").unwrap(),
            container.read_bytes("media/image1.png").unwrap()
        );
    }

    #[test]
    fn test_read_missing_entry() {
        let data = archive_with(&[("word/document.xml", b"<a/>")]);
        let container = DocxContainer::from_bytes(data).unwrap();
        let err = container.read_bytes("word/header1.xml").unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }

    #[test]
    fn test_open_corrupt_archive() {
        let err = DocxContainer::from_bytes(vec![0x00, 0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }

    #[test]
    fn test_decode_xml_bytes() {
        // UTF-16 LE with BOM
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        // UTF-16 BE with BOM
        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        // UTF-8 with BOM
        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        // UTF-8 without BOM
        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_utf16_declaration_rewritten() {
        let decl = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><w:document/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in decl.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert!(decoded.contains("encoding=\"UTF-8\""));
        assert!(!decoded.contains("UTF-16"));
    }
}
