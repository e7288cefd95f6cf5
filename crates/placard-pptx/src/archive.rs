//! Archive handling for PPTX files
//!
//! PPTX files are ZIP archives containing XML parts and resources.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{PptxError, Result};

/// Represents an unpacked PPTX package
#[derive(Debug)]
pub struct PptxArchive {
    /// All parts in the package, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl PptxArchive {
    /// Open and unpack a PPTX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a part's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Result<Option<String>> {
        match self.files.get(path) {
            Some(bytes) => {
                let s = String::from_utf8(bytes.clone())
                    .map_err(|e| PptxError::invalid_deck(format!("{} is not UTF-8: {}", path, e)))?;
                Ok(Some(s))
            }
            None => Ok(None),
        }
    }

    /// Get the presentation part (ppt/presentation.xml)
    pub fn presentation_xml(&self) -> Result<&[u8]> {
        self.get("ppt/presentation.xml")
            .ok_or_else(|| PptxError::missing_part("ppt/presentation.xml"))
    }

    /// Package path of the numbered slide part
    pub fn slide_path(slide: u32) -> String {
        format!("ppt/slides/slide{}.xml", slide)
    }

    /// Number of slides in the package.
    ///
    /// Counted as the highest slide part number rather than the entry
    /// count, so a deck with a gap still maps slide N to slideN.xml.
    pub fn slide_count(&self) -> u32 {
        self.files
            .keys()
            .filter_map(|name| {
                name.strip_prefix("ppt/slides/slide")?
                    .strip_suffix(".xml")?
                    .parse::<u32>()
                    .ok()
            })
            .max()
            .unwrap_or(0)
    }

    /// Check if a part exists in the package
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all parts in the package
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    /// Set or update a part's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a part's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the package to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the package to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        // Sort keys for deterministic output
        let mut paths: Vec<_> = self.files.keys().collect();
        paths.sort();

        for path in paths {
            let contents = &self.files[path];
            zip.start_file(path, options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_archive() -> PptxArchive {
        PptxArchive {
            files: HashMap::new(),
        }
    }

    #[test]
    fn test_part_operations() {
        let mut archive = empty_archive();

        archive.set_string("test.xml", "<root/>");
        assert!(archive.contains("test.xml"));
        assert_eq!(
            archive.get_string("test.xml").unwrap(),
            Some("<root/>".to_string())
        );
        assert!(archive.get("missing.xml").is_none());
    }

    #[test]
    fn test_slide_path_and_count() {
        let mut archive = empty_archive();
        assert_eq!(archive.slide_count(), 0);

        archive.set_string(PptxArchive::slide_path(1), "<slide/>");
        archive.set_string(PptxArchive::slide_path(2), "<slide/>");
        archive.set_string(PptxArchive::slide_path(10), "<slide/>");
        // rels entries must not count as slides
        archive.set_string("ppt/slides/_rels/slide1.xml.rels", "<rels/>");

        assert_eq!(archive.slide_count(), 10);
        assert_eq!(PptxArchive::slide_path(3), "ppt/slides/slide3.xml");
    }

    #[test]
    fn test_presentation_xml_required() {
        let mut archive = empty_archive();
        assert!(matches!(
            archive.presentation_xml(),
            Err(PptxError::MissingPart { .. })
        ));

        archive.set_string("ppt/presentation.xml", "<p:presentation/>");
        assert!(archive.presentation_xml().is_ok());
    }

    #[test]
    fn test_roundtrip_through_bytes() {
        let mut archive = empty_archive();
        archive.set_string("[Content_Types].xml", "<Types/>");
        archive.set_string("ppt/presentation.xml", "<p:presentation/>");
        archive.set_string("ppt/slides/slide1.xml", "<p:sld/>");

        let bytes = archive.to_bytes().unwrap();
        let restored = PptxArchive::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(restored.slide_count(), 1);
        assert_eq!(
            restored.get_string("ppt/slides/slide1.xml").unwrap(),
            Some("<p:sld/>".to_string())
        );
    }

    #[test]
    fn test_deterministic_output() {
        let mut archive = empty_archive();
        archive.set_string("b.xml", "<b/>");
        archive.set_string("a.xml", "<a/>");
        archive.set_string("c.xml", "<c/>");

        let first = archive.to_bytes().unwrap();
        let second = archive.to_bytes().unwrap();
        assert_eq!(first, second);
    }
}
