use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// One opened file, displayed in one tab.
///
/// The file is read fully into memory and decoded once on open; the text is
/// read-only afterwards. The document owns the current search selection so
/// that switching tabs keeps each tab's selection intact.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    title: String,
    text: String,
    encoding: &'static Encoding,
    /// Byte range of the current search selection, if any.
    pub selection: Option<Range<usize>>,
}

impl Document {
    /// Opens a file, detecting the encoding from its leading bytes.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let encoding = detect_encoding(&bytes);
        let (text, _, _) = encoding.decode(&bytes);

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            title,
            text: text.into_owned(),
            encoding,
            selection: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The tab label: the file's basename.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// Picks an encoding from the leading bytes of a file.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    // Check for BOM
    if bytes.len() >= 3 && bytes[0..3] == [0xEF, 0xBB, 0xBF] {
        return UTF_8;
    }
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return UTF_16LE;
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return UTF_16BE;
        }
    }

    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    // Default to WINDOWS_1252 (similar to ISO-8859-1)
    WINDOWS_1252
}
