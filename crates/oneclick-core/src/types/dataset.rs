//! Uploaded dataset handle.

use std::path::Path;

/// A dataset staged for upload: file name plus raw bytes.
///
/// Present in the pipeline state only during the upload stage; the backend
/// owns the data once the upload completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    /// Original file name, used for extension validation and display.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl DatasetFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a dataset from disk, taking the file name from the path.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Size of the staged file in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file name carries the given extension (e.g. `".csv"`).
    pub fn has_extension(&self, extension: &str) -> bool {
        self.name.ends_with(extension)
    }
}
