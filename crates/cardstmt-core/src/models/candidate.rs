//! Candidate files staged for extraction.

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Access to a user-provided file: its declared metadata and its bytes.
///
/// Metadata is available synchronously so validation never waits on I/O.
/// Content is only read when a request is built.
pub trait FilePayload: Clone {
    /// Original file name, sent as the multipart filename.
    fn name(&self) -> &str;

    /// Declared media type (e.g. `application/pdf`).
    fn media_type(&self) -> &str;

    /// Read the full file content.
    fn read(&self) -> impl Future<Output = std::io::Result<Vec<u8>>>;
}

/// Identifier of a candidate installation, unique per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(pub(crate) u64);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An accepted file, tagged with the installation it belongs to.
#[derive(Debug, Clone)]
pub struct CandidateFile<F> {
    id: CandidateId,
    payload: F,
}

impl<F: FilePayload> CandidateFile<F> {
    pub(crate) fn new(id: CandidateId, payload: F) -> Self {
        Self { id, payload }
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.payload.name()
    }

    pub fn media_type(&self) -> &str {
        self.payload.media_type()
    }

    pub fn payload(&self) -> &F {
        &self.payload
    }
}

/// A file whose bytes are already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    name: String,
    media_type: String,
    content: Arc<[u8]>,
}

impl InMemoryFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    /// Load a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self::new(name, media_type_for_path(path), content))
    }

    /// Same file, declared with another media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl FilePayload for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.content.to_vec())
    }
}

/// Media type a browser would declare for a file with this extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "txt" => "text/plain",
        "json" => "application/json",
        "csv" => "text/csv",
        // Browsers report an empty type for unknown extensions.
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("statement.pdf")), "application/pdf");
        assert_eq!(media_type_for_path(Path::new("STATEMENT.PDF")), "application/pdf");
        assert_eq!(media_type_for_path(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("noext")), "");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("march.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.7").unwrap();

        let loaded = InMemoryFile::from_path(&path).unwrap();
        assert_eq!(loaded.name(), "march.pdf");
        assert_eq!(loaded.media_type(), "application/pdf");
        assert_eq!(loaded.content(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_read_returns_content() {
        let file = InMemoryFile::new("a.pdf", "application/pdf", b"abc".to_vec());
        assert_eq!(file.read().await.unwrap(), b"abc".to_vec());
    }
}
