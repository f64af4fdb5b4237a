//! File descriptor value object
//!
//! Describes a file the operator attached in preview. Bytes are never held
//! here; reading them is the export collaborator's business.

use serde::{Deserialize, Serialize};

/// Attached file, as reported by the file picker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lowercased extension including the dot, e.g. `".pdf"`
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_lowercase()))
    }

    /// Size in whole megabytes, rounded up
    pub fn size_mb(&self) -> u64 {
        const MB: u64 = 1024 * 1024;
        self.size_bytes.div_ceil(MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(FileDescriptor::new("audit.PDF", 10).extension().as_deref(), Some(".pdf"));
        assert_eq!(FileDescriptor::new("archive.tar.gz", 10).extension().as_deref(), Some(".gz"));
        assert_eq!(FileDescriptor::new("README", 10).extension(), None);
        assert_eq!(FileDescriptor::new(".bashrc", 10).extension(), None);
    }

    #[test]
    fn test_size_mb_rounds_up() {
        assert_eq!(FileDescriptor::new("a.pdf", 0).size_mb(), 0);
        assert_eq!(FileDescriptor::new("a.pdf", 1).size_mb(), 1);
        assert_eq!(FileDescriptor::new("a.pdf", 3 * 1024 * 1024).size_mb(), 3);
    }
}
