//! Client-side upload validation and the pending-file queue.
//!
//! Files are validated by declared MIME type and size only; nothing is
//! read from disk and nothing is transmitted. The actual "upload" is the
//! simulated transport in `integrations`.

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Per-file size ceiling (10MB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted document types: PDF, JPEG, PNG, legacy and OpenXML Word.
pub const ACCEPTED_MIME_TYPES: [&str; 5] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A file the user picked or dropped, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCandidate {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// A validated file waiting in the upload dialog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUpload {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub size_display: String,
}

/// Check one candidate against the accepted types and the size ceiling.
pub fn validate(candidate: &UploadCandidate) -> Result<(), PortalError> {
    if !ACCEPTED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(PortalError::UnsupportedFileType {
            name: candidate.name.clone(),
        });
    }
    if candidate.size_bytes > MAX_UPLOAD_BYTES {
        return Err(PortalError::FileTooLarge {
            name: candidate.name.clone(),
        });
    }
    Ok(())
}

/// Best-effort MIME type for a picked file path, for dialogs that only
/// hand back a filename.
pub fn mime_for_path(path: &str) -> String {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// The upload dialog's pending-file list.
#[derive(Debug, Default)]
pub struct UploadQueue {
    pending: Vec<PendingUpload>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and stage a batch. All-or-nothing: the first invalid file
    /// rejects the whole batch and the pending list is left untouched.
    pub fn add_batch(&mut self, batch: Vec<UploadCandidate>) -> Result<usize, PortalError> {
        for candidate in &batch {
            validate(candidate)?;
        }

        let added = batch.len();
        for candidate in batch {
            self.pending.push(PendingUpload {
                id: uuid::Uuid::new_v4().to_string(),
                size_display: crate::formatters::format_file_size(candidate.size_bytes),
                name: candidate.name,
                mime_type: candidate.mime_type,
                size_bytes: candidate.size_bytes,
            });
        }
        Ok(added)
    }

    pub fn remove(&mut self, index: usize) -> Option<PendingUpload> {
        if index < self.pending.len() {
            Some(self.pending.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn list(&self) -> Vec<PendingUpload> {
        self.pending.clone()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, mime: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            name: name.to_string(),
            mime_type: mime.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn test_accepts_supported_types_under_limit() {
        for mime in ACCEPTED_MIME_TYPES {
            assert!(validate(&candidate("f", mime, 1024)).is_ok());
        }
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = validate(&candidate("report.xlsx", "application/vnd.ms-excel", 1024))
            .unwrap_err();
        assert!(matches!(err, PortalError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_rejects_oversize_file() {
        let err = validate(&candidate(
            "huge.pdf",
            "application/pdf",
            MAX_UPLOAD_BYTES + 1,
        ))
        .unwrap_err();
        assert!(matches!(err, PortalError::FileTooLarge { .. }));
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        assert!(validate(&candidate("edge.pdf", "application/pdf", MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn test_invalid_batch_adds_nothing() {
        let mut queue = UploadQueue::new();
        queue
            .add_batch(vec![candidate("ok.pdf", "application/pdf", 1024)])
            .unwrap();

        let result = queue.add_batch(vec![
            candidate("fine.png", "image/png", 2048),
            candidate("nope.exe", "application/x-msdownload", 10),
        ]);
        assert!(result.is_err());
        // Earlier staged files survive; the failed batch added none.
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.list()[0].name, "ok.pdf");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut queue = UploadQueue::new();
        queue
            .add_batch(vec![
                candidate("a.pdf", "application/pdf", 100),
                candidate("b.png", "image/png", 200),
            ])
            .unwrap();
        let removed = queue.remove(0).unwrap();
        assert_eq!(removed.name, "a.pdf");
        assert_eq!(queue.len(), 1);
        assert!(queue.remove(5).is_none());
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path("/tmp/Q1 report.PDF"), "application/pdf");
        assert_eq!(
            mime_for_path("scan.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime_for_path("weird.bin"), "application/octet-stream");
    }
}
