//! Error types for the advisory portal
//!
//! Every error is handled at the command that raised it and surfaced as an
//! inline message; nothing here is fatal and nothing retries.

use thiserror::Error;

/// Domain errors raised by portal operations
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{name} is not a supported file type. Please upload PDF, Word, or image files.")]
    UnsupportedFileType { name: String },

    #[error("{name} exceeds the 10MB size limit.")]
    FileTooLarge { name: String },

    #[error("Export failed: {0}")]
    ExportFailure(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PortalError {
    /// Returns true when the error came from user input rather than the app.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PortalError::InvalidCredentials
                | PortalError::UnsupportedFileType { .. }
                | PortalError::FileTooLarge { .. }
        )
    }

    /// Short hint shown next to the inline message.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            PortalError::InvalidCredentials => "Check your email address and password.",
            PortalError::UnsupportedFileType { .. } => {
                "Supported formats: PDF, Word, Images (up to 10MB each)."
            }
            PortalError::FileTooLarge { .. } => "Maximum file size is 10MB.",
            PortalError::ExportFailure(_) => "Try the export again.",
            PortalError::Storage(_) => "Check file permissions and disk space.",
        }
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::Storage(err.to_string())
    }
}

/// Serializable error representation for IPC
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub message: String,
    pub kind: ErrorKind,
    pub recovery_hint: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Credentials,
    Validation,
    Export,
    Storage,
}

impl From<&PortalError> for CommandError {
    fn from(err: &PortalError) -> Self {
        let kind = match err {
            PortalError::InvalidCredentials => ErrorKind::Credentials,
            PortalError::UnsupportedFileType { .. } | PortalError::FileTooLarge { .. } => {
                ErrorKind::Validation
            }
            PortalError::ExportFailure(_) => ErrorKind::Export,
            PortalError::Storage(_) => ErrorKind::Storage,
        };

        CommandError {
            message: err.to_string(),
            kind,
            recovery_hint: err.recovery_hint().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(PortalError::InvalidCredentials.is_user_error());
        assert!(PortalError::FileTooLarge {
            name: "big.pdf".into()
        }
        .is_user_error());
        assert!(!PortalError::ExportFailure("boom".into()).is_user_error());
    }

    #[test]
    fn test_command_error_carries_hint() {
        let err = PortalError::UnsupportedFileType {
            name: "virus.exe".into(),
        };
        let ipc = CommandError::from(&err);
        assert!(ipc.message.contains("virus.exe"));
        assert!(ipc.recovery_hint.contains("PDF"));
    }
}
