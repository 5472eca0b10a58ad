//! Simulated external integrations behind real async seams.
//!
//! The accounting-ledger sync and the document upload both resolve after
//! a fixed delay with no real I/O. Each sits behind a trait so a real
//! backend call can replace the mock without changing the UI-facing
//! contract (idle/pending/succeeded/failed, cancellable while pending).

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;

use crate::error::PortalError;
use crate::upload::PendingUpload;

/// How long the mock ledger sync pretends to work.
const LEDGER_SYNC_DELAY: Duration = Duration::from_secs(2);
/// How long the mock upload pretends to transmit.
const UPLOAD_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSyncOutcome {
    pub provider: String,
    pub synced_at: String,
}

/// Boundary to the external accounting system.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn sync(&self) -> Result<LedgerSyncOutcome, PortalError>;
}

/// Stand-in connector: waits, then reports success.
pub struct MockLedgerConnector {
    delay: Duration,
}

impl MockLedgerConnector {
    pub fn new() -> Self {
        Self {
            delay: LEDGER_SYNC_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockLedgerConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerConnector for MockLedgerConnector {
    fn provider_name(&self) -> &'static str {
        "Xero"
    }

    async fn sync(&self) -> Result<LedgerSyncOutcome, PortalError> {
        tokio::time::sleep(self.delay).await;
        Ok(LedgerSyncOutcome {
            provider: self.provider_name().to_string(),
            synced_at: Local::now().format("Today at %-I:%M %p").to_string(),
        })
    }
}

/// Boundary for transmitting staged uploads.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn transmit(&self, files: Vec<PendingUpload>) -> Result<usize, PortalError>;
}

/// Stand-in transport: waits, then reports every file sent.
pub struct MockUploadTransport {
    delay: Duration,
}

impl MockUploadTransport {
    pub fn new() -> Self {
        Self {
            delay: UPLOAD_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockUploadTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadTransport for MockUploadTransport {
    async fn transmit(&self, files: Vec<PendingUpload>) -> Result<usize, PortalError> {
        tokio::time::sleep(self.delay).await;
        Ok(files.len())
    }
}

/// UI-facing status of one background operation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OperationStatus {
    Idle,
    Pending,
    Succeeded { detail: String },
    Failed { message: String },
}

/// Tracks one in-flight operation and its abort handle.
pub struct OperationTracker {
    status: OperationStatus,
    handle: Option<tauri::async_runtime::JoinHandle<()>>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self {
            status: OperationStatus::Idle,
            handle: None,
        }
    }

    pub fn status(&self) -> OperationStatus {
        self.status.clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, OperationStatus::Pending)
    }

    /// Mark the operation started. The spawned task's handle arrives via
    /// `attach` right after the spawn.
    pub fn begin(&mut self) {
        self.status = OperationStatus::Pending;
    }

    pub fn attach(&mut self, handle: tauri::async_runtime::JoinHandle<()>) {
        self.handle = Some(handle);
    }

    pub fn complete(&mut self, detail: String) {
        self.status = OperationStatus::Succeeded { detail };
        self.handle = None;
    }

    pub fn fail(&mut self, message: String) {
        self.status = OperationStatus::Failed { message };
        self.handle = None;
    }

    /// Abort a pending operation; the status returns to idle. Cancelling
    /// a finished or never-started operation is a no-op.
    pub fn cancel(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.status = OperationStatus::Idle;
        true
    }
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sync_reports_provider() {
        let connector = MockLedgerConnector::with_delay(Duration::from_millis(5));
        let outcome = connector.sync().await.unwrap();
        assert_eq!(outcome.provider, "Xero");
        assert!(outcome.synced_at.starts_with("Today at"));
    }

    #[tokio::test]
    async fn test_mock_transport_counts_files() {
        let transport = MockUploadTransport::with_delay(Duration::from_millis(5));
        let sent = transport.transmit(Vec::new()).await.unwrap();
        assert_eq!(sent, 0);
    }

    #[test]
    fn test_tracker_lifecycle() {
        let mut tracker = OperationTracker::new();
        assert!(matches!(tracker.status(), OperationStatus::Idle));

        tracker.begin();
        assert!(tracker.is_pending());

        tracker.complete("3 files".into());
        assert!(matches!(
            tracker.status(),
            OperationStatus::Succeeded { .. }
        ));

        // Cancel after completion does nothing.
        assert!(!tracker.cancel());
    }

    #[test]
    fn test_tracker_cancel_resets_to_idle() {
        let mut tracker = OperationTracker::new();
        tracker.begin();
        assert!(tracker.cancel());
        assert!(matches!(tracker.status(), OperationStatus::Idle));
    }

    #[test]
    fn test_tracker_failure_keeps_message() {
        let mut tracker = OperationTracker::new();
        tracker.begin();
        tracker.fail("Upload failed. Please try again.".into());
        match tracker.status() {
            OperationStatus::Failed { message } => {
                assert!(message.contains("try again"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
