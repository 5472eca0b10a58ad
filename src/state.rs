use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::auth::{default_storage_dir, SessionManager, StaticDirectory};
use crate::dashboard::DashboardViewState;
use crate::integrations::{
    LedgerConnector, MockLedgerConnector, MockUploadTransport, OperationTracker, UploadTransport,
};
use crate::profit_loss::PlTreeView;
use crate::upload::UploadQueue;

/// UI preferences persisted to `~/.enkardia/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            notifications_enabled: true,
        }
    }
}

/// Application state managed by Tauri
pub struct AppState {
    pub storage_dir: PathBuf,
    pub config: Mutex<Config>,
    pub session: Mutex<SessionManager>,
    pub view: Mutex<DashboardViewState>,
    pub pl_view: Mutex<PlTreeView>,
    pub uploads: Mutex<UploadQueue>,
    pub ledger_sync: Mutex<OperationTracker>,
    pub upload_op: Mutex<OperationTracker>,
    /// Injected integration seams; mocks in production, substitutable in
    /// tests and by a real backend later.
    pub connector: Arc<dyn LedgerConnector>,
    pub transport: Arc<dyn UploadTransport>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_storage_dir(default_storage_dir())
    }

    /// Build state over an explicit storage directory. Tests point this at
    /// a tempdir so they never touch the real `~/.enkardia`.
    pub fn with_storage_dir(storage_dir: PathBuf) -> Self {
        let config = load_config(&storage_dir).unwrap_or_default();

        let mut session =
            SessionManager::new(Box::new(StaticDirectory::new()), storage_dir.clone());
        session.restore();

        Self {
            storage_dir,
            config: Mutex::new(config),
            session: Mutex::new(session),
            view: Mutex::new(DashboardViewState::new()),
            pl_view: Mutex::new(PlTreeView::new()),
            uploads: Mutex::new(UploadQueue::new()),
            ledger_sync: Mutex::new(OperationTracker::new()),
            upload_op: Mutex::new(OperationTracker::new()),
            connector: Arc::new(MockLedgerConnector::new()),
            transport: Arc::new(MockUploadTransport::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the canonical config file path (~/.enkardia/config.json)
pub fn config_path(storage_dir: &std::path::Path) -> PathBuf {
    storage_dir.join("config.json")
}

/// Load configuration from ~/.enkardia/config.json
pub fn load_config(storage_dir: &std::path::Path) -> Result<Config, String> {
    let path = config_path(storage_dir);
    if !path.exists() {
        return Err(format!("Config file not found at {}", path.display()));
    }

    let content =
        fs::read_to_string(&path).map_err(|e| format!("Failed to read config: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
}

/// Update config.json through a mutator and keep the in-memory copy in
/// step. Creates the file (and `~/.enkardia/`) on first write.
pub fn update_config(
    state: &AppState,
    mutator: impl FnOnce(&mut Config),
) -> Result<Config, String> {
    let mut guard = state.config.lock().map_err(|_| "Lock poisoned")?;

    let mut config = guard.clone();
    mutator(&mut config);

    if !state.storage_dir.exists() {
        fs::create_dir_all(&state.storage_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))?;
    }

    let content = serde_json::to_string_pretty(&config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(config_path(&state.storage_dir), content)
        .map_err(|e| format!("Failed to write config: {}", e))?;

    *guard = config.clone();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_without_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::with_storage_dir(dir.path().to_path_buf());
        let config = state.config.lock().unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.notifications_enabled);
    }

    #[test]
    fn test_update_config_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::with_storage_dir(dir.path().to_path_buf());

        let updated = update_config(&state, |c| {
            c.theme = "dark".to_string();
        })
        .unwrap();
        assert_eq!(updated.theme, "dark");

        let reloaded = load_config(dir.path()).unwrap();
        assert_eq!(reloaded.theme, "dark");
        assert!(reloaded.notifications_enabled);
    }

    #[test]
    fn test_config_parse_tolerates_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("config.json"), "{}").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_state_restores_persisted_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let state = AppState::with_storage_dir(dir.path().to_path_buf());
            let mut session = state.session.lock().unwrap();
            session.login("client@example.com", "password123").unwrap();
        }

        let state = AppState::with_storage_dir(dir.path().to_path_buf());
        let session = state.session.lock().unwrap();
        assert!(session.is_authenticated());
        assert_eq!(
            session.current_user().unwrap().email,
            "client@example.com"
        );
    }
}
