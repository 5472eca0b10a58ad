//! Mock authentication and session lifecycle.
//!
//! Authentication is an injected provider so a real backend can replace
//! the demo directory without touching callers. The only production
//! implementation is `StaticDirectory`, a fixed three-account table.
//! Credentials never leave this module: `UserAccount` has no password
//! field, and the directory's stored passwords are compared here and
//! nowhere else.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Coarse user classification used for UI gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Admin,
    Master,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Admin => "admin",
            Role::Master => "master",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub notifications: bool,
    pub two_factor_auth: bool,
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: String,
    pub status: String,
    pub valid_until: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAccess {
    pub console: bool,
    pub debug: bool,
    pub development: bool,
}

/// An authenticated user as exposed to the rest of the app.
///
/// `role` and `permissions` are stored independently: the role implies a
/// permission set but does not determine it, and the two are allowed to
/// drift exactly as they do in the upstream account data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub status: String,
    pub avatar: String,
    pub last_login: String,
    pub permissions: Vec<String>,
    pub preferences: Preferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_clients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_clearance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_access: Option<SystemAccess>,
}

impl UserAccount {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Pluggable credential check.
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and return the sanitized account on success.
    fn authenticate(&self, email: &str, password: &str) -> Result<UserAccount, PortalError>;

    /// Resolve an account by email without a credential check. Used only
    /// to rebuild a session from a previously persisted marker.
    fn lookup(&self, email: &str) -> Option<UserAccount>;
}

struct DirectoryEntry {
    account: UserAccount,
    password: &'static str,
}

/// The fixed demo account table.
pub struct StaticDirectory {
    entries: Vec<DirectoryEntry>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        let entries = vec![
            DirectoryEntry {
                password: "password123",
                account: UserAccount {
                    id: "client-1".into(),
                    email: "client@example.com".into(),
                    name: "John Smith".into(),
                    role: Role::Client,
                    status: "active".into(),
                    avatar: "/avatars/client.jpg".into(),
                    last_login: "2024-03-20T10:30:00Z".into(),
                    permissions: vec![
                        "view_dashboard".into(),
                        "view_reports".into(),
                        "view_documents".into(),
                        "download_reports".into(),
                        "view_calendar".into(),
                        "view_compliance".into(),
                        "manage_profile".into(),
                        "request_support".into(),
                    ],
                    preferences: Preferences {
                        notifications: true,
                        two_factor_auth: false,
                        theme: "light".into(),
                    },
                    company: Some("Acme Corp".into()),
                    department: None,
                    title: None,
                    subscription: Some(Subscription {
                        plan: "business".into(),
                        status: "active".into(),
                        valid_until: "2025-03-20".into(),
                    }),
                    admin_level: None,
                    managed_clients: None,
                    security_clearance: None,
                    system_access: None,
                },
            },
            DirectoryEntry {
                password: "password345",
                account: UserAccount {
                    id: "admin-1".into(),
                    email: "admin@example.com".into(),
                    name: "Sarah Johnson".into(),
                    role: Role::Admin,
                    status: "active".into(),
                    avatar: "/avatars/admin.jpg".into(),
                    last_login: "2024-03-21T09:15:00Z".into(),
                    permissions: vec![
                        "view_dashboard".into(),
                        "view_reports".into(),
                        "view_documents".into(),
                        "manage_users".into(),
                        "manage_reports".into(),
                        "manage_compliance".into(),
                        "create_reports".into(),
                        "edit_reports".into(),
                        "delete_reports".into(),
                        "manage_calendar".into(),
                        "view_analytics".into(),
                        "export_data".into(),
                        "manage_notifications".into(),
                        "access_api".into(),
                        "view_audit_logs".into(),
                    ],
                    preferences: Preferences {
                        notifications: true,
                        two_factor_auth: true,
                        theme: "system".into(),
                    },
                    company: None,
                    department: Some("Account Management".into()),
                    title: None,
                    subscription: None,
                    admin_level: Some(2),
                    managed_clients: Some(vec![
                        "client-1".into(),
                        "client-2".into(),
                        "client-3".into(),
                    ]),
                    security_clearance: None,
                    system_access: None,
                },
            },
            DirectoryEntry {
                password: "password678",
                account: UserAccount {
                    id: "master-1".into(),
                    email: "master@example.com".into(),
                    name: "Alex Thompson".into(),
                    role: Role::Master,
                    status: "active".into(),
                    avatar: "/avatars/master.jpg".into(),
                    last_login: "2024-03-21T11:00:00Z".into(),
                    permissions: vec![
                        "view_dashboard".into(),
                        "view_reports".into(),
                        "view_documents".into(),
                        "manage_users".into(),
                        "manage_reports".into(),
                        "manage_compliance".into(),
                        "manage_admins".into(),
                        "system_settings".into(),
                        "audit_logs".into(),
                        "manage_roles".into(),
                        "manage_permissions".into(),
                        "system_backup".into(),
                        "system_restore".into(),
                        "manage_integrations".into(),
                        "manage_security".into(),
                        "manage_billing".into(),
                        "view_analytics".into(),
                        "manage_templates".into(),
                        "manage_api_keys".into(),
                        "manage_webhooks".into(),
                        "manage_automation".into(),
                        "full_system_access".into(),
                    ],
                    preferences: Preferences {
                        notifications: true,
                        two_factor_auth: true,
                        theme: "dark".into(),
                    },
                    company: None,
                    department: None,
                    title: Some("System Administrator".into()),
                    subscription: None,
                    admin_level: None,
                    managed_clients: None,
                    security_clearance: Some("highest".into()),
                    system_access: Some(SystemAccess {
                        console: true,
                        debug: true,
                        development: true,
                    }),
                },
            },
        ];

        Self { entries }
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for StaticDirectory {
    fn authenticate(&self, email: &str, password: &str) -> Result<UserAccount, PortalError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.account.email.eq_ignore_ascii_case(email))
            .ok_or(PortalError::InvalidCredentials)?;

        if entry.password != password {
            return Err(PortalError::InvalidCredentials);
        }

        Ok(entry.account.clone())
    }

    fn lookup(&self, email: &str) -> Option<UserAccount> {
        self.entries
            .iter()
            .find(|e| e.account.email.eq_ignore_ascii_case(email))
            .map(|e| e.account.clone())
    }
}

/// Session marker persisted to `~/.enkardia/session.json` so a restart can
/// rebuild the authenticated state. The token is a mock, not a verified
/// credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMarker {
    pub token: String,
    pub email: String,
    pub role: Role,
    pub preferences: Preferences,
    pub last_login: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Owns the current-user state and the durable session marker.
///
/// Reachable transitions: anonymous → authenticating → authenticated
/// (login), authenticated → anonymous (logout). Nothing else.
pub struct SessionManager {
    provider: Box<dyn AuthProvider>,
    phase: SessionPhase,
    current: Option<UserAccount>,
    storage_dir: PathBuf,
}

impl SessionManager {
    pub fn new(provider: Box<dyn AuthProvider>, storage_dir: PathBuf) -> Self {
        Self {
            provider,
            phase: SessionPhase::Anonymous,
            current: None,
            storage_dir,
        }
    }

    /// Rebuild session state from a persisted marker, if one exists and
    /// still resolves against the provider. A stale marker is removed.
    pub fn restore(&mut self) {
        let path = self.marker_path();
        let Ok(content) = fs::read_to_string(&path) else {
            return;
        };

        let marker: SessionMarker = match serde_json::from_str(&content) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Discarding unreadable session marker: {}", e);
                let _ = fs::remove_file(&path);
                return;
            }
        };

        match self.provider.lookup(&marker.email) {
            Some(account) => {
                log::info!("Restored session for {}", account.email);
                self.current = Some(account);
                self.phase = SessionPhase::Authenticated;
            }
            None => {
                log::warn!("Session marker references unknown account; clearing");
                let _ = fs::remove_file(&path);
            }
        }
    }

    /// Authenticate and persist the session marker.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserAccount, PortalError> {
        self.phase = SessionPhase::Authenticating;

        let account = match self.provider.authenticate(email, password) {
            Ok(account) => account,
            Err(err) => {
                self.phase = SessionPhase::Anonymous;
                self.current = None;
                return Err(err);
            }
        };

        let marker = SessionMarker {
            token: uuid::Uuid::new_v4().to_string(),
            email: account.email.clone(),
            role: account.role,
            preferences: account.preferences.clone(),
            last_login: Utc::now(),
        };
        if let Err(e) = self.write_marker(&marker) {
            // Session still works for this run; it just won't survive a
            // restart.
            log::warn!("Failed to persist session marker: {}", e);
        }

        self.current = Some(account.clone());
        self.phase = SessionPhase::Authenticated;
        Ok(account)
    }

    /// Clear session state and the persisted marker unconditionally.
    pub fn logout(&mut self) {
        let path = self.marker_path();
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Failed to remove session marker: {}", e);
            }
        }
        self.current = None;
        self.phase = SessionPhase::Anonymous;
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn marker_path(&self) -> PathBuf {
        self.storage_dir.join("session.json")
    }

    fn write_marker(&self, marker: &SessionMarker) -> Result<(), PortalError> {
        ensure_dir(&self.storage_dir)?;
        let content = serde_json::to_string_pretty(marker)
            .map_err(|e| PortalError::Storage(format!("Serialize error: {}", e)))?;
        fs::write(self.marker_path(), content)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<(), PortalError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Default storage directory (`~/.enkardia`).
pub fn default_storage_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".enkardia")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (SessionManager, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mgr = SessionManager::new(
            Box::new(StaticDirectory::new()),
            dir.path().to_path_buf(),
        );
        (mgr, dir)
    }

    #[test]
    fn test_login_success_strips_password() {
        let (mut mgr, _dir) = manager();
        let account = mgr.login("client@example.com", "password123").unwrap();
        assert_eq!(account.role, Role::Client);
        assert_eq!(account.name, "John Smith");
        // The exposed type has no password field; the serialized form must
        // not leak one either.
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password123"));
        assert!(!json.to_lowercase().contains("\"password\""));
        assert!(mgr.is_authenticated());
    }

    #[test]
    fn test_login_is_case_insensitive_on_email() {
        let (mut mgr, _dir) = manager();
        assert!(mgr.login("CLIENT@Example.COM", "password123").is_ok());
    }

    #[test]
    fn test_login_wrong_password_stays_anonymous() {
        let (mut mgr, _dir) = manager();
        let err = mgr.login("client@example.com", "wrong").unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
        assert_eq!(mgr.phase(), SessionPhase::Anonymous);
        assert!(mgr.current_user().is_none());
    }

    #[test]
    fn test_login_unknown_email_fails() {
        let (mut mgr, _dir) = manager();
        let err = mgr.login("nobody@example.com", "password123").unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
    }

    #[test]
    fn test_all_directory_accounts_authenticate() {
        let (mut mgr, _dir) = manager();
        for (email, password, role) in [
            ("client@example.com", "password123", Role::Client),
            ("admin@example.com", "password345", Role::Admin),
            ("master@example.com", "password678", Role::Master),
        ] {
            let account = mgr.login(email, password).unwrap();
            assert_eq!(account.role, role);
            mgr.logout();
        }
    }

    #[test]
    fn test_role_permission_drift_preserved() {
        let directory = StaticDirectory::new();
        let admin = directory.lookup("admin@example.com").unwrap();
        let master = directory.lookup("master@example.com").unwrap();
        // Roles imply but do not determine permissions; the stored lists
        // are authoritative.
        assert!(!admin.has_permission("full_system_access"));
        assert!(master.has_permission("full_system_access"));
        assert!(admin.has_permission("access_api"));
        assert!(!master.has_permission("access_api"));
    }

    #[test]
    fn test_marker_roundtrip_and_logout_clears() {
        let (mut mgr, dir) = manager();
        mgr.login("admin@example.com", "password345").unwrap();
        let marker_path = dir.path().join("session.json");
        assert!(marker_path.exists());

        // A fresh manager over the same storage dir restores the session.
        let mut restored = SessionManager::new(
            Box::new(StaticDirectory::new()),
            dir.path().to_path_buf(),
        );
        restored.restore();
        assert!(restored.is_authenticated());
        assert_eq!(
            restored.current_user().unwrap().email,
            "admin@example.com"
        );

        restored.logout();
        assert!(!marker_path.exists());
        assert!(restored.current_user().is_none());
    }

    #[test]
    fn test_restore_ignores_corrupt_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("session.json"), "{not json").unwrap();
        let mut mgr = SessionManager::new(
            Box::new(StaticDirectory::new()),
            dir.path().to_path_buf(),
        );
        mgr.restore();
        assert!(!mgr.is_authenticated());
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_provider_substitution() {
        struct AlwaysNo;
        impl AuthProvider for AlwaysNo {
            fn authenticate(&self, _: &str, _: &str) -> Result<UserAccount, PortalError> {
                Err(PortalError::InvalidCredentials)
            }
            fn lookup(&self, _: &str) -> Option<UserAccount> {
                None
            }
        }

        let dir = tempfile::tempdir().expect("tempdir");
        let mut mgr = SessionManager::new(Box::new(AlwaysNo), dir.path().to_path_buf());
        assert!(mgr.login("client@example.com", "password123").is_err());
        assert!(!mgr.is_authenticated());
    }
}
