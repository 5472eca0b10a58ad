use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use tauri::State;

use crate::auth::UserAccount;
use crate::dashboard::{
    CustomReportState, DashboardViewState, DialogId, ReportsDialogState, Tab,
};
use crate::dataset;
use crate::error::{CommandError, PortalError};
use crate::export::{plan_pages, render_statement_pdf, ExportTotals, EXPORT_FILENAME};
use crate::formatters::format_date;
use crate::gate::{resolve, Route, RouteDecision};
use crate::integrations::OperationStatus;
use crate::profit_loss::{
    growth_metrics, period_comparison, summary_rows, GrowthMetric, PeriodComparison, PlRow,
    PlSummaryRow,
};
use crate::state::{update_config, AppState, Config};
use crate::types::{
    ClientPortfolio, ComplianceOverview, ComplianceReports, Document, FaqEntry, FinancialHealth,
    FinancialKpis, Notification, ReportDefinition, ReportMetric, RequestType, Task,
    TaxCalculation, TaxCalendar,
};
use crate::upload::{mime_for_path, PendingUpload, UploadCandidate};

/// Result type for the login command. Failure is an expected outcome
/// surfaced inline on the login form, not a transport error.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoginResult {
    Success {
        user: UserAccount,
    },
    Failure {
        message: String,
        #[serde(rename = "recoveryHint")]
        recovery_hint: String,
    },
}

/// The fully derived P&L panel payload.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossView {
    pub period_start: String,
    pub period_end: String,
    pub rows: Vec<PlRow>,
    pub summary_rows: Vec<PlSummaryRow>,
    pub comparison: Vec<PeriodComparison>,
    pub growth: Vec<GrowthMetric>,
}

/// Financials tab payload: KPI list plus the health score block.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsTab {
    pub kpis: FinancialKpis,
    pub health: FinancialHealth,
}

/// A document plus its resolved badge color class.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub status_color: String,
}

/// A task plus its resolved priority badge color class.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub priority_color: String,
}

/// Notifications dropdown payload with the derived unread count.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsView {
    pub items: Vec<Notification>,
    pub unread_count: u32,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetAcknowledgement {
    pub submitted: bool,
    pub email: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestReceipt {
    pub id: String,
    pub kind: String,
    pub submitted_at: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub filename: String,
    pub path: String,
    pub pages: usize,
    pub totals: ExportTotals,
}

// -----------------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn login(state: State<Arc<AppState>>, email: String, password: String) -> LoginResult {
    let mut session = match state.session.lock() {
        Ok(guard) => guard,
        Err(_) => {
            return LoginResult::Failure {
                message: "Internal error: session lock poisoned".to_string(),
                recovery_hint: "Restart the app.".to_string(),
            }
        }
    };

    match session.login(&email, &password) {
        Ok(user) => {
            log::info!("Login: {} ({})", user.email, user.role.as_str());
            LoginResult::Success { user }
        }
        Err(err) => {
            log::info!("Login rejected for {}", email);
            let ipc = CommandError::from(&err);
            LoginResult::Failure {
                message: ipc.message,
                recovery_hint: ipc.recovery_hint,
            }
        }
    }
}

#[tauri::command]
pub fn logout(state: State<Arc<AppState>>) -> Result<(), String> {
    let mut session = state.session.lock().map_err(|_| "Lock poisoned")?;
    session.logout();

    // Back to the login screen with a clean slate: view state and staged
    // uploads belong to the signed-in user.
    if let Ok(mut view) = state.view.lock() {
        *view = DashboardViewState::new();
    }
    if let Ok(mut uploads) = state.uploads.lock() {
        uploads.clear();
    }

    log::info!("Logged out");
    Ok(())
}

#[tauri::command]
pub fn get_current_user(state: State<Arc<AppState>>) -> Result<Option<UserAccount>, String> {
    let session = state.session.lock().map_err(|_| "Lock poisoned")?;
    Ok(session.current_user().cloned())
}

#[tauri::command]
pub fn request_password_reset(email: String) -> ResetAcknowledgement {
    // Mock flow: always acknowledged, nothing is sent.
    log::info!("Password reset requested for {}", email);
    ResetAcknowledgement {
        submitted: true,
        email,
    }
}

#[tauri::command]
pub fn resolve_route(state: State<Arc<AppState>>, requested: String) -> Result<RouteDecision, String> {
    let route = Route::from_str(&requested)?;
    let session = state.session.lock().map_err(|_| "Lock poisoned")?;
    Ok(resolve(route, session.is_authenticated()))
}

// -----------------------------------------------------------------------------
// Dataset reads
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn get_client_portfolio() -> ClientPortfolio {
    dataset::client_portfolio()
}

#[tauri::command]
pub fn get_compliance() -> ComplianceOverview {
    dataset::compliance()
}

#[tauri::command]
pub fn get_tax_calendar() -> TaxCalendar {
    dataset::tax_calendar()
}

#[tauri::command]
pub fn get_tax_calculator() -> TaxCalculation {
    dataset::tax_calculator()
}

#[tauri::command]
pub fn get_compliance_reports() -> ComplianceReports {
    dataset::compliance_reports()
}

#[tauri::command]
pub fn get_financials() -> FinancialsTab {
    FinancialsTab {
        kpis: dataset::financial_kpis(),
        health: dataset::financial_health(),
    }
}

#[tauri::command]
pub fn get_report_catalog() -> Vec<ReportDefinition> {
    dataset::report_catalog()
}

#[tauri::command]
pub fn get_metric_catalog() -> Vec<ReportMetric> {
    dataset::metric_catalog()
}

#[tauri::command]
pub fn get_faq() -> Vec<FaqEntry> {
    dataset::faq_entries()
}

#[tauri::command]
pub fn get_request_types() -> Vec<RequestType> {
    dataset::request_types()
}

#[tauri::command]
pub fn list_documents(state: State<Arc<AppState>>) -> Result<Vec<DocumentRow>, String> {
    // The search/filter fields are stored in view state but not applied
    // here; the list always comes back whole.
    if let Ok(view) = state.view.lock() {
        if !view.document_filter.query.is_empty() {
            log::debug!(
                "Document filter set ({:?}) but not applied",
                view.document_filter.query
            );
        }
    }
    Ok(dataset::client_portfolio()
        .recent_documents
        .into_iter()
        .map(|document| DocumentRow {
            status_color: dataset::document_status_color(&document.status).to_string(),
            document,
        })
        .collect())
}

#[tauri::command]
pub fn list_upcoming_tasks() -> Vec<TaskRow> {
    dataset::client_portfolio()
        .upcoming_tasks
        .into_iter()
        .map(|task| TaskRow {
            priority_color: dataset::priority_color(task.priority).to_string(),
            task,
        })
        .collect()
}

#[tauri::command]
pub fn get_notifications(state: State<Arc<AppState>>) -> Result<NotificationsView, String> {
    let view = state.view.lock().map_err(|_| "Lock poisoned")?;
    Ok(notifications_view(
        dataset::client_portfolio().notifications,
        &view.read_notification_ids,
    ))
}

/// Merge the dataset's read flags with the session's mark-read set.
fn notifications_view(
    mut items: Vec<Notification>,
    read_ids: &HashSet<u32>,
) -> NotificationsView {
    for item in &mut items {
        if read_ids.contains(&item.id) {
            item.read = true;
        }
    }
    let unread_count = items.iter().filter(|n| !n.read).count() as u32;
    NotificationsView {
        items,
        unread_count,
    }
}

// -----------------------------------------------------------------------------
// P&L statement
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn get_profit_loss(state: State<Arc<AppState>>) -> Result<ProfitLossView, String> {
    let pl_view = state.pl_view.lock().map_err(|_| "Lock poisoned")?;
    let statement = dataset::profit_and_loss();
    Ok(ProfitLossView {
        period_start: statement.period_start.clone(),
        period_end: statement.period_end.clone(),
        rows: pl_view.rows(&statement.items),
        summary_rows: summary_rows(&statement.summary),
        comparison: period_comparison(&statement),
        growth: growth_metrics(&statement),
    })
}

#[tauri::command]
pub fn toggle_pl_item(state: State<Arc<AppState>>, id: String) -> Result<Vec<PlRow>, String> {
    let mut pl_view = state.pl_view.lock().map_err(|_| "Lock poisoned")?;
    pl_view.toggle(&id);
    let statement = dataset::profit_and_loss();
    Ok(pl_view.rows(&statement.items))
}

#[tauri::command]
pub fn export_profit_loss(destination: String) -> Result<ExportReceipt, String> {
    let lines = dataset::statement_lines();
    let generated_on = format_date(&chrono::Local::now().format("%Y-%m-%d").to_string());

    let bytes = render_statement_pdf(&lines, &generated_on).map_err(|e| e.to_string())?;
    std::fs::write(&destination, &bytes)
        .map_err(|e| PortalError::ExportFailure(e.to_string()).to_string())?;

    let totals = crate::export::compute_totals(&lines);
    let pages = plan_pages(lines.len()).len();
    log::info!(
        "Exported P&L statement to {} ({} pages)",
        destination,
        pages
    );

    Ok(ExportReceipt {
        filename: EXPORT_FILENAME.to_string(),
        path: destination,
        pages,
        totals,
    })
}

// -----------------------------------------------------------------------------
// View composition
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn get_view_state(state: State<Arc<AppState>>) -> Result<DashboardViewState, String> {
    let view = state.view.lock().map_err(|_| "Lock poisoned")?;
    Ok(view.clone())
}

#[tauri::command]
pub fn set_active_tab(state: State<Arc<AppState>>, tab: String) -> Result<(), String> {
    let tab = Tab::from_str(&tab)?;
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.set_active_tab(tab);
    Ok(())
}

#[tauri::command]
pub fn open_dialog(state: State<Arc<AppState>>, dialog: String) -> Result<(), String> {
    let dialog = DialogId::from_str(&dialog)?;
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.open_dialog(dialog);
    Ok(())
}

#[tauri::command]
pub fn close_dialog(state: State<Arc<AppState>>, dialog: String) -> Result<(), String> {
    let dialog = DialogId::from_str(&dialog)?;
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.close_dialog(dialog);
    drop(view);

    // The upload dialog's local state is its pending list.
    if dialog == DialogId::Upload {
        let mut uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
        uploads.clear();
    }
    Ok(())
}

#[tauri::command]
pub fn toggle_report_selection(
    state: State<Arc<AppState>>,
    report_id: String,
) -> Result<ReportsDialogState, String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.toggle_report_selection(&report_id);
    Ok(view.reports_dialog.clone())
}

#[tauri::command]
pub fn set_report_options(
    state: State<Arc<AppState>>,
    date_range: String,
    format: String,
) -> Result<(), String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.set_report_options(date_range, format);
    Ok(())
}

#[tauri::command]
pub fn toggle_metric_selection(
    state: State<Arc<AppState>>,
    metric_id: String,
) -> Result<CustomReportState, String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.toggle_metric_selection(&metric_id);
    Ok(view.custom_report.clone())
}

#[tauri::command]
pub fn set_document_filter(
    state: State<Arc<AppState>>,
    query: String,
    category: String,
) -> Result<(), String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.set_document_filter(query, category);
    Ok(())
}

#[tauri::command]
pub fn toggle_notifications(state: State<Arc<AppState>>) -> Result<bool, String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.toggle_notifications();
    Ok(view.show_notifications)
}

#[tauri::command]
pub fn mark_notification_read(state: State<Arc<AppState>>, id: u32) -> Result<u32, String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.mark_notification_read(id);
    let merged = notifications_view(
        dataset::client_portfolio().notifications,
        &view.read_notification_ids,
    );
    Ok(merged.unread_count)
}

#[tauri::command]
pub fn set_expanded_faq(state: State<Arc<AppState>>, id: Option<String>) -> Result<(), String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.set_expanded_faq(id);
    Ok(())
}

#[tauri::command]
pub fn set_contact_card(
    state: State<Arc<AppState>>,
    member_id: Option<u32>,
) -> Result<(), String> {
    let mut view = state.view.lock().map_err(|_| "Lock poisoned")?;
    view.set_contact_card(member_id);
    Ok(())
}

// -----------------------------------------------------------------------------
// Uploads
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn stage_uploads(
    state: State<Arc<AppState>>,
    files: Vec<UploadCandidate>,
) -> Result<Vec<PendingUpload>, String> {
    let mut uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
    uploads.add_batch(files).map_err(|e| e.to_string())?;
    Ok(uploads.list())
}

/// Stage files picked through the native dialog, which hands back paths.
/// Only metadata is touched; file contents are never read.
#[tauri::command]
pub fn stage_upload_paths(
    state: State<Arc<AppState>>,
    paths: Vec<String>,
) -> Result<Vec<PendingUpload>, String> {
    let mut batch = Vec::with_capacity(paths.len());
    for path in paths {
        let meta = std::fs::metadata(&path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?;
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        batch.push(UploadCandidate {
            mime_type: mime_for_path(&path),
            size_bytes: meta.len(),
            name,
        });
    }

    let mut uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
    uploads.add_batch(batch).map_err(|e| e.to_string())?;
    Ok(uploads.list())
}

#[tauri::command]
pub fn remove_pending_upload(
    state: State<Arc<AppState>>,
    index: usize,
) -> Result<Vec<PendingUpload>, String> {
    let mut uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
    uploads.remove(index);
    Ok(uploads.list())
}

#[tauri::command]
pub fn list_pending_uploads(state: State<Arc<AppState>>) -> Result<Vec<PendingUpload>, String> {
    let uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
    Ok(uploads.list())
}

#[tauri::command]
pub fn start_upload(state: State<Arc<AppState>>) -> Result<(), String> {
    let files = {
        let uploads = state.uploads.lock().map_err(|_| "Lock poisoned")?;
        uploads.list()
    };
    if files.is_empty() {
        return Err("No files staged for upload".to_string());
    }

    {
        let mut op = state.upload_op.lock().map_err(|_| "Lock poisoned")?;
        if op.is_pending() {
            return Err("An upload is already in progress".to_string());
        }
        op.begin();
    }

    let app_state = state.inner().clone();
    let handle = tauri::async_runtime::spawn(async move {
        let result = app_state.transport.transmit(files).await;
        match result {
            Ok(sent) => {
                if let Ok(mut uploads) = app_state.uploads.lock() {
                    uploads.clear();
                }
                if let Ok(mut op) = app_state.upload_op.lock() {
                    op.complete(format!(
                        "{} file{} uploaded",
                        sent,
                        if sent == 1 { "" } else { "s" }
                    ));
                }
                log::info!("Upload finished: {} files", sent);
            }
            Err(e) => {
                if let Ok(mut op) = app_state.upload_op.lock() {
                    op.fail(e.to_string());
                }
                log::warn!("Upload failed: {}", e);
            }
        }
    });

    let mut op = state.upload_op.lock().map_err(|_| "Lock poisoned")?;
    op.attach(handle);
    Ok(())
}

#[tauri::command]
pub fn cancel_upload(state: State<Arc<AppState>>) -> Result<bool, String> {
    let mut op = state.upload_op.lock().map_err(|_| "Lock poisoned")?;
    Ok(op.cancel())
}

#[tauri::command]
pub fn get_upload_status(state: State<Arc<AppState>>) -> Result<OperationStatus, String> {
    let op = state.upload_op.lock().map_err(|_| "Lock poisoned")?;
    Ok(op.status())
}

// -----------------------------------------------------------------------------
// Ledger sync
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn start_ledger_sync(state: State<Arc<AppState>>) -> Result<(), String> {
    {
        let mut op = state.ledger_sync.lock().map_err(|_| "Lock poisoned")?;
        if op.is_pending() {
            return Err("A sync is already running".to_string());
        }
        op.begin();
    }

    let app_state = state.inner().clone();
    let handle = tauri::async_runtime::spawn(async move {
        let result = app_state.connector.sync().await;
        if let Ok(mut op) = app_state.ledger_sync.lock() {
            match result {
                Ok(outcome) => {
                    log::info!("Ledger sync finished: {}", outcome.provider);
                    op.complete(format!(
                        "Synced with {} — {}",
                        outcome.provider, outcome.synced_at
                    ));
                }
                Err(e) => {
                    log::warn!("Ledger sync failed: {}", e);
                    op.fail(e.to_string());
                }
            }
        }
    });

    let mut op = state.ledger_sync.lock().map_err(|_| "Lock poisoned")?;
    op.attach(handle);
    Ok(())
}

#[tauri::command]
pub fn cancel_ledger_sync(state: State<Arc<AppState>>) -> Result<bool, String> {
    let mut op = state.ledger_sync.lock().map_err(|_| "Lock poisoned")?;
    Ok(op.cancel())
}

#[tauri::command]
pub fn get_sync_status(state: State<Arc<AppState>>) -> Result<OperationStatus, String> {
    let op = state.ledger_sync.lock().map_err(|_| "Lock poisoned")?;
    Ok(op.status())
}

// -----------------------------------------------------------------------------
// Requests & config
// -----------------------------------------------------------------------------

#[tauri::command]
pub fn submit_request(kind: String) -> Result<RequestReceipt, String> {
    let known = dataset::request_types();
    if !known.iter().any(|r| r.id == kind) {
        return Err(format!("Unknown request type: '{}'", kind));
    }

    let receipt = RequestReceipt {
        id: uuid::Uuid::new_v4().to_string(),
        kind,
        submitted_at: chrono::Utc::now().to_rfc3339(),
    };
    log::info!("Request submitted: {} ({})", receipt.kind, receipt.id);
    Ok(receipt)
}

#[tauri::command]
pub fn get_config(state: State<Arc<AppState>>) -> Result<Config, String> {
    let config = state.config.lock().map_err(|_| "Lock poisoned")?;
    Ok(config.clone())
}

#[tauri::command]
pub fn set_theme(state: State<Arc<AppState>>, theme: String) -> Result<Config, String> {
    update_config(&state, |c| c.theme = theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_view_merges_read_ids() {
        let items = dataset::client_portfolio().notifications;
        // Dataset ships two unread notifications out of three.
        let merged = notifications_view(items.clone(), &HashSet::new());
        assert_eq!(merged.unread_count, 2);

        let mut read = HashSet::new();
        read.insert(1);
        let merged = notifications_view(items, &read);
        assert_eq!(merged.unread_count, 1);
        assert!(merged.items.iter().find(|n| n.id == 1).unwrap().read);
    }

    #[test]
    fn test_login_result_wire_shape() {
        let failure = LoginResult::Failure {
            message: "Invalid email or password".to_string(),
            recovery_hint: "Check your email address and password.".to_string(),
        };
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
        assert!(json.contains("recoveryHint"));
    }

    #[test]
    fn test_submit_request_rejects_unknown_kind() {
        let err = submit_request("order-pizza".to_string()).unwrap_err();
        assert!(err.contains("order-pizza"));
    }

    #[test]
    fn test_submit_request_known_kind_yields_receipt() {
        let receipt = submit_request("tax-consultation".to_string()).unwrap();
        assert_eq!(receipt.kind, "tax-consultation");
        assert!(!receipt.id.is_empty());
    }

    #[test]
    fn test_request_password_reset_always_acknowledges() {
        let ack = request_password_reset("whoever@example.com".to_string());
        assert!(ack.submitted);
        assert_eq!(ack.email, "whoever@example.com");
    }
}
