pub mod auth;
mod commands;
pub mod dashboard;
pub mod dataset;
mod error;
mod export;
pub mod formatters;
pub mod gate;
mod integrations;
pub mod profit_loss;
pub mod state;
pub mod types;
mod upload;

use std::sync::Arc;

use state::AppState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Create shared state; this also restores a persisted session
            // marker, so a reload lands signed-in users on the dashboard.
            let state = Arc::new(AppState::new());
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session
            commands::login,
            commands::logout,
            commands::get_current_user,
            commands::request_password_reset,
            commands::resolve_route,
            // Dataset reads
            commands::get_client_portfolio,
            commands::get_compliance,
            commands::get_tax_calendar,
            commands::get_tax_calculator,
            commands::get_compliance_reports,
            commands::get_financials,
            commands::get_report_catalog,
            commands::get_metric_catalog,
            commands::get_faq,
            commands::get_request_types,
            commands::list_documents,
            commands::list_upcoming_tasks,
            commands::get_notifications,
            // P&L statement
            commands::get_profit_loss,
            commands::toggle_pl_item,
            commands::export_profit_loss,
            // View composition
            commands::get_view_state,
            commands::set_active_tab,
            commands::open_dialog,
            commands::close_dialog,
            commands::toggle_report_selection,
            commands::set_report_options,
            commands::toggle_metric_selection,
            commands::set_document_filter,
            commands::toggle_notifications,
            commands::mark_notification_read,
            commands::set_expanded_faq,
            commands::set_contact_card,
            // Uploads
            commands::stage_uploads,
            commands::stage_upload_paths,
            commands::remove_pending_upload,
            commands::list_pending_uploads,
            commands::start_upload,
            commands::cancel_upload,
            commands::get_upload_status,
            // Ledger sync
            commands::start_ledger_sync,
            commands::cancel_ledger_sync,
            commands::get_sync_status,
            // Requests & config
            commands::submit_request,
            commands::get_config,
            commands::set_theme,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
