//! Dashboard view composition: tab state, modal visibility, per-dialog
//! selection state, and the search/filter fields.
//!
//! Modal selection state is local to each open: closing a dialog resets
//! its selections, so reopening always starts clean. The document
//! search/filter fields are held here but intentionally not applied to
//! the rendered list (the upstream behavior).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Fixed dashboard tabs; overview is the landing tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Overview,
    Documents,
    Tasks,
    Team,
    Financials,
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Overview
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(Tab::Overview),
            "documents" => Ok(Tab::Documents),
            "tasks" => Ok(Tab::Tasks),
            "team" => Ok(Tab::Team),
            "financials" => Ok(Tab::Financials),
            other => Err(format!("Unknown tab: '{}'", other)),
        }
    }
}

/// One identifier per modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialogId {
    Reports,
    CustomReports,
    TaxCalendar,
    Compliance,
    NewRequest,
    Upload,
}

impl std::str::FromStr for DialogId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reports" => Ok(DialogId::Reports),
            "custom-reports" => Ok(DialogId::CustomReports),
            "tax-calendar" => Ok(DialogId::TaxCalendar),
            "compliance" => Ok(DialogId::Compliance),
            "new-request" => Ok(DialogId::NewRequest),
            "upload" => Ok(DialogId::Upload),
            other => Err(format!("Unknown dialog: '{}'", other)),
        }
    }
}

/// Selection state local to the download-reports dialog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsDialogState {
    pub selected_reports: Vec<String>,
    pub date_range: String,
    pub format: String,
}

impl Default for ReportsDialogState {
    fn default() -> Self {
        Self {
            selected_reports: Vec::new(),
            date_range: "last_month".into(),
            format: "pdf".into(),
        }
    }
}

/// Selection state local to the custom-report builder.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportState {
    pub selected_metrics: Vec<String>,
}

/// Free-text search plus category dropdown over the documents list.
/// Stored, displayed, and deliberately not wired to filtering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    pub query: String,
    pub category: String,
}

impl Default for DocumentFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: "all".into(),
        }
    }
}

/// The whole composed view state, serialized to the frontend on demand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewState {
    pub active_tab: Tab,
    pub open_dialogs: HashSet<DialogId>,
    pub reports_dialog: ReportsDialogState,
    pub custom_report: CustomReportState,
    pub document_filter: DocumentFilter,
    pub show_notifications: bool,
    pub read_notification_ids: HashSet<u32>,
    pub expanded_faq: Option<String>,
    pub contact_card: Option<u32>,
}

impl DashboardViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn open_dialog(&mut self, dialog: DialogId) {
        self.open_dialogs.insert(dialog);
    }

    /// Close a dialog and drop its local selection state. The upload
    /// dialog's pending list lives in `UploadQueue` and is cleared by the
    /// caller alongside this.
    pub fn close_dialog(&mut self, dialog: DialogId) {
        self.open_dialogs.remove(&dialog);
        match dialog {
            DialogId::Reports => self.reports_dialog = ReportsDialogState::default(),
            DialogId::CustomReports => self.custom_report = CustomReportState::default(),
            _ => {}
        }
    }

    pub fn is_dialog_open(&self, dialog: DialogId) -> bool {
        self.open_dialogs.contains(&dialog)
    }

    pub fn toggle_report_selection(&mut self, report_id: &str) {
        let selected = &mut self.reports_dialog.selected_reports;
        if let Some(pos) = selected.iter().position(|id| id == report_id) {
            selected.remove(pos);
        } else {
            selected.push(report_id.to_string());
        }
    }

    pub fn set_report_options(&mut self, date_range: String, format: String) {
        self.reports_dialog.date_range = date_range;
        self.reports_dialog.format = format;
    }

    pub fn toggle_metric_selection(&mut self, metric_id: &str) {
        let selected = &mut self.custom_report.selected_metrics;
        if let Some(pos) = selected.iter().position(|id| id == metric_id) {
            selected.remove(pos);
        } else {
            selected.push(metric_id.to_string());
        }
    }

    pub fn set_document_filter(&mut self, query: String, category: String) {
        self.document_filter = DocumentFilter { query, category };
    }

    pub fn toggle_notifications(&mut self) {
        self.show_notifications = !self.show_notifications;
    }

    pub fn mark_notification_read(&mut self, id: u32) {
        self.read_notification_ids.insert(id);
    }

    /// At most one FAQ entry is expanded; selecting the open one closes it.
    pub fn set_expanded_faq(&mut self, id: Option<String>) {
        self.expanded_faq = match (id, self.expanded_faq.take()) {
            (Some(new), Some(old)) if new == old => None,
            (new, _) => new,
        };
    }

    pub fn set_contact_card(&mut self, member_id: Option<u32>) {
        self.contact_card = member_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tab_is_overview() {
        let view = DashboardViewState::new();
        assert_eq!(view.active_tab, Tab::Overview);
        assert!(view.open_dialogs.is_empty());
    }

    #[test]
    fn test_dialog_close_resets_report_selection() {
        let mut view = DashboardViewState::new();
        view.open_dialog(DialogId::Reports);
        view.toggle_report_selection("pl");
        view.toggle_report_selection("bs");
        view.set_report_options("ytd".into(), "excel".into());
        assert_eq!(view.reports_dialog.selected_reports.len(), 2);

        view.close_dialog(DialogId::Reports);
        view.open_dialog(DialogId::Reports);
        assert!(view.reports_dialog.selected_reports.is_empty());
        assert_eq!(view.reports_dialog.date_range, "last_month");
        assert_eq!(view.reports_dialog.format, "pdf");
    }

    #[test]
    fn test_dialog_close_resets_metric_selection() {
        let mut view = DashboardViewState::new();
        view.open_dialog(DialogId::CustomReports);
        view.toggle_metric_selection("revenue");
        view.close_dialog(DialogId::CustomReports);
        assert!(view.custom_report.selected_metrics.is_empty());
    }

    #[test]
    fn test_toggle_selection_is_involutive() {
        let mut view = DashboardViewState::new();
        view.toggle_metric_selection("cash_flow");
        assert_eq!(view.custom_report.selected_metrics, vec!["cash_flow"]);
        view.toggle_metric_selection("cash_flow");
        assert!(view.custom_report.selected_metrics.is_empty());
    }

    #[test]
    fn test_document_filter_is_stored_not_applied() {
        let mut view = DashboardViewState::new();
        view.set_document_filter("tax".into(), "report".into());
        assert_eq!(view.document_filter.query, "tax");
        assert_eq!(view.document_filter.category, "report");
        // No filtering API exists on the view state; the documents list
        // command returns the full dataset regardless.
    }

    #[test]
    fn test_faq_expansion_single_slot() {
        let mut view = DashboardViewState::new();
        view.set_expanded_faq(Some("margin".into()));
        assert_eq!(view.expanded_faq.as_deref(), Some("margin"));
        view.set_expanded_faq(Some("net-profit".into()));
        assert_eq!(view.expanded_faq.as_deref(), Some("net-profit"));
        // Selecting the open entry collapses it.
        view.set_expanded_faq(Some("net-profit".into()));
        assert_eq!(view.expanded_faq, None);
    }

    #[test]
    fn test_tab_parsing() {
        use std::str::FromStr;
        assert_eq!(Tab::from_str("financials").unwrap(), Tab::Financials);
        assert!(Tab::from_str("settings").is_err());
    }
}
