use serde::{Deserialize, Serialize};

// =============================================================================
// Financial summary
// =============================================================================

/// A current/previous pair with its reported change.
///
/// `percentage_change` is supplied by the accounting source alongside the
/// figures and is displayed as-is — it is never recomputed from
/// `current`/`previous` here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummaryRecord {
    pub current: f64,
    pub previous: f64,
    pub percentage_change: f64,
}

/// Summary block attached to the client portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub gross_profit: FinancialSummaryRecord,
    pub net_profit: FinancialSummaryRecord,
    pub gross_margin: FinancialSummaryRecord,
    pub operating_expenses: FinancialSummaryRecord,
}

// =============================================================================
// Profit & loss statement
// =============================================================================

/// One account line in the hierarchical P&L statement.
///
/// Ids are unique within a sibling list, not globally. A node whose
/// `children` is present but empty renders identically to a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossItem {
    pub id: String,
    pub name: String,
    pub current_amount: f64,
    pub previous_amount: f64,
    pub percentage_change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ProfitLossItem>>,
}

impl ProfitLossItem {
    /// True when the node has at least one child to expand into.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Aggregate rows shown under the statement table.
///
/// These come straight from the accounting source and are the source of
/// truth — they are not derived from the item tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlSummary {
    pub gross_profit: FinancialSummaryRecord,
    pub net_profit: FinancialSummaryRecord,
    pub gross_margin: FinancialSummaryRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossStatement {
    pub period_start: String,
    pub period_end: String,
    pub previous_period_start: String,
    pub previous_period_end: String,
    pub items: Vec<ProfitLossItem>,
    pub summary: PlSummary,
}

/// A flat statement line consumed by the PDF export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Income,
    Expense,
}

// =============================================================================
// Portfolio records
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextReview {
    pub date: String,
    #[serde(rename = "type")]
    pub review_type: String,
    pub agenda: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub revenue_ytd: f64,
    pub revenue_growth: f64,
    pub profit_margin: f64,
    pub industry_avg_margin: f64,
    pub open_requests: u32,
    pub pending_reviews: u32,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub next_review: NextReview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub date: String,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub image: String,
    pub phone: String,
    pub email: String,
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_available: Option<String>,
}

/// A document in the client's recent-documents list.
///
/// `status` stays a free string: the accounting source has shipped values
/// outside the known set and the display layer falls back to a neutral
/// badge for anything it doesn't recognize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub date: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub status: String,
    pub size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: String,
}

/// Everything the dashboard shows for the signed-in client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPortfolio {
    pub client_name: String,
    pub company: String,
    pub stats: ClientStats,
    pub notifications: Vec<Notification>,
    pub team: Vec<TeamMember>,
    pub recent_documents: Vec<Document>,
    pub upcoming_tasks: Vec<Task>,
    pub summary: PortfolioSummary,
}

// =============================================================================
// Compliance & tax calendar
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    UpToDate,
    Pending,
    Overdue,
    AttentionNeeded,
    // The source dataset ships 'upcoming' on compliance rows even though its
    // declared status set doesn't include it. Kept so the data round-trips.
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceCategory {
    Tax,
    Regulatory,
    Financial,
    Governance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceItem {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub status: ComplianceStatus,
    pub category: ComplianceCategory,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total_items: u32,
    pub up_to_date: u32,
    pub pending: u32,
    pub overdue: u32,
    pub attention_needed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceOverview {
    pub summary: ComplianceSummary,
    pub items: Vec<ComplianceItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxEventType {
    Payment,
    Filing,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxEventStatus {
    Upcoming,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalendarEvent {
    pub id: String,
    pub title: String,
    pub due_date: String,
    #[serde(rename = "type")]
    pub event_type: TaxEventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub status: TaxEventStatus,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPayment {
    pub id: String,
    pub title: String,
    pub date: String,
    pub amount: f64,
    pub status: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalendar {
    pub upcoming_events: Vec<TaxCalendarEvent>,
    pub recent_payments: Vec<TaxPayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimates {
    pub revenue: f64,
    pub expenses: f64,
    pub taxable_income: f64,
    pub estimated_tax: f64,
    pub vat_payable: f64,
    pub provisional_tax: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDeduction {
    pub category: String,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCredit {
    #[serde(rename = "type")]
    pub credit_type: String,
    pub amount: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculation {
    pub year: i32,
    pub quarter: u8,
    pub estimates: TaxEstimates,
    pub deductions: Vec<TaxDeduction>,
    pub credits: Vec<TaxCredit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReturn {
    pub id: String,
    #[serde(rename = "type")]
    pub return_type: String,
    pub period: String,
    pub due_date: String,
    pub status: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    #[serde(rename = "type")]
    pub certificate_type: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filing {
    pub id: String,
    #[serde(rename = "type")]
    pub filing_type: String,
    pub due_date: String,
    pub status: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReports {
    pub tax_returns: Vec<TaxReturn>,
    pub certificates: Vec<Certificate>,
    pub filings: Vec<Filing>,
}

// =============================================================================
// KPIs & financial health
// =============================================================================

/// A key performance indicator with either a target or an industry average
/// as its comparison point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub current: f64,
    pub change: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_avg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialKpis {
    pub operating_margin: Kpi,
    pub working_capital_ratio: Kpi,
    pub debt_to_equity: Kpi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRatio {
    pub label: String,
    pub value: f64,
    pub industry_avg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub score: u32,
    pub ratios: Vec<HealthRatio>,
}

// =============================================================================
// Catalogs shown in dialogs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub size: String,
    pub last_generated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetric {
    pub id: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestType {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_children_is_leaf() {
        let node = ProfitLossItem {
            id: "misc".into(),
            name: "Misc".into(),
            current_amount: 0.0,
            previous_amount: 0.0,
            percentage_change: 0.0,
            children: Some(Vec::new()),
        };
        assert!(!node.has_children());
    }

    #[test]
    fn test_pl_item_serde_omits_absent_children() {
        let node = ProfitLossItem {
            id: "rent".into(),
            name: "Rent & Utilities".into(),
            current_amount: 28780.0,
            previous_amount: 27890.0,
            percentage_change: 3.2,
            children: None,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("children"));
        assert!(json.contains("currentAmount"));
    }

    #[test]
    fn test_compliance_status_wire_format() {
        let json = serde_json::to_string(&ComplianceStatus::AttentionNeeded).unwrap();
        assert_eq!(json, "\"attention_needed\"");
        let json = serde_json::to_string(&ComplianceStatus::UpToDate).unwrap();
        assert_eq!(json, "\"up_to_date\"");
    }
}
