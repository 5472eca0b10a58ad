//! The static in-memory dataset backing the portal.
//!
//! Everything here is fixed demo data standing in for an accounting
//! backend: built on demand, read by the view layer, never mutated.
//! Reported aggregates (summary records, percentage changes) are part of
//! the data, not derived from other figures.

use crate::types::{
    Certificate, ClientPortfolio, ClientStats, ComplianceCategory, ComplianceItem,
    ComplianceOverview, ComplianceReports, ComplianceStatus, ComplianceSummary, Document,
    FaqEntry, Filing, FinancialHealth, FinancialKpis, FinancialSummaryRecord, HealthRatio, Kpi,
    LineKind, MonthlyRevenue, NextReview, Notification, PlSummary, Priority, ProfitLossItem,
    ProfitLossStatement, ReportDefinition, ReportMetric, RequestType, StatementLine,
    TaxCalculation, TaxCalendar, TaxCalendarEvent, TaxCredit, TaxDeduction, TaxEstimates,
    TaxEventStatus, TaxEventType, TaxPayment, TaxReturn, Task, TeamMember,
};

fn record(current: f64, previous: f64, percentage_change: f64) -> FinancialSummaryRecord {
    FinancialSummaryRecord {
        current,
        previous,
        percentage_change,
    }
}

/// Everything the dashboard shows for the demo client.
pub fn client_portfolio() -> ClientPortfolio {
    ClientPortfolio {
        client_name: "Herman Miny".into(),
        company: "Anderson Consulting LLC".into(),
        stats: ClientStats {
            revenue_ytd: 524_790.0,
            revenue_growth: 12.3,
            profit_margin: 24.8,
            industry_avg_margin: 22.0,
            open_requests: 3,
            pending_reviews: 2,
            monthly_revenue: vec![
                MonthlyRevenue { month: "Jan".into(), amount: 41_000.0 },
                MonthlyRevenue { month: "Feb".into(), amount: 45_000.0 },
                MonthlyRevenue { month: "Mar".into(), amount: 52_000.0 },
                MonthlyRevenue { month: "Apr".into(), amount: 48_000.0 },
                MonthlyRevenue { month: "May".into(), amount: 51_000.0 },
                MonthlyRevenue { month: "Jun".into(), amount: 55_000.0 },
            ],
            next_review: NextReview {
                date: "2024-04-15".into(),
                review_type: "Quarterly Review".into(),
                agenda: vec![
                    "Financial Performance Review".into(),
                    "Investment Strategy Update".into(),
                    "Tax Planning Discussion".into(),
                ],
            },
        },
        notifications: vec![
            Notification {
                id: 1,
                kind: "report".into(),
                title: "New report available".into(),
                message: "Q1 2024 Financial Report is ready for review".into(),
                date: "2024-03-20".into(),
                read: false,
            },
            Notification {
                id: 2,
                kind: "review".into(),
                title: "Upcoming Review".into(),
                message: "Quarterly review scheduled for Apr 15".into(),
                date: "2024-03-18".into(),
                read: false,
            },
            Notification {
                id: 3,
                kind: "document".into(),
                title: "Document Signed".into(),
                message: "Tax planning document has been signed".into(),
                date: "2024-03-15".into(),
                read: true,
            },
        ],
        team: vec![
            TeamMember {
                id: 1,
                name: "Sarah Johnson".into(),
                role: "Account Manager".into(),
                image: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=100&h=100".into(),
                phone: "+1 (555) 123-4567".into(),
                email: "sarah.j@enkardia.com".into(),
                availability: "Available".into(),
                next_available: None,
            },
            TeamMember {
                id: 2,
                name: "Michael Chen".into(),
                role: "Financial Advisor".into(),
                image: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&w=100&h=100".into(),
                phone: "+1 (555) 987-6543".into(),
                email: "michael.c@enkardia.com".into(),
                availability: "In Meeting".into(),
                next_available: Some("2:30 PM".into()),
            },
        ],
        recent_documents: vec![
            Document {
                id: 1,
                title: "Q1 2024 Financial Report".into(),
                date: "2024-03-15".into(),
                doc_type: "report".into(),
                status: "pending_review".into(),
                size: "2.4 MB".into(),
            },
            Document {
                id: 2,
                title: "Tax Planning Document".into(),
                date: "2024-03-10".into(),
                doc_type: "document".into(),
                status: "signed".into(),
                size: "1.8 MB".into(),
            },
            Document {
                id: 3,
                title: "Investment Strategy 2024".into(),
                date: "2024-03-01".into(),
                doc_type: "strategy".into(),
                status: "approved".into(),
                size: "3.1 MB".into(),
            },
        ],
        upcoming_tasks: vec![
            Task {
                id: 1,
                title: "Review Q1 Financial Report".into(),
                due_date: "2024-03-25".into(),
                priority: Priority::High,
                status: "pending".into(),
            },
            Task {
                id: 2,
                title: "Sign Updated Investment Policy".into(),
                due_date: "2024-03-28".into(),
                priority: Priority::Medium,
                status: "pending".into(),
            },
            Task {
                id: 3,
                title: "Schedule Tax Planning Meeting".into(),
                due_date: "2024-04-05".into(),
                priority: Priority::Low,
                status: "pending".into(),
            },
        ],
        summary: crate::types::PortfolioSummary {
            gross_profit: record(241_450.0, 211_111.0, 14.4),
            net_profit: record(130_200.0, 102_344.0, 27.2),
            gross_margin: record(48.4, 47.4, 2.1),
            operating_expenses: record(394_590.0, 364_890.0, -8.1),
        },
    }
}

/// The hierarchical P&L statement for Q1 2024 against Q1 2023.
pub fn profit_and_loss() -> ProfitLossStatement {
    ProfitLossStatement {
        period_start: "2024-01-01".into(),
        period_end: "2024-03-31".into(),
        previous_period_start: "2023-01-01".into(),
        previous_period_end: "2023-03-31".into(),
        items: vec![
            ProfitLossItem {
                id: "income".into(),
                name: "Income".into(),
                current_amount: 524_790.0,
                previous_amount: 467_234.0,
                percentage_change: 12.3,
                children: Some(vec![
                    ProfitLossItem {
                        id: "operating-revenue".into(),
                        name: "Operating Revenue".into(),
                        current_amount: 498_230.0,
                        previous_amount: 445_678.0,
                        percentage_change: 11.8,
                        children: None,
                    },
                    ProfitLossItem {
                        id: "other-income".into(),
                        name: "Other Income".into(),
                        current_amount: 26_560.0,
                        previous_amount: 21_556.0,
                        percentage_change: 23.2,
                        children: None,
                    },
                ]),
            },
            ProfitLossItem {
                id: "expenses".into(),
                name: "Expenses".into(),
                current_amount: 394_590.0,
                previous_amount: 364_890.0,
                percentage_change: 8.1,
                children: Some(vec![
                    ProfitLossItem {
                        id: "cogs".into(),
                        name: "Cost of Goods Sold".into(),
                        current_amount: 256_780.0,
                        previous_amount: 234_567.0,
                        percentage_change: 9.5,
                        children: None,
                    },
                    ProfitLossItem {
                        id: "operating-expenses".into(),
                        name: "Operating Expenses".into(),
                        current_amount: 98_450.0,
                        previous_amount: 92_345.0,
                        percentage_change: 6.6,
                        children: Some(vec![
                            ProfitLossItem {
                                id: "salaries".into(),
                                name: "Salaries & Wages".into(),
                                current_amount: 45_670.0,
                                previous_amount: 42_345.0,
                                percentage_change: 7.9,
                                children: None,
                            },
                            ProfitLossItem {
                                id: "rent".into(),
                                name: "Rent & Utilities".into(),
                                current_amount: 28_780.0,
                                previous_amount: 27_890.0,
                                percentage_change: 3.2,
                                children: None,
                            },
                            ProfitLossItem {
                                id: "other-expenses".into(),
                                name: "Other Expenses".into(),
                                current_amount: 24_000.0,
                                previous_amount: 22_110.0,
                                percentage_change: 8.5,
                                children: None,
                            },
                        ]),
                    },
                    ProfitLossItem {
                        id: "depreciation".into(),
                        name: "Depreciation".into(),
                        current_amount: 39_360.0,
                        previous_amount: 37_978.0,
                        percentage_change: 3.6,
                        children: None,
                    },
                ]),
            },
        ],
        summary: PlSummary {
            gross_profit: record(241_450.0, 211_111.0, 14.4),
            net_profit: record(130_200.0, 102_344.0, 27.2),
            gross_margin: record(48.4, 47.4, 2.1),
        },
    }
}

/// Flat statement lines for the PDF export, one per P&L leaf account.
pub fn statement_lines() -> Vec<StatementLine> {
    vec![
        StatementLine {
            date: "2024-03-31".into(),
            description: "Operating Revenue".into(),
            category: "Income".into(),
            amount: 498_230.0,
            kind: LineKind::Income,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Other Income".into(),
            category: "Income".into(),
            amount: 26_560.0,
            kind: LineKind::Income,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Cost of Goods Sold".into(),
            category: "Direct Costs".into(),
            amount: 256_780.0,
            kind: LineKind::Expense,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Salaries & Wages".into(),
            category: "Operating Expenses".into(),
            amount: 45_670.0,
            kind: LineKind::Expense,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Rent & Utilities".into(),
            category: "Operating Expenses".into(),
            amount: 28_780.0,
            kind: LineKind::Expense,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Other Expenses".into(),
            category: "Operating Expenses".into(),
            amount: 24_000.0,
            kind: LineKind::Expense,
        },
        StatementLine {
            date: "2024-03-31".into(),
            description: "Depreciation".into(),
            category: "Non-cash".into(),
            amount: 39_360.0,
            kind: LineKind::Expense,
        },
    ]
}

/// Compliance calendar shown in the compliance dialog.
pub fn compliance() -> ComplianceOverview {
    ComplianceOverview {
        summary: ComplianceSummary {
            total_items: 12,
            up_to_date: 8,
            pending: 2,
            overdue: 1,
            attention_needed: 1,
        },
        items: vec![
            ComplianceItem {
                id: "comp-1".into(),
                title: "VAT Return Filing".into(),
                due_date: "2024-04-25".into(),
                status: ComplianceStatus::Upcoming,
                category: ComplianceCategory::Tax,
                description: "Submit VAT return for Q1 2024".into(),
                priority: Priority::High,
            },
            ComplianceItem {
                id: "comp-2".into(),
                title: "Annual Financial Statements".into(),
                due_date: "2024-06-30".into(),
                status: ComplianceStatus::Pending,
                category: ComplianceCategory::Financial,
                description: "Prepare and submit annual financial statements".into(),
                priority: Priority::High,
            },
            ComplianceItem {
                id: "comp-3".into(),
                title: "Tax Clearance Certificate".into(),
                due_date: "2024-05-15".into(),
                status: ComplianceStatus::UpToDate,
                category: ComplianceCategory::Tax,
                description: "Renew tax clearance certificate".into(),
                priority: Priority::Medium,
            },
        ],
    }
}

/// Upcoming tax events and recent payments.
pub fn tax_calendar() -> TaxCalendar {
    TaxCalendar {
        upcoming_events: vec![
            TaxCalendarEvent {
                id: "tax-1".into(),
                title: "Provisional Tax Payment".into(),
                due_date: "2024-04-30".into(),
                event_type: TaxEventType::Payment,
                amount: Some(45_600.0),
                status: TaxEventStatus::Upcoming,
                description: "Second provisional tax payment for 2024".into(),
            },
            TaxCalendarEvent {
                id: "tax-2".into(),
                title: "VAT Return".into(),
                due_date: "2024-04-25".into(),
                event_type: TaxEventType::Filing,
                amount: Some(28_900.0),
                status: TaxEventStatus::Upcoming,
                description: "VAT return for March 2024".into(),
            },
        ],
        recent_payments: vec![TaxPayment {
            id: "payment-1".into(),
            title: "VAT Payment".into(),
            date: "2024-03-25".into(),
            amount: 32_450.0,
            status: "completed".into(),
            reference: "VAT-2024-03".into(),
        }],
    }
}

/// Quarterly tax estimate block for the tax calculator panel.
pub fn tax_calculator() -> TaxCalculation {
    TaxCalculation {
        year: 2024,
        quarter: 1,
        estimates: TaxEstimates {
            revenue: 524_790.0,
            expenses: 394_590.0,
            taxable_income: 130_200.0,
            estimated_tax: 36_456.0,
            vat_payable: 28_900.0,
            provisional_tax: 45_600.0,
        },
        deductions: vec![
            TaxDeduction {
                category: "Capital Allowances".into(),
                amount: 15_000.0,
                description: "Equipment and vehicle depreciation".into(),
            },
            TaxDeduction {
                category: "Operating Expenses".into(),
                amount: 98_450.0,
                description: "General business expenses".into(),
            },
            TaxDeduction {
                category: "Employee Benefits".into(),
                amount: 12_500.0,
                description: "Staff training and development".into(),
            },
        ],
        credits: vec![
            TaxCredit {
                credit_type: "Skills Development".into(),
                amount: 5_000.0,
                description: "Training program credits".into(),
            },
            TaxCredit {
                credit_type: "Small Business".into(),
                amount: 7_500.0,
                description: "Small business tax credit".into(),
            },
        ],
    }
}

/// Returns, certificates and filings tracked by the practice.
pub fn compliance_reports() -> ComplianceReports {
    ComplianceReports {
        tax_returns: vec![
            TaxReturn {
                id: "return-1".into(),
                return_type: "VAT".into(),
                period: "March 2024".into(),
                due_date: "2024-04-25".into(),
                status: "pending".into(),
                last_updated: "2024-03-20".into(),
            },
            TaxReturn {
                id: "return-2".into(),
                return_type: "Provisional Tax".into(),
                period: "YE 2024".into(),
                due_date: "2024-04-30".into(),
                status: "draft".into(),
                last_updated: "2024-03-15".into(),
            },
        ],
        certificates: vec![Certificate {
            id: "cert-1".into(),
            certificate_type: "Tax Clearance".into(),
            issue_date: "2023-05-15".into(),
            expiry_date: "2024-05-15".into(),
            status: "active".into(),
        }],
        filings: vec![Filing {
            id: "filing-1".into(),
            filing_type: "Annual Returns".into(),
            due_date: "2024-06-30".into(),
            status: "upcoming".into(),
            assigned_to: "Sarah Johnson".into(),
        }],
    }
}

pub fn financial_kpis() -> FinancialKpis {
    FinancialKpis {
        operating_margin: Kpi {
            current: 32.8,
            change: 2.4,
            target: Some(30.0),
            industry_avg: None,
        },
        working_capital_ratio: Kpi {
            current: 1.8,
            change: 0.3,
            target: None,
            industry_avg: Some(1.5),
        },
        debt_to_equity: Kpi {
            current: 0.45,
            change: -0.05,
            target: Some(0.5),
            industry_avg: None,
        },
    }
}

/// Health score block on the financials tab.
pub fn financial_health() -> FinancialHealth {
    FinancialHealth {
        score: 85,
        ratios: vec![
            HealthRatio { label: "Liquidity Ratio".into(), value: 2.5, industry_avg: 2.1 },
            HealthRatio { label: "Debt to Equity".into(), value: 0.8, industry_avg: 1.2 },
            HealthRatio { label: "Asset Turnover".into(), value: 1.8, industry_avg: 1.5 },
            HealthRatio { label: "Cash Flow Ratio".into(), value: 1.4, industry_avg: 1.1 },
        ],
    }
}

/// Downloadable reports offered by the reports dialog.
pub fn report_catalog() -> Vec<ReportDefinition> {
    vec![
        ReportDefinition {
            id: "pl".into(),
            title: "Profit & Loss Statement".into(),
            description: "Detailed income and expenses report".into(),
            size: "245 KB".into(),
            last_generated: "2024-03-15".into(),
        },
        ReportDefinition {
            id: "bs".into(),
            title: "Balance Sheet".into(),
            description: "Assets, liabilities and equity overview".into(),
            size: "180 KB".into(),
            last_generated: "2024-03-15".into(),
        },
        ReportDefinition {
            id: "cf".into(),
            title: "Cash Flow Statement".into(),
            description: "Cash movement and liquidity analysis".into(),
            size: "156 KB".into(),
            last_generated: "2024-03-15".into(),
        },
        ReportDefinition {
            id: "tax".into(),
            title: "Tax Summary Report".into(),
            description: "Tax obligations and payments overview".into(),
            size: "198 KB".into(),
            last_generated: "2024-03-15".into(),
        },
    ]
}

/// Metrics selectable in the custom-report builder.
pub fn metric_catalog() -> Vec<ReportMetric> {
    let entries = [
        ("revenue", "Revenue", "Income"),
        ("expenses", "Expenses", "Income"),
        ("gross_profit", "Gross Profit", "Income"),
        ("net_profit", "Net Profit", "Income"),
        ("cash_flow", "Cash Flow", "Cash"),
        ("working_capital", "Working Capital", "Cash"),
        ("accounts_receivable", "Accounts Receivable", "Balance Sheet"),
        ("accounts_payable", "Accounts Payable", "Balance Sheet"),
    ];
    entries
        .iter()
        .map(|(id, name, category)| ReportMetric {
            id: (*id).into(),
            name: (*name).into(),
            category: (*category).into(),
        })
        .collect()
}

pub fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: "gross-profit".into(),
            question: "What is Gross Profit?".into(),
            answer: "Gross profit is your total revenue minus the cost of goods sold (COGS). It represents how much money you make from selling your products or services before accounting for operating expenses.".into(),
        },
        FaqEntry {
            id: "operating-expenses".into(),
            question: "What are Operating Expenses?".into(),
            answer: "Operating expenses include all costs associated with running your business that aren't directly tied to producing your goods or services. This includes rent, salaries, utilities, and administrative costs.".into(),
        },
        FaqEntry {
            id: "net-profit".into(),
            question: "How is Net Profit calculated?".into(),
            answer: "Net profit is calculated by subtracting all expenses (including operating expenses, tax, and interest) from your total revenue. It represents your true bottom line profit.".into(),
        },
        FaqEntry {
            id: "margin".into(),
            question: "What is a good profit margin?".into(),
            answer: "A good profit margin varies by industry. Generally, a net profit margin above 20% is considered excellent, 10-20% is good, and 5-10% is average. However, it's best to compare your margins with industry standards.".into(),
        },
    ]
}

/// Request types offered by the new-request menu.
pub fn request_types() -> Vec<RequestType> {
    let entries = [
        (
            "financial-report",
            "Financial Report Request",
            "Request specific financial reports or statements",
        ),
        (
            "tax-consultation",
            "Tax Consultation",
            "Schedule a tax planning or consultation session",
        ),
        (
            "meeting",
            "Meeting Request",
            "Schedule a meeting with your account manager",
        ),
        (
            "advisory-session",
            "Advisory Session",
            "Book a business advisory session",
        ),
        (
            "document-review",
            "Document Review",
            "Submit documents for professional review",
        ),
        (
            "certificate",
            "Certificate Request",
            "Request tax clearance or other certificates",
        ),
    ];
    entries
        .iter()
        .map(|(id, title, description)| RequestType {
            id: (*id).into(),
            title: (*title).into(),
            description: (*description).into(),
        })
        .collect()
}

/// Badge color classes for a document status, neutral gray fallback for
/// anything unrecognized.
pub fn document_status_color(status: &str) -> &'static str {
    match status {
        "pending_review" => "text-yellow-600 bg-yellow-50",
        "signed" => "text-green-600 bg-green-50",
        "approved" => "text-blue-600 bg-blue-50",
        "draft" => "text-gray-600 bg-gray-50",
        _ => "text-gray-600 bg-gray-50",
    }
}

/// Badge color classes for a task priority.
pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "text-red-600 bg-red-50",
        Priority::Medium => "text-yellow-600 bg-yellow-50",
        Priority::Low => "text-green-600 bg-green-50",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_lines_reconcile_with_summary() {
        let lines = statement_lines();
        let income: f64 = lines
            .iter()
            .filter(|l| l.kind == LineKind::Income)
            .map(|l| l.amount)
            .sum();
        let expenses: f64 = lines
            .iter()
            .filter(|l| l.kind == LineKind::Expense)
            .map(|l| l.amount)
            .sum();
        assert_eq!(income, 524_790.0);
        assert_eq!(expenses, 394_590.0);
        assert_eq!(income - expenses, profit_and_loss().summary.net_profit.current);
    }

    #[test]
    fn test_pl_ids_unique_within_siblings() {
        fn check(items: &[ProfitLossItem]) {
            let mut seen = std::collections::HashSet::new();
            for item in items {
                assert!(seen.insert(&item.id), "duplicate sibling id: {}", item.id);
                if let Some(children) = &item.children {
                    check(children);
                }
            }
        }
        check(&profit_and_loss().items);
    }

    #[test]
    fn test_unread_notifications() {
        let unread = client_portfolio()
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count();
        assert_eq!(unread, 2);
    }

    #[test]
    fn test_status_color_fallback() {
        assert_eq!(document_status_color("signed"), "text-green-600 bg-green-50");
        assert_eq!(
            document_status_color("totally-unknown"),
            "text-gray-600 bg-gray-50"
        );
    }
}
