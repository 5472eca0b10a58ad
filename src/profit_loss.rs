//! Profit & loss table view model.
//!
//! Derives a flattened, depth-ordered row sequence from the static P&L
//! tree plus an expand/collapse set. The whole sequence is recomputed on
//! every toggle; there is no incremental diffing. Aggregate rows (gross
//! profit, net profit, gross margin) come from the statement's summary
//! record and are never recomputed from the tree.

use std::collections::HashSet;

use serde::Serialize;

use crate::formatters::{format_currency, format_percent_change, format_percent_magnitude};
use crate::types::{FinancialSummaryRecord, PlSummary, ProfitLossItem, ProfitLossStatement};

/// Direction indicator next to a percentage change. Derived purely from
/// the stored value's sign: positive is up, anything else is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// One rendered row of the statement table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlRow {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub current_amount: f64,
    pub previous_amount: f64,
    pub percentage_change: f64,
    pub current_display: String,
    pub previous_display: String,
    pub change_display: String,
    pub trend: Trend,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// An aggregate row under the table (gross profit, net profit).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlSummaryRow {
    pub label: String,
    pub current_display: String,
    pub previous_display: String,
    pub change_display: String,
    pub trend: Trend,
}

/// Comparison triple feeding the period bar chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub name: String,
    pub current: f64,
    pub previous: f64,
}

/// One of the growth tiles above the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetric {
    pub label: String,
    pub value: f64,
    pub display: String,
}

/// Expand/collapse state for the statement tree.
///
/// Presentation state only; the tree content never changes.
#[derive(Debug, Clone)]
pub struct PlTreeView {
    expanded: HashSet<String>,
}

impl PlTreeView {
    /// The top-level Income and Expenses groups start expanded.
    pub fn new() -> Self {
        let mut expanded = HashSet::new();
        expanded.insert("income".to_string());
        expanded.insert("expenses".to_string());
        Self { expanded }
    }

    /// Flip the expansion state of one node. Toggling twice restores the
    /// original state.
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded_ids(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Flatten the tree into display rows: pre-order, children in array
    /// order, descending only through expanded nodes with non-empty
    /// children.
    pub fn rows(&self, items: &[ProfitLossItem]) -> Vec<PlRow> {
        let mut out = Vec::new();
        for item in items {
            self.push_rows(item, 0, &mut out);
        }
        out
    }

    fn push_rows(&self, item: &ProfitLossItem, depth: usize, out: &mut Vec<PlRow>) {
        let has_children = item.has_children();
        let is_expanded = self.is_expanded(&item.id);

        out.push(PlRow {
            id: item.id.clone(),
            name: item.name.clone(),
            depth,
            current_amount: item.current_amount,
            previous_amount: item.previous_amount,
            percentage_change: item.percentage_change,
            current_display: format_currency(item.current_amount),
            previous_display: format_currency(item.previous_amount),
            change_display: format_percent_magnitude(item.percentage_change),
            trend: Trend::from_change(item.percentage_change),
            has_children,
            is_expanded,
        });

        if has_children && is_expanded {
            for child in item.children.as_deref().unwrap_or_default() {
                self.push_rows(child, depth + 1, out);
            }
        }
    }
}

impl Default for PlTreeView {
    fn default() -> Self {
        Self::new()
    }
}

fn summary_row(label: &str, record: &FinancialSummaryRecord) -> PlSummaryRow {
    PlSummaryRow {
        label: label.to_string(),
        current_display: format_currency(record.current),
        previous_display: format_currency(record.previous),
        change_display: format_percent_change(record.percentage_change),
        trend: Trend::from_change(record.percentage_change),
    }
}

/// Aggregate rows appended under the item rows. Read straight from the
/// summary record.
pub fn summary_rows(summary: &PlSummary) -> Vec<PlSummaryRow> {
    vec![
        summary_row("Gross Profit", &summary.gross_profit),
        summary_row("Net Profit", &summary.net_profit),
    ]
}

fn top_level<'a>(statement: &'a ProfitLossStatement, id: &str) -> Option<&'a ProfitLossItem> {
    statement.items.iter().find(|i| i.id == id)
}

/// Revenue / expenses / net-profit comparison for the bar chart. Missing
/// top-level groups chart as zero.
pub fn period_comparison(statement: &ProfitLossStatement) -> Vec<PeriodComparison> {
    let income = top_level(statement, "income");
    let expenses = top_level(statement, "expenses");
    vec![
        PeriodComparison {
            name: "Revenue".into(),
            current: income.map_or(0.0, |i| i.current_amount),
            previous: income.map_or(0.0, |i| i.previous_amount),
        },
        PeriodComparison {
            name: "Expenses".into(),
            current: expenses.map_or(0.0, |i| i.current_amount),
            previous: expenses.map_or(0.0, |i| i.previous_amount),
        },
        PeriodComparison {
            name: "Net Profit".into(),
            current: statement.summary.net_profit.current,
            previous: statement.summary.net_profit.previous,
        },
    ]
}

/// The three growth tiles: revenue and expense growth from the top-level
/// groups, profit growth from the summary record.
pub fn growth_metrics(statement: &ProfitLossStatement) -> Vec<GrowthMetric> {
    let revenue = top_level(statement, "income").map_or(0.0, |i| i.percentage_change);
    let expense = top_level(statement, "expenses").map_or(0.0, |i| i.percentage_change);
    let profit = statement.summary.net_profit.percentage_change;

    [
        ("Revenue Growth", revenue),
        ("Expense Growth", expense),
        ("Profit Growth", profit),
    ]
    .iter()
    .map(|(label, value)| GrowthMetric {
        label: (*label).to_string(),
        value: *value,
        display: format_percent_change(*value),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    fn item(id: &str, children: Option<Vec<ProfitLossItem>>) -> ProfitLossItem {
        ProfitLossItem {
            id: id.to_string(),
            name: id.to_string(),
            current_amount: 100.0,
            previous_amount: 90.0,
            percentage_change: 11.1,
            children,
        }
    }

    #[test]
    fn test_default_expansion_shows_children_not_grandchildren() {
        let statement = dataset::profit_and_loss();
        let view = PlTreeView::new();
        let rows = view.rows(&statement.items);

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "income",
                "operating-revenue",
                "other-income",
                "expenses",
                "cogs",
                "operating-expenses",
                "depreciation",
            ]
        );
        // operating-expenses is collapsed, so its children stay hidden.
        assert!(!ids.contains(&"salaries"));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut view = PlTreeView::new();
        let before = view.expanded_ids().clone();
        view.toggle("operating-expenses");
        view.toggle("operating-expenses");
        assert_eq!(*view.expanded_ids(), before);
    }

    #[test]
    fn test_expanding_nested_node_reveals_grandchildren() {
        let statement = dataset::profit_and_loss();
        let mut view = PlTreeView::new();
        view.toggle("operating-expenses");
        let rows = view.rows(&statement.items);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"salaries"));
        assert!(ids.contains(&"rent"));
        assert!(ids.contains(&"other-expenses"));
        // Pre-order: children immediately follow their parent.
        let parent_pos = ids.iter().position(|i| *i == "operating-expenses").unwrap();
        assert_eq!(ids[parent_pos + 1], "salaries");
    }

    #[test]
    fn test_no_child_row_without_expanded_parent() {
        let statement = dataset::profit_and_loss();
        let mut view = PlTreeView::new();
        view.toggle("expenses"); // collapse
        let rows = view.rows(&statement.items);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"expenses"));
        assert!(!ids.contains(&"cogs"));
        assert!(!ids.contains(&"depreciation"));
    }

    #[test]
    fn test_empty_children_renders_as_leaf() {
        let items = vec![item("lonely", Some(Vec::new()))];
        let mut view = PlTreeView::new();
        view.toggle("lonely");
        let rows = view.rows(&items);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].has_children);
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let statement = dataset::profit_and_loss();
        let mut view = PlTreeView::new();
        view.toggle("operating-expenses");
        let rows = view.rows(&statement.items);
        let salaries = rows.iter().find(|r| r.id == "salaries").unwrap();
        assert_eq!(salaries.depth, 2);
        let expenses = rows.iter().find(|r| r.id == "expenses").unwrap();
        assert_eq!(expenses.depth, 0);
    }

    #[test]
    fn test_trend_from_stored_sign_only() {
        assert_eq!(Trend::from_change(8.5), Trend::Up);
        assert_eq!(Trend::from_change(-8.1), Trend::Down);
        // Zero is not positive, so it takes the down indicator.
        assert_eq!(Trend::from_change(0.0), Trend::Down);
    }

    #[test]
    fn test_summary_rows_read_from_record_not_tree() {
        let mut statement = dataset::profit_and_loss();
        // Corrupt the tree; the summary rows must not notice.
        statement.items[0].current_amount = 1.0;
        let rows = summary_rows(&statement.summary);
        assert_eq!(rows[0].label, "Gross Profit");
        assert_eq!(rows[0].current_display, "$241,450.00");
        assert_eq!(rows[1].label, "Net Profit");
        assert_eq!(rows[1].current_display, "$130,200.00");
        assert_eq!(rows[1].change_display, "+27.2%");
    }

    #[test]
    fn test_growth_metrics_signed_display() {
        let statement = dataset::profit_and_loss();
        let metrics = growth_metrics(&statement);
        assert_eq!(metrics[0].display, "+12.3%");
        assert_eq!(metrics[1].display, "+8.1%");
        assert_eq!(metrics[2].display, "+27.2%");
    }

    #[test]
    fn test_period_comparison_reads_summary_net() {
        let statement = dataset::profit_and_loss();
        let cmp = period_comparison(&statement);
        assert_eq!(cmp[2].name, "Net Profit");
        assert_eq!(cmp[2].current, 130_200.0);
        assert_eq!(cmp[0].current, 524_790.0);
    }
}
