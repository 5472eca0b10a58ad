//! Display formatting for amounts, dates, and percentages.
//!
//! Pure functions; identical input always yields identical output. Bad
//! input degrades to an empty or neutral string, never a panic.

use chrono::{DateTime, NaiveDate};

/// Render an amount as a currency string: `$524,790.00`.
///
/// Negative amounts are signed (`-$500.00`), zero is `$0.00`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{:02}", grouped, frac)
    } else {
        format!("${}.{:02}", grouped, frac)
    }
}

/// Render an ISO date (`2024-03-15`, or a full RFC 3339 timestamp) as a
/// short human-readable form: `Mar 15, 2024`.
///
/// Returns an empty string for anything unparsable.
pub fn format_date(iso: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format("%b %-d, %Y").to_string();
    }
    String::new()
}

/// Render a stored percentage change with an explicit sign: `+12.3%`,
/// `-8.1%`. The sign comes from the stored value alone.
pub fn format_percent_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{}%", trim_trailing_zero(pct))
    } else {
        format!("{}%", trim_trailing_zero(pct))
    }
}

/// Render an absolute percentage without a sign: `8.1%`.
pub fn format_percent_magnitude(pct: f64) -> String {
    format!("{}%", trim_trailing_zero(pct.abs()))
}

/// Render a byte count the way the documents list shows sizes: `2.40 MB`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

// Percentages in the dataset carry at most one decimal; "12.0%" reads as
// stale data next to "12.3%", so whole numbers drop the fraction.
fn trim_trailing_zero(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(524790.0), "$524,790.00");
        assert_eq!(format_currency(1234567.89), "$1,234,567.89");
        assert_eq!(format_currency(998.5), "$998.50");
    }

    #[test]
    fn test_format_currency_zero_and_negative() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-500.0), "-$500.00");
        assert_eq!(format_currency(-1234.56), "-$1,234.56");
    }

    #[test]
    fn test_format_date_short_form() {
        assert_eq!(format_date("2024-03-15"), "Mar 15, 2024");
        assert_eq!(format_date("2024-04-05"), "Apr 5, 2024");
    }

    #[test]
    fn test_format_date_timestamp() {
        assert_eq!(format_date("2024-03-20T10:30:00Z"), "Mar 20, 2024");
    }

    #[test]
    fn test_format_date_garbage_is_empty() {
        assert_eq!(format_date("not-a-date"), "");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2024-13-45"), "");
    }

    #[test]
    fn test_format_percent_change_signs() {
        assert_eq!(format_percent_change(12.3), "+12.3%");
        assert_eq!(format_percent_change(-8.1), "-8.1%");
        assert_eq!(format_percent_change(0.0), "0%");
        assert_eq!(format_percent_change(27.0), "+27%");
    }

    #[test]
    fn test_format_percent_magnitude() {
        assert_eq!(format_percent_magnitude(-8.1), "8.1%");
        assert_eq!(format_percent_magnitude(14.4), "14.4%");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.00 MB");
        assert_eq!(format_file_size(2_516_582), "2.40 MB");
    }
}
