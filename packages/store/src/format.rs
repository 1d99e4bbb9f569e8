//! Display helpers shared by the table, Kanban and detail views.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::models::DealStage;

/// `"Jan 15, 2024"` for a stored date, `"N/A"` when absent, `"Invalid Date"`
/// when it cannot be parsed. Accepts RFC 3339 timestamps and plain
/// `YYYY-MM-DD` dates.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_date(raw) {
        Some(dt) => dt.date_naive().format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Parse a stored date. Plain `YYYY-MM-DD` dates are taken as midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

/// US dollar amount with thousands separators: `"$1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Badge colours for a stage label.
pub fn stage_badge_class(stage: DealStage) -> &'static str {
    match stage {
        DealStage::LeadGenerated => "bg-blue-100 text-blue-800",
        DealStage::Contacted => "bg-green-100 text-green-800",
        DealStage::ApplicationSubmitted => "bg-yellow-100 text-yellow-800",
        DealStage::ApplicationUnderReview => "bg-purple-100 text-purple-800",
        DealStage::DealFinalized => "bg-green-100 text-green-800",
        DealStage::PaymentConfirmed => "bg-blue-100 text-blue-800",
        DealStage::Completed => "bg-green-200 text-green-900",
        DealStage::Lost => "bg-red-100 text-red-800",
    }
}

/// Background of a Kanban column.
pub fn stage_column_class(stage: DealStage) -> &'static str {
    match stage {
        DealStage::LeadGenerated | DealStage::PaymentConfirmed => "bg-blue-50",
        DealStage::Contacted | DealStage::DealFinalized => "bg-green-50",
        DealStage::ApplicationSubmitted => "bg-yellow-50",
        DealStage::ApplicationUnderReview => "bg-purple-50",
        DealStage::Completed => "bg-green-100",
        DealStage::Lost => "bg-red-50",
    }
}

/// Up to two upper-case initials for an avatar: `"John Doe"` → `"JD"`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-01-15T10:30:00Z")), "Jan 15, 2024");
        assert_eq!(format_date(Some("2024-03-05")), "Mar 5, 2024");
        assert_eq!(format_date(Some("2024-12-31T23:00:00.000+00:00")), "Dec 31, 2024");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("  ")), "N/A");
        assert_eq!(format_date(Some("yesterday")), "Invalid Date");
    }

    #[test]
    fn test_parse_date_orders_mixed_formats() {
        let plain = parse_date("2025-06-01").unwrap();
        let stamp = parse_date("2020-01-01T00:00:00Z").unwrap();
        assert!(plain > stamp);
        assert_eq!(parse_date("2025-06-01T00:00:00Z"), Some(plain));
        assert!(parse_date("06/01/2025").is_none());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(149999.0), "$149,999.00");
        assert_eq!(format_currency(2450000.0), "$2,450,000.00");
        assert_eq!(format_currency(-12.5), "-$12.50");
    }

    #[test]
    fn test_stage_classes_cover_all() {
        for stage in DealStage::ALL {
            assert!(stage_badge_class(stage).starts_with("bg-"));
            assert!(stage_column_class(stage).starts_with("bg-"));
        }
        assert_eq!(stage_badge_class(DealStage::Lost), "bg-red-100 text-red-800");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("Mary Ann Smith"), "MA");
        assert_eq!(initials(""), "");
    }
}
