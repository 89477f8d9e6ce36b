//! Purchase timestamp extraction.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// Scan lines in order for the first `DD/MM/YYYY HH:MM:SS` stamp.
///
/// Receipts may contain multiple incidental timestamps; only the first
/// encountered (typically the transaction time header) is used. Scanning
/// stops at the first regex match. If its numbers do not form a valid
/// calendar date, the field stays unset rather than rescanning.
pub fn extract_purchase_date(lines: &[String], profile: &ReceiptProfile) -> Option<NaiveDateTime> {
    for line in lines {
        if let Some(caps) = profile.timestamp.captures(line) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);
            let hour: u32 = caps[4].parse().unwrap_or(0);
            let minute: u32 = caps[5].parse().unwrap_or(0);
            let second: u32 = caps[6].parse().unwrap_or(0);

            let stamp = NaiveDate::from_ymd_opt(year, month, day)?
                .and_hms_opt(hour, minute, second)?;
            debug!("Parsed purchase date: {stamp}");
            return Some(stamp);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_timestamp_fields() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["PARAGON FISKALNY", "25/12/2023 14:05:30"]);

        let stamp = extract_purchase_date(&lines, &profile).unwrap();
        assert_eq!(stamp.year(), 2023);
        assert_eq!(stamp.month(), 12);
        assert_eq!(stamp.day(), 25);
        assert_eq!(stamp.hour(), 14);
        assert_eq!(stamp.minute(), 5);
        assert_eq!(stamp.second(), 30);
    }

    #[test]
    fn test_first_timestamp_wins() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["01/02/2023 08:00:00", "25/12/2023 14:05:30"]);

        let stamp = extract_purchase_date(&lines, &profile).unwrap();
        assert_eq!(stamp.month(), 2);
        assert_eq!(stamp.day(), 1);
    }

    #[test]
    fn test_no_timestamp_is_none() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["BIEDRONKA", "SUMA PLN", "4,50"]);
        assert_eq!(extract_purchase_date(&lines, &profile), None);
    }

    #[test]
    fn test_invalid_calendar_date_stays_unset() {
        let profile = ReceiptProfile::biedronka();
        // First match is taken and fails construction; no rescan.
        let lines = lines(&["31/02/2023 10:00:00", "25/12/2023 14:05:30"]);
        assert_eq!(extract_purchase_date(&lines, &profile), None);
    }
}
