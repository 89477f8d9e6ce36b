//! NIP (Polish Tax Identification Number) extraction and validation.

use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// Scan lines in order for the first labeled NIP; hyphens are stripped and
/// only the digits are kept.
///
/// With `validate` set, lines whose NIP fails the checksum are skipped and
/// scanning continues. Validation is off by default at the parser level;
/// a mistyped NIP on a fiscal receipt is still worth surfacing.
pub fn extract_nip(lines: &[String], profile: &ReceiptProfile, validate: bool) -> Option<String> {
    for line in lines {
        if let Some(caps) = profile.nip.captures(line) {
            let digits: String = caps[1].chars().filter(|c| c.is_ascii_digit()).collect();
            if validate && !validate_nip(&digits) {
                debug!("Skipping NIP with invalid checksum: {digits}");
                continue;
            }
            debug!("Parsed NIP: {digits}");
            return Some(digits);
        }
    }
    None
}

/// Validate a Polish NIP using the checksum algorithm.
///
/// NIP format: 10 digits where the last digit is a checksum.
/// Weights: 6, 5, 7, 2, 3, 4, 5, 6, 7
pub fn validate_nip(nip: &str) -> bool {
    let digits: Vec<u32> = nip
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 10 {
        return false;
    }

    let weights = [6, 5, 7, 2, 3, 4, 5, 6, 7];
    let sum: u32 = digits
        .iter()
        .take(9)
        .zip(weights.iter())
        .map(|(d, w)| d * w)
        .sum();

    let checksum = sum % 11;

    // If checksum is 10, the NIP is invalid
    if checksum == 10 {
        return false;
    }

    checksum == digits[9]
}

/// Format NIP with dashes (XXX-XXX-XX-XX).
pub fn format_nip(nip: &str) -> String {
    let digits: String = nip.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 10 {
        return nip.to_string();
    }

    format!(
        "{}-{}-{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..8],
        &digits[8..10]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_nip_strips_hyphens() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["BIEDRONKA", "NIP 123-456-32-18"]);
        assert_eq!(
            extract_nip(&lines, &profile, false),
            Some("1234563218".to_string())
        );
    }

    #[test]
    fn test_extract_nip_plain_digits() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["NIP 5261040828"]);
        assert_eq!(
            extract_nip(&lines, &profile, false),
            Some("5261040828".to_string())
        );
    }

    #[test]
    fn test_unlabeled_digits_ignored() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["1234563218"]);
        assert_eq!(extract_nip(&lines, &profile, false), None);
    }

    #[test]
    fn test_validation_skips_bad_checksum() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["NIP 1234567890", "NIP 526-104-08-28"]);

        // Without validation the first match wins.
        assert_eq!(
            extract_nip(&lines, &profile, false),
            Some("1234567890".to_string())
        );
        // With validation the invalid one is skipped.
        assert_eq!(
            extract_nip(&lines, &profile, true),
            Some("5261040828".to_string())
        );
    }

    #[test]
    fn test_validate_nip() {
        assert!(validate_nip("5261040828"));
        assert!(validate_nip("123-456-32-18"));
        assert!(!validate_nip("1234567890"));
        assert!(!validate_nip("123456789"));
    }

    #[test]
    fn test_format_nip() {
        assert_eq!(format_nip("5261040828"), "526-104-08-28");
        assert_eq!(format_nip("526-104-08-28"), "526-104-08-28");
        assert_eq!(format_nip("123"), "123");
    }
}
