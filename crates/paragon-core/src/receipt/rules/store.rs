//! Store name extraction from the receipt header.

use tracing::debug;

use crate::receipt::profile::ReceiptProfile;

/// Locate the merchant name, two-tier.
///
/// The verbose header marker wins and may carry a trailing store number
/// ("Biedronka 4821"); a line starting with the bare brand name is the
/// fallback tier. First match wins, scanning top to bottom. `None` when
/// neither tier matches; the caller applies a generic label.
pub fn extract_store_name(lines: &[String], profile: &ReceiptProfile) -> Option<String> {
    if let Some(line) = lines
        .iter()
        .find(|line| line.to_uppercase().contains(&profile.full_header_marker))
    {
        let name = match profile.store_number.captures(line) {
            Some(caps) => format!("{} {}", profile.brand, &caps[1]),
            None => profile.brand.clone(),
        };
        debug!("Matched verbose store header: {name}");
        return Some(name);
    }

    let brand_upper = profile.brand.to_uppercase();
    if lines
        .iter()
        .any(|line| line.to_uppercase().starts_with(&brand_upper))
    {
        return Some(profile.brand.clone());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_verbose_header_with_store_number() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&[
            "JERONIMO MARTINS POLSKA S.A.",
            r#"BIEDRONKA "CODZIENNIE NISKIE CENY" 4821"#,
        ]);
        assert_eq!(
            extract_store_name(&lines, &profile),
            Some("Biedronka 4821".to_string())
        );
    }

    #[test]
    fn test_verbose_header_without_number() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&[r#"BIEDRONKA "CODZIENNIE NISKIE CENY""#]);
        assert_eq!(
            extract_store_name(&lines, &profile),
            Some("Biedronka".to_string())
        );
    }

    #[test]
    fn test_bare_brand_fallback() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["Biedronka 123", "PARAGON FISKALNY"]);
        assert_eq!(
            extract_store_name(&lines, &profile),
            Some("Biedronka".to_string())
        );
    }

    #[test]
    fn test_no_match_is_none() {
        let profile = ReceiptProfile::biedronka();
        let lines = lines(&["LIDL SP. Z O.O.", "PARAGON FISKALNY"]);
        assert_eq!(extract_store_name(&lines, &profile), None);
    }
}
