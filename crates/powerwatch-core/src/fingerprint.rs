use sha2::{Digest, Sha256};

use crate::status::RawStatus;

/// Compute a stable change fingerprint for a status sample.
///
/// SHA-256 over `start_date || end_date || sub_type`, with the sub-type
/// trimmed and lower-cased, hex-encoded. The provider's update timestamp and
/// outage type code are not covered: a republish of unchanged data under a
/// new timestamp hashes identically.
#[must_use]
pub fn fingerprint(raw: &RawStatus) -> String {
    let input = match &raw.house {
        None => "\u{1}no-house".to_string(),
        Some(house) => format!(
            "{}\x00{}\x00{}",
            house.start_date.as_deref().unwrap_or("").trim(),
            house.end_date.as_deref().unwrap_or("").trim(),
            house.sub_type.trim().to_lowercase(),
        ),
    };
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::HouseRecord;

    fn sample() -> RawStatus {
        RawStatus {
            house: Some(HouseRecord::from_provider(
                Some("Аварійне відключення"),
                Some("10:00 01.01.2024"),
                Some("14:00 01.01.2024"),
                Some("2"),
            )),
            update_timestamp: Some("09:55 01.01.2024".to_string()),
        }
    }

    #[test]
    fn is_hex_sha256() {
        let fp = fingerprint(&sample());
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ignores_update_timestamp() {
        let mut republished = sample();
        republished.update_timestamp = Some("10:25 01.01.2024".to_string());
        assert_eq!(fingerprint(&sample()), fingerprint(&republished));

        republished.update_timestamp = None;
        assert_eq!(fingerprint(&sample()), fingerprint(&republished));
    }

    #[test]
    fn ignores_outage_type_code() {
        let mut other = sample();
        other.house.as_mut().unwrap().outage_type = Some("1".to_string());
        assert_eq!(fingerprint(&sample()), fingerprint(&other));
    }

    #[test]
    fn ignores_sub_type_case_and_padding() {
        let mut other = sample();
        other.house.as_mut().unwrap().sub_type = "  АВАРІЙНЕ ВІДКЛЮЧЕННЯ ".to_string();
        assert_eq!(fingerprint(&sample()), fingerprint(&other));
    }

    #[test]
    fn changes_with_start_date() {
        let mut other = sample();
        other.house.as_mut().unwrap().start_date = Some("10:30 01.01.2024".to_string());
        assert_ne!(fingerprint(&sample()), fingerprint(&other));
    }

    #[test]
    fn changes_with_end_date() {
        let mut other = sample();
        other.house.as_mut().unwrap().end_date = Some("16:00 01.01.2024".to_string());
        assert_ne!(fingerprint(&sample()), fingerprint(&other));

        other.house.as_mut().unwrap().end_date = None;
        assert_ne!(fingerprint(&sample()), fingerprint(&other));
    }

    #[test]
    fn changes_with_sub_type_text() {
        let mut other = sample();
        other.house.as_mut().unwrap().sub_type = "Стабілізаційне відключення".to_string();
        assert_ne!(fingerprint(&sample()), fingerprint(&other));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let a = RawStatus {
            house: Some(HouseRecord::from_provider(Some("x"), Some("ab"), Some("c"), None)),
            update_timestamp: None,
        };
        let b = RawStatus {
            house: Some(HouseRecord::from_provider(Some("x"), Some("a"), Some("bc"), None)),
            update_timestamp: None,
        };
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn missing_house_differs_from_empty_house() {
        let empty_house = RawStatus {
            house: Some(HouseRecord::default()),
            update_timestamp: None,
        };
        assert_ne!(fingerprint(&RawStatus::default()), fingerprint(&empty_house));
    }
}
