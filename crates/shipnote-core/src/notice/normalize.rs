//! Canonical forms for dates and storage temperatures.

use super::patterns::{DATE_DIGITS, TEMP_CELSIUS_PAIR, TEMP_GENERIC};

/// Reformat an 8-digit `YYYYMMDD` date as `YYYY/MM/DD`.
///
/// Any other input is returned unchanged, so already formatted dates pass
/// through.
pub fn format_date8(value: &str) -> String {
    match DATE_DIGITS.captures(value) {
        Some(caps) => format!("{}/{}/{}", &caps[1], &caps[2], &caps[3]),
        None => value.to_string(),
    }
}

/// Normalize a storage temperature range to `{lo}～{hi}℃`.
///
/// Accepts `+02°Cto08°C` style ranges first, then any `lo … hi … ℃` run.
/// Unrecognized input (including the `-` placeholder) is returned unchanged.
pub fn normalize_temperature(raw: &str) -> String {
    let caps = TEMP_CELSIUS_PAIR
        .captures(raw)
        .or_else(|| TEMP_GENERIC.captures(raw));

    match caps {
        Some(caps) => format!("{}～{}℃", strip_zeros(&caps[1]), strip_zeros(&caps[2])),
        None => raw.to_string(),
    }
}

// Decimal value of a digit run without parsing, so long runs cannot overflow.
fn strip_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date8() {
        assert_eq!(format_date8("20240115"), "2024/01/15");
        assert_eq!(format_date8("2024/01/15"), "2024/01/15");
        assert_eq!(format_date8("2024011"), "2024011");
        assert_eq!(format_date8("01/02/2025"), "01/02/2025");
    }

    #[test]
    fn test_normalize_celsius_pair() {
        assert_eq!(normalize_temperature("+02°Cto08°C"), "2～8℃");
        assert_eq!(normalize_temperature("+15°C...+25°c"), "15～25℃");
    }

    #[test]
    fn test_normalize_generic_range() {
        assert_eq!(normalize_temperature("2~8℃"), "2～8℃");
        assert_eq!(normalize_temperature("2～8℃"), "2～8℃");
        assert_eq!(normalize_temperature("02至08℃"), "2～8℃");
        assert_eq!(normalize_temperature("0-30℃"), "0～30℃");
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(normalize_temperature("-"), "-");
        assert_eq!(normalize_temperature("room temperature"), "room temperature");
    }
}
