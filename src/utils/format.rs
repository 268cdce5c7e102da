//! Format - Counter Text Utilities

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let len = s.len();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Parse the integer embedded in a display string by dropping every
/// non-digit character.
///
/// Returns `None` when the text holds no digit at all. Values beyond
/// `u64::MAX` saturate.
pub fn parse_digits(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Split a display string into its leading and trailing non-digit runs.
///
/// `"$1,234"` gives `("$", "")`, `"150+"` gives `("", "+")`. Text without
/// any digit is treated as all prefix.
pub fn split_affixes(text: &str) -> (&str, &str) {
    let Some(first) = text.find(|c: char| c.is_ascii_digit()) else {
        return (text, "");
    };
    let last_end = text
        .rfind(|c: char| c.is_ascii_digit())
        .map_or(text.len(), |idx| idx + 1);

    (&text[..first], &text[last_end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("$1,234"), Some(1234));
        assert_eq!(parse_digits("150+"), Some(150));
        assert_eq!(parse_digits("98.5%"), Some(985));
        assert_eq!(parse_digits("N/A"), None);
        assert_eq!(parse_digits("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_split_affixes() {
        assert_eq!(split_affixes("$1,234"), ("$", ""));
        assert_eq!(split_affixes("150+"), ("", "+"));
        assert_eq!(split_affixes("约 3,000 家"), ("约 ", " 家"));
        assert_eq!(split_affixes("1,234"), ("", ""));
        assert_eq!(split_affixes("soon"), ("soon", ""));
    }
}
