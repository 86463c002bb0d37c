//! Pure transforms over translation keys.

use std::sync::OnceLock;

use regex::Regex;

/// Pattern a well-formed translation key must match.
fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid key regex"))
}

/// Whether a string is a well-formed translation key
/// (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_key(key: &str) -> bool {
    key_pattern().is_match(key)
}

/// Turn a snake_case key into a readable sentence fragment.
///
/// Leading/trailing underscores are stripped, internal underscores become
/// spaces, everything is lowercased and only the first character is
/// uppercased. An all-underscore or empty key yields the empty string.
///
/// `"total_commission_earned"` becomes `"Total commission earned"`,
/// `"USER_PROFILE"` becomes `"User profile"`.
pub fn key_to_readable_text(key: &str) -> String {
    let trimmed = key.trim_matches('_');
    if trimmed.is_empty() {
        return String::new();
    }

    let lowered = trimmed.replace('_', " ").to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Split a comma-separated key list into trimmed, de-duplicated keys,
/// preserving first-seen order. Empty pieces are dropped.
pub fn parse_key_list(input: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for piece in input.split(',') {
        let key = piece.trim();
        if key.is_empty() {
            continue;
        }
        if !seen.iter().any(|existing: &String| existing == key) {
            seen.push(key.to_string());
        }
    }
    seen
}

/// Whether the input names more than one key.
pub fn is_multi_key_input(input: &str) -> bool {
    parse_key_list(input).len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Readable Text Tests ====================

    #[test]
    fn test_key_to_readable_text_basic() {
        assert_eq!(
            key_to_readable_text("total_commission_earned"),
            "Total commission earned"
        );
        assert_eq!(key_to_readable_text("commission"), "Commission");
    }

    #[test]
    fn test_key_to_readable_text_uppercase_key() {
        assert_eq!(key_to_readable_text("USER_PROFILE"), "User profile");
    }

    #[test]
    fn test_key_to_readable_text_strips_edge_underscores() {
        assert_eq!(key_to_readable_text("__welcome_back__"), "Welcome back");
    }

    #[test]
    fn test_key_to_readable_text_empty_inputs() {
        assert_eq!(key_to_readable_text(""), "");
        assert_eq!(key_to_readable_text("___"), "");
    }

    // ==================== Key List Tests ====================

    #[test]
    fn test_parse_key_list_trims_and_dedupes() {
        assert_eq!(
            parse_key_list("key1, key2 , key1"),
            vec!["key1".to_string(), "key2".to_string()]
        );
    }

    #[test]
    fn test_parse_key_list_drops_empty_pieces() {
        assert_eq!(parse_key_list("key1,,  ,key2,"), vec!["key1", "key2"]);
        assert!(parse_key_list("").is_empty());
        assert!(parse_key_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_key_list_single_key() {
        assert_eq!(parse_key_list("single_key"), vec!["single_key"]);
    }

    #[test]
    fn test_is_multi_key_input() {
        assert!(is_multi_key_input("key1,key2"));
        assert!(!is_multi_key_input("single_key"));
        assert!(!is_multi_key_input("key1,"));
        assert!(!is_multi_key_input(""));
    }

    // ==================== Key Validation Tests ====================

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("welcome_message"));
        assert!(is_valid_key("_private"));
        assert!(is_valid_key("Key2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("2fast"));
        assert!(!is_valid_key("has space"));
        assert!(!is_valid_key("dash-key"));
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_readable_text_never_starts_or_ends_with_space(key in "[a-zA-Z_]{0,32}") {
            let text = key_to_readable_text(&key);
            prop_assert_eq!(text.trim(), text.as_str());
        }

        #[test]
        fn prop_parse_key_list_is_idempotent(input in "[a-z_, ]{0,64}") {
            let once = parse_key_list(&input);
            let again = parse_key_list(&once.join(","));
            prop_assert_eq!(once, again);
        }

        #[test]
        fn prop_parse_key_list_has_no_duplicates(input in "[a-z_, ]{0,64}") {
            let keys = parse_key_list(&input);
            let mut unique = keys.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), keys.len());
        }
    }
}
