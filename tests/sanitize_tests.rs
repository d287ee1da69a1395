use hub_chat::sanitize::{sanitize, sanitize_bytes, sanitize_with_limit};
use hub_chat_config::MAX_MESSAGE_LENGTH;
use proptest::prelude::*;

proptest! {
    #[test]
    fn output_is_bounded_and_bracket_free(raw in any::<String>()) {
        let out = sanitize(&raw);
        prop_assert!(out.chars().count() <= MAX_MESSAGE_LENGTH);
        prop_assert!(!out.contains('<'));
        prop_assert!(!out.contains('>'));
    }

    #[test]
    fn sanitize_is_idempotent(raw in any::<String>()) {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    #[test]
    fn long_markup_heavy_input_is_idempotent(raw in "[<> a-z\t\n]{0,1200}") {
        let once = sanitize(&raw);
        prop_assert!(once.chars().count() <= MAX_MESSAGE_LENGTH);
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    #[test]
    fn output_has_no_surrounding_whitespace(raw in any::<String>()) {
        let out = sanitize(&raw);
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn small_limits_hold(raw in any::<String>(), limit in 0usize..20) {
        prop_assert!(sanitize_with_limit(&raw, limit).chars().count() <= limit);
    }
}

#[test]
fn test_truncation_before_trim() {
    // 499 spaces then text: truncation keeps one 'x', trim drops the spaces
    let raw = format!("{}xyz", " ".repeat(MAX_MESSAGE_LENGTH - 1));
    assert_eq!(sanitize(&raw), "x");
}

#[test]
fn test_invalid_utf8_is_empty() {
    assert_eq!(sanitize_bytes(&[0xff, 0xfe, b'h', b'i']), "");
    assert_eq!(sanitize_bytes(b"  <hi>  "), "hi");
}
