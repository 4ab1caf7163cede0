use super::boundaries::*;
use super::classify::*;

#[test]
fn test_classify_char() {
    assert_eq!(classify_char(' '), CharClass::Whitespace);
    assert_eq!(classify_char('\t'), CharClass::Whitespace);
    assert_eq!(classify_char('a'), CharClass::Alphanumeric);
    assert_eq!(classify_char('7'), CharClass::Alphanumeric);
    assert_eq!(classify_char('_'), CharClass::Alphanumeric);
    assert_eq!(classify_char('-'), CharClass::Symbol);
    assert!(is_sentence_end('?'));
    assert!(!is_sentence_end(','));
}

#[test]
fn test_char_spans_count_chars_not_bytes() {
    assert_eq!(char_spans("añb"), vec![0..1, 1..2, 2..3]);
    assert!(char_spans("").is_empty());
}

#[test]
fn test_word_spans_basic() {
    assert_eq!(word_spans("hello world"), vec![0..5, 6..11]);
    assert_eq!(word_spans("hello    world"), vec![0..5, 9..14]);
}

#[test]
fn test_word_spans_symbols() {
    assert_eq!(word_spans("foo->bar"), vec![0..3, 3..5, 5..8]);
}

#[test]
fn test_word_spans_underscore() {
    assert_eq!(word_spans("hello_world"), vec![0..11]);
}

#[test]
fn test_word_spans_edge_cases() {
    assert!(word_spans("").is_empty());
    assert!(word_spans("   ").is_empty());
    assert_eq!(word_spans("  a "), vec![2..3]);
}

#[test]
fn test_sentence_spans() {
    let text = "Sales grew. Costs fell! Profit rose?";
    assert_eq!(sentence_spans(text), vec![0..11, 12..23, 24..36]);
}

#[test]
fn test_sentence_spans_ignore_inner_periods() {
    // "3.5" has no whitespace after the period
    assert_eq!(sentence_spans("Up 3.5 percent. Done"), vec![0..15, 16..20]);
}

#[test]
fn test_sentence_spans_newline_breaks() {
    assert_eq!(sentence_spans("first line\nsecond  "), vec![0..10, 11..17]);
    assert_eq!(sentence_spans("  ! ok"), vec![2..3, 4..6]);
}

#[test]
fn test_line_spans_wrap_at_whitespace() {
    let text = "the quick brown fox";
    assert_eq!(line_spans(text, 10), vec![0..9, 10..19]);
    assert_eq!(line_spans(text, 80), vec![0..19]);
}

#[test]
fn test_line_spans_long_word_breaks_mid_word() {
    assert_eq!(line_spans("abcdefgh", 3), vec![0..3, 3..6, 6..8]);
}

#[test]
fn test_line_spans_hard_newlines() {
    assert_eq!(line_spans("ab\n\ncd", 10), vec![0..2, 4..6]);
}

#[test]
fn test_line_spans_wide_chars() {
    // Each CJK character takes two columns
    assert_eq!(line_spans("日本語", 4), vec![0..2, 2..3]);
}
