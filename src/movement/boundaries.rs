//! String-based unit segmentation
//!
//! Each function splits a text leaf into the spans a text walker stops on.
//! Spans are half-open ranges of character indices (not bytes).

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::classify::{classify_char, is_sentence_end, CharClass};

/// One span per character, whitespace included
pub fn char_spans(text: &str) -> Vec<Range<usize>> {
    (0..text.chars().count()).map(|i| i..i + 1).collect()
}

/// Word spans: maximal runs of one character class, whitespace dropped
///
/// # Examples
/// ```
/// use monster_nav::movement::boundaries::word_spans;
///
/// assert_eq!(word_spans("hello world"), vec![0..5, 6..11]);
/// assert_eq!(word_spans("foo->bar"), vec![0..3, 3..5, 5..8]);
/// ```
pub fn word_spans(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < len {
        let start = pos;
        let class = classify_char(chars[pos]);
        while pos < len && classify_char(chars[pos]) == class {
            pos += 1;
        }
        if class != CharClass::Whitespace {
            spans.push(start..pos);
        }
    }

    spans
}

/// Sentence spans
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the text, or at a hard newline. Leading and trailing whitespace is not
/// part of a sentence.
pub fn sentence_spans(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        let Some(s) = start else {
            if !c.is_whitespace() {
                start = Some(i);
                if is_sentence_end(c) && (i + 1 == len || chars[i + 1].is_whitespace()) {
                    spans.push(i..i + 1);
                    start = None;
                }
            }
            continue;
        };

        if c == '\n' {
            spans.push(s..trim_end(&chars, s, i));
            start = None;
        } else if is_sentence_end(c) && (i + 1 == len || chars[i + 1].is_whitespace()) {
            spans.push(s..i + 1);
            start = None;
        }
    }

    if let Some(s) = start {
        spans.push(s..trim_end(&chars, s, len));
    }

    spans
}

/// Display-line spans, wrapped at `width` terminal columns
///
/// Lines break at the last whitespace that fits, or mid-word when a single
/// word is wider than the line. Hard newlines always break.
pub fn line_spans(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut hard_start = 0;

    for i in 0..=chars.len() {
        if i == chars.len() || chars[i] == '\n' {
            wrap_line(&chars, hard_start, i, width, &mut spans);
            hard_start = i + 1;
        }
    }

    spans
}

fn wrap_line(chars: &[char], from: usize, to: usize, width: usize, spans: &mut Vec<Range<usize>>) {
    let mut start = skip_whitespace(chars, from, to);

    while start < to {
        let mut col = 0;
        let mut end = start;
        let mut last_break = None;

        while end < to {
            let w = chars[end].width().unwrap_or(0);
            if col + w > width && end > start {
                break;
            }
            col += w;
            if chars[end].is_whitespace() {
                last_break = Some(end);
            }
            end += 1;
        }

        let brk = if end < to {
            last_break.filter(|&b| b > start).unwrap_or(end)
        } else {
            end
        };

        let trimmed = trim_end(chars, start, brk);
        if trimmed > start {
            spans.push(start..trimmed);
        }
        start = skip_whitespace(chars, brk, to);
    }
}

fn skip_whitespace(chars: &[char], mut pos: usize, to: usize) -> usize {
    while pos < to && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

fn trim_end(chars: &[char], start: usize, mut end: usize) -> usize {
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    end
}
