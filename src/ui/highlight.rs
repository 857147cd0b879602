//! Highlighting the queried word inside sample sentences

use std::ops::Range;

use super::palette::{Palette, Role};

/// Highlights `word` in every whitespace-separated token of `sentence`
///
/// Each token is searched independently, case-insensitively, and only its
/// first match is wrapped. Tokens are re-joined with single spaces. If no
/// token matches, the sentence comes back unchanged.
pub fn highlight_tokens(sentence: &str, word: &str, palette: &Palette) -> String {
    let mut matched = false;
    let tokens: Vec<String> = sentence
        .split_whitespace()
        .map(|token| match find_ignore_case(token, word) {
            Some(span) => {
                matched = true;
                format!(
                    "{}{}{}",
                    &token[..span.start],
                    palette.paint(Role::Highlight, &token[span.clone()]),
                    &token[span.end..]
                )
            }
            None => token.to_string(),
        })
        .collect();

    if matched {
        tokens.join(" ")
    } else {
        sentence.to_string()
    }
}

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        let mut rest = haystack[start..].chars();
        let mut end = start;
        for n in needle.chars() {
            match rest.next() {
                Some(h) if chars_eq_ignore_case(h, n) => end += h.len_utf8(),
                _ => return None,
            }
        }
        Some(start..end)
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
