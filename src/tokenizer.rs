//! Splits a class attribute value into raw class tokens.

use std::ops::Range;

/// One whitespace-delimited class occurrence in the source string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// The exact substring as typed
    pub text: &'a str,

    /// Byte offset of `text` in the source string
    pub start: usize,
}

impl<'a> RawToken<'a> {
    /// Byte range of the token in the source string
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// Split `input` on whitespace runs without breaking bracketed arbitrary values.
///
/// Whitespace inside an open `[` does not end a token, so
/// `grid-cols-[repeat(auto-fit, minmax(250px,1fr))]` stays whole. If the input
/// ends while a bracket is still open, the pending segment falls back to a
/// plain whitespace split.
pub fn tokenize(input: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut token_start: Option<usize> = None;

    for (idx, ch) in input.char_indices() {
        match ch {
            '[' => {
                depth += 1;
                token_start.get_or_insert(idx);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                token_start.get_or_insert(idx);
            }
            c if c.is_whitespace() => {
                if depth == 0 {
                    if let Some(start) = token_start.take() {
                        tokens.push(RawToken { text: &input[start..idx], start });
                    }
                }
            }
            _ => {
                token_start.get_or_insert(idx);
            }
        }
    }

    if let Some(start) = token_start {
        let rest = &input[start..];
        if depth == 0 {
            tokens.push(RawToken { text: rest, start });
        } else {
            // Unclosed bracket: don't let it swallow the following classes.
            tokens.extend(split_plain(rest, start));
        }
    }

    tokens
}

/// True when every `]` in `text` closes an earlier `[` and none stay open
pub fn has_balanced_brackets(text: &str) -> bool {
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '[' => depth += 1,
            ']' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

fn split_plain(segment: &str, base: usize) -> impl Iterator<Item = RawToken<'_>> {
    let mut offset = 0;
    segment.split(char::is_whitespace).filter_map(move |part| {
        let start = base + offset;
        offset += part.len() + segment[offset + part.len()..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        if part.is_empty() {
            None
        } else {
            Some(RawToken { text: part, start })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_splits_on_whitespace_runs() {
        assert_eq!(texts("  p-4\tbg-red-500 \n text-white  "), vec!["p-4", "bg-red-500", "text-white"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_bracket_guard_keeps_spaces_inside_arbitrary_value() {
        assert_eq!(
            texts("grid-cols-[repeat(auto-fit, minmax(250px,1fr))] gap-4"),
            vec!["grid-cols-[repeat(auto-fit, minmax(250px,1fr))]", "gap-4"]
        );
    }

    #[test]
    fn test_bracket_safety_without_spaces() {
        assert_eq!(tokenize("grid-cols-[repeat(auto-fit,minmax(250px,1fr))] gap-4").len(), 2);
    }

    #[test]
    fn test_unclosed_bracket_degrades_to_plain_split() {
        assert_eq!(texts("p-4 w-[10px h-2"), vec!["p-4", "w-[10px", "h-2"]);
    }

    #[test]
    fn test_balanced_brackets() {
        assert!(has_balanced_brackets("w-[calc(100%_-_1rem)]"));
        assert!(has_balanced_brackets("[a b][c]"));
        assert!(has_balanced_brackets("flex"));
        assert!(!has_balanced_brackets("bg-[a"));
        assert!(!has_balanced_brackets("text-]"));
        assert!(!has_balanced_brackets("]["));
    }

    #[test]
    fn test_stray_closing_bracket() {
        assert_eq!(texts("] p-4"), vec!["]", "p-4"]);
    }

    #[test]
    fn test_spans_point_back_into_source() {
        let input = " flex  hover:p-4 ";
        for token in tokenize(input) {
            assert_eq!(&input[token.span()], token.text);
        }
        assert_eq!(tokenize(input)[1].start, 7);
    }

    #[test]
    fn test_spans_after_unclosed_bracket() {
        let input = "a w-[1 é b";
        for token in tokenize(input) {
            assert_eq!(&input[token.span()], token.text);
        }
    }

    #[test]
    fn test_round_trip_up_to_whitespace() {
        let input = "flex   md:hover:bg-red-500 w-[calc(100%_-_2rem)]";
        let joined = texts(input).join(" ");
        assert_eq!(joined, input.split_whitespace().collect::<Vec<_>>().join(" "));
    }
}
