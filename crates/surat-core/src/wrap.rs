//! Greedy line wrapping with forced hyphenation of over-long words.
//!
//! Clause text is wrapped before it is injected into narrow table cells.
//! Existing line breaks are hard boundaries and every line is wrapped on its
//! own. Wrapping is not idempotent: a forced split inserts a hyphen that a
//! second pass treats as part of the word.

/// Default maximum line length, in characters
pub const DEFAULT_MAX_LINE_LENGTH: usize = 52;

/// Smallest width that still lets a forced split make progress
const MIN_LINE_LENGTH: usize = 2;

/// Wrap `text` so that no line is longer than `max_line_length` characters.
///
/// Words longer than the limit are cut after `max_line_length - 1`
/// characters and a hyphen is appended; the remainder continues as a new
/// word. Empty input lines are kept as empty lines.
///
/// # Examples
///
/// ```
/// use surat_core::wrap::wrap;
///
/// assert_eq!(wrap("short clause", 52), "short clause");
/// assert_eq!(wrap("aaaa bbbb", 6), "aaaa\nbbbb");
/// assert_eq!(wrap("abcdefgh", 4), "abc-\ndef-\ngh");
/// ```
#[must_use = "returns the wrapped text"]
pub fn wrap(text: &str, max_line_length: usize) -> String {
    let max = max_line_length.max(MIN_LINE_LENGTH);
    let mut lines: Vec<String> = Vec::new();

    for source_line in text.split('\n') {
        let start = lines.len();
        wrap_line(source_line, max, &mut lines);
        if lines.len() == start {
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn wrap_line(line: &str, max: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        if word.len() > max {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            while word.len() > max {
                let rest = word.split_off(max - 1);
                let mut piece: String = word.iter().collect();
                piece.push('-');
                out.push(piece);
                word = rest;
            }
        }

        let separator = usize::from(!current.is_empty());
        if current_len + separator + word.len() > max {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        } else if separator == 1 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if !current.is_empty() {
        out.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let text = "Undang-Undang Nomor 17 Tahun 2003";
        assert_eq!(wrap(text, DEFAULT_MAX_LINE_LENGTH), text);
    }

    #[test]
    fn test_greedy_break() {
        assert_eq!(wrap("one two three four", 9), "one two\nthree\nfour");
    }

    #[test]
    fn test_exact_fit_is_not_broken() {
        assert_eq!(wrap("abc def", 7), "abc def");
        assert_eq!(wrap("abc defg", 7), "abc\ndefg");
    }

    #[test]
    fn test_existing_breaks_are_hard_boundaries() {
        assert_eq!(wrap("a b\nc d", 52), "a b\nc d");
        assert_eq!(wrap("first\n\nthird", 52), "first\n\nthird");
    }

    #[test]
    fn test_forced_split_hyphenates() {
        let word = "x".repeat(12);
        let wrapped = wrap(&word, 5);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines, vec!["xxxx-", "xxxx-", "xxxx"]);
    }

    #[test]
    fn test_forced_split_flushes_pending_line_first() {
        let wrapped = wrap("ab abcdefghij", 5);
        assert_eq!(wrapped, "ab\nabcd-\nefgh-\nij");
    }

    #[test]
    fn test_remainder_joins_following_words() {
        assert_eq!(wrap("abcdefg hi", 5), "abcd-\nefg\nhi");
        assert_eq!(wrap("abcdef g", 5), "abcd-\nef g");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "éééé éééé";
        assert_eq!(wrap(text, 9), text);
        assert_eq!(wrap(text, 8), "éééé\néééé");
    }

    #[test]
    fn test_tiny_width_is_clamped() {
        assert_eq!(wrap("abc", 0), "a-\nbc");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wrap("", 52), "");
    }
}
