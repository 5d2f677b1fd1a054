use std::sync::LazyLock;

use regex::Regex;

use crate::model::token::Token;

// Literal patterns; construction cannot fail.
static RUN_BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S*$").expect("run-before pattern"));
static RUN_AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S*").expect("run-after pattern"));

/// Snap a caret to a valid byte offset: clamp to the end, then floor to a char boundary.
pub fn clamp_caret(text: &str, caret: usize) -> usize {
    let mut caret = caret.min(text.len());
    while !text.is_char_boundary(caret) {
        caret -= 1;
    }
    caret
}

/// Find the non-whitespace run touching `caret`.
///
/// The run may extend to both sides of the caret, so a caret in the middle of
/// `@alice` yields the whole word. With whitespace on both sides the token is
/// empty and starts at the caret.
pub fn locate(text: &str, caret: usize) -> Token {
    let caret = clamp_caret(text, caret);
    let (before, after) = text.split_at(caret);

    let left = RUN_BEFORE.find(before).map_or("", |m| m.as_str());
    let right = RUN_AFTER.find(after).map_or("", |m| m.as_str());

    Token {
        text: format!("{left}{right}"),
        start: caret - left.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(text: &str, start: usize) -> Token {
        Token {
            text: text.into(),
            start,
        }
    }

    #[test]
    fn caret_at_end_of_trigger_word() {
        assert_eq!(locate("hello @al", 9), tok("@al", 6));
    }

    #[test]
    fn caret_mid_word_takes_whole_word() {
        assert_eq!(locate("hello @alice bye", 8), tok("@alice", 6));
    }

    #[test]
    fn caret_before_word_touches_from_right() {
        assert_eq!(locate("hi @bob", 3), tok("@bob", 3));
    }

    #[test]
    fn caret_after_space_is_empty() {
        assert_eq!(locate("hello ", 6), tok("", 6));
        assert_eq!(locate("a  b", 2), tok("", 2));
    }

    #[test]
    fn plain_word_is_not_trigger() {
        let t = locate("plain text", 5);
        assert_eq!(t, tok("plain", 0));
        assert!(!t.is_trigger('@'));
    }

    #[test]
    fn empty_text() {
        assert_eq!(locate("", 0), tok("", 0));
    }

    #[test]
    fn caret_past_end_is_clamped() {
        assert_eq!(locate("@x", 40), tok("@x", 0));
    }

    #[test]
    fn caret_inside_multibyte_char_floors() {
        // 'é' is two bytes; offset 2 lands inside it
        assert_eq!(clamp_caret("@é", 2), 1);
        assert_eq!(locate("@é", 2), tok("@é", 0));
    }

    #[test]
    fn newlines_delimit_tokens() {
        assert_eq!(locate("line one\n@ca", 12), tok("@ca", 9));
    }

    #[test]
    fn token_text_never_contains_whitespace() {
        let samples = ["", " ", "a b", "@al ice", "\t@x\ny", "  @  ", "tab\there"];
        for text in samples {
            for caret in 0..=text.len() {
                let t = locate(text, caret);
                assert!(
                    !t.text.chars().any(char::is_whitespace),
                    "{text:?} at {caret} gave {t:?}"
                );
                assert_eq!(&text[t.start..t.end()], t.text);
            }
        }
    }
}
