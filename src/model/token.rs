use serde::Serialize;

/// The whitespace-delimited word straddling the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the first character of `text`
    pub start: usize,
}

impl Token {
    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_trigger(&self, trigger: char) -> bool {
        self.text.starts_with(trigger)
    }

    /// The search string for the ranker: trigger stripped, case-folded.
    /// `None` when the token is not a mention trigger.
    pub fn query(&self, trigger: char) -> Option<String> {
        self.text
            .strip_prefix(trigger)
            .map(|rest| rest.to_lowercase())
    }
}

/// A replace-range edit the host applies to its buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub delete_len: usize,
    pub insert: String,
}

impl TextEdit {
    /// Apply the edit and return the caret position after the inserted text.
    /// Ranges past the end of `buffer` are clamped.
    pub fn apply(&self, buffer: &mut String) -> usize {
        let start = self.start.min(buffer.len());
        let end = (self.start + self.delete_len).min(buffer.len());
        buffer.replace_range(start..end, &self.insert);
        start + self.insert.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_strips_trigger_and_folds_case() {
        let token = Token {
            text: "@AlI".into(),
            start: 0,
        };
        assert!(token.is_trigger('@'));
        assert_eq!(token.query('@').as_deref(), Some("ali"));
        assert_eq!(token.end(), 4);
    }

    #[test]
    fn plain_word_has_no_query() {
        let token = Token {
            text: "plain".into(),
            start: 0,
        };
        assert!(!token.is_trigger('@'));
        assert_eq!(token.query('@'), None);
    }

    #[test]
    fn apply_replaces_range() {
        let mut buf = String::from("hello @al world");
        let edit = TextEdit {
            start: 6,
            delete_len: 3,
            insert: "@Albert ".into(),
        };
        let caret = edit.apply(&mut buf);
        assert_eq!(buf, "hello @Albert  world");
        assert_eq!(caret, 14);
    }

    #[test]
    fn apply_clamps_out_of_range() {
        let mut buf = String::from("@a");
        let edit = TextEdit {
            start: 0,
            delete_len: 10,
            insert: "@Ann ".into(),
        };
        assert_eq!(edit.apply(&mut buf), 5);
        assert_eq!(buf, "@Ann ");
    }
}
