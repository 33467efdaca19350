//! Token source for pre-tokenized documents.

use docmark_renderer::{Token, Tokenizer};

/// Tokenizer over token trees stored as JSON.
///
/// Included files are expected to carry a JSON token array, the same
/// format the `render` command accepts. Content that does not parse as
/// one is treated as a single opaque text block, so a plain-text include
/// still shows up in the output instead of disappearing.
pub(crate) struct JsonTokenizer;

impl Tokenizer for JsonTokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        serde_json::from_str(source).unwrap_or_else(|_| {
            vec![Token::Text {
                text: source.to_owned(),
            }]
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parses_token_array() {
        let source = r#"[{"kind": "text", "text": "hello"}]"#;
        assert_eq!(
            JsonTokenizer.tokenize(source),
            vec![Token::Text {
                text: "hello".to_owned()
            }]
        );
    }

    #[test]
    fn test_plain_text_falls_back_to_single_token() {
        let source = "not json at all";
        assert_eq!(
            JsonTokenizer.tokenize(source),
            vec![Token::Text {
                text: source.to_owned()
            }]
        );
    }
}
