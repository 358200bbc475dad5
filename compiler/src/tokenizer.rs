use crate::error::GlotError;
use crate::utils::{error, quote};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref TOKEN_REGEX:   Regex = Regex::new(r"((?:-|\b)\d+\b|[=;{}<>,]|\[translated\]|\b[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*\b|//.*|\s+)").unwrap();
    pub static ref WHITESPACE_RX: Regex = Regex::new(r"^(//.*|\s+)$").unwrap();
}

#[derive(Debug, PartialEq)]
pub struct Token {
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

/// Splits `.glot` source into tokens with line/column positions, dropping
/// whitespace and `//` comments and appending a final empty EOF token.
pub fn tokenize_schema(text: &str) -> Result<Vec<Token>, GlotError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        let start = mat.start();
        let end   = mat.end();
        let part  = mat.as_str();

        if start > last_end {
            // Unexpected text between last_end and start
            let unexpected = &text[last_end..start];
            return Err(error(
                &format!("Syntax error: {}", quote(unexpected)),
                line,
                column,
            ));
        }

        if !WHITESPACE_RX.is_match(part) && !part.starts_with("//") {
            tokens.push(Token {
                text:   part.to_string(),
                line,
                column,
            });
        }

        // Update line/column
        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.len() + 1;
            }
        } else {
            column += part.len();
        }

        last_end = end;
    }

    if last_end != text.len() {
        let unexpected = &text[last_end..];
        return Err(error(
            &format!("Syntax error: {}", quote(unexpected)),
            line,
            column,
        ));
    }

    // Append EOF token
    tokens.push(Token {
        text:   "".to_string(),
        line,
        column,
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let input = "string title = 2;";
        let expected = vec![
            Token { text: "string".into(), line: 1, column: 1 },
            Token { text: "title".into(),  line: 1, column: 8 },
            Token { text: "=".into(),      line: 1, column: 14 },
            Token { text: "2".into(),      line: 1, column: 16 },
            Token { text: ";".into(),      line: 1, column: 17 },
            Token { text: "".into(),       line: 1, column: 18 },
        ];
        let got = tokenize_schema(input).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_tokenize_translated_tag() {
        let input = "[translated]";
        let expected = vec![
            Token { text: "[translated]".into(), line: 1, column: 1 },
            Token { text: "".into(),             line: 1, column: 13 },
        ];
        let got = tokenize_schema(input).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_tokenize_dotted_identifier() {
        let input = "google.protobuf.Timestamp created = 7;";
        let got = tokenize_schema(input).unwrap();
        assert_eq!(got[0].text, "google.protobuf.Timestamp");
        assert_eq!(got[1].text, "created");
    }

    #[test]
    fn test_tokenize_map_punctuation() {
        let input = "map<string, Section>";
        let tokens = tokenize_schema(input).unwrap();
        let texts: Vec<&str> = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["map", "<", "string", ",", "Section", ">", ""]);
    }

    #[test]
    fn test_tokenize_unexpected_text() {
        let input = "string title = 2 @";
        let err = tokenize_schema(input).unwrap_err();
        assert!(
            matches!(err, GlotError::ParseError { .. }),
            "expected a ParseError but got {:?}",
            err
        );
    }
}
