//! Tokenizer for CDC text.

use crate::error::ParsingError;

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Byte offset into the input
    pub position: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

/// Token types in CDC text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// '['
    OpenBracket,
    /// ']'
    CloseBracket,
    /// '('
    OpenParen,
    /// ')'
    CloseParen,
    /// '{'
    OpenBrace,
    /// '}'
    CloseBrace,
    /// ','
    Comma,
    /// ':'
    Colon,
    /// '='
    Equals,
    /// '/'
    Slash,
    /// Element symbol outside a parameter block (`R`, `Ws`, ...)
    Symbol,
    /// Parameter name or the fixed flag inside a parameter block
    Identifier,
    /// Numeric literal, including `inf`
    Number,
    /// Free text after ':' up to the closing brace
    Label,
}

impl TokenKind {
    fn punctuation(ch: char) -> Option<Self> {
        match ch {
            '[' => Some(Self::OpenBracket),
            ']' => Some(Self::CloseBracket),
            '(' => Some(Self::OpenParen),
            ')' => Some(Self::CloseParen),
            '{' => Some(Self::OpenBrace),
            '}' => Some(Self::CloseBrace),
            ',' => Some(Self::Comma),
            ':' => Some(Self::Colon),
            '=' => Some(Self::Equals),
            '/' => Some(Self::Slash),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Element symbols and connection brackets
    Structure,
    /// Inside `{...}`
    Block,
    /// After ':' inside `{...}`
    Label,
}

/// Tokenizer for CDC text.
///
/// Letters mean different things inside and outside parameter blocks, so
/// the tokenizer tracks whether it is between `{` and `}`.
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    column: usize,
    mode: Mode,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 1,
            mode: Mode::Structure,
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParsingError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParsingError> {
        if self.mode == Mode::Label {
            return Ok(self.read_label());
        }

        self.skip_whitespace();

        let Some((position, ch)) = self.chars.peek().copied() else {
            return Ok(None);
        };
        let column = self.column;

        if let Some(kind) = TokenKind::punctuation(ch) {
            self.advance();
            self.mode = match (kind, self.mode) {
                (TokenKind::OpenBrace, _) => Mode::Block,
                (TokenKind::CloseBrace, _) => Mode::Structure,
                (TokenKind::Colon, Mode::Block) => Mode::Label,
                (_, mode) => mode,
            };
            return Ok(Some(Token {
                kind,
                text: ch.to_string(),
                position,
                column,
            }));
        }

        let (kind, text) = match (self.mode, ch) {
            (Mode::Structure, c) if c.is_ascii_alphabetic() => (TokenKind::Symbol, self.read_symbol()),
            (_, '-' | '+' | '.' | '0'..='9') => (TokenKind::Number, self.read_number()),
            (Mode::Block, c) if c.is_ascii_alphabetic() || c == '_' => {
                let text = self.read_identifier();
                if text == "inf" {
                    (TokenKind::Number, text)
                } else {
                    (TokenKind::Identifier, text)
                }
            }
            _ => {
                return Err(ParsingError::UnexpectedToken {
                    position,
                    token: ch.to_string(),
                });
            }
        };

        Ok(Some(Token {
            kind,
            text,
            position,
            column,
        }))
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    /// Character `n` positions past the next one.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(pos, _)| pos)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek_char() {
            if !predicate(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    /// One letter followed by any lowercase letters: `R`, `Ws`, `La`.
    fn read_symbol(&mut self) -> String {
        let mut text = String::new();
        if let Some(first) = self.advance() {
            text.push(first);
        }
        text.push_str(&self.take_while(|c| c.is_ascii_lowercase()));
        text
    }

    fn read_identifier(&mut self) -> String {
        self.take_while(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign
        if let Some(sign @ ('-' | '+')) = self.peek_char() {
            text.push(sign);
            self.advance();
        }

        // Signed infinity
        if self.peek_char() == Some('i') {
            text.push_str(&self.read_identifier());
            return text;
        }

        // Integer part
        text.push_str(&self.take_while(|c| c.is_ascii_digit()));

        // Decimal part
        if self.peek_char() == Some('.') {
            text.push('.');
            self.advance();
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        // Exponent part. A marker directly followed by a letter starts an
        // identifier instead; anything else belongs to the literal, so a
        // truncated `1e` or `1.0E-` stays one malformed number.
        if let Some(marker @ ('e' | 'E')) = self.peek_char() {
            let starts_identifier = self.peek_nth(1).is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
            if !starts_identifier {
                text.push(marker);
                self.advance();
                if let Some(sign @ ('-' | '+')) = self.peek_char() {
                    text.push(sign);
                    self.advance();
                }
                text.push_str(&self.take_while(|c| c.is_ascii_digit()));
            }
        }

        text
    }

    /// Free text up to the closing brace, trimmed.
    fn read_label(&mut self) -> Option<Token> {
        self.mode = Mode::Block;
        self.skip_whitespace();
        let position = self.offset();
        let column = self.column;
        let text = self.take_while(|c| c != '}');
        if text.is_empty() && self.peek_char().is_none() {
            return None;
        }
        Some(Token {
            kind: TokenKind::Label,
            text: text.trim_end().to_string(),
            position,
            column,
        })
    }
}

/// Parse the text of a [`TokenKind::Number`] token.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| !value.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_symbols_split_on_uppercase() {
        assert_eq!(texts("RLCQ"), vec!["R", "L", "C", "Q"]);
        assert_eq!(texts("WsWoLaHa"), vec!["Ws", "Wo", "La", "Ha"]);
        assert_eq!(texts("Vtpas"), vec!["Vtpas"]);
        assert_eq!(texts("bA"), vec!["b", "A"]);
    }

    #[test]
    fn test_brackets_and_whitespace() {
        use TokenKind::*;
        assert_eq!(
            kinds(" [R (L C)] "),
            vec![OpenBracket, Symbol, OpenParen, Symbol, Symbol, CloseParen, CloseBracket]
        );
    }

    #[test]
    fn test_parameter_block() {
        use TokenKind::*;
        assert_eq!(
            kinds("R{R=8.3E+01/2.0E+01/9.6E+01:test}"),
            vec![
                Symbol, OpenBrace, Identifier, Equals, Number, Slash, Number, Slash, Number, Colon,
                Label, CloseBrace
            ]
        );
        assert_eq!(
            texts("C{C=4.0E-03F}"),
            vec!["C", "{", "C", "=", "4.0E-03", "F", "}"]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("Q{n=-inf/inf,Y=1e5}")[4], "-inf");
        assert_eq!(texts("Q{n=-inf/inf,Y=1e5}")[6], "inf");
        assert_eq!(texts("Q{n=-inf/inf,Y=1e5}")[10], "1e5");
        assert_eq!(parse_number("8.3E+01"), Some(83.0));
        assert_eq!(parse_number("-inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn test_label_text() {
        let tokens = Tokenizer::new("R{R=1: my label }").tokenize().unwrap();
        assert_eq!(tokens[5].kind, TokenKind::Colon);
        let label = &tokens[6];
        assert_eq!(label.kind, TokenKind::Label);
        assert_eq!(label.text, "my label");
        assert_eq!(label.position, 7);
        assert_eq!(tokens[7].kind, TokenKind::CloseBrace);
    }

    #[test]
    fn test_truncated_exponent_stays_in_number() {
        assert_eq!(texts("R{R=1e}"), vec!["R", "{", "R", "=", "1e", "}"]);
        assert_eq!(texts("R{R=1.0E-}"), vec!["R", "{", "R", "=", "1.0E-", "}"]);
        assert_eq!(texts("R{R=1e/2E+1}")[4..7], ["1e", "/", "2E+1"]);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("1.0E-"), None);

        // The fixed flag after a complete exponent is still its own token.
        assert_eq!(texts("C{C=4.0E-03F}")[4..6], ["4.0E-03", "F"]);
    }

    #[test]
    fn test_positions() {
        let tokens = Tokenizer::new("R (C)").tokenize().unwrap();
        assert_eq!(tokens[1].position, 2);
        assert_eq!(tokens[1].column, 3);
    }

    #[test]
    fn test_unexpected_character() {
        let err = Tokenizer::new("R#C").tokenize().unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnexpectedToken {
                position: 1,
                token: "#".to_string()
            }
        );
    }
}
