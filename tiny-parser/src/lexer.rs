//! Lexer for the tiny language
//!
//! Tokenizes one line of source text into an ordered token sequence.
//! ASCII whitespace is skipped, alphabetic words become names, literals or
//! keywords, and `-` directly followed by a digit starts a negative
//! integer literal.

use crate::{
    error::{ParseError as Error, Result},
    span::Span,
    token::{word_to_token, Keyword, Token, TokenKind},
};
use tracing::debug;

/// Lexical analyzer
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        debug!(count = tokens.len(), "tokenized line");
        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }

    /// Get the next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();

        let start_pos = self.position;

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let token = match ch {
            '(' => self.single(Keyword::LeftParen),
            ')' => self.single(Keyword::RightParen),
            '+' => self.single(Keyword::Plus),
            '*' => self.single(Keyword::Star),
            '/' => self.single(Keyword::Slash),
            '<' => self.single(Keyword::Less),
            '=' => self.single(Keyword::Equal),
            '!' => self.single(Keyword::Bang),

            // `-7` is a literal, `- 7` is subtraction followed by 7
            '-' => match self.peek_char() {
                Some(next) if next.is_ascii_digit() => self.read_number()?,
                _ => self.single(Keyword::Minus),
            },

            '&' => self.double('&', Keyword::AndAnd)?,
            '|' => self.double('|', Keyword::OrOr)?,

            ch if ch.is_ascii_digit() => self.read_number()?,
            ch if ch.is_ascii_alphabetic() => self.read_word()?,

            ch => {
                return Err(Error::UnexpectedChar {
                    ch,
                    position: start_pos,
                })
            }
        };

        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn single(&mut self, keyword: Keyword) -> Token {
        let start_pos = self.position;
        self.advance();
        Token::new(TokenKind::Keyword(keyword), Span::new(start_pos, self.position))
    }

    /// Two-character operator made of `ch` repeated, like `&&`
    fn double(&mut self, ch: char, keyword: Keyword) -> Result<Token> {
        let start_pos = self.position;
        if self.peek_char() != Some(ch) {
            return Err(Error::UnexpectedChar {
                ch,
                position: start_pos,
            });
        }
        self.advance();
        self.advance();
        Ok(Token::new(TokenKind::Keyword(keyword), Span::new(start_pos, self.position)))
    }

    fn read_number(&mut self) -> Result<Token> {
        let start_pos = self.position;
        let mut literal = String::new();

        if self.current_char() == Some('-') {
            literal.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            literal.push(ch);
            self.advance();
        }

        if let Some(ch) = self.current_char().filter(|ch| ch.is_ascii_alphabetic()) {
            return Err(Error::UnexpectedLetter {
                ch,
                position: self.position,
            });
        }

        let span = Span::new(start_pos, self.position);
        let value = literal
            .parse::<i64>()
            .map_err(|_| Error::IntegerOutOfRange {
                literal: literal.clone(),
                span,
            })?;

        Ok(Token::new(TokenKind::Int(value), span))
    }

    fn read_word(&mut self) -> Result<Token> {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(ch) = self.current_char() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            word.push(ch);
            self.advance();
        }

        if let Some(ch) = self.current_char().filter(|ch| ch.is_ascii_digit()) {
            return Err(Error::UnexpectedDigit {
                ch,
                position: self.position,
            });
        }

        Ok(Token::new(word_to_token(&word), Span::new(start_pos, self.position)))
    }
}

/// Tokenize `input` in one call
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_string(input: &str) -> Vec<TokenKind> {
        let tokens = tokenize(input).expect("Lexing should succeed");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    fn kw(keyword: Keyword) -> TokenKind {
        TokenKind::Keyword(keyword)
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex_string("( ) * / < =");
        assert_eq!(
            tokens,
            vec![
                kw(Keyword::LeftParen),
                kw(Keyword::RightParen),
                kw(Keyword::Star),
                kw(Keyword::Slash),
                kw(Keyword::Less),
                kw(Keyword::Equal),
            ]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(lex_string("").is_empty());
        assert!(lex_string("   \t ").is_empty());
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(lex_string("0"), vec![TokenKind::Int(0)]);
        assert_eq!(lex_string("42"), vec![TokenKind::Int(42)]);
        assert_eq!(lex_string("-42"), vec![TokenKind::Int(-42)]);
        assert_eq!(
            lex_string("9223372036854775807"),
            vec![TokenKind::Int(i64::MAX)]
        );
        assert_eq!(
            lex_string("-9223372036854775808"),
            vec![TokenKind::Int(i64::MIN)]
        );
    }

    #[test]
    fn test_minus_with_space_is_subtraction() {
        assert_eq!(
            lex_string("- 1"),
            vec![kw(Keyword::Minus), TokenKind::Int(1)]
        );
        assert_eq!(
            lex_string("(-1 2)"),
            vec![
                kw(Keyword::LeftParen),
                TokenKind::Int(-1),
                TokenKind::Int(2),
                kw(Keyword::RightParen),
            ]
        );
        assert_eq!(
            lex_string("(-x 1)"),
            vec![
                kw(Keyword::LeftParen),
                kw(Keyword::Minus),
                TokenKind::Name("x".to_string()),
                TokenKind::Int(1),
                kw(Keyword::RightParen),
            ]
        );
    }

    #[test]
    fn test_words() {
        assert_eq!(
            lex_string("if then else let in true false foo"),
            vec![
                kw(Keyword::If),
                kw(Keyword::Then),
                kw(Keyword::Else),
                kw(Keyword::Let),
                kw(Keyword::In),
                TokenKind::Bool(true),
                TokenKind::Bool(false),
                TokenKind::Name("foo".to_string()),
            ]
        );
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(
            lex_string("&& || ! +"),
            vec![
                kw(Keyword::AndAnd),
                kw(Keyword::OrOr),
                kw(Keyword::Bang),
                kw(Keyword::Plus),
            ]
        );
    }

    #[test]
    fn test_adjacent_tokens_without_spaces() {
        assert_eq!(
            lex_string("(<x-1)"),
            vec![
                kw(Keyword::LeftParen),
                kw(Keyword::Less),
                TokenKind::Name("x".to_string()),
                TokenKind::Int(-1),
                kw(Keyword::RightParen),
            ]
        );
    }

    #[test]
    fn test_spans_follow_source_order() {
        let tokens = tokenize("(let abc = -5").unwrap();
        let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 1),
                Span::new(1, 4),
                Span::new(5, 8),
                Span::new(9, 10),
                Span::new(11, 13),
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("(- x $)"),
            Err(Error::UnexpectedChar { ch: '$', position: 5 })
        );
        assert_eq!(
            tokenize("a & b"),
            Err(Error::UnexpectedChar { ch: '&', position: 2 })
        );
        assert_eq!(
            tokenize("x_y"),
            Err(Error::UnexpectedChar { ch: '_', position: 1 })
        );
        assert_eq!(
            tokenize("1\u{a0}2"),
            Err(Error::UnexpectedChar { ch: '\u{a0}', position: 1 })
        );
    }

    #[test]
    fn test_digit_after_word() {
        assert_eq!(
            tokenize("abc1"),
            Err(Error::UnexpectedDigit { ch: '1', position: 3 })
        );
    }

    #[test]
    fn test_letter_after_number() {
        assert_eq!(
            tokenize("1x"),
            Err(Error::UnexpectedLetter { ch: 'x', position: 1 })
        );
        assert_eq!(
            tokenize("(- 1x)"),
            Err(Error::UnexpectedLetter { ch: 'x', position: 4 })
        );
        assert_eq!(
            tokenize("(< -2abc 3)"),
            Err(Error::UnexpectedLetter { ch: 'a', position: 5 })
        );
    }

    #[test]
    fn test_integer_out_of_range() {
        let error = tokenize("99999999999999999999").unwrap_err();
        assert!(matches!(error, Error::IntegerOutOfRange { .. }));
        assert_eq!(error.span(), Span::new(0, 20));
    }
}
