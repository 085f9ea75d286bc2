// src/frontend/lexer.rs

use crate::errors::LexerError;
use crate::frontend::{Span, Token, TokenType};

pub struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    start: usize,
    current: usize,
    line: u32,
    column: u32,
    start_column: u32,
    start_line: u32,
    // Error collection
    errors: Vec<LexerError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_column: 1,
            start_line: 1,
            errors: Vec::new(),
        }
    }

    /// Take all collected errors, leaving the internal list empty.
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors have been collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the next token from the source
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.start = self.current;
        self.start_column = self.column;
        self.start_line = self.line;

        let Some(c) = self.advance() else {
            return self.make_token(TokenType::Eof);
        };

        match c {
            '(' => self.make_token(TokenType::LParen),
            ')' => self.make_token(TokenType::RParen),
            '{' => self.make_token(TokenType::LBrace),
            '}' => self.make_token(TokenType::RBrace),
            ',' => self.make_token(TokenType::Comma),
            ':' => self.make_token(TokenType::Colon),
            '=' => self.make_token(TokenType::Eq),
            '@' => self.make_token(TokenType::At),

            '-' => {
                if self.match_char('>') {
                    self.make_token(TokenType::Arrow)
                } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.number()
                } else {
                    self.error_unexpected_char(c)
                }
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.error_unexpected_char(c),
        }
    }

    /// Skip whitespace, newlines and `#` or `//` line comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                Some('#') => self.skip_line(),
                Some('/') if self.peek_next() == Some('/') => self.skip_line(),
                _ => return,
            }
        }
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Advance to the next character and return it
    fn advance(&mut self) -> Option<char> {
        if let Some((idx, c)) = self.chars.next() {
            self.current = idx + c.len_utf8();
            self.column += 1;
            Some(c)
        } else {
            None
        }
    }

    /// Peek at the next character without consuming it
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Peek at the character after the next one
    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current..].chars();
        iter.next(); // skip current
        iter.next()
    }

    /// Consume the next character if it matches the expected character
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_span(&self) -> Span {
        Span::new_with_end(
            self.start,
            self.current,
            self.start_line,
            self.start_column,
            self.line,
            self.column,
        )
    }

    /// Create a token from start to current position
    fn make_token(&self, ty: TokenType) -> Token {
        let lexeme = &self.source[self.start..self.current];
        Token::new(ty, lexeme, self.current_span())
    }

    fn number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return self.make_token(TokenType::FloatLiteral);
        }
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.advance();
            }
            return self.error_invalid_number();
        }
        self.make_token(TokenType::IntLiteral)
    }

    fn string(&mut self) -> Token {
        loop {
            match self.peek() {
                None | Some('\n') => return self.error_unterminated_string(),
                Some('"') => {
                    self.advance();
                    return self.make_token(TokenType::StringLiteral);
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let lexeme = &self.source[self.start..self.current];
        let ty = TokenType::keyword(lexeme).unwrap_or(TokenType::Identifier);
        self.make_token(ty)
    }

    /// Create an error token and collect an error for an unexpected character.
    fn error_unexpected_char(&mut self, c: char) -> Token {
        let span = self.current_span();
        self.errors.push(LexerError::UnexpectedCharacter {
            ch: c,
            span: span.into(),
        });
        Token::new(TokenType::Error, format!("unexpected character '{}'", c), span)
    }

    /// Create an error token and collect an error for an unterminated string.
    fn error_unterminated_string(&mut self) -> Token {
        let span = self.current_span();
        self.errors
            .push(LexerError::UnterminatedString { span: span.into() });
        Token::new(TokenType::Error, "unterminated string literal", span)
    }

    /// Create an error token and collect an error for an invalid number literal.
    fn error_invalid_number(&mut self) -> Token {
        let span = self.current_span();
        self.errors.push(LexerError::InvalidNumber { span: span.into() });
        Token::new(TokenType::Error, "invalid number literal", span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(source: &str) -> Vec<TokenType> {
        let mut lexer = Lexer::new(source);
        let mut types = Vec::new();
        loop {
            let token = lexer.next_token();
            types.push(token.ty);
            if token.ty == TokenType::Eof {
                return types;
            }
        }
    }

    #[test]
    fn lex_method_signature() {
        assert_eq!(
            token_types("@default fn size(a: int) -> Self = 0"),
            vec![
                TokenType::At,
                TokenType::Identifier,
                TokenType::KwFn,
                TokenType::Identifier,
                TokenType::LParen,
                TokenType::Identifier,
                TokenType::Colon,
                TokenType::Identifier,
                TokenType::RParen,
                TokenType::Arrow,
                TokenType::KwSelfType,
                TokenType::Eq,
                TokenType::IntLiteral,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn lex_literals() {
        assert_eq!(
            token_types("-3 2.5 \"hi\" true nil self"),
            vec![
                TokenType::IntLiteral,
                TokenType::FloatLiteral,
                TokenType::StringLiteral,
                TokenType::KwTrue,
                TokenType::KwNil,
                TokenType::KwSelf,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            token_types("# note\nclass // trailing\n{}"),
            vec![
                TokenType::KwClass,
                TokenType::LBrace,
                TokenType::RBrace,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut lexer = Lexer::new("class\n  Box");
        lexer.next_token();
        let token = lexer.next_token();
        assert_eq!(token.lexeme, "Box");
        assert_eq!(token.span.line, 2);
        assert_eq!(token.span.column, 3);
    }

    #[test]
    fn unexpected_character_is_collected() {
        let mut lexer = Lexer::new("$");
        let token = lexer.next_token();
        assert_eq!(token.ty, TokenType::Error);
        assert!(lexer.has_errors());
        let errors = lexer.take_errors();
        assert!(matches!(errors[0], LexerError::UnexpectedCharacter { ch: '$', .. }));
    }

    #[test]
    fn unterminated_string_is_collected() {
        let mut lexer = Lexer::new("\"open");
        assert_eq!(lexer.next_token().ty, TokenType::Error);
        assert!(matches!(
            lexer.take_errors()[0],
            LexerError::UnterminatedString { .. }
        ));
    }
}
