// src/frontend/parser.rs

use crate::errors::{LexerError, ParserError};
use crate::frontend::{Lexer, Span, Token, TokenType, ast::*};

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    previous: Token,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenType::Eof, "", Span::default()),
        }
    }

    /// Take lexer errors collected so far.
    pub fn take_lexer_errors(&mut self) -> Vec<LexerError> {
        self.lexer.take_errors()
    }

    /// Parse a whole file of declarations.
    pub fn parse_program(&mut self) -> Result<Program, ParserError> {
        let mut decls = Vec::new();
        while !self.check(TokenType::Eof) {
            decls.push(self.declaration()?);
        }
        Ok(Program { decls })
    }

    /// Advance to the next token
    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Check if the current token matches the given type
    fn check(&self, ty: TokenType) -> bool {
        self.current.ty == ty
    }

    /// Consume the current token if it matches, otherwise return false
    fn match_token(&mut self, ty: TokenType) -> bool {
        if self.check(ty) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Error for the current token, deferring to the lexer for error tokens
    fn unexpected(&self, make: impl FnOnce(String, Span) -> ParserError) -> ParserError {
        if self.check(TokenType::Error) {
            return ParserError::LexerFailure {
                span: self.current.span.into(),
            };
        }
        make(self.current.lexeme.clone(), self.current.span)
    }

    /// Require a token of the given type, or return an error
    fn consume(&mut self, ty: TokenType) -> Result<(), ParserError> {
        if self.match_token(ty) {
            return Ok(());
        }
        Err(self.unexpected(|found, span| ParserError::ExpectedToken {
            expected: ty.as_str().to_string(),
            found: found_or_eof(found),
            span: span.into(),
        }))
    }

    fn identifier(&mut self) -> Result<Ident, ParserError> {
        if self.match_token(TokenType::Identifier) {
            return Ok(Ident {
                name: self.previous.lexeme.clone(),
                span: self.previous.span,
            });
        }
        Err(self.unexpected(|found, span| ParserError::ExpectedIdentifier {
            found: found_or_eof(found),
            span: span.into(),
        }))
    }

    fn declaration(&mut self) -> Result<TypeDecl, ParserError> {
        let start = self.current.span;
        let kind = if self.match_token(TokenType::KwInterface) {
            DeclKind::Interface
        } else if self.match_token(TokenType::KwClass) {
            DeclKind::Class
        } else {
            return Err(self.unexpected(|found, span| ParserError::ExpectedDeclaration {
                found: found_or_eof(found),
                span: span.into(),
            }));
        };
        let name = self.identifier()?;

        let mut bases = Vec::new();
        if self.match_token(TokenType::Colon) {
            bases.push(self.identifier()?);
            while self.match_token(TokenType::Comma) {
                bases.push(self.identifier()?);
            }
        }

        self.consume(TokenType::LBrace)?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenType::RBrace) && !self.check(TokenType::Eof) {
            if self.check(TokenType::Identifier) {
                fields.push(self.field()?);
            } else {
                methods.push(self.method(kind)?);
            }
        }
        self.consume(TokenType::RBrace)?;

        Ok(TypeDecl {
            kind,
            name,
            bases,
            fields,
            methods,
            span: start.merge(self.previous.span),
        })
    }

    fn field(&mut self) -> Result<FieldSig, ParserError> {
        let start = self.current.span;
        let name = self.identifier()?;
        self.consume(TokenType::Colon)?;
        let ty = self.type_expr()?;
        let value = if self.match_token(TokenType::Eq) {
            Some(self.field_value()?)
        } else {
            None
        };
        Ok(FieldSig {
            name,
            ty,
            value,
            span: start.merge(self.previous.span),
        })
    }

    fn method(&mut self, kind: DeclKind) -> Result<MethodSig, ParserError> {
        let start = self.current.span;
        let mut decorators = Vec::new();
        while self.match_token(TokenType::At) {
            decorators.push(self.identifier()?);
        }
        self.consume(TokenType::KwFn)?;
        let name = self.identifier()?;

        self.consume(TokenType::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenType::RParen) {
            loop {
                params.push(self.param()?);
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenType::RParen)?;

        let returns = if self.match_token(TokenType::Arrow) {
            Some(self.type_expr()?)
        } else {
            None
        };
        if kind == DeclKind::Interface && returns.is_none() {
            return Err(ParserError::MissingReturnType {
                method: name.name.clone(),
                span: name.span.merge(self.previous.span).into(),
            });
        }

        let body = if self.match_token(TokenType::Eq) {
            Some(self.literal()?)
        } else {
            None
        };

        Ok(MethodSig {
            decorators,
            name,
            params,
            returns,
            body,
            span: start.merge(self.previous.span),
        })
    }

    fn param(&mut self) -> Result<ParamSig, ParserError> {
        let name = self.identifier()?;
        let ty = if self.match_token(TokenType::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };
        Ok(ParamSig { name, ty })
    }

    fn type_expr(&mut self) -> Result<TypeExpr, ParserError> {
        match self.current.ty {
            TokenType::KwSelfType => {
                self.advance();
                Ok(TypeExpr::SelfType(self.previous.span))
            }
            // `nil` is a type name as well as a value.
            TokenType::Identifier | TokenType::KwNil => {
                self.advance();
                Ok(TypeExpr::Named(Ident {
                    name: self.previous.lexeme.clone(),
                    span: self.previous.span,
                }))
            }
            _ => Err(self.unexpected(|_, span| ParserError::ExpectedType { span: span.into() })),
        }
    }

    /// The literal at the current token, if it is one.
    fn peek_literal(&self) -> Option<Literal> {
        let token = &self.current;
        match token.ty {
            TokenType::IntLiteral => token.lexeme.parse().ok().map(Literal::Int),
            TokenType::FloatLiteral => token.lexeme.parse().ok().map(Literal::Float),
            TokenType::StringLiteral => Some(Literal::Str(unescape(&token.lexeme))),
            TokenType::KwTrue => Some(Literal::Bool(true)),
            TokenType::KwFalse => Some(Literal::Bool(false)),
            TokenType::KwNil => Some(Literal::Nil),
            TokenType::KwSelf => Some(Literal::SelfRef),
            _ => None,
        }
    }

    fn literal(&mut self) -> Result<Literal, ParserError> {
        match self.peek_literal() {
            Some(literal) => {
                self.advance();
                Ok(literal)
            }
            None => Err(self.unexpected(|found, span| ParserError::ExpectedBody {
                found: found_or_eof(found),
                span: span.into(),
            })),
        }
    }

    fn field_value(&mut self) -> Result<Literal, ParserError> {
        match self.peek_literal() {
            Some(literal) if literal != Literal::SelfRef => {
                self.advance();
                Ok(literal)
            }
            _ => Err(self.unexpected(|found, span| ParserError::ExpectedValue {
                found: found_or_eof(found),
                span: span.into(),
            })),
        }
    }
}

fn found_or_eof(found: String) -> String {
    if found.is_empty() {
        TokenType::Eof.as_str().to_string()
    } else {
        found
    }
}

/// Strip the quotes of a string lexeme and process escapes
fn unescape(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
