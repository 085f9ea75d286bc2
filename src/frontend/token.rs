// src/frontend/token.rs

/// All token types of the declaration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Literals
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    Identifier,

    // Keywords
    KwInterface,
    KwClass,
    KwFn,
    KwSelfType, // Self
    KwSelf,     // self
    KwTrue,
    KwFalse,
    KwNil,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Arrow, // ->
    Eq,
    At,

    // Special
    Eof,
    Error,
}

impl TokenType {
    /// Get string representation for error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntLiteral => "integer",
            Self::FloatLiteral => "float",
            Self::StringLiteral => "string",
            Self::Identifier => "identifier",
            Self::KwInterface => "interface",
            Self::KwClass => "class",
            Self::KwFn => "fn",
            Self::KwSelfType => "Self",
            Self::KwSelf => "self",
            Self::KwTrue => "true",
            Self::KwFalse => "false",
            Self::KwNil => "nil",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Arrow => "->",
            Self::Eq => "=",
            Self::At => "@",
            Self::Eof => "end of file",
            Self::Error => "error",
        }
    }

    /// Keyword for an identifier-shaped lexeme, if it is one
    pub fn keyword(lexeme: &str) -> Option<Self> {
        match lexeme {
            "interface" => Some(Self::KwInterface),
            "class" => Some(Self::KwClass),
            "fn" => Some(Self::KwFn),
            "Self" => Some(Self::KwSelfType),
            "self" => Some(Self::KwSelf),
            "true" => Some(Self::KwTrue),
            "false" => Some(Self::KwFalse),
            "nil" => Some(Self::KwNil),
            _ => None,
        }
    }
}

/// Source location span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,    // Byte offset
    pub end: usize,      // Byte offset (exclusive)
    pub line: u32,       // Start line (1-indexed)
    pub column: u32,     // Start column (1-indexed)
    pub end_line: u32,   // End line (1-indexed)
    pub end_column: u32, // End column (1-indexed, exclusive)
}

impl Span {
    /// Create a new span with explicit end position
    pub fn new_with_end(
        start: usize,
        end: usize,
        line: u32,
        column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            start,
            end,
            line,
            column,
            end_line,
            end_column,
        }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
            line: self.line,
            column: self.column,
            end_line: other.end_line,
            end_column: other.end_column,
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        // miette uses (offset, length)
        (span.start, span.end - span.start).into()
    }
}

/// A token with its location in source code
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ty: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(ty: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            ty,
            lexeme: lexeme.into(),
            span,
        }
    }
}
