use crate::builtins::Builtin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved instruction name: `Spawn`, `Color`, `DrawLine`, ...
    Function,
    GoTo,
    /// `(` `)` `,` `[` `]` `<-` `←`
    Symbol,
    Number,
    /// Lexeme keeps its surrounding quotes.
    String,
    Identifier,
    /// `+ - * / % ** && || == != < > <= >=`
    Operator,
    NewLine,
    Eof,
}

impl TokenKind {
    /// Tokens after which a `-` is a binary operator rather than a sign.
    pub fn ends_operand(self) -> bool {
        matches!(self, Self::Number | Self::String | Self::Identifier)
    }
}

pub const SPAWN: &str = "Spawn";
pub const GOTO: &str = "GoTo";
pub const EOF_LEXEME: &str = "$";

/// Maps a scanned word to `GoTo`, `Function` or `Identifier`.
pub fn classify_word(word: &str) -> TokenKind {
    if word == GOTO {
        TokenKind::GoTo
    } else if word == SPAWN || Builtin::from_name(word).is_some() {
        TokenKind::Function
    } else {
        TokenKind::Identifier
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind, lexeme: lexeme.into(), line, column }
    }

    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    pub fn is_symbol(&self, lexeme: &str) -> bool { self.is(TokenKind::Symbol, lexeme) }

    pub fn is_assign_arrow(&self) -> bool {
        self.is_symbol("<-") || self.is_symbol("←")
    }

    /// Closing brackets end an operand just like literals and names do.
    pub fn ends_operand(&self) -> bool {
        self.kind.ends_operand() || self.is_symbol(")") || self.is_symbol("]")
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::NewLine => write!(f, "{:?}", self.kind),
            _ => write!(f, "{:?}(`{}`)", self.kind, self.lexeme),
        }
    }
}
