use thiserror::Error as ThisError;

/// Error codes prefixed by phase: L = lexer, P = parser, R = runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ThisError)]
pub enum ErrorCode {
    // Lexer
    #[error("unexpected character")]
    L001,
    #[error("unterminated string literal")]
    L002,

    // Parser
    #[error("unexpected token")]
    P001,
    #[error("missing expected token")]
    P002,
    #[error("misplaced Spawn")]
    P003,

    // Runtime
    #[error("undefined variable")]
    R001,
    #[error("undefined label")]
    R002,
    #[error("wrong argument count")]
    R003,
    #[error("type mismatch")]
    R004,
    #[error("unknown color")]
    R005,
    #[error("invalid position or size")]
    R006,
    #[error("division by zero")]
    R007,
    #[error("modulo by zero")]
    R008,
    #[error("cursor not spawned")]
    R009,
}

/// Coarse error classes the host groups diagnostics by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Name,
    Type,
    Domain,
    Arithmetic,
    State,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical    => "LexicalError",
            Self::Syntax     => "SyntaxError",
            Self::Name       => "NameError",
            Self::Type       => "TypeError",
            Self::Domain     => "DomainError",
            Self::Arithmetic => "ArithmeticError",
            Self::State      => "StateError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        match self {
            Self::L001 | Self::L002              => ErrorKind::Lexical,
            Self::P001 | Self::P002 | Self::P003 => ErrorKind::Syntax,
            Self::R001 | Self::R002              => ErrorKind::Name,
            Self::R003 | Self::R004              => ErrorKind::Type,
            Self::R005 | Self::R006              => ErrorKind::Domain,
            Self::R007 | Self::R008              => ErrorKind::Arithmetic,
            Self::R009                           => ErrorKind::State,
        }
    }

    /// Fatal codes stop their phase; everything else skips one statement.
    pub fn is_fatal(self) -> bool {
        matches!(self.kind(), ErrorKind::Lexical | ErrorKind::Syntax | ErrorKind::State)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::L001 => "L001",
            Self::L002 => "L002",
            Self::P001 => "P001",
            Self::P002 => "P002",
            Self::P003 => "P003",
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::R003 => "R003",
            Self::R004 => "R004",
            Self::R005 => "R005",
            Self::R006 => "R006",
            Self::R007 => "R007",
            Self::R008 => "R008",
            Self::R009 => "R009",
        }
    }
}

/// A single diagnostic. Lexer and parser errors carry a token position;
/// runtime errors additionally carry the index of the failing statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: ErrorCode,
    pub line: usize,
    pub column: usize,
    pub statement: Option<usize>,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { code, line, column, statement: None, message: message.into() }
    }

    pub fn at_statement(mut self, index: usize) -> Self {
        self.statement = Some(index);
        self
    }

    pub fn kind(&self) -> ErrorKind { self.code.kind() }

    pub fn is_fatal(&self) -> bool { self.code.is_fatal() }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}] {}:{}: {}", self.kind(), self.code.as_str(), self.line, self.column, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_kinds() {
        assert_eq!(ErrorCode::L002.kind(), ErrorKind::Lexical);
        assert_eq!(ErrorCode::P003.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::R002.kind(), ErrorKind::Name);
        assert_eq!(ErrorCode::R003.kind(), ErrorKind::Type);
        assert_eq!(ErrorCode::R005.kind(), ErrorKind::Domain);
        assert_eq!(ErrorCode::R008.kind(), ErrorKind::Arithmetic);
        assert_eq!(ErrorCode::R009.kind(), ErrorKind::State);
    }

    #[test]
    fn only_lexical_syntax_and_state_are_fatal() {
        assert!(ErrorCode::L001.is_fatal());
        assert!(ErrorCode::P001.is_fatal());
        assert!(ErrorCode::R009.is_fatal());
        assert!(!ErrorCode::R001.is_fatal());
        assert!(!ErrorCode::R007.is_fatal());
    }

    #[test]
    fn display_includes_kind_code_and_position() {
        let e = Error::new(ErrorCode::R007, 3, 5, "division by zero").at_statement(2);
        assert_eq!(e.to_string(), "[ArithmeticError R007] 3:5: division by zero");
        assert_eq!(e.statement, Some(2));
        assert_eq!(ErrorCode::R007.to_string(), "division by zero");
    }
}
