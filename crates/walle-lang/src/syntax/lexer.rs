use crate::error::{Error, ErrorCode};
use crate::syntax::token::{EOF_LEXEME, Token, TokenKind, classify_word};
use tracing::{debug, trace};

/// Token patterns in tie-breaking order. When two patterns match the same
/// number of characters the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    NewLine,
    String,
    Operator,
    Symbol,
    Number,
    Identifier,
    Whitespace,
}

impl Pattern {
    const ORDER: [Pattern; 7] = [
        Pattern::NewLine,
        Pattern::String,
        Pattern::Operator,
        Pattern::Symbol,
        Pattern::Number,
        Pattern::Identifier,
        Pattern::Whitespace,
    ];
}

const TWO_CHAR_OPERATORS: [&str; 7] = ["**", "&&", "||", "==", "!=", ">=", "<="];
const ONE_CHAR_OPERATORS: [char; 7] = ['+', '-', '*', '/', '%', '<', '>'];
const ONE_CHAR_SYMBOLS: [char; 6] = ['(', ')', ',', '[', ']', '←'];

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    after_operand: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self { source: source.chars().collect(), pos: 0, line: 1, column: 1, after_operand: false }
    }

    /// Scans the whole source. The first unrecognised character or
    /// unterminated string aborts the scan.
    #[tracing::instrument(level = "debug", skip_all, fields(chars = self.source.len()))]
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<Error>> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let (line, column) = (self.line, self.column);
            let (pattern, len) = self.longest_match().map_err(|e| vec![e])?;
            let lexeme: String = self.source[self.pos..self.pos + len].iter().collect();
            self.advance_by(len);

            let kind = match pattern {
                Pattern::Whitespace => continue,
                Pattern::NewLine    => TokenKind::NewLine,
                Pattern::String     => TokenKind::String,
                Pattern::Operator   => TokenKind::Operator,
                Pattern::Symbol     => TokenKind::Symbol,
                Pattern::Number     => TokenKind::Number,
                Pattern::Identifier => classify_word(&lexeme),
            };
            let token = Token::new(kind, lexeme, line, column);
            trace!(%token, line, column, "token");
            self.after_operand = token.ends_operand();
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::Eof, EOF_LEXEME, self.line, self.column));
        debug!(count = tokens.len(), "tokenized");
        Ok(tokens)
    }

    // ─── Matching ────────────────────────────────────────────────────────────

    fn longest_match(&self) -> Result<(Pattern, usize), Error> {
        let mut best: Option<(Pattern, usize)> = None;
        for pattern in Pattern::ORDER {
            let Some(len) = self.match_pattern(pattern)? else { continue };
            if best.is_none_or(|(_, best_len)| len > best_len) {
                best = Some((pattern, len));
            }
        }
        best.ok_or_else(|| Error::new(ErrorCode::L001, self.line, self.column,
            format!("unexpected character `{}`", self.source[self.pos])))
    }

    fn match_pattern(&self, pattern: Pattern) -> Result<Option<usize>, Error> {
        let len = match pattern {
            Pattern::NewLine    => self.match_newline(),
            Pattern::String     => return self.match_string(),
            Pattern::Operator   => self.match_operator(),
            Pattern::Symbol     => self.match_symbol(),
            Pattern::Number     => self.match_number(),
            Pattern::Identifier => self.match_identifier(),
            Pattern::Whitespace => self.match_whitespace(),
        };
        Ok(len)
    }

    fn match_newline(&self) -> Option<usize> {
        match (self.at(0), self.at(1)) {
            (Some('\n'), _)         => Some(1),
            (Some('\r'), Some('\n')) => Some(2),
            _ => None,
        }
    }

    /// `"` up to the next `"`, no escapes.
    fn match_string(&self) -> Result<Option<usize>, Error> {
        if self.at(0) != Some('"') { return Ok(None); }
        let mut i = 1;
        loop {
            match self.at(i) {
                Some('"') => return Ok(Some(i + 1)),
                Some(_)   => i += 1,
                None => {
                    return Err(Error::new(ErrorCode::L002, self.line, self.column,
                        "unterminated string literal"));
                }
            }
        }
    }

    fn match_operator(&self) -> Option<usize> {
        if self.starts_with_any(&TWO_CHAR_OPERATORS) { return Some(2); }
        self.at(0).filter(|c| ONE_CHAR_OPERATORS.contains(c)).map(|_| 1)
    }

    fn match_symbol(&self) -> Option<usize> {
        if self.starts_with_any(&["<-"]) { return Some(2); }
        self.at(0).filter(|c| ONE_CHAR_SYMBOLS.contains(c)).map(|_| 1)
    }

    /// `-? digits ('.' digits)?`. The sign is only offered where no operand
    /// precedes it, so `x-5` stays a subtraction.
    fn match_number(&self) -> Option<usize> {
        let mut i = 0;
        if self.at(0) == Some('-') {
            if self.after_operand { return None; }
            i = 1;
        }
        let digits_start = i;
        while self.at(i).is_some_and(|c| c.is_ascii_digit()) { i += 1; }
        if i == digits_start { return None; }

        // a trailing `.` with no digits is not part of the number
        if self.at(i) == Some('.') && self.at(i + 1).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
            while self.at(i).is_some_and(|c| c.is_ascii_digit()) { i += 1; }
        }
        Some(i)
    }

    fn match_identifier(&self) -> Option<usize> {
        let first = self.at(0)?;
        if !(first.is_alphabetic() || first == '_') { return None; }
        let mut i = 1;
        while self.at(i).is_some_and(|c| c.is_alphanumeric() || c == '_') { i += 1; }
        Some(i)
    }

    fn match_whitespace(&self) -> Option<usize> {
        let mut i = 0;
        while matches!(self.at(i), Some(' ' | '\t' | '\r')) {
            // leave `\r\n` to the newline pattern
            if self.at(i) == Some('\r') && self.at(i + 1) == Some('\n') { break; }
            i += 1;
        }
        (i > 0).then_some(i)
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn starts_with_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|s| {
            s.chars().enumerate().all(|(i, c)| self.at(i) == Some(c))
        })
    }

    fn advance_by(&mut self, len: usize) {
        for _ in 0..len {
            let ch = self.source[self.pos];
            self.pos += 1;
            if ch == '\n' { self.line += 1; self.column = 1; }
            else { self.column += 1; }
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
