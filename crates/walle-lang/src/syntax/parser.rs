use crate::builtins::Builtin;
use crate::error::{Error, ErrorCode};
use crate::syntax::ast::*;
use crate::syntax::token::{EOF_LEXEME, SPAWN, Token, TokenKind};
use tracing::debug;

/// Recursive-descent parser with one token of lookahead.
///
/// Parsing stops at the first error: the returned error list always has
/// exactly one entry, and no partial program is produced.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Appends the `Eof` terminator if `tokens` does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let (line, column) = tokens.last()
                .map_or((1, 1), |t| (t.line, t.column + t.lexeme.chars().count()));
            tokens.push(Token::new(TokenKind::Eof, EOF_LEXEME, line, column));
        }
        Self { tokens, pos: 0 }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse(mut self) -> Result<Program, Vec<Error>> {
        let program = self.parse_program().map_err(|e| vec![e])?;
        debug!(statements = program.statements.len(), "parsed");
        Ok(program)
    }

    fn parse_program(&mut self) -> Result<Program, Error> {
        self.skip_newlines();
        let mut statements = vec![self.parse_spawn()?];
        self.end_statement()?;

        loop {
            self.skip_newlines();
            if self.check_kind(TokenKind::Eof) { break; }
            statements.push(self.parse_stmt()?);
            self.end_statement()?;
        }

        Ok(Program { statements })
    }

    // ─── Statements ──────────────────────────────────────────────────────────

    fn parse_spawn(&mut self) -> Result<Stmt, Error> {
        let span = self.span();
        if !self.peek().is(TokenKind::Function, SPAWN) {
            return Err(self.error_here(ErrorCode::P003,
                format!("program must start with `Spawn(x, y)`, found {}", self.peek())));
        }
        self.advance();
        self.expect_symbol("(")?;
        let x = self.parse_expr()?;
        self.expect_symbol(",")?;
        let y = self.parse_expr()?;
        self.expect_symbol(")")?;
        Ok(Stmt::Spawn { x, y, span })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, Error> {
        match self.peek().kind {
            TokenKind::Function => Ok(Stmt::Call(self.parse_call()?)),
            TokenKind::GoTo => self.parse_goto(),
            TokenKind::Identifier => {
                if self.peek_next().is_some_and(Token::is_assign_arrow) {
                    self.parse_assign()
                } else {
                    let span = self.span();
                    let name = self.advance().lexeme;
                    Ok(Stmt::Label { name, span })
                }
            }
            _ => Err(self.error_here(ErrorCode::P001,
                format!("expected a statement, found {}", self.peek()))),
        }
    }

    fn parse_assign(&mut self) -> Result<Stmt, Error> {
        let span = self.span();
        let name = self.advance().lexeme;
        self.advance(); // `<-` or `←`
        let value = self.parse_expr()?;
        Ok(Stmt::Assign { name, value, span })
    }

    fn parse_goto(&mut self) -> Result<Stmt, Error> {
        let span = self.span();
        self.advance(); // GoTo
        self.expect_symbol("[")?;
        if !self.check_kind(TokenKind::Identifier) {
            return Err(self.unexpected("a label name"));
        }
        let label = self.advance().lexeme;
        self.expect_symbol("]")?;
        self.expect_symbol("(")?;
        let condition = self.parse_expr()?;
        self.expect_symbol(")")?;
        Ok(Stmt::GoTo { label, condition, span })
    }

    fn parse_call(&mut self) -> Result<Call, Error> {
        let span = self.span();
        let name = &self.peek().lexeme;
        let Some(builtin) = Builtin::from_name(name) else {
            return Err(self.error_here(ErrorCode::P003,
                "`Spawn` may only appear once, as the first instruction"));
        };
        self.advance();
        self.expect_symbol("(")?;
        let mut args = Vec::new();
        if !self.peek().is_symbol(")") {
            args.push(self.parse_expr()?);
            while self.matches_symbol(",") {
                args.push(self.parse_expr()?);
            }
        }
        self.expect_symbol(")")?;
        Ok(Call { builtin, args, span })
    }

    // ─── Expressions (precedence climbing) ───────────────────────────────────

    fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, Error> {
        self.parse_binary(&[BinOp::Or], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, Error> {
        self.parse_binary(&[BinOp::And], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, Error> {
        self.parse_binary(
            &[BinOp::Eq, BinOp::NotEq, BinOp::Lt, BinOp::Gt, BinOp::LtEq, BinOp::GtEq],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, Error> {
        self.parse_binary(&[BinOp::Add, BinOp::Sub], Self::parse_term)
    }

    fn parse_term(&mut self) -> Result<Expr, Error> {
        self.parse_binary(&[BinOp::Mul, BinOp::Div, BinOp::Mod], Self::parse_power)
    }

    fn parse_power(&mut self) -> Result<Expr, Error> {
        self.parse_binary(&[BinOp::Pow], Self::parse_factor)
    }

    /// One left-associative precedence level.
    fn parse_binary(
        &mut self,
        ops: &[BinOp],
        operand: fn(&mut Self) -> Result<Expr, Error>,
    ) -> Result<Expr, Error> {
        let mut left = operand(self)?;
        while let Some(op) = self.peek_operator(ops) {
            let span = left.span();
            self.advance();
            let right = operand(self)?;
            left = Expr::Binary { left: Box::new(left), op, right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, Error> {
        let span = self.span();
        let tok = self.peek();
        match tok.kind {
            TokenKind::Number => {
                let value = tok.lexeme.parse::<f64>().map_err(|_| {
                    self.error_here(ErrorCode::P001, format!("invalid number `{}`", tok.lexeme))
                })?;
                self.advance();
                Ok(Expr::Literal(Literal::Number(value), span))
            }
            TokenKind::String => {
                let lexeme = self.advance().lexeme;
                let text = lexeme.trim_start_matches('"').trim_end_matches('"').to_string();
                Ok(Expr::Literal(Literal::Str(text), span))
            }
            TokenKind::Identifier => {
                let name = self.advance().lexeme;
                Ok(Expr::Variable(name, span))
            }
            TokenKind::Function => Ok(Expr::Call(self.parse_call()?)),
            TokenKind::Symbol if tok.lexeme == "(" => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_symbol(")")?;
                Ok(expr)
            }
            TokenKind::Operator if tok.lexeme == "-" => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::Binary {
                    left: Box::new(Expr::Literal(Literal::Number(0.0), span)),
                    op: BinOp::Sub,
                    right: Box::new(operand),
                    span,
                })
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    // ─── Token helpers ───────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        // the lexer always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 { self.pos += 1; }
        tok
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn peek_operator(&self, ops: &[BinOp]) -> Option<BinOp> {
        let tok = self.peek();
        if tok.kind != TokenKind::Operator { return None; }
        BinOp::from_lexeme(&tok.lexeme).filter(|op| ops.contains(op))
    }

    fn matches_symbol(&mut self, symbol: &str) -> bool {
        if self.peek().is_symbol(symbol) { self.advance(); true } else { false }
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<(), Error> {
        if self.matches_symbol(symbol) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{symbol}`")))
        }
    }

    fn skip_newlines(&mut self) {
        while self.check_kind(TokenKind::NewLine) { self.advance(); }
    }

    fn end_statement(&mut self) -> Result<(), Error> {
        match self.peek().kind {
            TokenKind::NewLine => { self.advance(); Ok(()) }
            TokenKind::Eof => Ok(()),
            _ => Err(self.error_here(ErrorCode::P001,
                format!("expected end of line after statement, found {}", self.peek()))),
        }
    }

    fn span(&self) -> Span {
        let tok = self.peek();
        Span::new(tok.line, tok.column)
    }

    fn error_here(&self, code: ErrorCode, message: impl Into<String>) -> Error {
        let span = self.span();
        Error::new(code, span.line, span.column, message)
    }

    /// P002 when the line ran out, P001 when something else is in the way.
    fn unexpected(&self, expected: &str) -> Error {
        let tok = self.peek();
        match tok.kind {
            TokenKind::NewLine | TokenKind::Eof => self.error_here(ErrorCode::P002,
                format!("expected {expected} before end of line")),
            _ => self.error_here(ErrorCode::P001,
                format!("expected {expected}, found {tok}")),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
