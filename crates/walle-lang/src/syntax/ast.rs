use crate::builtins::Builtin;
use std::collections::HashMap;
use std::fmt;

/// Source location attached to every node for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ─── Top level ───────────────────────────────────────────────────────────────

/// A flat statement list. The parser guarantees `statements[0]` is a `Spawn`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    /// Label name → statement index. A repeated label keeps its last index.
    pub fn label_table(&self) -> HashMap<String, usize> {
        let mut labels = HashMap::new();
        for (index, stmt) in self.statements.iter().enumerate() {
            if let Stmt::Label { name, .. } = stmt {
                if let Some(previous) = labels.insert(name.clone(), index) {
                    tracing::warn!(label = %name, previous, index, "duplicate label, last definition wins");
                }
            }
        }
        labels
    }
}

// ─── Statements ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `Spawn(x, y)`
    Spawn { x: Expr, y: Expr, span: Span },
    /// `name <- expr`
    Assign { name: String, value: Expr, span: Span },
    /// A bare identifier on its own line.
    Label { name: String, span: Span },
    /// `GoTo [label] (condition)`
    GoTo { label: String, condition: Expr, span: Span },
    /// An instruction whose result, if any, is discarded.
    Call(Call),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Spawn { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::Label { span, .. }
            | Stmt::GoTo { span, .. } => *span,
            Stmt::Call(call) => call.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub builtin: Builtin,
    pub args: Vec<Expr>,
    pub span: Span,
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add, Sub, Mul, Div, Mod, Pow,
    Eq, NotEq, Lt, LtEq, Gt, GtEq,
    And, Or,
}

impl BinOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "+"  => Self::Add,
            "-"  => Self::Sub,
            "*"  => Self::Mul,
            "/"  => Self::Div,
            "%"  => Self::Mod,
            "**" => Self::Pow,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "<"  => Self::Lt,
            "<=" => Self::LtEq,
            ">"  => Self::Gt,
            ">=" => Self::GtEq,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add   => "+",
            Self::Sub   => "-",
            Self::Mul   => "*",
            Self::Div   => "/",
            Self::Mod   => "%",
            Self::Pow   => "**",
            Self::Eq    => "==",
            Self::NotEq => "!=",
            Self::Lt    => "<",
            Self::LtEq  => "<=",
            Self::Gt    => ">",
            Self::GtEq  => ">=",
            Self::And   => "&&",
            Self::Or    => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    Variable(String, Span),
    /// Unary minus is represented as `0 - operand`.
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        span: Span,
    },
    Call(Call),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span) | Expr::Variable(_, span) => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Call(call) => call.span,
        }
    }
}

// ─── Tree dump ───────────────────────────────────────────────────────────────

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program ({} statements)", self.statements.len())?;
        for stmt in &self.statements {
            write_stmt(f, stmt, 1)?;
        }
        Ok(())
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = depth * 2)
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match stmt {
        Stmt::Spawn { x, y, .. } => {
            writeln!(f, "Spawn")?;
            write_expr(f, x, depth + 1)?;
            write_expr(f, y, depth + 1)
        }
        Stmt::Assign { name, value, .. } => {
            writeln!(f, "Assign {name}")?;
            write_expr(f, value, depth + 1)
        }
        Stmt::Label { name, .. } => writeln!(f, "Label {name}"),
        Stmt::GoTo { label, condition, .. } => {
            writeln!(f, "GoTo [{label}]")?;
            write_expr(f, condition, depth + 1)
        }
        Stmt::Call(call) => write_call(f, call, depth),
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, call: &Call, depth: usize) -> fmt::Result {
    writeln!(f, "Call {}", call.builtin.name())?;
    for arg in &call.args {
        write_expr(f, arg, depth + 1)?;
    }
    Ok(())
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match expr {
        Expr::Literal(Literal::Number(n), _) => writeln!(f, "Number {n}"),
        Expr::Literal(Literal::Str(s), _)    => writeln!(f, "String {s:?}"),
        Expr::Variable(name, _)              => writeln!(f, "Variable {name}"),
        Expr::Binary { left, op, right, .. } => {
            writeln!(f, "Binary {}", op.symbol())?;
            write_expr(f, left, depth + 1)?;
            write_expr(f, right, depth + 1)
        }
        Expr::Call(call) => write_call(f, call, depth),
    }
}
