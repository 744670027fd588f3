//! Program-counter interpreter over the flat statement list.
//!
//! Labels are resolved once, before the first statement runs. Recoverable
//! errors are recorded and the failing statement is skipped; a missing cursor
//! is fatal and ends the run. Backward jumps are not bounded.

use crate::builtins::{self, Builtin, Context};
use crate::canvas::Canvas;
use crate::error::{Error, ErrorCode};
use crate::runtime::cursor::Cursor;
use crate::runtime::scope::Scope;
use crate::runtime::value::Value;
use crate::syntax::ast::{self, BinOp, Call, Expr, Literal, Span, Stmt};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

pub struct Interpreter<'a> {
    program: &'a ast::Program,
    canvas: &'a mut Canvas,
    labels: HashMap<String, usize>,
    scope: Scope,
    cursor: Option<Cursor>,
    errors: Vec<Error>,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a ast::Program, canvas: &'a mut Canvas) -> Self {
        Self {
            program,
            canvas,
            labels: program.label_table(),
            scope: Scope::new(),
            cursor: None,
            errors: Vec::new(),
        }
    }

    /// Final cursor, global variables and every recorded error.
    pub fn finish(self) -> (Option<Cursor>, HashMap<String, Value>, Vec<Error>) {
        (self.cursor, self.scope.into_globals(), self.errors)
    }

    // ─── Entry point ──────────────────────────────────────────────────────────

    /// Runs until the program counter leaves the statement list or a fatal
    /// error occurs. All errors, fatal or not, are returned by `finish`.
    #[tracing::instrument(level = "debug", skip_all, fields(
        statements = self.program.statements.len(),
        labels = self.labels.len(),
        canvas = self.canvas.size(),
    ))]
    pub fn run(&mut self) {
        let program = self.program;
        let mut pc = 0;

        while let Some(stmt) = program.statements.get(pc) {
            trace!(pc, line = stmt.span().line, "step");
            match self.exec_stmt(stmt) {
                Ok(Some(target)) => {
                    trace!(from = pc, to = target, "jump");
                    pc = target;
                }
                Ok(None) => pc += 1,
                Err(e) => {
                    let fatal = e.is_fatal();
                    warn!(pc, error = %e, fatal, "runtime error");
                    self.errors.push(e.at_statement(pc));
                    if fatal { break; }
                    pc += 1;
                }
            }
        }

        debug!(errors = self.errors.len(), "run finished");
    }

    // ─── Statement executor ───────────────────────────────────────────────────

    /// `Ok(Some(index))` when control jumps.
    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Option<usize>, Error> {
        match stmt {
            Stmt::Spawn { x, y, span } => {
                let x = self.eval_int(x)?;
                let y = self.eval_int(y)?;
                let size = self.canvas.size() as i64;
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    return Err(err(ErrorCode::R006, *span, format!(
                        "spawn position ({x}, {y}) is outside the {size}×{size} canvas"
                    )));
                }
                self.cursor = Some(Cursor::spawn(x, y));
            }

            Stmt::Assign { name, value, .. } => {
                let value = self.eval_expr(value)?;
                self.scope.assign(name, value);
            }

            Stmt::Label { .. } => {}

            Stmt::GoTo { label, condition, span } => {
                if self.eval_expr(condition)?.is_truthy() {
                    let target = self.labels.get(label).copied().ok_or_else(|| {
                        err(ErrorCode::R002, *span, format!("undefined label `{label}`"))
                    })?;
                    return Ok(Some(target));
                }
            }

            Stmt::Call(call) => { self.eval_call(call)?; }
        }
        Ok(None)
    }

    // ─── Expression evaluator ─────────────────────────────────────────────────

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, Error> {
        match expr {
            Expr::Literal(Literal::Number(n), _) => Ok(Value::Number(*n)),
            Expr::Literal(Literal::Str(s), _)    => Ok(Value::Text(s.clone())),

            Expr::Variable(name, span) => self.scope.get(name).cloned()
                .ok_or_else(|| err(ErrorCode::R001, *span, format!("undefined variable `{name}`"))),

            Expr::Binary { left, op, right, span } => {
                // both sides always evaluate, `&&` and `||` included
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                eval_binop(*op, l, r, *span)
            }

            Expr::Call(call) => {
                // rejected before the instruction can draw anything
                if !call.builtin.returns_value() {
                    return Err(err(ErrorCode::R004, call.span, format!(
                        "`{}` does not produce a value", call.builtin.name()
                    )));
                }
                self.eval_call(call)?.ok_or_else(|| {
                    err(ErrorCode::R004, call.span, format!(
                        "`{}` produced no value", call.builtin.name()
                    ))
                })
            }
        }
    }

    fn eval_int(&mut self, expr: &Expr) -> Result<i64, Error> {
        let value = self.eval_expr(expr)?;
        value.as_int().ok_or_else(|| err(ErrorCode::R004, expr.span(), format!(
            "expected a number, got {}", value.type_name()
        )))
    }

    // ─── Call dispatch ────────────────────────────────────────────────────────

    /// Arguments are evaluated in the caller's scope, then bound by parameter
    /// name in a fresh frame that lives for the duration of the call.
    fn eval_call(&mut self, call: &Call) -> Result<Option<Value>, Error> {
        let args = call.args.iter()
            .map(|a| self.eval_expr(a))
            .collect::<Result<Vec<_>, _>>()?;

        self.scope.push_frame();
        for (param, value) in call.builtin.params().iter().zip(&args) {
            self.scope.declare(param.name, value.clone());
        }
        trace!(builtin = call.builtin.name(), depth = self.scope.depth(), "call");

        let result = self.dispatch(call.builtin, &args, call.span);
        self.scope.pop_frame();
        result
    }

    fn dispatch(&mut self, builtin: Builtin, args: &[Value], span: Span) -> Result<Option<Value>, Error> {
        let mut ctx = Context { cursor: &mut self.cursor, canvas: &mut *self.canvas, span };
        builtins::call(builtin, args, &mut ctx)
    }
}

// ─── Binary operators ─────────────────────────────────────────────────────────

fn eval_binop(op: BinOp, l: Value, r: Value, span: Span) -> Result<Value, Error> {
    match op {
        BinOp::Eq    => return Ok(Value::Bool(l.loose_eq(&r))),
        BinOp::NotEq => return Ok(Value::Bool(!l.loose_eq(&r))),
        BinOp::And   => return Ok(Value::Bool(l.is_truthy() && r.is_truthy())),
        BinOp::Or    => return Ok(Value::Bool(l.is_truthy() || r.is_truthy())),
        _ => {}
    }

    let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
        return Err(err(ErrorCode::R004, span, format!(
            "operator `{}` not supported for {} and {}",
            op.symbol(), l.type_name(), r.type_name()
        )));
    };

    let value = match op {
        BinOp::Add => Value::Number(a + b),
        BinOp::Sub => Value::Number(a - b),
        BinOp::Mul => Value::Number(a * b),
        BinOp::Div => {
            if b == 0.0 { return Err(err(ErrorCode::R007, span, "division by zero")); }
            Value::Number(a / b)
        }
        BinOp::Mod => {
            if b == 0.0 { return Err(err(ErrorCode::R008, span, "modulo by zero")); }
            Value::Number(a % b)
        }
        BinOp::Pow  => Value::Number(a.powf(b)),
        BinOp::Lt   => Value::Bool(a < b),
        BinOp::LtEq => Value::Bool(a <= b),
        BinOp::Gt   => Value::Bool(a > b),
        BinOp::GtEq => Value::Bool(a >= b),
        BinOp::Eq | BinOp::NotEq | BinOp::And | BinOp::Or => unreachable!("handled above"),
    };
    Ok(value)
}

fn err(code: ErrorCode, span: Span, message: impl Into<String>) -> Error {
    Error::new(code, span.line, span.column, message)
}
