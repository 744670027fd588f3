pub mod syntax;
pub mod builtins;
pub mod canvas;
pub mod runtime;
pub mod error;

pub use builtins::Builtin;
pub use canvas::{Canvas, Color};
pub use error::{Error, ErrorCode, ErrorKind};
pub use runtime::cursor::Cursor;
pub use runtime::value::Value;
pub use syntax::ast::Program;
pub use syntax::token::{Token, TokenKind};

use std::collections::HashMap;

// ─── Public API types ─────────────────────────────────────────────────────────

/// Outcome of one run. The canvas passed to [`run`] holds the pixels; this
/// holds everything else the host shows.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// In the order they occurred. Lexer and parser failures appear alone.
    pub errors: Vec<Error>,
    /// `None` when no `Spawn` succeeded.
    pub cursor: Option<Cursor>,
    /// Global variables at the end of the run.
    pub variables: HashMap<String, Value>,
}

impl Report {
    pub fn is_ok(&self) -> bool { self.errors.is_empty() }

    /// The error that stopped the run early, if any.
    pub fn fatal(&self) -> Option<&Error> {
        self.errors.iter().find(|e| e.is_fatal())
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Tokenize and parse source text.
pub fn compile(source: &str) -> Result<Program, Vec<Error>> {
    let tokens = syntax::lexer::Lexer::new(source).tokenize()?;
    syntax::parser::Parser::new(tokens).parse()
}

/// Compile `source` and execute it against `canvas`, which is drawn on in
/// place and not cleared first.
pub fn run(source: &str, canvas: &mut Canvas) -> Report {
    let program = match compile(source) {
        Ok(program) => program,
        Err(errors) => return Report { errors, ..Report::default() },
    };
    execute(&program, canvas)
}

/// Execute an already compiled program.
pub fn execute(program: &Program, canvas: &mut Canvas) -> Report {
    use runtime::interpreter::Interpreter;

    let mut interp = Interpreter::new(program, canvas);
    interp.run();
    let (cursor, variables, errors) = interp.finish();
    Report { errors, cursor, variables }
}
