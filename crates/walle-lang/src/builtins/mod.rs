//! The fixed instruction set.
//!
//! Each instruction declares its parameters; arguments are checked against
//! that signature before any cursor or canvas state is touched. Drawing
//! instructions live in `draw`, read-only queries in `query`.

pub mod draw;
pub mod query;

use crate::canvas::Canvas;
use crate::error::{Error, ErrorCode};
use crate::runtime::cursor::Cursor;
use crate::runtime::value::Value;
use crate::syntax::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Color,
    Size,
    DrawLine,
    DrawCircle,
    DrawRectangle,
    Fill,
    GetActualX,
    GetActualY,
    GetCanvasSize,
    GetColorCount,
    IsBrushColor,
    IsBrushSize,
    IsCanvasColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind { Number, Text }

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn num(name: &'static str) -> Param { Param { name, kind: ParamKind::Number } }
const fn text(name: &'static str) -> Param { Param { name, kind: ParamKind::Text } }

// Signatures are `const` items so `params` can hand out `'static` slices.
const NO_PARAMS: &[Param] = &[];
const COLOR: &[Param] = &[text("color")];
const SIZE: &[Param] = &[num("size")];
const DRAW_LINE: &[Param] = &[num("dirX"), num("dirY"), num("distance")];
const DRAW_CIRCLE: &[Param] = &[num("dirX"), num("dirY"), num("radius")];
const DRAW_RECTANGLE: &[Param] = &[num("dirX"), num("dirY"), num("distance"), num("width"), num("height")];
const GET_COLOR_COUNT: &[Param] = &[text("color"), num("x1"), num("y1"), num("x2"), num("y2")];
const IS_CANVAS_COLOR: &[Param] = &[text("color"), num("vertical"), num("horizontal")];

impl Builtin {
    pub const ALL: [Builtin; 13] = [
        Builtin::Color, Builtin::Size, Builtin::DrawLine, Builtin::DrawCircle,
        Builtin::DrawRectangle, Builtin::Fill, Builtin::GetActualX, Builtin::GetActualY,
        Builtin::GetCanvasSize, Builtin::GetColorCount, Builtin::IsBrushColor,
        Builtin::IsBrushSize, Builtin::IsCanvasColor,
    ];

    pub fn from_name(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Color         => "Color",
            Builtin::Size          => "Size",
            Builtin::DrawLine      => "DrawLine",
            Builtin::DrawCircle    => "DrawCircle",
            Builtin::DrawRectangle => "DrawRectangle",
            Builtin::Fill          => "Fill",
            Builtin::GetActualX    => "GetActualX",
            Builtin::GetActualY    => "GetActualY",
            Builtin::GetCanvasSize => "GetCanvasSize",
            Builtin::GetColorCount => "GetColorCount",
            Builtin::IsBrushColor  => "IsBrushColor",
            Builtin::IsBrushSize   => "IsBrushSize",
            Builtin::IsCanvasColor => "IsCanvasColor",
        }
    }

    pub fn params(self) -> &'static [Param] {
        match self {
            Builtin::Color         => COLOR,
            Builtin::Size          => SIZE,
            Builtin::DrawLine      => DRAW_LINE,
            Builtin::DrawCircle    => DRAW_CIRCLE,
            Builtin::DrawRectangle => DRAW_RECTANGLE,
            Builtin::Fill
            | Builtin::GetActualX
            | Builtin::GetActualY
            | Builtin::GetCanvasSize => NO_PARAMS,
            Builtin::GetColorCount => GET_COLOR_COUNT,
            Builtin::IsBrushColor  => COLOR,
            Builtin::IsBrushSize   => SIZE,
            Builtin::IsCanvasColor => IS_CANVAS_COLOR,
        }
    }

    /// Whether a call produces a value usable inside an expression.
    pub fn returns_value(self) -> bool {
        matches!(
            self,
            Builtin::GetActualX | Builtin::GetActualY | Builtin::GetCanvasSize
            | Builtin::GetColorCount | Builtin::IsBrushColor | Builtin::IsBrushSize
            | Builtin::IsCanvasColor
        )
    }

    /// Checks arity and argument types against the signature.
    pub fn validate(self, args: &[Value], span: Span) -> Result<(), Error> {
        let params = self.params();
        if args.len() != params.len() {
            return Err(Error::new(ErrorCode::R003, span.line, span.column, format!(
                "`{}` expects {} argument{}, got {}",
                self.name(), params.len(), if params.len() == 1 { "" } else { "s" }, args.len()
            )));
        }
        for (param, arg) in params.iter().zip(args) {
            let ok = match param.kind {
                ParamKind::Number => arg.as_number().is_some(),
                ParamKind::Text   => arg.as_text().is_some(),
            };
            if !ok {
                let expected = match param.kind {
                    ParamKind::Number => "number",
                    ParamKind::Text   => "string",
                };
                return Err(Error::new(ErrorCode::R004, span.line, span.column, format!(
                    "`{}` argument `{}` must be a {expected}, got {}",
                    self.name(), param.name, arg.type_name()
                )));
            }
        }
        Ok(())
    }
}

// ─── Call context ─────────────────────────────────────────────────────────────

/// Mutable state an instruction may touch.
pub struct Context<'a> {
    pub cursor: &'a mut Option<Cursor>,
    pub canvas: &'a mut Canvas,
    pub span: Span,
}

impl Context<'_> {
    fn cursor(&self) -> Result<Cursor, Error> {
        (*self.cursor).ok_or_else(|| not_spawned(self.span))
    }

    fn cursor_mut(&mut self) -> Result<&mut Cursor, Error> {
        let span = self.span;
        self.cursor.as_mut().ok_or_else(|| not_spawned(span))
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>) -> Error {
        Error::new(code, self.span.line, self.span.column, message)
    }
}

fn not_spawned(span: Span) -> Error {
    Error::new(ErrorCode::R009, span.line, span.column, "Wall-E has not been spawned")
}

/// Validates `args` and runs `builtin`. `Ok(None)` for instructions that
/// produce no value.
pub fn call(builtin: Builtin, args: &[Value], ctx: &mut Context) -> Result<Option<Value>, Error> {
    builtin.validate(args, ctx.span)?;
    match builtin {
        Builtin::Color         => draw::color(args, ctx),
        Builtin::Size          => draw::size(args, ctx),
        Builtin::DrawLine      => draw::line(args, ctx),
        Builtin::DrawCircle    => draw::circle(args, ctx),
        Builtin::DrawRectangle => draw::rectangle(args, ctx),
        Builtin::Fill          => draw::fill(ctx),
        Builtin::GetActualX    => query::actual_x(ctx),
        Builtin::GetActualY    => query::actual_y(ctx),
        Builtin::GetCanvasSize => query::canvas_size(ctx),
        Builtin::GetColorCount => query::color_count(args, ctx),
        Builtin::IsBrushColor  => query::is_brush_color(args, ctx),
        Builtin::IsBrushSize   => query::is_brush_size(args, ctx),
        Builtin::IsCanvasColor => query::is_canvas_color(args, ctx),
    }
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Coordinates are kept within ±2³¹ so stroke arithmetic cannot overflow.
const COORD_LIMIT: i64 = 1 << 31;

/// `base + dir * magnitude`, saturating and clamped to the coordinate range.
pub(crate) fn offset(base: i64, dir: i64, magnitude: i64) -> i64 {
    base.saturating_add(dir.saturating_mul(magnitude)).clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Argument `i` as an integer; only called after `validate`.
pub(crate) fn int_arg(args: &[Value], i: usize) -> i64 {
    args[i].as_int().unwrap_or(0).clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// Argument `i` as text; only called after `validate`.
pub(crate) fn text_arg(args: &[Value], i: usize) -> &str {
    args[i].as_text().unwrap_or_default()
}

pub(crate) fn flag(b: bool) -> Option<Value> {
    Some(Value::Number(if b { 1.0 } else { 0.0 }))
}
