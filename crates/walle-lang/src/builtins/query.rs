//! Read-only instructions. Predicates answer 1 or 0; an unknown color name
//! never matches.

use super::{Context, flag, int_arg, text_arg};
use crate::canvas::Color;
use crate::error::Error;
use crate::runtime::value::Value;

type Outcome = Result<Option<Value>, Error>;

pub(super) fn actual_x(ctx: &mut Context) -> Outcome {
    Ok(Some(Value::from(ctx.cursor()?.x)))
}

pub(super) fn actual_y(ctx: &mut Context) -> Outcome {
    Ok(Some(Value::from(ctx.cursor()?.y)))
}

pub(super) fn canvas_size(ctx: &mut Context) -> Outcome {
    Ok(Some(Value::Number(ctx.canvas.size() as f64)))
}

/// `GetColorCount(color, x1, y1, x2, y2)` over absolute coordinates. Like
/// every instruction but `GetCanvasSize`, it needs a spawned cursor.
pub(super) fn color_count(args: &[Value], ctx: &mut Context) -> Outcome {
    ctx.cursor()?;
    let count = match Color::from_name(text_arg(args, 0)) {
        Some(color) => ctx.canvas.color_count(
            color,
            int_arg(args, 1), int_arg(args, 2),
            int_arg(args, 3), int_arg(args, 4),
        ),
        None => 0,
    };
    Ok(Some(Value::Number(count as f64)))
}

pub(super) fn is_brush_color(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    Ok(flag(cursor.color.name() == text_arg(args, 0)))
}

pub(super) fn is_brush_size(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    Ok(flag(cursor.brush_size == int_arg(args, 0)))
}

/// `IsCanvasColor(color, vertical, horizontal)`, offsets relative to the cursor.
pub(super) fn is_canvas_color(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    let x = cursor.x.saturating_add(int_arg(args, 2));
    let y = cursor.y.saturating_add(int_arg(args, 1));
    let matches = Color::from_name(text_arg(args, 0))
        .is_some_and(|color| ctx.canvas.is_color(x, y, color));
    Ok(flag(matches))
}
