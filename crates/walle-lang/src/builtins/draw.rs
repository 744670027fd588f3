//! Instructions that change the cursor or paint the canvas. The stroke
//! instructions double as movement: the cursor ends where the stroke's
//! target point is.

use super::{Context, int_arg, offset, text_arg};
use crate::canvas::Color;
use crate::canvas::raster::normalize_brush;
use crate::error::{Error, ErrorCode};
use crate::runtime::value::Value;

type Outcome = Result<Option<Value>, Error>;

pub(super) fn color(args: &[Value], ctx: &mut Context) -> Outcome {
    ctx.cursor()?;
    let name = text_arg(args, 0);
    let Some(color) = Color::from_name(name) else {
        return Err(ctx.error(ErrorCode::R005, format!(
            "unknown color `{name}`; expected one of {}",
            Color::PALETTE.map(Color::name).join(", ")
        )));
    };
    ctx.cursor_mut()?.color = color;
    Ok(None)
}

pub(super) fn size(args: &[Value], ctx: &mut Context) -> Outcome {
    let size = normalize_brush(int_arg(args, 0));
    ctx.cursor_mut()?.brush_size = size;
    Ok(None)
}

/// `DrawLine(dirX, dirY, distance)`
pub(super) fn line(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    let (dx, dy, distance) = (int_arg(args, 0), int_arg(args, 1), int_arg(args, 2));
    let tx = offset(cursor.x, dx, distance);
    let ty = offset(cursor.y, dy, distance);

    ctx.canvas.draw_line(cursor.x, cursor.y, tx, ty, cursor.color, cursor.brush_size);
    ctx.cursor_mut()?.move_to(tx, ty);
    Ok(None)
}

/// `DrawCircle(dirX, dirY, radius)`: the centre sits `radius` steps away.
pub(super) fn circle(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    let (dx, dy, radius) = (int_arg(args, 0), int_arg(args, 1), int_arg(args, 2));
    let cx = offset(cursor.x, dx, radius);
    let cy = offset(cursor.y, dy, radius);

    ctx.canvas.draw_circle(cx, cy, radius, cursor.color, cursor.brush_size);
    ctx.cursor_mut()?.move_to(cx, cy);
    Ok(None)
}

/// `DrawRectangle(dirX, dirY, distance, width, height)`
pub(super) fn rectangle(args: &[Value], ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    let (dx, dy, distance) = (int_arg(args, 0), int_arg(args, 1), int_arg(args, 2));
    let (width, height) = (int_arg(args, 3), int_arg(args, 4));
    if width <= 0 || height <= 0 {
        return Err(ctx.error(ErrorCode::R006, format!(
            "rectangle size must be positive, got {width}×{height}"
        )));
    }
    let cx = offset(cursor.x, dx, distance);
    let cy = offset(cursor.y, dy, distance);

    ctx.canvas.draw_rectangle(cx, cy, width, height, cursor.color, cursor.brush_size);
    ctx.cursor_mut()?.move_to(cx, cy);
    Ok(None)
}

pub(super) fn fill(ctx: &mut Context) -> Outcome {
    let cursor = ctx.cursor()?;
    ctx.canvas.flood_fill(cursor.x, cursor.y, cursor.color);
    Ok(None)
}
