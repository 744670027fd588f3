//! Runtime behavior tests.
//!
//! Tests the full stack: source → `run` → canvas + report.
//! Variables and the cursor are inspected on the report, pixels on the canvas.

use walle_lang::{run, Canvas, Color, ErrorCode, ErrorKind, Report, Value};
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn exec(size: usize, src: &str) -> (Canvas, Report) {
    let mut canvas = Canvas::new(size);
    let report = run(src, &mut canvas);
    (canvas, report)
}

fn exec_ok(size: usize, src: &str) -> (Canvas, Report) {
    let (canvas, report) = exec(size, src);
    if !report.is_ok() {
        panic!("run failed: {:#?}", report.errors);
    }
    (canvas, report)
}

fn codes(report: &Report) -> Vec<ErrorCode> {
    report.errors.iter().map(|e| e.code).collect()
}

fn n(report: &Report, name: &str) -> f64 {
    match report.variable(name) {
        Some(Value::Number(x)) => *x,
        other => panic!("expected Number for '{name}', got: {other:?}"),
    }
}

fn position(report: &Report) -> (i64, i64) {
    let cursor = report.cursor.unwrap_or_else(|| panic!("cursor was never spawned"));
    (cursor.x, cursor.y)
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[test]
fn precedence_and_parentheses() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\na <- 3 + 4 * 5\nb <- (3 + 4) * 5");
    assert_eq!(n(&r, "a"), 23.0);
    assert_eq!(n(&r, "b"), 35.0);
}

#[test]
fn power_binds_tighter_than_product() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\np <- 2 ** 3 ** 2\nq <- 2 * 3 ** 2");
    assert_eq!(n(&r, "p"), 64.0);
    assert_eq!(n(&r, "q"), 18.0);
}

#[test]
fn subtraction_and_negative_literals() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nx <- 10\ny <- x-5\nz <- -3 - -2\nw <- 2 * -(x)");
    assert_eq!(n(&r, "y"), 5.0);
    assert_eq!(n(&r, "z"), -1.0);
    assert_eq!(n(&r, "w"), -20.0);
}

#[test]
fn unicode_assignment_arrow() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nx ← 4\ny <- x * 2");
    assert_eq!(n(&r, "y"), 8.0);
}

#[test]
fn comparisons_produce_bools() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\na <- \"x\" == \"x\"\nb <- 1 == \"1\"\nc <- 2 >= 3");
    assert_eq!(r.variable("a"), Some(&Value::Bool(true)));
    assert_eq!(r.variable("b"), Some(&Value::Bool(false)));
    assert_eq!(r.variable("c"), Some(&Value::Bool(false)));
}

#[test]
fn logic_does_not_short_circuit() {
    let (_, r) = exec(10, "Spawn(0, 0)\nx <- 0 && 1 / 0\ny <- 1");
    assert_eq!(codes(&r), vec![ErrorCode::R007]);
    assert_eq!(r.variable("x"), None);
    assert_eq!(n(&r, "y"), 1.0);
}

#[test]
fn arithmetic_errors_skip_only_their_statement() {
    let (_, r) = exec(10, "Spawn(0, 0)\na <- 1 / 0\nb <- 5 % 0\nc <- 7 % 3");
    assert_eq!(codes(&r), vec![ErrorCode::R007, ErrorCode::R008]);
    assert!(r.errors.iter().all(|e| e.kind() == ErrorKind::Arithmetic));
    assert_eq!(r.variable("a"), None);
    assert_eq!(r.variable("b"), None);
    assert_eq!(n(&r, "c"), 1.0);
    assert!(r.fatal().is_none());
}

#[test]
fn undefined_variable() {
    let (_, r) = exec(10, "Spawn(0, 0)\nx <- y + 1");
    assert_eq!(codes(&r), vec![ErrorCode::R001]);
    assert_eq!(r.errors[0].kind(), ErrorKind::Name);
}

#[test]
fn text_arithmetic_is_a_type_error() {
    let (_, r) = exec(10, "Spawn(0, 0)\nx <- \"a\" + 1\ny <- \"abc\" < 1");
    assert_eq!(codes(&r), vec![ErrorCode::R004, ErrorCode::R004]);
}

#[test]
fn errors_carry_statement_index_and_line() {
    let (_, r) = exec(10, "Spawn(0, 0)\n\nx <- 1 / 0");
    assert_eq!(r.errors[0].statement, Some(1));
    assert_eq!(r.errors[0].line, 3);
}

// ─── Control flow ────────────────────────────────────────────────────────────

#[test]
fn counting_loop() {
    let src = "\
Spawn(0, 0)
i <- 0
loop
i <- i + 1
GoTo [loop] (i < 10)
";
    let (_, r) = exec_ok(10, src);
    assert_eq!(n(&r, "i"), 10.0);
}

#[test]
fn false_condition_falls_through() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nGoTo [end] (0)\nx <- 1\nend\ny <- 2");
    assert_eq!(n(&r, "x"), 1.0);
    assert_eq!(n(&r, "y"), 2.0);
}

#[test]
fn forward_jump_skips_statements() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nGoTo [end] (\"yes\")\nx <- 1\nend\ny <- 2");
    assert_eq!(r.variable("x"), None);
    assert_eq!(n(&r, "y"), 2.0);
}

#[test]
fn undefined_label_is_a_name_error_and_terminates() {
    let (_, r) = exec(10, "Spawn(0, 0)\nGoTo [start] (1 == 1)\nx <- 1");
    assert_eq!(codes(&r), vec![ErrorCode::R002]);
    assert_eq!(r.errors[0].kind(), ErrorKind::Name);
    assert_eq!(n(&r, "x"), 1.0);
}

#[test]
fn duplicate_label_last_wins() {
    let src = "\
Spawn(0, 0)
n <- 0
GoTo [skip] (n == 0)
skip
n <- n + 1
skip
m <- 1
";
    let (_, r) = exec_ok(10, src);
    assert_eq!(n(&r, "n"), 0.0);
    assert_eq!(n(&r, "m"), 1.0);
}

#[test]
fn loop_draws_a_row() {
    let src = "\
Spawn(0, 0)
Color(\"Black\")
i <- 0
step
DrawLine(1, 0, 1)
i <- i + 1
GoTo [step] (i < 4)
";
    let (canvas, r) = exec_ok(10, src);
    assert_eq!(position(&r), (4, 0));
    assert_eq!(canvas.color_count(Color::Black, 0, 0, 9, 9), 5);
}

// ─── Cursor and brush ────────────────────────────────────────────────────────

#[test]
fn even_brush_sizes_round_down() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nSize(4)\na <- IsBrushSize(3)\nb <- IsBrushSize(4)");
    assert_eq!(n(&r, "a"), 1.0);
    assert_eq!(n(&r, "b"), 0.0);
    assert_eq!(r.cursor.map(|c| c.brush_size), Some(3));
}

#[test]
fn brush_size_below_one_clamps() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nSize(-6)\na <- IsBrushSize(1)");
    assert_eq!(n(&r, "a"), 1.0);
}

#[test]
fn default_cursor_state() {
    let (_, r) = exec_ok(10, "Spawn(3, 4)\nc <- IsBrushColor(\"White\")\ns <- IsBrushSize(1)");
    assert_eq!(n(&r, "c"), 1.0);
    assert_eq!(n(&r, "s"), 1.0);
}

#[test]
fn position_queries() {
    let (_, r) = exec_ok(8, "Spawn(3, 4)\na <- GetActualX()\nb <- GetActualY()\nc <- GetCanvasSize()");
    assert_eq!((n(&r, "a"), n(&r, "b"), n(&r, "c")), (3.0, 4.0, 8.0));
}

#[test]
fn spawn_rounds_fractional_coordinates() {
    let (_, r) = exec_ok(10, "Spawn(2.5, 0.4)");
    assert_eq!(position(&r), (3, 0));
}

#[test]
fn spawn_accepts_expressions() {
    let (_, r) = exec_ok(10, "Spawn(GetCanvasSize() - 1, 2 * 2)");
    assert_eq!(position(&r), (9, 4));
}

#[test]
fn invalid_spawn_then_cursor_use_is_fatal() {
    let src = "\
Spawn(-1, 0)
x <- GetCanvasSize()
Fill()
y <- 2
";
    let (canvas, r) = exec(10, src);
    assert_eq!(codes(&r), vec![ErrorCode::R006, ErrorCode::R009]);
    assert_eq!(n(&r, "x"), 10.0);
    assert_eq!(r.variable("y"), None);
    assert_eq!(r.cursor, None);
    assert_eq!(r.fatal().map(|e| e.kind()), Some(ErrorKind::State));
    assert_eq!(canvas, Canvas::new(10));
}

#[test]
fn color_and_color_count_need_a_cursor() {
    let (_, r) = exec(10, "Spawn(-1, 0)\nColor(\"Pink\")\nx <- 1");
    assert_eq!(codes(&r), vec![ErrorCode::R006, ErrorCode::R009]);
    assert_eq!(r.variable("x"), None);

    let (_, r) = exec(10, "Spawn(-1, 0)\nn <- GetColorCount(\"White\", 0, 0, 1, 1)");
    assert_eq!(codes(&r), vec![ErrorCode::R006, ErrorCode::R009]);
    assert_eq!(r.variable("n"), None);
}

#[test]
fn unknown_color_keeps_previous() {
    let (_, r) = exec(10, "Spawn(0, 0)\nColor(\"Pink\")\nb <- IsBrushColor(\"White\")");
    assert_eq!(codes(&r), vec![ErrorCode::R005]);
    assert_eq!(r.errors[0].kind(), ErrorKind::Domain);
    assert_eq!(n(&r, "b"), 1.0);
}

#[test]
fn color_names_are_case_sensitive() {
    let (_, r) = exec(10, "Spawn(0, 0)\nColor(\"red\")\nq <- IsBrushColor(\"red\")");
    assert_eq!(codes(&r), vec![ErrorCode::R005]);
    assert_eq!(n(&r, "q"), 0.0);
}

#[test]
fn arity_and_type_mismatches() {
    let (_, r) = exec(10, "Spawn(0, 0)\nDrawLine(1, 0)\nSize(\"big\")\nColor(3)");
    assert_eq!(codes(&r), vec![ErrorCode::R003, ErrorCode::R004, ErrorCode::R004]);
    assert!(r.errors.iter().all(|e| e.kind() == ErrorKind::Type));
}

#[test]
fn instruction_without_value_in_expression() {
    let (canvas, r) = exec(3, "Spawn(0, 0)\nColor(\"Red\")\nx <- Fill()");
    assert_eq!(codes(&r), vec![ErrorCode::R004]);
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 2, 2), 0);
}

#[test]
fn call_parameters_do_not_leak() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nsize <- 7\nSize(3)\nb <- size\nColor(\"Red\")");
    assert_eq!(n(&r, "b"), 7.0);
    assert_eq!(r.variable("color"), None);
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

#[test]
fn line_covers_start_and_every_step() {
    let (canvas, r) = exec_ok(10, "Spawn(0, 0)\nColor(\"Black\")\nDrawLine(1, 0, 5)\nn <- GetColorCount(\"Black\", 0, 0, 5, 0)");
    assert_eq!(n(&r, "n"), 6.0);
    assert_eq!(position(&r), (5, 0));
    assert_eq!(canvas.get(6, 0), Some(Color::White));
}

#[test]
fn line_in_default_color() {
    let (_, r) = exec_ok(10, "Spawn(0, 0)\nDrawLine(1, 0, 5)\nn <- GetColorCount(\"White\", 0, 0, 5, 0)");
    assert_eq!(n(&r, "n"), 6.0);
}

#[test]
fn diagonal_line_with_negative_direction() {
    let (canvas, r) = exec_ok(10, "Spawn(5, 5)\nColor(\"Blue\")\nDrawLine(-1, -1, 3)");
    assert_eq!(position(&r), (2, 2));
    for i in 2..=5 {
        assert_eq!(canvas.get(i, i), Some(Color::Blue));
    }
}

#[test]
fn thick_brush_stamps_a_disk() {
    let (canvas, _) = exec_ok(11, "Spawn(5, 5)\nColor(\"Red\")\nSize(3)\nDrawLine(1, 0, 0)");
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 10, 10), 5);
}

#[test]
fn off_canvas_drawing_is_ignored() {
    let (canvas, r) = exec_ok(5, "Spawn(0, 0)\nColor(\"Black\")\nDrawLine(-1, 0, 3)\nx <- GetActualX()\nFill()");
    assert_eq!(canvas.color_count(Color::Black, 0, 0, 4, 4), 1);
    assert_eq!(n(&r, "x"), -3.0);
}

#[test]
fn far_reaching_strokes_finish_promptly() {
    let src = "\
Spawn(0, 0)
Color(\"Red\")
DrawLine(1, 0, 2000000000)
DrawLine(-1, 0, 2000000000)
DrawLine(0, 1, 2000000000)
DrawLine(0, -1, 2000000000)
DrawCircle(0, 0, 2000000000)
";
    let (canvas, r) = exec_ok(10, src);
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 9, 9), 19);
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 9, 0), 10);
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 0, 9), 10);
    assert_eq!(position(&r), (0, 0));
}

#[test]
fn circle_moves_cursor_to_centre() {
    let src = "\
Spawn(5, 5)
Color(\"Blue\")
DrawCircle(1, 0, 3)
edge <- IsCanvasColor(\"Blue\", 0, 3)
centre <- IsCanvasColor(\"Blue\", 0, 0)
";
    let (_, r) = exec_ok(20, src);
    assert_eq!(position(&r), (8, 5));
    assert_eq!(n(&r, "edge"), 1.0);
    assert_eq!(n(&r, "centre"), 0.0);
}

#[test]
fn rectangle_border() {
    let (canvas, r) = exec_ok(10, "Spawn(2, 2)\nColor(\"Black\")\nDrawRectangle(1, 0, 2, 3, 3)");
    assert_eq!(position(&r), (4, 2));
    assert_eq!(canvas.color_count(Color::Black, 0, 0, 9, 9), 8);
    assert_eq!(canvas.get(4, 2), Some(Color::White));
    assert_eq!(canvas.get(3, 1), Some(Color::Black));
    assert_eq!(canvas.get(5, 3), Some(Color::Black));
}

#[test]
fn rectangle_with_empty_size_is_rejected() {
    let (canvas, r) = exec(10, "Spawn(2, 2)\nColor(\"Black\")\nDrawRectangle(1, 0, 2, 0, 3)");
    assert_eq!(codes(&r), vec![ErrorCode::R006]);
    assert_eq!(position(&r), (2, 2));
    assert_eq!(canvas.color_count(Color::Black, 0, 0, 9, 9), 0);
}

#[test]
fn fill_whole_canvas_is_idempotent() {
    let src = "\
Spawn(2, 2)
Color(\"Green\")
Fill()
a <- GetColorCount(\"Green\", 0, 0, 4, 4)
Fill()
b <- GetColorCount(\"Green\", 4, 4, 0, 0)
";
    let (canvas, r) = exec_ok(5, src);
    assert_eq!(n(&r, "a"), 25.0);
    assert_eq!(n(&r, "b"), 25.0);
    assert!(canvas.pixels().iter().all(|&c| c == Color::Green));
}

#[test]
fn fill_stops_at_borders() {
    let src = "\
Spawn(2, 0)
Color(\"Black\")
DrawLine(0, 1, 4)
Color(\"Red\")
Size(1)
DrawLine(1, 0, 0)
";
    // column x = 2 is black except (2, 4), which the zero-length stroke turns red
    let (mut canvas, r) = exec_ok(5, src);
    assert_eq!(position(&r), (2, 4));
    canvas.flood_fill(0, 0, Color::Yellow);
    assert_eq!(canvas.color_count(Color::Yellow, 0, 0, 4, 4), 10);
    assert_eq!(canvas.color_count(Color::Black, 0, 0, 4, 4), 4);
}

#[test]
fn canvas_color_is_relative_to_cursor() {
    let src = "\
Spawn(1, 1)
Color(\"Red\")
DrawLine(1, 0, 2)
a <- IsCanvasColor(\"Red\", 0, -1)
b <- IsCanvasColor(\"Red\", 1, 0)
c <- IsCanvasColor(\"Red\", 0, 100)
d <- IsCanvasColor(\"Mauve\", 0, 0)
";
    let (_, r) = exec_ok(8, src);
    assert_eq!((n(&r, "a"), n(&r, "b"), n(&r, "c"), n(&r, "d")), (1.0, 0.0, 0.0, 0.0));
}

#[test]
fn color_count_with_unknown_color_is_zero() {
    let (_, r) = exec_ok(4, "Spawn(0, 0)\nn <- GetColorCount(\"Mauve\", 0, 0, 3, 3)");
    assert_eq!(n(&r, "n"), 0.0);
}

// ─── Phases and persistence ──────────────────────────────────────────────────

#[test]
fn lexical_error_runs_nothing() {
    let (canvas, r) = exec(5, "Spawn(0, 0)\nColor(\"Red\")\nFill()\nx <- 3 $ 4");
    assert_eq!(codes(&r), vec![ErrorCode::L001]);
    assert_eq!(r.errors[0].line, 4);
    assert_eq!(r.cursor, None);
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 4, 4), 0);
}

#[test]
fn syntax_error_runs_nothing() {
    let (canvas, r) = exec(5, "Spawn(0, 0)\nColor(\"Red\")\nFill()\nDrawLine(1, 0");
    assert_eq!(codes(&r), vec![ErrorCode::P002]);
    assert_eq!(r.fatal().map(|e| e.kind()), Some(ErrorKind::Syntax));
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 4, 4), 0);
}

#[test]
fn canvas_persists_between_runs() {
    let mut canvas = Canvas::new(3);
    let first = run("Spawn(0, 0)\nColor(\"Red\")\nFill()", &mut canvas);
    assert!(first.is_ok());

    let second = run("Spawn(1, 1)\nn <- GetColorCount(\"Red\", 0, 0, 2, 2)", &mut canvas);
    assert_eq!(n(&second, "n"), 9.0);

    canvas.clear();
    assert_eq!(canvas.color_count(Color::Red, 0, 0, 2, 2), 0);
}

#[test]
fn empty_statements_and_crlf() {
    let (_, r) = exec_ok(10, "\r\n\r\nSpawn(1, 1)\r\n\r\nx <- 2\r\n");
    assert_eq!(n(&r, "x"), 2.0);
}
