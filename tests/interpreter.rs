// tests/interpreter.rs
use glam::Vec2;
use lindenmayer_turtle::{
    ColorStrategy, ColorWheel, DrawingSurface, FractalError, FractalInterpreter, Hue,
    InterpreterConfig, RecordingSurface, Rgb, RuleSet, SurfaceCall, SvgCanvas, TurtleOp,
    WheelCycler,
};

fn setup(angle: f32) -> FractalInterpreter {
    let rules = RuleSet::new([("X", "X+YF"), ("Y", "FX-Y")]).unwrap();
    FractalInterpreter::new(
        "FX",
        rules,
        InterpreterConfig {
            angle,
            ..Default::default()
        },
    )
}

#[test]
fn test_turns_and_moves() {
    let mut interpreter = setup(90.0);
    let mut surface = RecordingSurface::new();

    let stats = interpreter.interpret(&mut surface, "F+F-F").unwrap();

    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetHeading(0.0),
            SurfaceCall::Forward(1.0),
            SurfaceCall::Right(90.0),
            SurfaceCall::Forward(1.0),
            SurfaceCall::Left(90.0),
            SurfaceCall::Forward(1.0),
        ]
    );
    assert_eq!(stats.segments, 3);
    assert_eq!(stats.max_stack_depth, 0);
}

#[test]
fn test_push_and_pop() {
    let mut interpreter = setup(90.0);
    let mut surface = RecordingSurface::new();

    let stats = interpreter.interpret(&mut surface, "F[+F]F").unwrap();

    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetHeading(0.0),
            SurfaceCall::Forward(1.0),
            SurfaceCall::Right(90.0),
            SurfaceCall::Forward(1.0),
            // Restore of the state saved after the first F.
            SurfaceCall::PenUp,
            SurfaceCall::SetPosition(Vec2::new(1.0, 0.0)),
            SurfaceCall::SetHeading(0.0),
            SurfaceCall::SetPenColor(Rgb::BLACK),
            SurfaceCall::PenDown,
            SurfaceCall::Forward(1.0),
        ]
    );
    assert_eq!(stats.max_stack_depth, 1);
    assert_eq!(stats.actions, 6);
    assert!((surface.position() - Vec2::new(2.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_structural_symbols_are_ignored() {
    let mut interpreter = setup(90.0);
    let mut surface = RecordingSurface::new();

    let stats = interpreter.interpret(&mut surface, "XAYBF?").unwrap();

    assert_eq!(stats.symbols, 6);
    assert_eq!(stats.actions, 1);
    assert_eq!(
        surface.calls(),
        &[SurfaceCall::SetHeading(0.0), SurfaceCall::Forward(1.0)]
    );
    assert_eq!(interpreter.op('X'), TurtleOp::Ignore);
}

#[test]
fn test_go_moves_without_drawing() {
    let mut interpreter = setup(90.0);
    let mut canvas = SvgCanvas::new();

    interpreter.interpret(&mut canvas, "FGF").unwrap();

    assert_eq!(canvas.segments().len(), 2);
    assert_eq!(canvas.segments()[1].from, Vec2::new(2.0, 0.0));
    assert_eq!(canvas.position(), Vec2::new(3.0, 0.0));
    assert!(canvas.is_pen_down());
}

#[test]
fn test_unbalanced_restore_aborts() {
    let mut interpreter = setup(90.0);
    let mut surface = RecordingSurface::new();

    let err = interpreter.interpret(&mut surface, "F]F").unwrap_err();

    assert!(matches!(err, FractalError::UnbalancedState { offset: 1 }));
    // Drawing before the failure stays; nothing after it runs.
    assert_eq!(
        surface.calls(),
        &[SurfaceCall::SetHeading(0.0), SurfaceCall::Forward(1.0)]
    );
}

#[test]
fn test_draw_uses_cached_generations() {
    let mut interpreter = setup(90.0);
    let mut surface = RecordingSurface::new();

    let stats = interpreter.draw(&mut surface, 2).unwrap();
    assert_eq!(stats.symbols, "FX+YF+FX-YF".len());
    assert_eq!(stats.segments, 4);
    assert_eq!(interpreter.realized_generations(), 3);

    interpreter.draw(&mut surface, 1).unwrap();
    assert_eq!(interpreter.realized_generations(), 3);
    assert_eq!(interpreter.generation(3).unwrap(), "FX+YF+FX-YF+FX+YF-FX-YF");
}

#[test]
fn test_custom_symbol_map() {
    let mut interpreter = setup(45.0);
    interpreter.set_op('X', TurtleOp::Forward);
    interpreter.set_op('+', TurtleOp::Left);
    let mut surface = RecordingSurface::new();

    interpreter.interpret(&mut surface, "X+").unwrap();

    assert_eq!(
        surface.calls(),
        &[
            SurfaceCall::SetHeading(0.0),
            SurfaceCall::Forward(1.0),
            SurfaceCall::Left(45.0),
        ]
    );

    let bare = setup(90.0).with_map(Default::default());
    assert_eq!(bare.op('F'), TurtleOp::Ignore);
}

#[test]
fn test_configured_heading_and_length() {
    let rules = RuleSet::new([("F", "FF")]).unwrap();
    let config = InterpreterConfig {
        angle: 60.0,
        unit_length: 2.5,
        heading: 90.0,
    };
    let mut interpreter = FractalInterpreter::new("F", rules, config);
    let mut canvas = SvgCanvas::new();

    interpreter.draw(&mut canvas, 2).unwrap();

    assert_eq!(canvas.segments().len(), 4);
    assert!((canvas.position() - Vec2::new(0.0, 10.0)).length() < 1e-4);
}

fn pen_changes(calls: &[SurfaceCall]) -> Vec<Rgb> {
    calls
        .iter()
        .filter_map(|c| match c {
            SurfaceCall::SetPenColor(rgb) => Some(*rgb),
            _ => None,
        })
        .collect()
}

#[test]
fn test_wheel_cycler_doubling() {
    let cycler = WheelCycler::new(ColorWheel::new(Hue::Purple, 255.0), 40.0, 2);
    let mut interpreter = setup(90.0).with_colors(cycler);
    let mut surface = RecordingSurface::new();

    interpreter.interpret(&mut surface, "FFFFFFFFFF").unwrap();

    let colors = pen_changes(surface.calls());
    // Initial color, then rotations on visits 1, 2, 4 and 8.
    assert_eq!(colors.len(), 5);
    assert_eq!(colors[0], Rgb::new(255.0, 0.0, 255.0));
    assert_eq!(colors[1], Rgb::new(255.0, 0.0, 215.0));
    assert_eq!(colors[4], Rgb::new(255.0, 0.0, 95.0));
    // The first rotation lands between the first and second forward moves.
    assert_eq!(surface.calls()[3], SurfaceCall::SetPenColor(colors[1]));
}

#[test]
fn test_wheel_cycler_tripling() {
    let cycler = WheelCycler::new(ColorWheel::new(Hue::Red, 255.0), 40.0, 3);
    let mut interpreter = setup(90.0).with_colors(Some(cycler));
    let mut surface = RecordingSurface::new();

    // Ignored symbols do not advance the counter.
    interpreter.interpret(&mut surface, "FXFYFXFYFFFFFF").unwrap();

    // Initial color, then rotations on visits 1, 3 and 9.
    assert_eq!(pen_changes(surface.calls()).len(), 4);
    assert_eq!(interpreter.colors().as_ref().map(|c| c.growth()), Some(3));
}

#[test]
fn test_cycler_restarts_each_draw() {
    let mut cycler = WheelCycler::new(ColorWheel::new(Hue::Red, 255.0), 10.0, 2);
    assert_eq!(cycler.begin(), Some(Rgb::new(255.0, 0.0, 0.0)));
    assert_eq!(cycler.on_character_visited(0), None);
    assert_eq!(cycler.on_character_visited(1), Some(Rgb::new(255.0, 10.0, 0.0)));
    assert_eq!(cycler.on_character_visited(3), None);
    assert_eq!(cycler.on_character_visited(2), Some(Rgb::new(255.0, 20.0, 0.0)));

    // The cap resets but the wheel keeps its position.
    assert_eq!(cycler.begin(), Some(Rgb::new(255.0, 20.0, 0.0)));
    assert_eq!(cycler.on_character_visited(1), Some(Rgb::new(255.0, 30.0, 0.0)));
}

#[test]
fn test_restore_brings_back_pen_color() {
    let cycler = WheelCycler::new(ColorWheel::new(Hue::Red, 255.0), 50.0, 2);
    let mut interpreter = setup(90.0).with_colors(cycler);
    let mut surface = RecordingSurface::new();

    // Visit 1 is `F` inside the branch, so the color changes after the save.
    interpreter.interpret(&mut surface, "[F]").unwrap();

    assert_eq!(surface.pen_color(), Rgb::new(255.0, 0.0, 0.0));
}
