// tests/presets.rs
use lindenmayer_turtle::{
    DrawingSurface, FractalError, PresetSpec, SvgCanvas, builtin_presets, find_preset,
    load_presets,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn temp_storage() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn test_builtin_presets_build() {
    for preset in builtin_presets() {
        let mut interpreter = preset.build(1.0).unwrap();
        assert_eq!(interpreter.generation(0).unwrap(), preset.axiom, "{}", preset.name);
        assert_eq!(interpreter.config().angle, preset.angle);
    }
}

#[test]
fn test_lookup_and_aliases() {
    let arrowhead = find_preset("serpinsky", &[]).unwrap();
    assert_eq!(arrowhead.name, "sierpinski");
    assert_eq!(arrowhead.axiom, "FA");

    match find_preset("mandelbrot", &[]) {
        Err(FractalError::UnknownPreset(name)) => assert_eq!(name, "mandelbrot"),
        other => panic!("expected unknown preset, got {other:?}"),
    }
}

#[test]
fn test_colored_presets() {
    let dragon = find_preset("colored_dragon", &[]).unwrap();
    let interpreter = dragon.build(1.0).unwrap();
    let cycler = interpreter.colors().as_ref().unwrap();
    assert_eq!(cycler.growth(), 2);
    assert_eq!(cycler.wheel().color().0, [255.0, 0.0, 255.0]);

    let plant = find_preset("colored_plant", &[]).unwrap();
    assert_eq!(plant.build(1.0).unwrap().colors().as_ref().unwrap().growth(), 3);

    let plain = find_preset("dragon", &[]).unwrap().build(1.0).unwrap();
    assert!(plain.colors().is_none());
}

#[test]
fn test_load_custom_presets() {
    let dir = temp_storage();
    let path = write_file(
        dir.path(),
        "custom.json",
        r#"[
            {
                "name": "dragon",
                "axiom": "FX",
                "rules": [["X", "X-YF"], ["Y", "FX+Y"]],
                "angle": 45.0,
                "cycle": { "hue": "chartreuse", "step": 10.0, "growth": 3 }
            },
            { "name": "square", "axiom": "F+F+F+F", "rules": [], "angle": 90.0 }
        ]"#,
    );

    let custom = load_presets(&path).unwrap();
    assert_eq!(custom.len(), 2);

    // Custom presets shadow the built-ins.
    let dragon = find_preset("dragon", &custom).unwrap();
    assert_eq!(dragon.angle, 45.0);
    let interpreter = dragon.build(1.0).unwrap();
    // Unknown hue falls back to red.
    let wheel = interpreter.colors().as_ref().unwrap().wheel();
    assert_eq!(wheel.color().0, [255.0, 0.0, 0.0]);

    let square = find_preset("square", &custom).unwrap();
    assert_eq!(square.heading, 0.0);
    assert!(square.cycle.is_none());
}

#[test]
fn test_invalid_custom_presets() {
    let dir = temp_storage();
    let bad_key = write_file(
        dir.path(),
        "bad-key.json",
        r#"[{ "name": "x", "axiom": "F", "rules": [["f", "FF"]], "angle": 90.0 }]"#,
    );
    assert!(matches!(
        load_presets(&bad_key),
        Err(FractalError::InvalidRuleKey(_))
    ));

    let not_json = write_file(dir.path(), "not-json.json", "snowflake");
    assert!(matches!(
        load_presets(&not_json),
        Err(FractalError::Serialization(_))
    ));

    assert!(matches!(
        load_presets(dir.path().join("missing.json")),
        Err(FractalError::Io(_))
    ));
}

#[test]
fn test_cycle_parameters_are_checked_on_load() {
    let dir = temp_storage();
    let preset = |step: &str, growth: u64| {
        format!(
            r#"[{{ "name": "spiral", "axiom": "F", "rules": [], "angle": 90.0,
                  "cycle": {{ "hue": "red", "step": {step}, "growth": {growth} }} }}]"#
        )
    };

    for (file, step, growth) in [
        ("zero-step.json", "0.0", 2),
        ("negative-step.json", "-5.0", 2),
        ("flat-growth.json", "10.0", 1),
    ] {
        let path = write_file(dir.path(), file, &preset(step, growth));
        match load_presets(&path) {
            Err(FractalError::InvalidPreset { name, .. }) => assert_eq!(name, "spiral"),
            other => panic!("{file} should be rejected, got {other:?}"),
        }
    }

    let path = write_file(dir.path(), "ok.json", &preset("10.0", 2));
    let loaded = load_presets(&path).unwrap();
    assert!(loaded[0].validate().is_ok());
}

#[test]
fn test_svg_export() {
    let square = PresetSpec {
        name: "square".into(),
        axiom: "F+F+F+F".into(),
        rules: vec![],
        angle: 90.0,
        heading: 0.0,
        cycle: None,
    };
    let mut interpreter = square.build(10.0).unwrap();
    let mut canvas = SvgCanvas::new();

    let stats = interpreter.draw(&mut canvas, 0).unwrap();
    assert_eq!(stats.segments, 4);
    assert!(canvas.position().length() < 1e-3);

    let (min, max) = canvas.bounds().unwrap();
    assert!((max.x - min.x - 10.0).abs() < 1e-3);
    assert!((max.y - min.y - 10.0).abs() < 1e-3);

    let dir = temp_storage();
    let path = dir.path().join("square.svg");
    canvas.save(&path).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    // The closed square is one connected run in a single color.
    assert_eq!(svg.matches("<polyline").count(), 1);
    assert!(svg.contains(r##"stroke="#000000""##));
}

#[test]
fn test_svg_splits_runs_by_color() {
    let dragon = find_preset("colored_dragon", &[]).unwrap();
    let mut interpreter = dragon.build(5.0).unwrap();
    let mut canvas = SvgCanvas::new();

    let stats = interpreter.draw(&mut canvas, 6).unwrap();

    assert_eq!(canvas.segments().len(), stats.segments);
    let svg = canvas.to_svg();
    assert!(svg.matches("<polyline").count() > 1);
    assert!(svg.contains(r##"stroke="#ff00ff""##));
}
