//! fractals: draw a named L-System preset to an SVG file.
//!
//! Commands:
//!   fractals <preset> <depth> [options]  draw a preset
//!   fractals list [--presets FILE]       list available presets
//!   fractals help                        show usage

use glam::Vec2;
use lindenmayer_turtle::{
    DrawingSurface, PresetSpec, RecordingSurface, Result, SvgCanvas,
    builtin_presets, find_preset, generation_index, load_presets,
};
use log::{error, info};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const START: Vec2 = Vec2::new(-200.0, 200.0);
const DEFAULT_SIZE: f32 = 5.0;

fn print_usage() {
    println!(
        r#"
Usage: fractals <preset> <depth> [options]
       fractals list [--presets FILE]

Options:
  --out FILE       SVG output path (default: <preset>-<depth>.svg)
  --size N         length of one forward step (default: {DEFAULT_SIZE})
  --presets FILE   JSON file with extra presets, searched before the built-ins
  --trace          print every surface call instead of writing an SVG

Examples:
  fractals dragon 10
  fractals colored_dragon 12 --out dragon.svg
  fractals plant 5 --size 3
"#
    );
}

#[derive(Debug, Default)]
struct Options {
    out: Option<PathBuf>,
    size: Option<f32>,
    presets: Option<PathBuf>,
    trace: bool,
}

fn parse_options(args: &[String]) -> std::result::Result<Options, String> {
    let mut opts = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--out" => opts.out = Some(value("--out")?.into()),
            "--presets" => opts.presets = Some(value("--presets")?.into()),
            "--size" => {
                let raw = value("--size")?;
                let size = raw
                    .parse::<f32>()
                    .map_err(|_| format!("invalid size: {raw}"))?;
                opts.size = Some(size);
            }
            "--trace" => opts.trace = true,
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(opts)
}

fn custom_presets(opts: &Options) -> Result<Vec<PresetSpec>> {
    match &opts.presets {
        Some(path) => load_presets(path),
        None => Ok(Vec::new()),
    }
}

fn cmd_list(opts: &Options) -> Result<()> {
    let custom = custom_presets(opts)?;
    let builtin = builtin_presets();
    for preset in custom.iter().chain(&builtin) {
        let colored = if preset.cycle.is_some() { " (colored)" } else { "" };
        println!(
            "  {:<16} axiom {:<10} angle {:>5}{colored}",
            preset.name, preset.axiom, preset.angle
        );
    }
    Ok(())
}

fn cmd_draw(name: &str, raw_depth: i64, opts: &Options) -> Result<()> {
    // Everything is validated before the first stroke.
    let depth = generation_index(raw_depth)?;
    let preset = find_preset(name, &custom_presets(opts)?)?;
    let mut interpreter = preset.build(opts.size.unwrap_or(DEFAULT_SIZE))?;

    if opts.trace {
        let mut surface = RecordingSurface::new();
        start(&mut surface);
        interpreter.draw(&mut surface, depth)?;
        for call in surface.calls() {
            println!("{call:?}");
        }
        return Ok(());
    }

    let mut canvas = SvgCanvas::new();
    start(&mut canvas);
    let stats = interpreter.draw(&mut canvas, depth)?;
    info!(
        "{} generation {}: {} symbols, {} segments",
        preset.name, depth, stats.symbols, stats.segments
    );

    let out = opts
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}-{}.svg", preset.name, depth)));
    canvas.save(&out)
}

fn start<S: DrawingSurface>(surface: &mut S) {
    surface.pen_up();
    surface.set_position(START);
    surface.pen_down();
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "list" => parse_options(&args[2..]).map(|opts| cmd_list(&opts)),
        name => match args.get(2) {
            Some(depth) => match depth.parse::<i64>() {
                Ok(depth) => parse_options(&args[3..]).map(|opts| cmd_draw(name, depth, &opts)),
                Err(_) => Err(format!("invalid depth: {depth}")),
            },
            None => Err("missing depth".to_owned()),
        },
    };

    match result {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("{e}");
            ExitCode::FAILURE
        }
        Err(usage) => {
            eprintln!("{usage}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}
