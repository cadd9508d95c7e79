//! Named fractal definitions, built in or loaded from JSON.

use crate::color::{ColorWheel, Hue};
use crate::error::{FractalError, Result};
use crate::interpreter::{FractalInterpreter, InterpreterConfig, WheelCycler};
use crate::lsystem::RuleSet;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pen color cycling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleSpec {
    /// Starting hue. Unknown names fall back to red.
    pub hue: String,
    /// Rotation applied each time the cap is reached.
    pub step: f32,
    /// Factor the cap grows by after each rotation (2 doubles, 3 triples).
    pub growth: u64,
    #[serde(default = "default_channel_max")]
    pub channel_max: f32,
    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

fn default_channel_max() -> f32 {
    255.0
}

fn default_brightness() -> f32 {
    1.0
}

impl CycleSpec {
    fn problem(&self) -> Option<String> {
        if !(self.step.is_finite() && self.step > 0.0) {
            Some(format!("cycle step must be positive, got {}", self.step))
        } else if self.growth < 2 {
            Some(format!("cycle growth must be at least 2, got {}", self.growth))
        } else {
            None
        }
    }

    pub fn cycler(&self) -> WheelCycler {
        let mut wheel = ColorWheel::new(Hue::from_name_or_default(&self.hue), self.channel_max);
        wheel.set_brightness(self.brightness);
        WheelCycler::new(wheel, self.step, self.growth)
    }
}

/// Everything needed to draw one named fractal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    pub name: String,
    pub axiom: String,
    /// `(key, replacement)` pairs, applied in this order.
    pub rules: Vec<(String, String)>,
    /// Turn angle in degrees.
    pub angle: f32,
    #[serde(default)]
    pub heading: f32,
    #[serde(default)]
    pub cycle: Option<CycleSpec>,
}

impl PresetSpec {
    fn new(name: &str, axiom: &str, rules: &[(&str, &str)], angle: f32) -> Self {
        Self {
            name: name.to_owned(),
            axiom: axiom.to_owned(),
            rules: rules
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            angle,
            heading: 0.0,
            cycle: None,
        }
    }

    fn with_cycle(mut self, hue: Hue, step: f32, growth: u64) -> Self {
        self.cycle = Some(CycleSpec {
            hue: hue.name().to_owned(),
            step,
            growth,
            channel_max: default_channel_max(),
            brightness: default_brightness(),
        });
        self
    }

    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::new(self.rules.iter().cloned())
    }

    /// Checks the rules and the color cycle without building anything.
    pub fn validate(&self) -> Result<()> {
        self.rule_set()?;
        if let Some(reason) = self.cycle.as_ref().and_then(CycleSpec::problem) {
            return Err(FractalError::InvalidPreset {
                name: self.name.clone(),
                reason,
            });
        }
        Ok(())
    }

    pub fn config(&self, unit_length: f32) -> InterpreterConfig {
        InterpreterConfig {
            angle: self.angle,
            unit_length,
            heading: self.heading,
        }
    }

    /// Validates the rules and builds an interpreter, with a color cycler when
    /// the preset asks for one.
    pub fn build(&self, unit_length: f32) -> Result<FractalInterpreter<Option<WheelCycler>>> {
        let interpreter =
            FractalInterpreter::new(self.axiom.clone(), self.rule_set()?, self.config(unit_length));
        Ok(interpreter.with_colors(self.cycle.as_ref().map(CycleSpec::cycler)))
    }
}

/// The presets that ship with the crate.
pub fn builtin_presets() -> Vec<PresetSpec> {
    vec![
        PresetSpec::new("snowflake", "F++F++F", &[("F", "F-F++F-F")], 60.0),
        PresetSpec::new("dragon", "FX", &[("X", "X+YF"), ("Y", "FX-Y")], 90.0),
        PresetSpec::new(
            "plant",
            "FX",
            &[("X", "F-[[X]+X]+F[+FX]-X"), ("F", "FF")],
            25.0,
        ),
        PresetSpec::new(
            "sierpinski",
            "FA",
            &[("FA", "FB-FA-FB"), ("FB", "FA+FB+FA")],
            60.0,
        ),
        PresetSpec::new("colored_dragon", "FX", &[("X", "X+YF"), ("Y", "FX-Y")], 90.0)
            .with_cycle(Hue::Purple, 40.0, 2),
        PresetSpec::new(
            "colored_plant",
            "FX",
            &[("X", "F-[[X]+X]+F[+FX]-X"), ("F", "FF")],
            25.0,
        )
        .with_cycle(Hue::Teal, 40.0, 3),
    ]
}

/// Reads a JSON array of [`PresetSpec`]s. Every preset is validated eagerly.
pub fn load_presets(path: impl AsRef<Path>) -> Result<Vec<PresetSpec>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let presets: Vec<PresetSpec> = serde_json::from_str(&text)?;
    for preset in &presets {
        preset.validate()?;
    }
    info!("loaded {} presets from {}", presets.len(), path.display());
    Ok(presets)
}

/// Looks `name` up in `custom` first, then among the built-ins.
///
/// `serpinsky` is accepted as an alias for `sierpinski`.
pub fn find_preset(name: &str, custom: &[PresetSpec]) -> Result<PresetSpec> {
    let wanted = match name {
        "serpinsky" => "sierpinski",
        other => other,
    };
    custom
        .iter()
        .cloned()
        .chain(builtin_presets())
        .find(|p| p.name == wanted)
        .ok_or_else(|| FractalError::UnknownPreset(name.to_owned()))
}
