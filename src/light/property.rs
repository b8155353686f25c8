use derive_builder::Builder;
use palette::Srgb;
use serde_json::Value;

use crate::color_model;

pub const ON: &str = "on";
pub const COLOR: &str = "color";
pub const COLOR_TEMPERATURE: &str = "colorTemperature";

/// Last known property values of a light.
///
/// Keys are only present once the gateway has reported them.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(setter(into, strip_option), default)]
pub struct DeviceProperties {
    /// `None` while the power state is unknown or unavailable.
    pub on: Option<bool>,
    pub color: Option<Srgb<u8>>,
    /// Kelvin
    pub color_temperature: Option<u32>,
}

/// Which property drives the icon color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    Color,
    ColorTemperature,
    #[default]
    None,
}

impl Capability {
    /// `Color` wins when a device describes both.
    pub fn from_flags(has_color: bool, has_color_temperature: bool) -> Self {
        match (has_color, has_color_temperature) {
            (true, _) => Capability::Color,
            (false, true) => Capability::ColorTemperature,
            (false, false) => Capability::None,
        }
    }
}

/// A normalised inbound property update.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyUpdate {
    On(Option<bool>),
    Color(Srgb<u8>),
    ColorTemperature(u32),
}

impl PropertyUpdate {
    /// Normalises a raw gateway value.
    ///
    /// Returns `None` for unknown property names and for values that should
    /// be ignored (falsy colors, non-numeric temperatures, non-boolean power
    /// states).
    pub fn parse(name: &str, value: &Value) -> Option<Self> {
        match name {
            ON => match value {
                Value::Bool(on) => Some(PropertyUpdate::On(Some(*on))),
                Value::Null => Some(PropertyUpdate::On(None)),
                _ => None,
            },
            COLOR => match value {
                Value::String(hex) if !hex.is_empty() => {
                    color_model::parse_hex(hex).ok().map(PropertyUpdate::Color)
                }
                _ => None,
            },
            COLOR_TEMPERATURE => TemperatureInput::from_value(value)
                .and_then(|input| input.kelvin())
                .map(PropertyUpdate::ColorTemperature),
            _ => None,
        }
    }
}

/// Color temperature as it may arrive from the gateway or from a caller:
/// either a number or a numeric string.
#[derive(Clone, Debug, PartialEq)]
pub enum TemperatureInput {
    Number(f64),
    Text(String),
}

impl TemperatureInput {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(TemperatureInput::Number),
            Value::String(s) => Some(TemperatureInput::Text(s.clone())),
            _ => None,
        }
    }

    /// Integer Kelvin value, truncating fractions. Strings are read like a
    /// leading base-10 integer, so `"2700K"` is 2700.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn kelvin(&self) -> Option<u32> {
        match self {
            TemperatureInput::Number(n) => {
                (n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX)).then(|| n.trunc() as u32)
            }
            TemperatureInput::Text(s) => {
                let s = s.trim_start();
                let s = s.strip_prefix('+').unwrap_or(s);
                let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
                s[..digits].parse().ok()
            }
        }
    }
}

impl From<u32> for TemperatureInput {
    fn from(kelvin: u32) -> Self {
        TemperatureInput::Number(f64::from(kelvin))
    }
}

impl From<&str> for TemperatureInput {
    fn from(text: &str) -> Self {
        TemperatureInput::Text(text.to_string())
    }
}
