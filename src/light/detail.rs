use super::property::{DeviceProperties, COLOR, COLOR_TEMPERATURE, ON};
use crate::color_model;

/// Detail view for a single property. Views read the shared cache on every
/// `update`.
pub trait DetailView: Send {
    /// Role name of the property this view shows.
    fn property(&self) -> &'static str;

    fn update(&mut self, properties: &DeviceProperties);

    /// Short human readable form of what the view currently shows.
    fn summary(&self) -> String;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OnOffDetail {
    pub on: Option<bool>,
}

impl DetailView for OnOffDetail {
    fn property(&self) -> &'static str {
        ON
    }

    fn update(&mut self, properties: &DeviceProperties) {
        self.on = properties.on;
    }

    fn summary(&self) -> String {
        match self.on {
            Some(true) => "on".to_string(),
            Some(false) => "off".to_string(),
            None => "unknown".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorDetail {
    pub value: Option<String>,
}

impl DetailView for ColorDetail {
    fn property(&self) -> &'static str {
        COLOR
    }

    fn update(&mut self, properties: &DeviceProperties) {
        self.value = properties.color.map(color_model::to_hex);
    }

    fn summary(&self) -> String {
        self.value.clone().unwrap_or_else(|| "-".to_string())
    }
}

/// Slider-style view. The bounds come from the thing description and are
/// only used for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorTemperatureDetail {
    pub value: Option<u32>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub preview: Option<String>,
}

impl ColorTemperatureDetail {
    pub fn new(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        ColorTemperatureDetail {
            minimum,
            maximum,
            ..Default::default()
        }
    }
}

impl DetailView for ColorTemperatureDetail {
    fn property(&self) -> &'static str {
        COLOR_TEMPERATURE
    }

    fn update(&mut self, properties: &DeviceProperties) {
        self.value = properties.color_temperature;
        self.preview = properties
            .color_temperature
            .map(|kelvin| color_model::color_temperature_to_hex(f64::from(kelvin)));
    }

    fn summary(&self) -> String {
        match (self.value, &self.preview) {
            (Some(kelvin), Some(preview)) => format!("{}K ({})", kelvin, preview),
            _ => "-".to_string(),
        }
    }
}
