use std::sync::Arc;

use color_eyre::Result;
use eyre::eyre;
use palette::Srgb;
use serde_json::{json, Map, Value};

use self::{
    detail::{ColorDetail, ColorTemperatureDetail, DetailView, OnOffDetail},
    property::{
        Capability, DeviceProperties, PropertyUpdate, TemperatureInput, COLOR, COLOR_TEMPERATURE,
    },
    switch::{OnOffSwitch, Thing, ThingWidget},
};
use crate::{color_model, protocols::PropertyTransport};

pub mod detail;
pub mod property;
pub mod switch;

/// What the icon should currently show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconState {
    pub on: bool,
    /// `#rrggbb`, `None` while the light is off.
    pub color: Option<String>,
    /// High-contrast styling flag, derived from `color`.
    pub bright: bool,
}

/// Color-capable light widget.
///
/// Property values are only ever taken from gateway notifications or from the
/// gateway's answer to a write, never optimistically from a request.
pub struct ColorLight {
    switch: OnOffSwitch,
    properties: DeviceProperties,
    capability: Capability,
    details: Vec<Box<dyn DetailView>>,
    transport: Arc<dyn PropertyTransport>,
}

impl ColorLight {
    /// Creates the widget along with a detail view for each property the
    /// thing exposes.
    pub fn new(thing: Thing, transport: Arc<dyn PropertyTransport>) -> Self {
        let links = &thing.links;
        let capability =
            Capability::from_flags(links.color.is_some(), links.color_temperature.is_some());

        let mut details: Vec<Box<dyn DetailView>> = Vec::new();
        if links.on.is_some() {
            details.push(Box::<OnOffDetail>::default());
        }
        if links.color.is_some() {
            details.push(Box::<ColorDetail>::default());
        }
        if let Some(link) = &links.color_temperature {
            details.push(Box::new(ColorTemperatureDetail::new(
                link.minimum,
                link.maximum,
            )));
        }

        ColorLight {
            switch: OnOffSwitch::new(thing),
            properties: DeviceProperties::default(),
            capability,
            details,
            transport,
        }
    }

    pub fn properties(&self) -> &DeviceProperties {
        &self.properties
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn is_on(&self) -> bool {
        self.switch.is_on()
    }

    pub fn details(&self) -> &[Box<dyn DetailView>] {
        &self.details
    }

    pub fn add_detail(&mut self, mut detail: Box<dyn DetailView>) {
        detail.update(&self.properties);
        self.details.push(detail);
    }

    /// Color the icon is drawn in when the light is on. Chosen from the
    /// capability, so a temperature-only light never looks at a cached
    /// `color`.
    pub fn icon_color(&self) -> Srgb<u8> {
        match self.capability {
            Capability::Color => self.properties.color.unwrap_or(color_model::WHITE),
            Capability::ColorTemperature => self
                .properties
                .color_temperature
                .map(|kelvin| color_model::color_temperature_to_rgb(f64::from(kelvin)))
                .unwrap_or(color_model::WHITE),
            Capability::None => color_model::WHITE,
        }
    }

    fn apply(&mut self, update: PropertyUpdate) {
        match update {
            PropertyUpdate::On(on) => {
                self.properties.on = on;
                self.switch.apply_on(on);
            }
            PropertyUpdate::Color(color) => self.properties.color = Some(color),
            PropertyUpdate::ColorTemperature(kelvin) => {
                self.properties.color_temperature = Some(kelvin)
            }
        }

        for detail in &mut self.details {
            detail.update(&self.properties);
        }
    }

    /// Writes a new color and reflects the gateway's answer.
    ///
    /// Failures are logged and leave the widget unchanged. Returns whether
    /// the gateway's value was applied.
    pub async fn set_color(&mut self, color: &str) -> bool {
        let color = match color_model::parse_hex(color) {
            Ok(color) => color_model::to_hex(color),
            Err(e) => {
                log::error!("{}: refusing to set invalid color {:?}: {}", self.thing().id, color, e);
                return false;
            }
        };

        self.set_logged(COLOR, json!(color)).await
    }

    /// Writes a new color temperature, given as a number or a numeric
    /// string, and reflects the gateway's answer.
    pub async fn set_color_temperature(&mut self, temperature: impl Into<TemperatureInput>) -> bool {
        let temperature = temperature.into();

        let Some(kelvin) = temperature.kelvin() else {
            log::error!(
                "{}: refusing to set invalid color temperature {:?}",
                self.thing().id,
                temperature
            );
            return false;
        };

        self.set_logged(COLOR_TEMPERATURE, json!(kelvin)).await
    }

    async fn set_logged(&mut self, role: &str, value: Value) -> bool {
        match self.set_property(role, value).await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::error!("{}: failed to set {}: {:?}", self.thing().id, role, e);
                false
            }
        }
    }

    async fn set_property(&mut self, role: &str, value: Value) -> Result<bool> {
        let link = self
            .thing()
            .links
            .get(role)
            .cloned()
            .ok_or_else(|| eyre!("Thing has no {} property", role))?;

        let mut body = Map::new();
        body.insert(link.name.clone(), value);
        let body = Value::Object(body);

        let response = self.transport.put_json(&link.href, &body).await?;

        if response.status != 200 {
            return Err(eyre!(
                "Unexpected status {} from PUT {}",
                response.status,
                link.href
            ));
        }

        let de = &mut serde_json::Deserializer::from_slice(&response.body);
        let echoed: Map<String, Value> = serde_path_to_error::deserialize(de)?;

        let value = echoed
            .get(&link.name)
            .ok_or_else(|| eyre!("Response to PUT {} is missing {}", link.href, link.name))?;

        Ok(self.update_property(role, value))
    }
}

impl ThingWidget for ColorLight {
    fn thing(&self) -> &Thing {
        &self.switch.thing
    }

    fn update_property(&mut self, name: &str, value: &Value) -> bool {
        match PropertyUpdate::parse(name, value) {
            Some(update) => {
                self.apply(update);
                true
            }
            None => {
                log::debug!("{}: ignoring {} = {}", self.thing().id, name, value);
                false
            }
        }
    }

    fn icon(&self) -> IconState {
        if !self.is_on() {
            return IconState::default();
        }

        let color = self.icon_color();

        IconState {
            on: true,
            color: Some(color_model::to_hex(color)),
            bright: color_model::is_bright_color(color),
        }
    }
}
