use serde_json::Value;

use super::{property::ON, IconState};
use crate::gateway::{
    properties::PropertyValues,
    thing::{PropertyLinks, ThingDescription},
};

/// Identity and property endpoints shared by every widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Thing {
    pub id: String,
    pub title: String,
    pub links: PropertyLinks,
}

impl Thing {
    pub fn from_description(id: &str, description: &ThingDescription) -> Self {
        Thing {
            id: id.to_string(),
            title: description.title.clone().unwrap_or_else(|| id.to_string()),
            links: description.property_links(),
        }
    }
}

/// Behaviour every thing widget provides to the code driving it.
pub trait ThingWidget {
    fn thing(&self) -> &Thing;

    /// Reflects a property change into the widget. `name` is one of the
    /// role names (`on`, `color`, `colorTemperature`).
    ///
    /// Returns whether the update was accepted. Unknown names and malformed
    /// values are ignored.
    fn update_property(&mut self, name: &str, value: &Value) -> bool;

    fn icon(&self) -> IconState;

    /// Feeds a set of gateway-named values through [`update_property`],
    /// skipping properties the widget has no role for.
    ///
    /// [`update_property`]: ThingWidget::update_property
    fn update_from_gateway(&mut self, values: &PropertyValues) -> usize {
        let mut accepted = 0;

        for (name, value) in values {
            let Some(role) = self.thing().links.role_of(name) else {
                continue;
            };

            if self.update_property(role, value) {
                accepted += 1;
            }
        }

        accepted
    }
}

/// Plain on/off switch, also embedded by richer widgets for their power
/// handling.
#[derive(Clone, Debug, Default)]
pub struct OnOffSwitch {
    pub thing: Thing,
    on: bool,
}

impl OnOffSwitch {
    pub fn new(thing: Thing) -> Self {
        OnOffSwitch { thing, on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Applies a power state. An unknown state leaves the visual state as it
    /// was.
    pub fn apply_on(&mut self, on: Option<bool>) {
        if let Some(on) = on {
            self.on = on;
        }
    }
}

impl ThingWidget for OnOffSwitch {
    fn thing(&self) -> &Thing {
        &self.thing
    }

    fn update_property(&mut self, name: &str, value: &Value) -> bool {
        match (name, value) {
            (ON, Value::Bool(on)) => {
                self.apply_on(Some(*on));
                true
            }
            _ => false,
        }
    }

    fn icon(&self) -> IconState {
        IconState {
            on: self.on,
            color: None,
            bright: false,
        }
    }
}
