use std::collections::HashMap;

use color_eyre::Result;
use serde::Deserialize;

use crate::{
    light::property::{COLOR, COLOR_TEMPERATURE, ON},
    protocols::https::{mk_get_request, GatewayClient},
};

#[derive(Deserialize, Debug, Clone)]
pub struct PropertyLinkData {
    pub rel: Option<String>,
    pub href: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PropertyFormData {
    pub href: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PropertyDescription {
    #[serde(rename = "@type")]
    pub semantic_type: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub unit: Option<String>,
    #[serde(default, rename = "readOnly")]
    pub read_only: bool,
    #[serde(default)]
    pub forms: Vec<PropertyFormData>,
    #[serde(default)]
    pub links: Vec<PropertyLinkData>,
}

impl PropertyDescription {
    /// The property's own endpoint. Newer gateways describe it in `forms`,
    /// older ones as a `property` link.
    pub fn href(&self) -> Option<&str> {
        self.forms
            .first()
            .map(|form| form.href.as_str())
            .or_else(|| {
                self.links
                    .iter()
                    .find(|link| link.rel.as_deref().map_or(true, |rel| rel == "property"))
                    .map(|link| link.href.as_str())
            })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ThingDescription {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyDescription>,
}

/// Gateway property name and endpoint backing one of the light's roles.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyLink {
    pub name: String,
    pub href: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Gateway properties backing the `on`, `color` and `colorTemperature` roles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyLinks {
    pub on: Option<PropertyLink>,
    pub color: Option<PropertyLink>,
    pub color_temperature: Option<PropertyLink>,
}

impl PropertyLinks {
    pub fn get(&self, role: &str) -> Option<&PropertyLink> {
        match role {
            ON => self.on.as_ref(),
            COLOR => self.color.as_ref(),
            COLOR_TEMPERATURE => self.color_temperature.as_ref(),
            _ => None,
        }
    }

    /// Maps a gateway property name back to its role.
    pub fn role_of(&self, name: &str) -> Option<&'static str> {
        [
            (ON, &self.on),
            (COLOR, &self.color),
            (COLOR_TEMPERATURE, &self.color_temperature),
        ]
        .into_iter()
        .find_map(|(role, link)| {
            link.as_ref()
                .filter(|link| link.name == name)
                .map(|_| role)
        })
    }
}

impl ThingDescription {
    /// Resolves the light's roles, preferring semantic `@type` annotations
    /// over property names. Properties without an href are skipped.
    pub fn property_links(&self) -> PropertyLinks {
        PropertyLinks {
            on: self.find_link("OnOffProperty", ON),
            color: self.find_link("ColorProperty", COLOR),
            color_temperature: self.find_link("ColorTemperatureProperty", COLOR_TEMPERATURE),
        }
    }

    fn find_link(&self, semantic_type: &str, fallback_name: &str) -> Option<PropertyLink> {
        // Sorted so that a description with duplicate annotations resolves
        // the same way every time.
        let mut names: Vec<&String> = self.properties.keys().collect();
        names.sort();

        names.retain(|name| self.properties[name.as_str()].href().is_some());

        let name = names
            .iter()
            .find(|name| {
                self.properties[name.as_str()].semantic_type.as_deref() == Some(semantic_type)
            })
            .copied()
            .or_else(|| names.iter().find(|name| name.as_str() == fallback_name).copied())?;

        let description = &self.properties[name.as_str()];

        Some(PropertyLink {
            name: name.clone(),
            href: description.href()?.to_string(),
            minimum: description.minimum,
            maximum: description.maximum,
        })
    }
}

pub async fn get_thing(client: &GatewayClient, thing_id: &str) -> Result<ThingDescription> {
    let uri = client.uri(&format!("/things/{}", thing_id))?;

    let response: ThingDescription = mk_get_request(client, &uri).await?;

    Ok(response)
}
