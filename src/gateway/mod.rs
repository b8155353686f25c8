use color_eyre::Result;

use self::{
    properties::{get_property_values, PropertyValues},
    thing::{get_thing, ThingDescription},
};
use crate::protocols::https::GatewayClient;

pub mod properties;
pub mod thing;

#[derive(Clone, Debug)]
pub struct ThingState {
    pub description: ThingDescription,
    pub values: PropertyValues,
}

pub async fn get_thing_state(client: &GatewayClient, thing_id: &str) -> Result<ThingState> {
    let description = get_thing(client, thing_id).await?;
    let values = get_property_values(client, thing_id).await?;

    Ok(ThingState {
        description,
        values,
    })
}
