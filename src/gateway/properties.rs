use color_eyre::Result;
use serde_json::{Map, Value};

use crate::protocols::https::{mk_get_request, GatewayClient};

/// Current values of all properties of a thing, keyed by gateway property
/// name.
pub type PropertyValues = Map<String, Value>;

pub async fn get_property_values(client: &GatewayClient, thing_id: &str) -> Result<PropertyValues> {
    let uri = client.uri(&format!("/things/{}/properties", thing_id))?;

    let response: PropertyValues = mk_get_request(client, &uri).await?;

    Ok(response)
}
