use std::time::Duration;

use color_eyre::Result;

use crate::{
    gateway::properties::get_property_values,
    light::{switch::ThingWidget, IconState},
    protocols::https::GatewayClient,
};

/// Fetches the thing's current property values and reflects them into the
/// widget. Returns the new icon state if it changed.
pub async fn poll_thing<W: ThingWidget>(
    client: &GatewayClient,
    widget: &mut W,
) -> Result<Option<IconState>> {
    let before = widget.icon();
    let values = get_property_values(client, &widget.thing().id).await?;

    widget.update_from_gateway(&values);

    let after = widget.icon();
    Ok((after != before).then_some(after))
}

/// Periodically poll the gateway and keep the widget in sync.
///
/// The gateway also offers a websocket for pushed updates, but polling
/// keeps the widget correct even when a pushed message is missed. Runs until
/// the surrounding task is dropped.
pub async fn poll_loop<W: ThingWidget>(
    client: &GatewayClient,
    widget: &mut W,
    interval: Duration,
) {
    loop {
        tokio::time::sleep(interval).await;

        match poll_thing(client, widget).await {
            Ok(Some(icon)) => log_icon(&widget.thing().title, &icon),
            Ok(None) => {}
            Err(e) => log::error!("{:?}", e),
        }
    }
}

pub fn log_icon(title: &str, icon: &IconState) {
    match &icon.color {
        Some(color) => log::info!(
            "{}: on, {}{}",
            title,
            color,
            if icon.bright { " (bright)" } else { "" }
        ),
        None => log::info!("{}: {}", title, if icon.on { "on" } else { "off" }),
    }
}
