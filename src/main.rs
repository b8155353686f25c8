use std::{sync::Arc, time::Duration};

use color_eyre::Result;
use gateway_light::{
    gateway::get_thing_state,
    light::{
        switch::{Thing, ThingWidget},
        ColorLight,
    },
    polling::{log_icon, poll_loop},
    protocols::https::mk_gateway_client,
    settings::read_settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::formatted_builder()
        .filter_module("gateway_light", log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let settings = read_settings()?;
    let client = mk_gateway_client(&settings)?;

    let state = get_thing_state(&client, &settings.light.thing_id).await?;
    let thing = Thing::from_description(&settings.light.thing_id, &state.description);

    let mut light = ColorLight::new(thing, Arc::new(client.clone()));
    light.update_from_gateway(&state.values);

    log::info!(
        "{}: {:?} light with {} detail views",
        light.thing().title,
        light.capability(),
        light.details().len()
    );
    for detail in light.details() {
        log::info!("  {}: {}", detail.property(), detail.summary());
    }
    log_icon(&light.thing().title, &light.icon());

    if let Some(color) = &settings.light.startup_color {
        if light.set_color(color).await {
            log_icon(&light.thing().title, &light.icon());
        }
    }

    if let Some(kelvin) = settings.light.startup_color_temperature {
        if light.set_color_temperature(kelvin).await {
            log_icon(&light.thing().title, &light.icon());
        }
    }

    let interval = Duration::from_secs(settings.gateway.poll_interval_seconds);

    tokio::select! {
        _ = poll_loop(&client, &mut light, interval) => {}
        result = tokio::signal::ctrl_c() => result?,
    }

    Ok(())
}
