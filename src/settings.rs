use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct GatewaySettings {
    /// Base URL, e.g. `https://gateway.local` or `http://192.168.1.10:8080`
    pub addr: String,
    pub token: String,
    pub self_signed_cert: Option<String>,
    pub danger_accept_invalid_certs: Option<bool>,
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
}

fn default_poll_interval_seconds() -> u64 {
    5
}

#[derive(Clone, Deserialize, Debug)]
pub struct LightSettings {
    pub thing_id: String,
    pub startup_color: Option<String>,
    pub startup_color_temperature: Option<u32>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub light: LightSettings,
}

pub fn read_settings() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("Settings").required(false))
        .add_source(config::Environment::with_prefix("GATEWAY_LIGHT").separator("__"))
        .build()?
        .try_deserialize::<Settings>()
}
