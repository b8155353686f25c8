pub mod color_model;
pub mod gateway;
pub mod light;
pub mod polling;
pub mod protocols;
pub mod settings;
