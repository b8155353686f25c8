use color_eyre::Result;
use futures::future::BoxFuture;
use serde_json::Value;

pub mod https;

/// Raw outcome of a property write. Status handling is left to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends JSON property writes to the gateway.
///
/// `href` is the property's own endpoint as found in the thing description,
/// usually a path relative to the gateway.
pub trait PropertyTransport: Send + Sync {
    fn put_json<'a>(&'a self, href: &'a str, body: &'a Value)
        -> BoxFuture<'a, Result<TransportResponse>>;
}
