//! Shared test infrastructure for gateway-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, Once},
};

use color_eyre::Result;
use eyre::eyre;
use futures::{
    future::{self, BoxFuture},
    FutureExt,
};
use gateway_light::{
    gateway::thing::{PropertyLink, PropertyLinks},
    light::{
        detail::DetailView,
        property::DeviceProperties,
        switch::Thing,
        ColorLight,
    },
    protocols::{PropertyTransport, TransportResponse},
};
use serde_json::Value;

// ============================================================================
// Mock Transport
// ============================================================================

/// Canned reply for the next request.
pub enum Reply {
    /// 200 with the request body echoed back
    Echo,
    Status(u16, String),
    Fail(String),
}

/// Records every PUT and answers from a queue of replies, echoing the request
/// once the queue is empty.
#[derive(Default)]
pub struct MockTransport {
    pub requests: Mutex<Vec<(String, Value)>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(MockTransport::default())
    }

    pub fn push_reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl PropertyTransport for MockTransport {
    fn put_json<'a>(
        &'a self,
        href: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, Result<TransportResponse>> {
        self.requests
            .lock()
            .unwrap()
            .push((href.to_string(), body.clone()));

        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Echo);

        let response: Result<TransportResponse> = match reply {
            Reply::Echo => serde_json::to_vec(body)
                .map(|body| TransportResponse { status: 200, body })
                .map_err(|e| eyre!(e)),
            Reply::Status(status, body) => Ok(TransportResponse {
                status,
                body: body.into_bytes(),
            }),
            Reply::Fail(message) => Err(eyre!(message)),
        };

        future::ready(response).boxed()
    }
}

// ============================================================================
// Log Capture
// ============================================================================

struct CapturingLogger;

static LOGGER: CapturingLogger = CapturingLogger;
static LOGGER_INIT: Once = Once::new();
static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

impl log::Log for CapturingLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub fn init_logger() {
    LOGGER_INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Logged errors mentioning `needle`. Tests run in parallel, so callers
/// should filter on something unique to them, like a thing id.
pub fn logged_errors(needle: &str) -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == log::Level::Error && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn link(thing_id: &str, name: &str) -> PropertyLink {
    PropertyLink {
        name: name.to_string(),
        href: format!("/things/{}/properties/{}", thing_id, name),
        minimum: None,
        maximum: None,
    }
}

pub fn color_thing(id: &str) -> Thing {
    Thing {
        id: id.to_string(),
        title: id.to_string(),
        links: PropertyLinks {
            on: Some(link(id, "on")),
            color: Some(link(id, "color")),
            color_temperature: None,
        },
    }
}

pub fn temperature_thing(id: &str) -> Thing {
    Thing {
        id: id.to_string(),
        title: id.to_string(),
        links: PropertyLinks {
            on: Some(link(id, "on")),
            color: None,
            color_temperature: Some(PropertyLink {
                minimum: Some(2200.0),
                maximum: Some(6500.0),
                ..link(id, "colorTemperature")
            }),
        },
    }
}

pub fn mk_light(thing: Thing) -> (ColorLight, Arc<MockTransport>) {
    init_logger();
    let transport = MockTransport::new();
    let light = ColorLight::new(thing, transport.clone());

    (light, transport)
}

/// Detail view recording every cache snapshot it is shown.
pub struct RecordingDetail {
    pub seen: Arc<Mutex<Vec<DeviceProperties>>>,
}

impl DetailView for RecordingDetail {
    fn property(&self) -> &'static str {
        "on"
    }

    fn update(&mut self, properties: &DeviceProperties) {
        self.seen.lock().unwrap().push(properties.clone());
    }

    fn summary(&self) -> String {
        format!("{} updates", self.seen.lock().unwrap().len())
    }
}
