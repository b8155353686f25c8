use std::{sync::Arc, time::SystemTime};

use color_eyre::Result;
use eyre::eyre;
use futures::{future::BoxFuture, FutureExt};
use hyper::{header, Request, Uri};
use hyper_rustls::ConfigBuilderExt;
use serde::Deserialize;
use serde_json::Value;
use tokio_rustls::rustls::{
    client::{ServerCertVerified, ServerCertVerifier},
    Certificate, ClientConfig, RootCertStore, ServerName,
};

use super::{PropertyTransport, TransportResponse};
use crate::settings::Settings;

pub type HyperHttpsClient =
    hyper::Client<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// HTTP(S) client bound to one gateway and its access token.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    pub client: HyperHttpsClient,
    pub addr: String,
    pub token: String,
}

impl GatewayClient {
    /// Resolves a gateway path (or an absolute URL) against the gateway
    /// address.
    pub fn uri(&self, href: &str) -> Result<Uri> {
        let uri = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!(
                "{}/{}",
                self.addr.trim_end_matches('/'),
                href.trim_start_matches('/')
            )
        };

        Ok(uri.parse()?)
    }
}

pub fn mk_gateway_client(settings: &Settings) -> Result<GatewayClient> {
    let tls_config = mk_tls_config(settings)?;

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .build();

    // Build the hyper client
    let client = hyper::Client::builder().build(https);

    Ok(GatewayClient {
        client,
        addr: settings.gateway.addr.clone(),
        token: settings.gateway.token.clone(),
    })
}

fn mk_tls_config(settings: &Settings) -> Result<ClientConfig> {
    let builder = ClientConfig::builder().with_safe_defaults();

    if settings.gateway.danger_accept_invalid_certs == Some(true) {
        log::warn!("TLS certificate verification is disabled for the gateway connection");

        let mut config = builder
            .with_root_certificates(RootCertStore::empty())
            .with_no_client_auth();
        config
            .dangerous()
            .set_certificate_verifier(Arc::new(AcceptAnyServerCert));

        return Ok(config);
    }

    // Gateways on the local network usually serve a self signed certificate,
    // which can be trusted explicitly instead of the platform roots.
    let config = match &settings.gateway.self_signed_cert {
        Some(cert) => {
            let mut roots = RootCertStore::empty();
            for der in rustls_pemfile::certs(&mut cert.as_bytes())? {
                roots.add(&Certificate(der))?;
            }

            if roots.is_empty() {
                return Err(eyre!("No certificates found in gateway.self_signed_cert"));
            }

            builder
                .with_root_certificates(roots)
                .with_no_client_auth()
        }
        None => builder.with_native_roots().with_no_client_auth(),
    };

    Ok(config)
}

struct AcceptAnyServerCert;

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, tokio_rustls::rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

pub async fn mk_get_request<T: for<'a> Deserialize<'a>>(
    client: &GatewayClient,
    uri: &Uri,
) -> Result<T> {
    let request = Request::builder()
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", client.token))
        .header(header::ACCEPT, "application/json")
        .uri(uri)
        .body(hyper::Body::empty())?;

    let result = client.client.request(request).await?;
    let status = result.status();
    let body_bytes = hyper::body::to_bytes(result.into_body()).await?;

    if !status.is_success() {
        return Err(eyre!("GET {} failed with status {}", uri, status));
    }

    let de = &mut serde_json::Deserializer::from_slice(&body_bytes);
    let response: T = serde_path_to_error::deserialize(de)?;

    Ok(response)
}

pub async fn mk_put_request(
    client: &GatewayClient,
    uri: &Uri,
    body: &Value,
) -> Result<TransportResponse> {
    let body = serde_json::to_string(body)?;

    let request = Request::builder()
        .method("PUT")
        .header(header::AUTHORIZATION, format!("Bearer {}", client.token))
        .header(header::ACCEPT, "application/json")
        .header(header::CONTENT_TYPE, "application/json")
        .uri(uri)
        .body(body.into())?;

    let result = client.client.request(request).await?;
    let status = result.status().as_u16();
    let body_bytes = hyper::body::to_bytes(result.into_body()).await?;

    Ok(TransportResponse {
        status,
        body: body_bytes.to_vec(),
    })
}

impl PropertyTransport for GatewayClient {
    fn put_json<'a>(
        &'a self,
        href: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, Result<TransportResponse>> {
        async move {
            let uri = self.uri(href)?;
            log::debug!("PUT {} {}", uri, body);
            mk_put_request(self, &uri, body).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_client(addr: &str) -> GatewayClient {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(
                ClientConfig::builder()
                    .with_safe_defaults()
                    .with_root_certificates(RootCertStore::empty())
                    .with_no_client_auth(),
            )
            .https_or_http()
            .enable_http1()
            .build();

        GatewayClient {
            client: hyper::Client::builder().build(https),
            addr: addr.to_string(),
            token: "token".to_string(),
        }
    }

    #[test]
    fn relative_hrefs_resolve_against_gateway() {
        let client = mk_client("https://gateway.local/");

        assert_eq!(
            client.uri("/things/hue-1/properties/color").unwrap(),
            "https://gateway.local/things/hue-1/properties/color"
        );
    }

    #[test]
    fn absolute_hrefs_are_used_as_is() {
        let client = mk_client("https://gateway.local");

        assert_eq!(
            client.uri("http://other.local:8080/things/x").unwrap(),
            "http://other.local:8080/things/x"
        );
    }
}
