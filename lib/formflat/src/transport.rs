//! Pinned HTTPS transport using rustls.
//!
//! The gateway's certificate bundle is compiled into the binary and is the
//! only trust root the client accepts. The transport is built once per
//! process and shared read-only afterwards.

use std::sync::LazyLock;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::RootCertStore;

/// Pinned certificate bundle for the gateway domains.
static CA_CERTIFICATES: &[u8] = include_bytes!("../certs/ca_certificates.pem");

static SHARED: LazyLock<HttpsConnector<HttpConnector>> = LazyLock::new(https_connector);

/// The process-wide HTTPS connector pinned to the embedded bundle.
///
/// Built on first use; every later call returns the same connector.
///
/// # Panics
///
/// Panics if the embedded bundle cannot be parsed. A client with no
/// verifiable trust root must not run, so startup aborts.
#[must_use]
pub fn shared() -> &'static HttpsConnector<HttpConnector> {
    &SHARED
}

/// Create an HTTPS connector trusting only the embedded certificate bundle.
///
/// The connector supports both HTTP/1.1 and HTTP/2 and refuses plain-HTTP
/// connections.
///
/// # Panics
///
/// Panics if the embedded bundle cannot be parsed.
#[must_use]
pub fn https_connector() -> HttpsConnector<HttpConnector> {
    let mut root_store = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut &*CA_CERTIFICATES) {
        match cert {
            Ok(cert) => {
                if let Err(e) = root_store.add(cert) {
                    panic!("failed to load gateway certificate bundle: {e}");
                }
            }
            Err(e) => panic!("failed to parse gateway certificate bundle: {e}"),
        }
    }
    assert!(
        !root_store.is_empty(),
        "gateway certificate bundle holds no certificates"
    );
    tracing::debug!(roots = root_store.len(), "loaded pinned trust roots");

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_only()
        .enable_http1()
        .enable_http2()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_parses_into_trust_roots() {
        let certs: Vec<_> = rustls_pemfile::certs(&mut &*CA_CERTIFICATES)
            .collect::<std::result::Result<_, _>>()
            .expect("parse bundle");
        assert!(!certs.is_empty());
    }

    #[test]
    fn creates_connector() {
        let _connector = https_connector();
    }

    #[test]
    fn shared_connector_is_reused() {
        let first: *const _ = shared();
        let second: *const _ = shared();
        assert_eq!(first, second);
    }
}
