//! MEATER Cloud API client.
//!
//! Owns the bearer token and turns HTTP exchanges into typed results.
//! The network itself is behind an injected [`HttpTransport`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::probe::Probe;
use crate::protocol::endpoints::{self, DeviceScope};
use crate::protocol::payload::{LoginRequest, LoginResponse};
use crate::protocol::DevicePayload;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Client for the MEATER Cloud public API.
///
/// Call [`authenticate`](Self::authenticate) once, then poll with
/// [`list_devices`](Self::list_devices) or [`get_device`](Self::get_device).
/// Every failure is returned to the caller as is; the client performs no
/// retries and no caching.
pub struct MeaterClient {
    /// Injected HTTP transport.
    transport: Arc<dyn HttpTransport>,
    /// API root, ending in `/`.
    base_url: Url,
    /// Bearer token. `None` until a login succeeds.
    token: RwLock<Option<String>>,
}

impl MeaterClient {
    /// Create a client that talks to the API over `reqwest`.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, timeout and user agent for the transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport every request goes through
    /// * `config` - Only the base URL is read; timeout and user agent are the
    ///   transport's concern
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            token: RwLock::new(None),
        }
    }

    /// The API root requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a login has succeeded on this client.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    // === Authentication ===

    /// Log in and keep the returned token for later requests.
    ///
    /// A 200 response without a non-empty `data.token` is reported as
    /// [`Error::Authentication`]. Calling this again replaces the token.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email
    /// * `password` - Account password
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] on a 401 or a token-less success,
    /// and the usual status errors otherwise. The stored token is left
    /// untouched on failure.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<()> {
        let url = endpoints::login_url(&self.base_url)?;
        let body = serde_json::to_string(&LoginRequest { email, password }).map_err(|e| {
            Error::InvalidParameter {
                name: "credentials".to_string(),
                value: e.to_string(),
            }
        })?;
        let headers = [("Content-Type".to_string(), "application/json".to_string())];

        debug!("POST {}", url);
        let resp = self.transport.post(&url, &headers, body).await?;
        check_status(&resp, false)?;

        let value = parse_json(&resp.body)?;
        let token = serde_json::from_value::<LoginResponse>(value)
            .ok()
            .and_then(LoginResponse::token)
            .ok_or_else(|| Error::authentication("unable to obtain an auth token from the API"))?;

        *self.token.write() = Some(token);
        info!("Authenticated with MEATER Cloud");

        Ok(())
    }

    // === Devices ===

    /// Fetch every device on the account.
    ///
    /// Probes are returned in response order, indexed from 1. An account
    /// with no connected devices yields an empty list.
    ///
    /// # Returns
    ///
    /// One [`Probe`] per device, with index `position + 1`
    pub async fn list_devices(&self) -> Result<Vec<Probe>> {
        self.fetch_probes(DeviceScope::All).await
    }

    /// Fetch a single device.
    ///
    /// # Arguments
    ///
    /// * `device_id` - Device identifier as reported by [`Probe::id`]
    ///
    /// # Returns
    ///
    /// A list holding exactly one probe, with index 1
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a blank `device_id` without
    /// making a request, and [`Error::UnknownDevice`] if the API answers 404.
    pub async fn get_device(&self, device_id: &str) -> Result<Vec<Probe>> {
        if device_id.trim().is_empty() {
            return Err(Error::InvalidParameter {
                name: "device_id".to_string(),
                value: device_id.to_string(),
            });
        }
        self.fetch_probes(DeviceScope::One(device_id)).await
    }

    async fn fetch_probes(&self, scope: DeviceScope<'_>) -> Result<Vec<Probe>> {
        let devices = self.fetch_raw_devices(scope).await?;

        devices
            .into_iter()
            .enumerate()
            .map(|(position, device)| {
                trace!(device_id = %device.id, position, "building probe");
                Probe::from_payload(device, position + 1)
            })
            .collect()
    }

    async fn fetch_raw_devices(&self, scope: DeviceScope<'_>) -> Result<Vec<DevicePayload>> {
        let headers = self.auth_headers()?;
        let url = scope.url(&self.base_url)?;

        debug!("GET {}", url);
        let resp = self.transport.get(&url, &headers).await?;
        check_status(&resp, true)?;

        let value = parse_json(&resp.body)?;
        if is_empty_body(&value) {
            return Err(Error::unexpected("the server did not return a valid response"));
        }

        scope.extract(value)
    }

    fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        let guard = self.token.read();
        let token = guard.as_deref().ok_or_else(|| {
            Error::authentication("you need to authenticate before making requests to the API")
        })?;
        Ok(vec![("Authorization".to_string(), format!("Bearer {token}"))])
    }
}

impl std::fmt::Debug for MeaterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeaterClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

fn check_status(resp: &HttpResponse, device_scoped: bool) -> Result<()> {
    match Error::from_status(resp.status, device_scoped) {
        None => Ok(()),
        Some(err) => {
            warn!(status = resp.status, "request failed: {}", err);
            Err(err)
        }
    }
}

fn parse_json(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(Error::unexpected("the server did not return a valid response"));
    }
    serde_json::from_str(body).map_err(|e| Error::unexpected(format!("invalid JSON body: {e}")))
}

fn is_empty_body(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockHttpTransport;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    const TOKEN: &str = "abc";

    fn client(mock: MockHttpTransport) -> MeaterClient {
        MeaterClient::with_transport(Arc::new(mock), &ClientConfig::default())
    }

    fn expect_login(mock: &mut MockHttpTransport) {
        mock.expect_post()
            .times(1)
            .returning(|_, _, _| Ok(HttpResponse::new(200, json!({"data": {"token": TOKEN}}).to_string())));
    }

    fn expect_get(mock: &mut MockHttpTransport, status: u16, body: String) {
        mock.expect_get()
            .times(1)
            .returning(move |_, _| Ok(HttpResponse::new(status, body.clone())));
    }

    fn device(id: &str) -> Value {
        json!({
            "id": id,
            "temperature": {"internal": 20.0, "ambient": 21.0},
            "cook": null,
            "updated_at": 1700000000
        })
    }

    async fn logged_in(mut mock: MockHttpTransport) -> MeaterClient {
        expect_login(&mut mock);
        let client = client(mock);
        client.authenticate("cook@example.com", "secret").await.unwrap();
        client
    }

    // === Authentication ===

    #[tokio::test]
    async fn test_authenticate_sends_json_credentials() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post()
            .withf(|url, headers, body| {
                url.as_str() == "https://public-api.cloud.meater.com/v1/login"
                    && headers
                        .iter()
                        .any(|(k, v)| k == "Content-Type" && v == "application/json")
                    && serde_json::from_str::<Value>(body).ok()
                        == Some(json!({"email": "cook@example.com", "password": "secret"}))
            })
            .times(1)
            .returning(|_, _, _| Ok(HttpResponse::new(200, r#"{"data":{"token":"abc"}}"#)));

        let client = client(mock);
        assert!(!client.is_authenticated());
        tokio_test::assert_ok!(client.authenticate("cook@example.com", "secret").await);
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_authenticate_missing_token() {
        for body in [
            json!({"data": {}}),
            json!({"data": {"token": ""}}),
            json!({"data": {"token": null}}),
            json!({"data": {"token": 42}}),
            json!({"data": null}),
            json!({}),
        ] {
            let mut mock = MockHttpTransport::new();
            let text = body.to_string();
            mock.expect_post()
                .returning(move |_, _, _| Ok(HttpResponse::new(200, text.clone())));
            let client = client(mock);

            let result = client.authenticate("a", "b").await;
            assert!(
                matches!(result, Err(Error::Authentication { .. })),
                "body {body} gave {result:?}"
            );
            assert!(!client.is_authenticated());
        }
    }

    #[tokio::test]
    async fn test_authenticate_non_json_body() {
        let mut mock = MockHttpTransport::new();
        mock.expect_post()
            .returning(|_, _, _| Ok(HttpResponse::new(200, "<html>oops</html>")));

        let result = client(mock).authenticate("a", "b").await;
        assert!(matches!(result, Err(Error::UnexpectedResponse { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_status_mapping() {
        let cases: [(u16, fn(&Error) -> bool); 5] = [
            (401, |e: &Error| matches!(e, Error::Authentication { .. })),
            (429, |e: &Error| matches!(e, Error::RateLimited { .. })),
            (500, |e: &Error| matches!(e, Error::ServiceUnavailable { .. })),
            (404, |e: &Error| matches!(e, Error::UnexpectedResponse { .. })),
            (418, |e: &Error| matches!(e, Error::UnexpectedResponse { .. })),
        ];

        for (status, check) in cases {
            let mut mock = MockHttpTransport::new();
            mock.expect_post()
                .returning(move |_, _, _| Ok(HttpResponse::new(status, r#"{"data":{"token":"abc"}}"#)));
            let client = client(mock);

            let err = client.authenticate("a", "b").await.unwrap_err();
            assert!(check(&err), "status {status} gave {err:?}");
            assert!(!client.is_authenticated());
        }
    }

    #[tokio::test]
    async fn test_reauthenticate_replaces_token() {
        let mut mock = MockHttpTransport::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(HttpResponse::new(200, r#"{"data":{"token":"first"}}"#)));
        mock.expect_post()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(HttpResponse::new(200, r#"{"data":{"token":"second"}}"#)));
        mock.expect_get()
            .withf(|_, headers| {
                headers
                    .iter()
                    .any(|(k, v)| k == "Authorization" && v == "Bearer second")
            })
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"{"data":{"devices":[]}}"#)));

        let client = client(mock);
        client.authenticate("a", "b").await.unwrap();
        client.authenticate("a", "b").await.unwrap();
        assert!(client.list_devices().await.unwrap().is_empty());
    }

    // === Devices ===

    #[tokio::test]
    async fn test_list_devices_requires_token() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().times(0);

        let client = client(mock);
        let result = client.list_devices().await;
        assert!(matches!(result, Err(Error::Authentication { .. })));

        let result = client.get_device("X").await;
        assert!(matches!(result, Err(Error::Authentication { .. })));
    }

    #[tokio::test]
    async fn test_list_devices_sends_bearer_token() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .withf(|url, headers| {
                url.path() == "/v1/devices/"
                    && headers
                        .iter()
                        .any(|(k, v)| k == "Authorization" && v == "Bearer abc")
            })
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"{"data":{"devices":[]}}"#)));

        let client = logged_in(mock).await;
        let probes = client.list_devices().await.unwrap();
        assert!(probes.is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_indexes_by_position() {
        let mut mock = MockHttpTransport::new();
        let body = json!({"data": {"devices": [device("zz"), device("aa"), device("mm")]}});
        expect_get(&mut mock, 200, body.to_string());

        let client = logged_in(mock).await;
        let probes = client.list_devices().await.unwrap();

        let seen: Vec<(&str, usize)> = probes.iter().map(|p| (p.id(), p.index())).collect();
        assert_eq!(seen, vec![("zz", 1), ("aa", 2), ("mm", 3)]);
    }

    #[tokio::test]
    async fn test_get_device_single_probe() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .withf(|url, _| url.path() == "/v1/devices/X")
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"data":{"id":"X","temperature":{"internal":"54.5","ambient":"22.1"},"cook":null,"updated_at":1700000000}}"#,
                ))
            });

        let client = logged_in(mock).await;
        let probes = client.get_device("X").await.unwrap();

        assert_eq!(probes.len(), 1);
        let probe = &probes[0];
        assert_eq!(probe.id(), "X");
        assert_eq!(probe.index(), 1);
        assert_eq!(probe.internal_temperature(), 54.5);
        assert_eq!(probe.ambient_temperature(), 22.1);
        assert!(probe.cook().is_none());
    }

    #[tokio::test]
    async fn test_get_device_blank_id_is_rejected() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get().times(0);
        let client = logged_in(mock).await;

        for id in ["", "  "] {
            match client.get_device(id).await {
                Err(Error::InvalidParameter { name, value }) => {
                    assert_eq!(name, "device_id");
                    assert_eq!(value, id);
                }
                other => panic!("id {id:?} gave {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_device_status_mapping() {
        let cases: [(u16, fn(&Error) -> bool); 5] = [
            (401, |e: &Error| matches!(e, Error::Authentication { .. })),
            (404, |e: &Error| matches!(e, Error::UnknownDevice { .. })),
            (429, |e: &Error| matches!(e, Error::RateLimited { .. })),
            (500, |e: &Error| matches!(e, Error::ServiceUnavailable { .. })),
            (502, |e: &Error| matches!(e, Error::UnexpectedResponse { .. })),
        ];

        for (status, check) in cases {
            let mut mock = MockHttpTransport::new();
            // A valid body must not change the outcome.
            let body = json!({"data": {"devices": [device("a")]}}).to_string();
            mock.expect_get()
                .times(2)
                .returning(move |_, _| Ok(HttpResponse::new(status, body.clone())));
            let client = logged_in(mock).await;

            let err = client.list_devices().await.unwrap_err();
            assert!(check(&err), "list: status {status} gave {err:?}");
            let err = client.get_device("a").await.unwrap_err();
            assert!(check(&err), "get: status {status} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_unexpected() {
        for body in ["", "   ", "{}", "[]", "null"] {
            let mut mock = MockHttpTransport::new();
            expect_get(&mut mock, 200, body.to_string());
            let client = logged_in(mock).await;

            let result = client.list_devices().await;
            assert!(
                matches!(result, Err(Error::UnexpectedResponse { .. })),
                "body {body:?} gave {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_device_is_unexpected() {
        let mut mock = MockHttpTransport::new();
        let body = json!({"data": {"devices": [
            device("ok"),
            {"id": "bad", "temperature": {"internal": 1, "ambient": 2}, "updated_at": 1,
             "cook": {"temperature": {"target": 60}, "time": {"remaining": 1, "elapsed": 1}}}
        ]}});
        expect_get(&mut mock, 200, body.to_string());

        let client = logged_in(mock).await;
        let result = client.list_devices().await;
        assert!(matches!(result, Err(Error::UnexpectedResponse { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_token() {
        let mut mock = MockHttpTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _| Err(Error::service_unavailable("request timed out")));

        let client = logged_in(mock).await;
        let result = client.list_devices().await;
        assert!(matches!(result, Err(Error::ServiceUnavailable { .. })));
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client(MockHttpTransport::new());
        *client.token.write() = Some("super-secret".to_string());
        let text = format!("{client:?}");
        assert!(!text.contains("super-secret"));
        assert!(text.contains("authenticated: true"));
    }

    proptest! {
        #[test]
        fn prop_indices_follow_response_order(ids in prop::collection::vec("[a-z0-9]{1,12}", 0..16)) {
            let devices: Vec<Value> = ids.iter().map(|id| device(id)).collect();
            let body = json!({"data": {"devices": devices}}).to_string();

            let mut mock = MockHttpTransport::new();
            expect_get(&mut mock, 200, body);

            let probes = tokio_test::block_on(async {
                let client = logged_in(mock).await;
                client.list_devices().await
            })
            .unwrap();

            prop_assert_eq!(probes.len(), ids.len());
            for (position, (probe, id)) in probes.iter().zip(&ids).enumerate() {
                prop_assert_eq!(probe.index(), position + 1);
                prop_assert_eq!(probe.id(), id.as_str());
            }
        }
    }
}
