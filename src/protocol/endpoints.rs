//! Endpoint URLs and the device-scope abstraction.

use serde_json::Value;
use url::Url;

use super::payload::{DeviceList, DevicePayload, Envelope};
use crate::error::{Error, Result};

/// Login endpoint, relative to the API root.
pub const LOGIN_PATH: &str = "login";

/// Device collection endpoint, relative to the API root.
pub const DEVICES_PATH: &str = "devices/";

/// URL of the login endpoint.
pub fn login_url(base: &Url) -> Result<Url> {
    join(base, LOGIN_PATH)
}

/// Which devices a state request covers.
///
/// Both scopes share one request path. They differ only in the URL and
/// in where the device objects sit inside the `data` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceScope<'a> {
    /// Every device on the account: `GET devices/`, body `data.devices`.
    All,
    /// A single device: `GET devices/{id}`, body `data`.
    One(&'a str),
}

impl DeviceScope<'_> {
    /// URL for this scope. A device id is encoded as one path segment.
    ///
    /// An empty id is rejected: it would resolve to the collection URL.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = join(base, DEVICES_PATH)?;
        if let Self::One(device_id) = self {
            if device_id.is_empty() {
                return Err(Error::InvalidParameter {
                    name: "device_id".to_string(),
                    value: String::new(),
                });
            }
            url.path_segments_mut()
                .map_err(|()| invalid_base(base))?
                .pop_if_empty()
                .push(device_id);
        }
        Ok(url)
    }

    /// Pull the device objects out of a decoded body.
    pub fn extract(&self, body: Value) -> Result<Vec<DevicePayload>> {
        match self {
            Self::All => serde_json::from_value::<Envelope<DeviceList>>(body)
                .map(|envelope| envelope.data.devices),
            Self::One(_) => serde_json::from_value::<Envelope<DevicePayload>>(body)
                .map(|envelope| vec![envelope.data]),
        }
        .map_err(|e| Error::unexpected(format!("malformed device payload: {e}")))
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path).map_err(|_| invalid_base(base))
}

fn invalid_base(base: &Url) -> Error {
    Error::InvalidParameter {
        name: "base_url".to_string(),
        value: base.to_string(),
    }
}
