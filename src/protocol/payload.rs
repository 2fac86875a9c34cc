//! Wire schema for request and response bodies.
//!
//! Every body the client reads is deserialized into one of these shapes.
//! A body that does not fit its shape is rejected here, before any domain
//! value is built.

use serde::{Deserialize, Serialize};

use super::numeric::NumericField;

/// `POST /login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /login` success body: `{"data": {"token": "..."}}`.
///
/// Both levels are optional so a missing token can be reported as an
/// authentication failure instead of a schema error.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The token, if present and non-empty.
    pub fn token(self) -> Option<String> {
        self.data
            .and_then(|data| data.token)
            .filter(|token| !token.is_empty())
    }
}

/// The `{"data": ...}` envelope around every device response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `GET /devices/` payload under `data`.
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    pub devices: Vec<DevicePayload>,
}

/// One device as reported by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DevicePayload {
    pub id: String,
    pub temperature: ProbeTemperaturePayload,
    #[serde(default)]
    pub cook: Option<CookPayload>,
    pub updated_at: NumericField,
}

/// Probe readings in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProbeTemperaturePayload {
    pub internal: NumericField,
    pub ambient: NumericField,
}

/// An active cook. `null` or absent on an idle device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CookPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub temperature: CookTemperaturePayload,
    pub time: CookTimePayload,
}

/// Cook temperatures in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CookTemperaturePayload {
    pub target: NumericField,
    pub peak: NumericField,
}

/// Cook timings in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CookTimePayload {
    pub remaining: NumericField,
    pub elapsed: NumericField,
}
