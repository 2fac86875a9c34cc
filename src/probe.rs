//! Probe struct and methods.
//!
//! Represents one MEATER probe as reported by a single API response.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};

use crate::data::Cook;
use crate::error::{Error, Result};
use crate::protocol::DevicePayload;
use crate::utils::celsius_to_fahrenheit;

/// A snapshot of one probe's latest reading.
///
/// Probes are values: each poll produces new ones. The display index is
/// the probe's 1-based position in the response it came from, so the same
/// physical probe may get a different index on a later call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Probe {
    id: String,
    index: usize,
    internal_temperature: f64,
    ambient_temperature: f64,
    cook: Option<Cook>,
    time_updated: DateTime<Local>,
}

impl Probe {
    /// Create a probe from already-validated values.
    ///
    /// # Arguments
    ///
    /// * `id` - Device identifier assigned by the API
    /// * `index` - 1-based position in the response
    /// * `internal_temperature` - Meat temperature in Celsius
    /// * `ambient_temperature` - Ambient temperature in Celsius
    /// * `cook` - The active cook, if any
    /// * `time_updated` - When the cloud last heard from the probe
    pub fn new(
        id: impl Into<String>,
        index: usize,
        internal_temperature: f64,
        ambient_temperature: f64,
        cook: Option<Cook>,
        time_updated: DateTime<Local>,
    ) -> Self {
        Self {
            id: id.into(),
            index,
            internal_temperature,
            ambient_temperature,
            cook,
            time_updated,
        }
    }

    /// Build a probe from its wire payload and its 1-based position in the
    /// response.
    ///
    /// # Arguments
    ///
    /// * `payload` - One device object from the response body
    /// * `index` - 1-based position of that object in the response
    ///
    /// # Returns
    ///
    /// The probe, or [`Error::UnexpectedResponse`](crate::Error::UnexpectedResponse)
    /// if a temperature, the timestamp or the cook is malformed
    pub fn from_payload(payload: DevicePayload, index: usize) -> Result<Self> {
        let internal_temperature = payload
            .temperature
            .internal
            .to_f64("temperature.internal")?;
        let ambient_temperature = payload.temperature.ambient.to_f64("temperature.ambient")?;
        let updated_at = payload.updated_at.to_i64("updated_at")?;
        let time_updated = local_time(updated_at)?;
        let cook = payload.cook.map(Cook::from_payload).transpose()?;

        Ok(Self {
            id: payload.id,
            index,
            internal_temperature,
            ambient_temperature,
            cook,
            time_updated,
        })
    }

    // === Identification ===

    /// Device identifier assigned by the API.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 1-based position of this probe in the response it came from.
    pub fn index(&self) -> usize {
        self.index
    }

    // === Temperatures ===

    /// Internal (meat) temperature in Celsius.
    pub fn internal_temperature(&self) -> f64 {
        self.internal_temperature
    }

    /// Ambient temperature in Celsius.
    pub fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }

    /// Internal temperature in Fahrenheit.
    pub fn internal_temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.internal_temperature)
    }

    /// Ambient temperature in Fahrenheit.
    pub fn ambient_temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.ambient_temperature)
    }

    // === Cook ===

    /// The active cook, if any.
    pub fn cook(&self) -> Option<&Cook> {
        self.cook.as_ref()
    }

    /// Whether a cook is running on this probe.
    pub fn is_cooking(&self) -> bool {
        self.cook.is_some()
    }

    /// When the cloud last received a reading from this probe, in local time.
    pub fn time_updated(&self) -> DateTime<Local> {
        self.time_updated
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Probe {} - Temp: {}°C Ambient: {}°C Updated: {}",
            self.index,
            self.internal_temperature,
            self.ambient_temperature,
            self.time_updated.format("%Y-%m-%d %H:%M:%S")
        )?;
        match &self.cook {
            Some(cook) => write!(f, "\n{cook}"),
            None => write!(f, "\nCook: None"),
        }
    }
}

fn local_time(unix_seconds: i64) -> Result<DateTime<Local>> {
    Local
        .timestamp_opt(unix_seconds, 0)
        .single()
        .ok_or_else(|| Error::unexpected(format!("updated_at out of range: {unix_seconds}")))
}
